// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The label used for the free-text "Other" option in all the statistics.
pub const OTHER_LABEL: &str = "Other";

/// The minimum number of choices a question must declare (when the choices are not generated).
pub const MIN_NUM_OF_CHOICES: usize = 2;

/// The smallest value accepted for the maximum number of selectable choices.
pub const MIN_FOR_MAX_SELECTABLE: i32 = 2;

/// The smallest value accepted for the minimum number of selectable choices.
pub const MIN_FOR_MIN_SELECTABLE: i32 = 1;

/// The participants from which the options of a question may be generated.
///
/// The generation itself is done outside of this crate. Only the number of
/// generated options is needed here.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum GenerateOptionsFor {
    None,
    Students,
    StudentsExcludingSelf,
    Teams,
    TeamsExcludingSelf,
    Instructors,
}

/// The description of a multi-select question.
///
/// A question is not checked at construction. Use [crate::validate_question]
/// before accepting it.
#[derive(PartialEq, Debug, Clone)]
pub struct MsqQuestion {
    /// The labels of the options, in display order.
    pub choices: Vec<String>,
    pub other_enabled: bool,
    pub generate_options_for: GenerateOptionsFor,
    /// None when there is no restriction.
    pub max_selectable: Option<i32>,
    /// None when there is no restriction. Respondents may then also select "None of the above".
    pub min_selectable: Option<i32>,
    pub has_assigned_weights: bool,
    /// The weights of the choices, in the same order as the choices.
    pub weights: Vec<f64>,
    pub other_weight: f64,
}

impl MsqQuestion {
    pub const DEFAULT_QUESTION: MsqQuestion = MsqQuestion {
        choices: Vec::new(),
        other_enabled: false,
        generate_options_for: GenerateOptionsFor::None,
        max_selectable: None,
        min_selectable: None,
        has_assigned_weights: false,
        weights: Vec::new(),
        other_weight: 0.0,
    };

    /// A question with the given choices and all the other settings left to their defaults.
    pub fn with_choices(choices: &[&str]) -> MsqQuestion {
        MsqQuestion {
            choices: choices.iter().map(|c| c.to_string()).collect(),
            ..MsqQuestion::DEFAULT_QUESTION
        }
    }

    /// The weight attached to an option label, if weights are assigned.
    ///
    /// Labels that are not part of the question weigh zero.
    pub fn weight_of(&self, label: &str) -> Option<f64> {
        if !self.has_assigned_weights {
            return None;
        }
        if self.other_enabled && label == OTHER_LABEL {
            return Some(self.other_weight);
        }
        let w = self
            .choices
            .iter()
            .position(|c| c == label)
            .and_then(|idx| self.weights.get(idx).cloned())
            .unwrap_or(0.0);
        Some(w)
    }
}

/// One of the answers recorded in a response.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Answer {
    /// A selected option. This is either the label of a choice or the content
    /// typed in the "Other" field.
    Option(String),
    /// The respondent explicitly selected nothing.
    NoneOfTheAbove,
}

/// The selection submitted by one respondent for one recipient.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MsqResponse {
    pub recipient: String,
    pub answers: Vec<Answer>,
    /// The content of the "Other" field, when the "Other" option was selected.
    /// The same content is also present in the answers.
    pub other_text: Option<String>,
}

impl MsqResponse {
    pub fn is_other_selected(&self) -> bool {
        self.other_text.is_some()
    }

    /// The answers that count towards the regular options: all the answers
    /// except the "Other" content, removed only once.
    pub fn counted_answers(&self) -> Vec<&Answer> {
        let mut res: Vec<&Answer> = self.answers.iter().collect();
        if let Some(other) = &self.other_text {
            if let Some(idx) = res
                .iter()
                .position(|a| matches!(a, Answer::Option(s) if s == other))
            {
                res.remove(idx);
            }
        }
        res
    }
}

/// The rules that a question configuration may break.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ConfigError {
    NotEnoughChoices,
    EmptyChoice,
    InvalidWeight,
    DuplicateChoice,
    MaxExceedsTotal,
    MaxTooSmall,
    MinTooSmall,
    MinExceedsTotal,
    MinExceedsMax,
}

impl ConfigError {
    /// A stable identifier for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NotEnoughChoices => "NOT_ENOUGH_CHOICES",
            ConfigError::EmptyChoice => "EMPTY_CHOICE",
            ConfigError::InvalidWeight => "INVALID_WEIGHT",
            ConfigError::DuplicateChoice => "DUPLICATE_CHOICE",
            ConfigError::MaxExceedsTotal => "MAX_EXCEEDS_TOTAL",
            ConfigError::MaxTooSmall => "MAX_TOO_SMALL",
            ConfigError::MinTooSmall => "MIN_TOO_SMALL",
            ConfigError::MinExceedsTotal => "MIN_EXCEEDS_TOTAL",
            ConfigError::MinExceedsMax => "MIN_EXCEEDS_MAX",
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotEnoughChoices => write!(
                f,
                "Too little choices for Multiple-choice (multiple answers) question. Minimum number of options is: {}.",
                MIN_NUM_OF_CHOICES
            ),
            ConfigError::EmptyChoice => write!(f, "The Msq options cannot be empty"),
            ConfigError::InvalidWeight => write!(
                f,
                "The weights for the choices of a Multiple-choice (multiple answers) question must be valid non-negative numbers"
            ),
            ConfigError::DuplicateChoice => write!(f, "Duplicate options are not allowed."),
            ConfigError::MaxExceedsTotal => write!(
                f,
                "Maximum selectable choices exceeds the total number of options"
            ),
            ConfigError::MaxTooSmall => write!(
                f,
                "Maximum selectable choices must be at least {}",
                MIN_FOR_MAX_SELECTABLE
            ),
            ConfigError::MinTooSmall => write!(
                f,
                "Minimum selectable choices must be at least {}",
                MIN_FOR_MIN_SELECTABLE
            ),
            ConfigError::MinExceedsTotal => write!(
                f,
                "Minimum selectable choices exceeds the total number of options"
            ),
            ConfigError::MinExceedsMax => write!(
                f,
                "Minimum selectable choices exceeds maximum selectable choices"
            ),
        }
    }
}

// ******** Output data structures *********

/// Statistics for one option of the question.
#[derive(PartialEq, Debug, Clone)]
pub struct OptionStats {
    pub label: String,
    pub count: u64,
    /// Share of all the selections, in percent.
    pub percentage: f64,
    /// None when the question has no weights.
    pub weight: Option<f64>,
    /// Share of the total weight, in percent. None when the question has no weights.
    pub weighted_percentage: Option<f64>,
}

/// Statistics for all the responses given to one recipient.
#[derive(PartialEq, Debug, Clone)]
pub struct RecipientStats {
    pub recipient: String,
    pub counts: Vec<(String, u64)>,
    /// Sum of the weights of all the counted selections.
    pub total: f64,
    /// Average weight per counted selection.
    pub average: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct QuestionStatistics {
    pub total_selections: u64,
    pub options: Vec<OptionStats>,
    /// Only present when the question has weights.
    pub per_recipient: Option<Vec<RecipientStats>>,
}

/// Errors returned by the builder.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MsqErrors {
    /// The question breaks one or more configuration rules.
    InvalidQuestion(Vec<ConfigError>),
    /// A response selected "Other" on a question without this option.
    OtherNotEnabled,
}

impl Error for MsqErrors {}

impl Display for MsqErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MsqErrors::InvalidQuestion(errs) => {
                let codes: Vec<&str> = errs.iter().map(|e| e.code()).collect();
                write!(f, "Invalid question: {}", codes.join(", "))
            }
            MsqErrors::OtherNotEnabled => {
                write!(f, "The 'Other' option is not enabled for this question")
            }
        }
    }
}
