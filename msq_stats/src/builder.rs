pub use crate::config::*;
use log::warn;

use crate::validation::validate_question;

/// A builder for collecting the responses to one question.
///
/// The question is checked when the builder is created.
///
/// ```
/// use msq_stats::builder::Builder;
/// use msq_stats::MsqQuestion;
/// # use msq_stats::MsqErrors;
///
/// let question = MsqQuestion::with_choices(&["Anna", "Bob"]);
/// let mut builder = Builder::new(&question, 2)?;
///
/// builder.add_response_simple("team-1", &["Anna".to_string(), "Bob".to_string()])?;
/// builder.add_response_simple("team-2", &["".to_string()])?;
///
/// let stats = builder.build().unwrap();
/// assert_eq!(stats.total_selections, 2);
///
/// # Ok::<(), MsqErrors>(())
/// ```
pub struct Builder {
    pub(crate) _question: MsqQuestion,
    pub(crate) _responses: Vec<MsqResponse>,
}

impl Builder {
    pub fn new(question: &MsqQuestion, available_option_count: usize) -> Result<Builder, MsqErrors> {
        let errors = validate_question(question, available_option_count);
        if !errors.is_empty() {
            return Err(MsqErrors::InvalidQuestion(errors));
        }
        Ok(Builder {
            _question: question.clone(),
            _responses: Vec::new(),
        })
    }

    /// Adds a response that does not use the "Other" option.
    pub fn add_response_simple(
        &mut self,
        recipient: &str,
        selected: &[String],
    ) -> Result<(), MsqErrors> {
        self.add_response(recipient, selected, None)
    }

    /// Adds a response.
    ///
    /// selected: the options picked by the respondent. An empty string stands for
    /// "None of the above".
    /// other_text: the content of the "Other" field, if this option was picked. It does not need
    /// to be repeated in `selected`.
    pub fn add_response(
        &mut self,
        recipient: &str,
        selected: &[String],
        other_text: Option<String>,
    ) -> Result<(), MsqErrors> {
        if other_text.is_some() && !self._question.other_enabled {
            return Err(MsqErrors::OtherNotEnabled);
        }
        let mut answers: Vec<Answer> = Vec::new();
        for s in selected {
            let answer = if s.is_empty() {
                Answer::NoneOfTheAbove
            } else {
                if other_text.as_ref() != Some(s) && !self._question.choices.contains(s) {
                    warn!(
                        "add_response: recipient {}: {:?} is not an option of the question",
                        recipient, s
                    );
                }
                Answer::Option(s.clone())
            };
            answers.push(answer);
        }
        if let Some(other) = &other_text {
            let present = answers
                .iter()
                .any(|a| matches!(a, Answer::Option(s) if s == other));
            if !present {
                answers.push(Answer::Option(other.clone()));
            }
        }
        self.add_response_2(&MsqResponse {
            recipient: recipient.to_string(),
            answers,
            other_text,
        })
    }

    pub fn add_response_2(&mut self, response: &MsqResponse) -> Result<(), MsqErrors> {
        self._responses.push(response.clone());
        Ok(())
    }

    pub fn responses(&self) -> &[MsqResponse] {
        &self._responses
    }

    /// Computes the statistics over all the responses added so far.
    pub fn build(&self) -> Option<QuestionStatistics> {
        crate::run_question_stats(&self._question, &self._responses)
    }
}
