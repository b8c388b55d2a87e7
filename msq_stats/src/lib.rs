/*!

Validation and statistics for multi-select questions (MSQ).

In a multi-select question, respondents pick any number of options from a configured list.
The list may include a free-text "Other" option. When no minimum number of selections is
configured, respondents may also pick nothing at all ("None of the above").

This crate covers three operations, all of them pure functions:

- [validate_question] checks a question configuration and reports every rule it breaks.
- [requires_response_deletion] tells if editing a question invalidates the responses
  already collected.
- [run_question_stats] aggregates the responses into per-option and per-recipient
  statistics.

```
use msq_stats::*;

let question = MsqQuestion::with_choices(&["A", "B"]);
assert!(validate_question(&question, available_option_count(&question, 0)).is_empty());

let responses = vec![
    MsqResponse {
        recipient: "alice".to_string(),
        answers: vec![Answer::Option("A".to_string())],
        other_text: None,
    },
    MsqResponse {
        recipient: "bob".to_string(),
        answers: vec![Answer::Option("A".to_string()), Answer::Option("B".to_string())],
        other_text: None,
    },
];
let stats = run_question_stats(&question, &responses).unwrap();
assert_eq!(stats.total_selections, 3);
assert_eq!(stats.options[0].count, 2);
```

See the [manual] for the command line tool built on top of this library.
 */
pub mod builder;
mod config;
mod diff;
pub mod manual;
mod stats;
mod validation;

use indexmap::IndexMap;
use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;
pub use crate::diff::requires_response_deletion;
pub use crate::stats::{
    percentage, percentage_per_option, total_selections, AnswerFrequency, OptionStatistics,
};
pub use crate::validation::{available_option_count, validate_question};

/// The statistics of a multi-select question.
pub struct MsqStatistics<'a> {
    question: &'a MsqQuestion,
}

impl<'a> MsqStatistics<'a> {
    pub fn new(question: &'a MsqQuestion) -> MsqStatistics<'a> {
        MsqStatistics { question }
    }

    // One entry per choice, then "Other" if enabled.
    fn empty_frequency(&self) -> AnswerFrequency {
        let mut freq = AnswerFrequency::new();
        for choice in self.question.choices.iter() {
            freq.add_option(choice);
        }
        if self.question.other_enabled {
            freq.add_option(OTHER_LABEL);
        }
        freq
    }

    fn count_response(&self, response: &MsqResponse, freq: &mut AnswerFrequency) {
        if response.is_other_selected() {
            freq.increment(OTHER_LABEL);
        }
        for answer in response.counted_answers() {
            match answer {
                Answer::NoneOfTheAbove => {}
                Answer::Option(label) => {
                    if freq.get(label).is_none() {
                        debug!(
                            "count_response: recipient {}: unknown option {:?}",
                            response.recipient, label
                        );
                    }
                    freq.increment(label);
                }
            }
        }
    }

    /// The number of selections per option, for each recipient.
    ///
    /// Recipients are listed in the order in which they first appear in the responses.
    pub fn per_recipient_frequency(
        &self,
        responses: &[MsqResponse],
    ) -> IndexMap<String, AnswerFrequency> {
        let mut res: IndexMap<String, AnswerFrequency> = IndexMap::new();
        for response in responses.iter() {
            let freq = res
                .entry(response.recipient.clone())
                .or_insert_with(|| self.empty_frequency());
            self.count_response(response, freq);
        }
        res
    }
}

impl<'a> OptionStatistics for MsqStatistics<'a> {
    type Response = MsqResponse;

    fn collate_answer_frequency(&self, responses: &[MsqResponse]) -> AnswerFrequency {
        let mut freq = self.empty_frequency();
        for response in responses.iter() {
            self.count_response(response, &mut freq);
        }
        freq
    }

    fn weight_of(&self, label: &str) -> Option<f64> {
        self.question.weight_of(label)
    }
}

/// The number of selections per option over all the responses.
///
/// "None of the above" answers are not counted. The content of the "Other" field only counts
/// for the "Other" option, even if it happens to match the label of a choice.
pub fn collate_answer_frequency(question: &MsqQuestion, responses: &[MsqResponse]) -> AnswerFrequency {
    MsqStatistics::new(question).collate_answer_frequency(responses)
}

/// The number of selections per option, grouped by recipient.
pub fn per_recipient_frequency(
    question: &MsqQuestion,
    responses: &[MsqResponse],
) -> IndexMap<String, AnswerFrequency> {
    MsqStatistics::new(question).per_recipient_frequency(responses)
}

/// The share of the total weight for each option. Empty if the question has no weights.
pub fn weighted_percentage_per_option(
    question: &MsqQuestion,
    freq: &AnswerFrequency,
) -> Vec<(String, f64)> {
    MsqStatistics::new(question).weighted_percentage_per_option(freq)
}

/// Computes all the statistics of a question.
///
/// Returns None if there is nothing to show: no response, or only "None of the above".
/// The per-recipient statistics are only computed for questions with weights.
pub fn run_question_stats(
    question: &MsqQuestion,
    responses: &[MsqResponse],
) -> Option<QuestionStatistics> {
    info!(
        "Processing {:?} responses, choices: {:?}, other enabled: {}, weights: {}",
        responses.len(),
        question.choices,
        question.other_enabled,
        question.has_assigned_weights
    );
    let msq_stats = MsqStatistics::new(question);
    let freq = msq_stats.collate_answer_frequency(responses);
    debug!("run_question_stats: frequency: {:?}", freq.to_vec());

    let total = match total_selections(&freq) {
        Some(x) => x,
        None => {
            info!("No option selected, no statistics to show");
            return None;
        }
    };

    let percentages: HashMap<String, f64> = percentage_per_option(&freq).into_iter().collect();
    let weighted: HashMap<String, f64> = msq_stats
        .weighted_percentage_per_option(&freq)
        .into_iter()
        .collect();

    let options: Vec<OptionStats> = freq
        .iter()
        .map(|(label, count)| OptionStats {
            label: label.to_string(),
            count,
            percentage: percentages.get(label).cloned().unwrap_or(0.0),
            weight: msq_stats.weight_of(label),
            weighted_percentage: weighted.get(label).cloned(),
        })
        .collect();

    let per_recipient = if question.has_assigned_weights {
        let rows: Vec<RecipientStats> = msq_stats
            .per_recipient_frequency(responses)
            .into_iter()
            .map(|(recipient, rfreq)| {
                let (total, average) = msq_stats.recipient_weight_summary(&rfreq);
                RecipientStats {
                    recipient,
                    counts: rfreq.to_vec(),
                    total,
                    average,
                }
            })
            .collect();
        debug!("run_question_stats: {} recipients", rows.len());
        Some(rows)
    } else {
        None
    };

    for o in options.iter() {
        info!(
            "{:>8} {} ({:.2}%) weighted: {:?}",
            o.count, o.label, o.percentage, o.weighted_percentage
        );
    }

    Some(QuestionStatistics {
        total_selections: total,
        options,
        per_recipient,
    })
}
