use log::debug;
use std::collections::HashSet;

use crate::config::*;

/// The number of options a respondent can pick from.
///
/// When the options are generated from the participants, `generated_option_count` is the
/// number of options produced for this question. It is ignored otherwise.
pub fn available_option_count(question: &MsqQuestion, generated_option_count: usize) -> usize {
    let other = if question.other_enabled { 1 } else { 0 };
    match question.generate_options_for {
        GenerateOptionsFor::None => question.choices.len() + other,
        _ => generated_option_count + other,
    }
}

/// Checks all the rules of a question configuration.
///
/// All the violations are returned, in the order of the rules. An empty list means that the
/// question is valid.
pub fn validate_question(question: &MsqQuestion, available_options: usize) -> Vec<ConfigError> {
    let mut errors: Vec<ConfigError> = Vec::new();

    if question.generate_options_for == GenerateOptionsFor::None {
        errors.extend(check_choices(question));
    }
    errors.extend(check_selectable(question, available_options as i64));

    debug!(
        "validate_question: {} choices, {} available options, errors: {:?}",
        question.choices.len(),
        available_options,
        errors
    );
    errors
}

fn check_choices(question: &MsqQuestion) -> Vec<ConfigError> {
    let mut errors: Vec<ConfigError> = Vec::new();
    let choices = &question.choices;

    if choices.len() < MIN_NUM_OF_CHOICES {
        errors.push(ConfigError::NotEnoughChoices);
    }

    if choices.iter().any(|c| c.trim().is_empty()) {
        errors.push(ConfigError::EmptyChoice);
    }

    // Weights
    if question.has_assigned_weights {
        if question.weights.len() != choices.len() {
            errors.push(ConfigError::InvalidWeight);
        }
        if !question.other_enabled && question.other_weight != 0.0 {
            errors.push(ConfigError::InvalidWeight);
        }
        // One error per negative weight.
        for w in question.weights.iter() {
            if *w < 0.0 {
                errors.push(ConfigError::InvalidWeight);
            }
        }
        if question.other_enabled && question.other_weight < 0.0 {
            errors.push(ConfigError::InvalidWeight);
        }
    } else if !question.weights.is_empty() || question.other_weight != 0.0 {
        errors.push(ConfigError::InvalidWeight);
    }

    let distinct: HashSet<&str> = choices.iter().map(|c| c.trim()).collect();
    if distinct.len() != choices.len() {
        errors.push(ConfigError::DuplicateChoice);
    }
    errors
}

fn check_selectable(question: &MsqQuestion, available: i64) -> Vec<ConfigError> {
    let mut errors: Vec<ConfigError> = Vec::new();

    if let Some(max) = question.max_selectable {
        if available < max as i64 {
            errors.push(ConfigError::MaxExceedsTotal);
        } else if max < MIN_FOR_MAX_SELECTABLE {
            errors.push(ConfigError::MaxTooSmall);
        }
    }

    if let Some(min) = question.min_selectable {
        if min < MIN_FOR_MIN_SELECTABLE {
            errors.push(ConfigError::MinTooSmall);
        }
        if min as i64 > available {
            errors.push(ConfigError::MinExceedsTotal);
        }
    }

    if let (Some(min), Some(max)) = (question.min_selectable, question.max_selectable) {
        if min > max {
            errors.push(ConfigError::MinExceedsMax);
        }
    }
    errors
}
