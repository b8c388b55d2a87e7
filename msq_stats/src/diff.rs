use log::debug;

use crate::config::MsqQuestion;

/// Tells if editing a question from `old` to `new` makes the existing responses invalid.
///
/// Reordering the choices or loosening a restriction keeps the responses. Adding a
/// restriction that was not there before always invalidates them.
pub fn requires_response_deletion(old: &MsqQuestion, new: &MsqQuestion) -> bool {
    let reason: Option<&str> = if !same_choices(&old.choices, &new.choices) {
        Some("choices changed")
    } else if old.generate_options_for != new.generate_options_for {
        Some("generated options changed")
    } else if old.max_selectable.is_none() && new.max_selectable.is_some() {
        Some("max selectable restriction added")
    } else if old.min_selectable.is_none() && new.min_selectable.is_some() {
        Some("min selectable restriction added")
    } else if matches!((old.min_selectable, new.min_selectable), (Some(o), Some(n)) if o < n) {
        Some("min selectable restriction tightened")
    } else if matches!((old.max_selectable, new.max_selectable), (Some(o), Some(n)) if o > n) {
        Some("max selectable restriction tightened")
    } else if old.other_enabled != new.other_enabled {
        Some("other option toggled")
    } else {
        None
    };
    debug!("requires_response_deletion: {:?}", reason);
    reason.is_some()
}

// Same size, and each list contains all the elements of the other one.
fn same_choices(old: &[String], new: &[String]) -> bool {
    old.len() == new.len()
        && old.iter().all(|c| new.contains(c))
        && new.iter().all(|c| old.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> MsqQuestion {
        MsqQuestion::with_choices(&["A", "B", "C"])
    }

    #[test]
    fn unchanged_question() {
        assert!(!requires_response_deletion(&base(), &base()));
    }

    #[test]
    fn reordered_choices() {
        let old = MsqQuestion::with_choices(&["A", "B"]);
        let new = MsqQuestion::with_choices(&["B", "A"]);
        assert!(!requires_response_deletion(&old, &new));
    }

    #[test]
    fn replaced_choice() {
        let old = MsqQuestion::with_choices(&["A", "B"]);
        let new = MsqQuestion::with_choices(&["A", "C"]);
        assert!(requires_response_deletion(&old, &new));
        let added = MsqQuestion::with_choices(&["A", "B", "C"]);
        assert!(requires_response_deletion(&old, &added));
    }

    #[test]
    fn min_restriction() {
        let unset = base();
        let two = MsqQuestion {
            min_selectable: Some(2),
            ..base()
        };
        let one = MsqQuestion {
            min_selectable: Some(1),
            ..base()
        };
        let three = MsqQuestion {
            min_selectable: Some(3),
            ..base()
        };
        assert!(requires_response_deletion(&unset, &two));
        assert!(!requires_response_deletion(&two, &one));
        assert!(requires_response_deletion(&two, &three));
        assert!(!requires_response_deletion(&two, &unset));
    }

    #[test]
    fn max_restriction() {
        let unset = base();
        let two = MsqQuestion {
            max_selectable: Some(2),
            ..base()
        };
        let three = MsqQuestion {
            max_selectable: Some(3),
            ..base()
        };
        // Even a very permissive new restriction counts.
        assert!(requires_response_deletion(&unset, &three));
        assert!(requires_response_deletion(&three, &two));
        assert!(!requires_response_deletion(&two, &three));
        assert!(!requires_response_deletion(&three, &unset));
    }

    #[test]
    fn other_and_generation() {
        let other = MsqQuestion {
            other_enabled: true,
            ..base()
        };
        assert!(requires_response_deletion(&base(), &other));
        assert!(requires_response_deletion(&other, &base()));

        let generated = MsqQuestion {
            generate_options_for: crate::GenerateOptionsFor::Teams,
            ..base()
        };
        assert!(requires_response_deletion(&base(), &generated));
    }

    #[test]
    fn weights_do_not_matter() {
        let weighted = MsqQuestion {
            has_assigned_weights: true,
            weights: vec![1.0, 2.0, 3.0],
            ..base()
        };
        assert!(!requires_response_deletion(&base(), &weighted));
    }
}
