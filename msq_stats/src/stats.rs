// Shared statistics for the questions in which respondents pick among options.

use std::ops::{Add, AddAssign};

use indexmap::IndexMap;

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash, Default)]
struct SelectionCount(u64);

impl SelectionCount {
    const EMPTY: SelectionCount = SelectionCount(0);
    const ONE: SelectionCount = SelectionCount(1);
}

impl std::iter::Sum for SelectionCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        SelectionCount(iter.map(|sc| sc.0).sum())
    }
}

impl AddAssign for SelectionCount {
    fn add_assign(&mut self, rhs: SelectionCount) {
        self.0 += rhs.0;
    }
}

impl Add for SelectionCount {
    type Output = SelectionCount;
    fn add(self: SelectionCount, rhs: SelectionCount) -> SelectionCount {
        SelectionCount(self.0 + rhs.0)
    }
}

/// The number of selections for each option label, in insertion order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AnswerFrequency {
    counts: IndexMap<String, SelectionCount>,
}

impl AnswerFrequency {
    pub fn new() -> AnswerFrequency {
        AnswerFrequency::default()
    }

    /// Adds an option with no selection. Does nothing if the option is already present.
    pub fn add_option(&mut self, label: &str) {
        self.counts
            .entry(label.to_string())
            .or_insert(SelectionCount::EMPTY);
    }

    /// Counts one more selection for this option, adding the option first if needed.
    pub fn increment(&mut self, label: &str) {
        *self
            .counts
            .entry(label.to_string())
            .or_insert(SelectionCount::EMPTY) += SelectionCount::ONE;
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.counts.get(label).map(|c| c.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(l, c)| (l.as_str(), c.0))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn to_vec(&self) -> Vec<(String, u64)> {
        self.iter().map(|(l, c)| (l.to_string(), c)).collect()
    }

    fn sum(&self) -> SelectionCount {
        self.counts.values().copied().sum()
    }
}

/// The total number of selections, if there is anything to show.
///
/// Returns None when nothing was selected (no response at all, or only
/// "None of the above").
pub fn total_selections(freq: &AnswerFrequency) -> Option<u64> {
    match freq.sum() {
        SelectionCount::EMPTY => None,
        SelectionCount(x) => Some(x),
    }
}

/// `numerator / denominator * 100`, or zero for an empty denominator.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        100.0 * numerator / denominator
    }
}

/// The share of the selections for each option, in percent.
pub fn percentage_per_option(freq: &AnswerFrequency) -> Vec<(String, f64)> {
    let total = freq.sum().0 as f64;
    freq.iter()
        .map(|(label, count)| (label.to_string(), percentage(count as f64, total)))
        .collect()
}

/// The capability shared by all the question types with options.
///
/// Each type decides how its responses are counted and how much each option weighs. The
/// weighting math is common to all of them.
pub trait OptionStatistics {
    type Response;

    /// The number of selections per option over all the responses.
    fn collate_answer_frequency(&self, responses: &[Self::Response]) -> AnswerFrequency;

    /// The weight of an option, or None if the question has no weights.
    fn weight_of(&self, label: &str) -> Option<f64>;

    /// The share of the total weight for each option, in percent.
    ///
    /// Empty if the question has no weights.
    fn weighted_percentage_per_option(&self, freq: &AnswerFrequency) -> Vec<(String, f64)> {
        let mut weighted: Vec<(String, f64)> = Vec::new();
        for (label, count) in freq.iter() {
            match self.weight_of(label) {
                Some(w) => weighted.push((label.to_string(), count as f64 * w)),
                None => return Vec::new(),
            }
        }
        let total: f64 = weighted.iter().map(|(_, w)| *w).sum();
        weighted
            .into_iter()
            .map(|(label, w)| (label, percentage(w, total)))
            .collect()
    }

    /// The total weight of all the selections, and the average weight per selection.
    fn recipient_weight_summary(&self, freq: &AnswerFrequency) -> (f64, f64) {
        let mut total = 0.0;
        let mut num_selections: u64 = 0;
        for (label, count) in freq.iter() {
            total += count as f64 * self.weight_of(label).unwrap_or(0.0);
            num_selections += count;
        }
        let average = if num_selections == 0 {
            0.0
        } else {
            total / num_selections as f64
        };
        (total, average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(data: &[(&str, u64)]) -> AnswerFrequency {
        let mut f = AnswerFrequency::new();
        for (label, count) in data {
            f.add_option(label);
            for _ in 0..*count {
                f.increment(label);
            }
        }
        f
    }

    struct Fixed(Option<Vec<(&'static str, f64)>>);

    impl OptionStatistics for Fixed {
        type Response = ();

        fn collate_answer_frequency(&self, _responses: &[()]) -> AnswerFrequency {
            AnswerFrequency::new()
        }

        fn weight_of(&self, label: &str) -> Option<f64> {
            self.0.as_ref().map(|ws| {
                ws.iter()
                    .find(|(l, _)| *l == label)
                    .map(|(_, w)| *w)
                    .unwrap_or(0.0)
            })
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut f = AnswerFrequency::new();
        f.add_option("B");
        f.add_option("A");
        f.increment("C");
        f.add_option("B");
        assert_eq!(
            f.to_vec(),
            vec![
                ("B".to_string(), 0),
                ("A".to_string(), 0),
                ("C".to_string(), 1)
            ]
        );
        assert_eq!(f.get("C"), Some(1));
        assert_eq!(f.get("D"), None);
    }

    #[test]
    fn no_total_when_nothing_selected() {
        assert_eq!(total_selections(&freq(&[("A", 0), ("B", 0)])), None);
        assert_eq!(total_selections(&AnswerFrequency::new()), None);
        assert_eq!(total_selections(&freq(&[("A", 2), ("B", 1)])), Some(3));
    }

    #[test]
    fn percentages() {
        let p = percentage_per_option(&freq(&[("A", 1), ("B", 3)]));
        assert_eq!(p, vec![("A".to_string(), 25.0), ("B".to_string(), 75.0)]);
        let empty = percentage_per_option(&freq(&[("A", 0)]));
        assert_eq!(empty, vec![("A".to_string(), 0.0)]);
    }

    #[test]
    fn weighted_percentages() {
        let s = Fixed(Some(vec![("A", 1.0), ("B", 3.0)]));
        let w = s.weighted_percentage_per_option(&freq(&[("A", 2), ("B", 2)]));
        assert_eq!(w, vec![("A".to_string(), 25.0), ("B".to_string(), 75.0)]);

        // All the weights are zero.
        let z = Fixed(Some(vec![]));
        let w = z.weighted_percentage_per_option(&freq(&[("A", 2)]));
        assert_eq!(w, vec![("A".to_string(), 0.0)]);
    }

    #[test]
    fn no_weighted_percentages_without_weights() {
        let s = Fixed(None);
        assert!(s
            .weighted_percentage_per_option(&freq(&[("A", 2)]))
            .is_empty());
    }

    #[test]
    fn weight_summary() {
        let s = Fixed(Some(vec![("A", 1.0), ("B", 4.0)]));
        assert_eq!(
            s.recipient_weight_summary(&freq(&[("A", 2), ("B", 1)])),
            (6.0, 2.0)
        );
        assert_eq!(
            s.recipient_weight_summary(&freq(&[("A", 0), ("B", 0)])),
            (0.0, 0.0)
        );
    }
}
