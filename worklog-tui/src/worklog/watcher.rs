use std::collections::HashMap;

use super::rules::{form_field, input_length, is_time_spent_valid};
use super::values::FieldId;

/// Visual validity marker of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    Unmarked,
    Valid,
    Invalid,
}

/// Colour role of a character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterTone {
    #[default]
    Primary,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFeedback {
    /// Only meaningful for the length-checked fields.
    pub count: usize,
    pub marker: Marker,
    pub tone: CounterTone,
}

/// Live input → feedback binding for every work-log field.
#[derive(Debug, Clone, Default)]
pub struct FieldWatcher {
    feedback: HashMap<FieldId, FieldFeedback>,
}

impl FieldWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feedback(&self, field: FieldId) -> FieldFeedback {
        self.feedback.get(&field).copied().unwrap_or_default()
    }

    /// React to an input-change event on `field`.
    ///
    /// A field that now satisfies its rule is marked valid. One that does not
    /// only loses its valid marker; an invalid marker left by a failed submit
    /// stays until the rule is met.
    pub fn on_input(&mut self, field: FieldId, value: &str) {
        let entry = self.feedback.entry(field).or_default();
        let valid = if let Some(rule) = form_field(field) {
            entry.count = input_length(value);
            let valid = rule.is_satisfied_by(value);
            entry.tone = if valid {
                CounterTone::Success
            } else {
                CounterTone::Primary
            };
            valid
        } else if field == FieldId::TimeSpent {
            is_time_spent_valid(value)
        } else {
            return;
        };

        if valid {
            entry.marker = Marker::Valid;
        } else if entry.marker == Marker::Valid {
            entry.marker = Marker::Unmarked;
        }
    }

    /// Flag fields rejected by submit-time validation.
    pub fn mark_invalid(&mut self, fields: &[FieldId]) {
        for field in fields {
            self.feedback.entry(*field).or_default().marker = Marker::Invalid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_length_and_threshold() {
        let mut watcher = FieldWatcher::new();

        watcher.on_input(FieldId::FilesChanged, &"x".repeat(19));
        let fb = watcher.feedback(FieldId::FilesChanged);
        assert_eq!(fb.count, 19);
        assert_eq!(fb.marker, Marker::Unmarked);
        assert_eq!(fb.tone, CounterTone::Primary);

        watcher.on_input(FieldId::FilesChanged, &"x".repeat(20));
        let fb = watcher.feedback(FieldId::FilesChanged);
        assert_eq!(fb.count, 20);
        assert_eq!(fb.marker, Marker::Valid);
        assert_eq!(fb.tone, CounterTone::Success);
    }

    #[test]
    fn counter_counts_characters_not_bytes() {
        let mut watcher = FieldWatcher::new();
        watcher.on_input(FieldId::TestingDone, "åäö");
        assert_eq!(watcher.feedback(FieldId::TestingDone).count, 3);
    }

    #[test]
    fn live_counter_includes_whitespace() {
        let mut watcher = FieldWatcher::new();
        watcher.on_input(FieldId::FilesChanged, &" ".repeat(20));
        assert_eq!(watcher.feedback(FieldId::FilesChanged).marker, Marker::Valid);
    }

    #[test]
    fn dropping_below_threshold_removes_valid_marker() {
        let mut watcher = FieldWatcher::new();
        watcher.on_input(FieldId::SolutionApproach, &"s".repeat(50));
        watcher.on_input(FieldId::SolutionApproach, &"s".repeat(49));
        assert_eq!(
            watcher.feedback(FieldId::SolutionApproach).marker,
            Marker::Unmarked
        );
    }

    #[test]
    fn invalid_marker_persists_until_rule_is_met() {
        let mut watcher = FieldWatcher::new();
        watcher.mark_invalid(&[FieldId::WorkDescription, FieldId::TimeSpent]);

        watcher.on_input(FieldId::WorkDescription, "still short");
        assert_eq!(
            watcher.feedback(FieldId::WorkDescription).marker,
            Marker::Invalid
        );

        watcher.on_input(FieldId::WorkDescription, &"w".repeat(100));
        assert_eq!(watcher.feedback(FieldId::WorkDescription).marker, Marker::Valid);

        watcher.on_input(FieldId::TimeSpent, "24");
        assert_eq!(watcher.feedback(FieldId::TimeSpent).marker, Marker::Valid);
    }

    #[test]
    fn non_numeric_time_spent_is_just_invalid() {
        let mut watcher = FieldWatcher::new();
        watcher.on_input(FieldId::TimeSpent, "8");
        watcher.on_input(FieldId::TimeSpent, "eight");
        assert_eq!(watcher.feedback(FieldId::TimeSpent).marker, Marker::Unmarked);
    }

    #[test]
    fn blockers_have_no_feedback() {
        let mut watcher = FieldWatcher::new();
        watcher.on_input(FieldId::BlockersEncountered, "none");
        assert_eq!(
            watcher.feedback(FieldId::BlockersEncountered),
            FieldFeedback::default()
        );
    }
}
