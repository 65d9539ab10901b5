use super::state::TextInput;
use crate::worklog::watcher::FieldWatcher;
use crate::worklog::{DraftRecord, FieldId, WorkLogValues};

/// The work-log modal: one input per field plus the live feedback.
#[derive(Debug, Clone)]
pub struct WorkLogForm {
    inputs: [TextInput; FieldId::COUNT],
    pub focused: FieldId,
    pub watcher: FieldWatcher,
}

impl Default for WorkLogForm {
    fn default() -> Self {
        Self {
            inputs: Default::default(),
            focused: FieldId::WorkDescription,
            watcher: FieldWatcher::new(),
        }
    }
}

impl WorkLogForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, field: FieldId) -> &TextInput {
        &self.inputs[field.index()]
    }

    fn focused_input(&mut self) -> &mut TextInput {
        &mut self.inputs[self.focused.index()]
    }

    /// Current raw values.
    pub fn values(&self) -> WorkLogValues {
        let mut values = WorkLogValues::default();
        for field in FieldId::ALL {
            values.set(field, self.input(field).value.as_str());
        }
        values
    }

    /// Fire the input-change pipeline for `field`.
    fn changed(&mut self, field: FieldId) {
        let value = self.input(field).value.clone();
        self.watcher.on_input(field, &value);
    }

    pub fn type_char(&mut self, c: char) {
        self.focused_input().insert(c);
        self.changed(self.focused);
    }

    /// Line break inside a text area; single-line fields ignore it.
    pub fn newline(&mut self) {
        if self.focused.is_multiline() {
            self.type_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.focused_input().backspace() {
            self.changed(self.focused);
        }
    }

    pub fn move_left(&mut self) {
        self.focused_input().move_left();
    }

    pub fn move_right(&mut self) {
        self.focused_input().move_right();
    }

    pub fn home(&mut self) {
        self.focused_input().home();
    }

    pub fn end(&mut self) {
        self.focused_input().end();
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.previous();
    }

    /// Put a stored draft back into the inputs. The length-checked fields go
    /// through the input pipeline again; blockers and time spent are set
    /// silently, so their markers keep whatever state they had.
    pub fn restore(&mut self, draft: &DraftRecord) {
        for field in FieldId::ALL {
            self.inputs[field.index()] = TextInput::with_value(draft.get(field));
            if !matches!(field, FieldId::BlockersEncountered | FieldId::TimeSpent) {
                self.changed(field);
            }
        }
    }

    pub fn mark_invalid(&mut self, fields: &[FieldId]) {
        self.watcher.mark_invalid(fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worklog::watcher::Marker;

    fn type_str(form: &mut WorkLogForm, text: &str) {
        for c in text.chars() {
            form.type_char(c);
        }
    }

    #[test]
    fn typing_updates_counter_of_focused_field() {
        let mut form = WorkLogForm::new();
        form.focus_next();
        type_str(&mut form, "src/lib.rs");

        assert_eq!(form.values().files_changed, "src/lib.rs");
        assert_eq!(form.watcher.feedback(FieldId::FilesChanged).count, 10);

        form.backspace();
        assert_eq!(form.watcher.feedback(FieldId::FilesChanged).count, 9);
    }

    #[test]
    fn time_spent_ignores_newline() {
        let mut form = WorkLogForm::new();
        form.focused = FieldId::TimeSpent;
        type_str(&mut form, "4");
        form.newline();
        assert_eq!(form.values().time_spent, "4");
    }

    #[test]
    fn restore_revalidates_text_fields_only() {
        let mut form = WorkLogForm::new();
        let draft = DraftRecord {
            work_description: "w".repeat(100),
            files_changed: "short".to_string(),
            time_spent: "5".to_string(),
            blockers_encountered: "none".to_string(),
            ..DraftRecord::default()
        };

        form.restore(&draft);

        assert_eq!(form.values(), draft);
        let description = form.watcher.feedback(FieldId::WorkDescription);
        assert_eq!(description.count, 100);
        assert_eq!(description.marker, Marker::Valid);
        assert_eq!(form.watcher.feedback(FieldId::FilesChanged).count, 5);
        assert_eq!(
            form.watcher.feedback(FieldId::TimeSpent).marker,
            Marker::Unmarked
        );
    }
}
