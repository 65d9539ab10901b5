use super::values::{FieldId, WorkLogValues};

/// A text field with a minimum length requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub id: FieldId,
    pub min_length: usize,
}

/// The text fields that carry a minimum length. Drives both the live counters
/// and the submit-time validation.
pub const WORK_LOG_FIELDS: [FormField; 5] = [
    FormField {
        id: FieldId::WorkDescription,
        min_length: 100,
    },
    FormField {
        id: FieldId::FilesChanged,
        min_length: 20,
    },
    FormField {
        id: FieldId::SolutionApproach,
        min_length: 50,
    },
    FormField {
        id: FieldId::TestingDone,
        min_length: 50,
    },
    FormField {
        id: FieldId::TestingInstructions,
        min_length: 50,
    },
];

pub const MAX_HOURS_PER_LOG: f64 = 24.0;
pub const TIME_SPENT_ERROR: &str = "Time spent must be between 0.1 and 24 hours";

pub fn form_field(id: FieldId) -> Option<FormField> {
    WORK_LOG_FIELDS.iter().copied().find(|f| f.id == id)
}

/// Length as shown by the counters.
pub fn input_length(value: &str) -> usize {
    value.chars().count()
}

impl FormField {
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        input_length(value) >= self.min_length
    }

    pub fn violation_message(&self) -> String {
        format!(
            "{} must be at least {} characters",
            self.id.label(),
            self.min_length
        )
    }
}

/// Parse the leading decimal number of `input`, ignoring leading whitespace and
/// any trailing garbage ("7.5h" parses as 7.5). Returns `None` when no number
/// starts the string.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Valid iff `0 < hours <= 24`. Unparseable input is simply invalid.
pub fn is_time_spent_valid(raw: &str) -> bool {
    parse_float_prefix(raw).is_some_and(|hours| hours > 0.0 && hours <= MAX_HOURS_PER_LOG)
}

/// Outcome of one validation pass over the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub invalid_fields: Vec<FieldId>,
}

/// Submit-time validation: every rule runs (no short-circuit) against the
/// trimmed text values and the raw time-spent value.
pub fn validate_work_log(values: &WorkLogValues) -> ValidationResult {
    let mut errors = Vec::new();
    let mut invalid_fields = Vec::new();

    for field in WORK_LOG_FIELDS {
        if !field.is_satisfied_by(values.get(field.id).trim()) {
            errors.push(field.violation_message());
            invalid_fields.push(field.id);
        }
    }

    if !is_time_spent_valid(&values.time_spent) {
        errors.push(TIME_SPENT_ERROR.to_string());
        invalid_fields.push(FieldId::TimeSpent);
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        invalid_fields,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A form that passes every rule.
    pub(crate) fn valid_values() -> WorkLogValues {
        WorkLogValues {
            work_description: "d".repeat(100),
            files_changed: "src/worklog/rules.rs".to_string(),
            solution_approach: "s".repeat(50),
            testing_done: "t".repeat(50),
            testing_instructions: "i".repeat(50),
            blockers_encountered: String::new(),
            time_spent: "2.5".to_string(),
        }
    }

    #[test]
    fn time_spent_boundaries() {
        assert!(is_time_spent_valid("24"));
        assert!(is_time_spent_valid("0.1"));
        assert!(!is_time_spent_valid("24.1"));
        assert!(!is_time_spent_valid("0"));
        assert!(!is_time_spent_valid("-3"));
        assert!(!is_time_spent_valid(""));
        assert!(!is_time_spent_valid("abc"));
    }

    #[test]
    fn parse_float_prefix_follows_leading_number() {
        assert_eq!(parse_float_prefix("  7.5h"), Some(7.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("3."), Some(3.0));
        assert_eq!(parse_float_prefix("1e1x"), Some(10.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("h7"), None);
    }

    #[test]
    fn valid_form_has_no_errors() {
        let result = validate_work_log(&valid_values());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn short_description_yields_exactly_one_error() {
        let mut values = valid_values();
        values.work_description = "d".repeat(99);

        let result = validate_work_log(&values);

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["work description must be at least 100 characters".to_string()]
        );
        assert_eq!(result.invalid_fields, vec![FieldId::WorkDescription]);
    }

    #[test]
    fn all_violations_are_collected_in_table_order() {
        let values = WorkLogValues::default();

        let result = validate_work_log(&values);

        assert_eq!(result.errors.len(), 6);
        assert_eq!(result.errors[1], "files changed must be at least 20 characters");
        assert_eq!(result.errors[5], TIME_SPENT_ERROR);
        assert_eq!(
            result.invalid_fields,
            vec![
                FieldId::WorkDescription,
                FieldId::FilesChanged,
                FieldId::SolutionApproach,
                FieldId::TestingDone,
                FieldId::TestingInstructions,
                FieldId::TimeSpent,
            ]
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_at_submit() {
        let mut values = valid_values();
        values.files_changed = format!("  {}  ", "f".repeat(19));

        let result = validate_work_log(&values);

        assert_eq!(result.invalid_fields, vec![FieldId::FilesChanged]);
    }

    #[test]
    fn blockers_are_optional() {
        let mut values = valid_values();
        values.blockers_encountered = "   ".to_string();
        assert!(validate_work_log(&values).is_valid);
    }
}
