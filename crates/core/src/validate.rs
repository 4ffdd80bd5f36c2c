//! Per-field validation rules for the profile form.
//!
//! Rules live in one static table (field name, message, predicate) so the
//! form layer can evaluate the whole draft at submit time and a single
//! field at blur time through the same code path. Fields without an entry
//! here accept anything.

use validator::ValidateEmail;

use crate::error::FieldError;
use crate::form::ProfileDraft;

/// Required length of a contact number, counted in characters so a
/// leading zero survives (`09171234567`). This is a digit-count
/// convention, not a numeric range.
pub const CONTACT_NUMBER_LEN: usize = 11;

/// Wire format for dates entered as free text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One validation rule: the predicate returns `true` when the draft
/// passes.
pub struct FieldRule {
    /// Field name as it appears on the wire.
    pub field: &'static str,
    /// Message shown inline next to the field when the rule fails.
    pub message: &'static str,
    check: fn(&ProfileDraft) -> bool,
}

/// All field rules, in evaluation order.
///
/// Optional fields pass when left empty; their rule only constrains a
/// present value.
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: "first_name",
        message: "First name is required",
        check: |draft| !draft.first_name.trim().is_empty(),
    },
    FieldRule {
        field: "last_name",
        message: "Last name is required",
        check: |draft| !draft.last_name.trim().is_empty(),
    },
    FieldRule {
        field: "email",
        message: "Please enter a valid email",
        check: |draft| {
            let value = draft.email.trim();
            value.is_empty() || value.validate_email()
        },
    },
    FieldRule {
        field: "contact_number",
        message: "Please enter a valid contact number",
        check: |draft| {
            let value = draft.contact_number.trim();
            value.is_empty() || value.chars().count() == CONTACT_NUMBER_LEN
        },
    },
    FieldRule {
        field: "birth_date",
        message: "Please enter a valid date (YYYY-MM-DD)",
        check: |draft| {
            let value = draft.birth_date.trim();
            value.is_empty()
                || chrono::NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
        },
    },
];

/// Evaluate every rule against the draft. Returns all failures in table
/// order; empty means the draft is submittable.
pub fn validate(draft: &ProfileDraft) -> Vec<FieldError> {
    FIELD_RULES
        .iter()
        .filter(|rule| !(rule.check)(draft))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

/// Evaluate the rule for a single field (blur-time validation).
///
/// Returns `None` when the field passes or has no rule.
pub fn validate_field(draft: &ProfileDraft, field: &str) -> Option<FieldError> {
    FIELD_RULES
        .iter()
        .find(|rule| rule.field == field)
        .filter(|rule| !(rule.check)(draft))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
}
