//! Field-level validation helpers used at the API boundary.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::DATE_FORMAT;

/// Require a present, non-blank string. Returns the trimmed value.
pub fn require_text(field: &'static str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::MissingField(field)),
    }
}

/// Reject a string that is present but blank. `None` passes through.
pub fn optional_non_blank(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) => require_text(field, Some(v)).map(Some),
    }
}

/// Validate an optional calendar date.
///
/// Dates must be zero-padded `YYYY-MM-DD`. The overdue rule compares dates
/// as strings, so anything else (`2024-1-5`, timestamps) is rejected rather
/// than normalized. An empty string is treated as absent.
pub fn optional_date(field: &'static str, value: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let parsed = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!("{field} must be a date in YYYY-MM-DD form, got '{raw}'"))
    })?;

    // chrono accepts unpadded fields; require the canonical rendering.
    if parsed.format(DATE_FORMAT).to_string() != raw {
        return Err(CoreError::Validation(format!(
            "{field} must be a zero-padded YYYY-MM-DD date, got '{raw}'"
        )));
    }

    Ok(Some(raw.to_string()))
}

/// Validate a clearable date in a patch.
///
/// `None` keeps the stored date and `Some(None)` clears it. A present value
/// must be a zero-padded date; an empty string also clears.
pub fn patch_date(
    field: &'static str,
    value: Option<Option<&str>>,
) -> Result<Option<Option<String>>, CoreError> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(raw)) => optional_date(field, Some(raw)).map(Some),
    }
}

/// Minimal email shape check: non-blank with an `@` between two non-empty parts.
pub fn require_email(field: &'static str, value: Option<&str>) -> Result<String, CoreError> {
    let email = require_text(field, value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(CoreError::Validation(format!(
            "{field} must be an email address, got '{email}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("name", Some("  Alpha ")).unwrap(), "Alpha");
    }

    #[test]
    fn require_text_rejects_missing_and_blank() {
        assert_eq!(
            require_text("name", None).unwrap_err(),
            CoreError::MissingField("name")
        );
        assert_eq!(
            require_text("name", Some("   ")).unwrap_err(),
            CoreError::MissingField("name")
        );
    }

    #[test]
    fn optional_non_blank_passes_none() {
        assert_eq!(optional_non_blank("title", None).unwrap(), None);
        assert!(optional_non_blank("title", Some("")).is_err());
    }

    #[test]
    fn optional_date_accepts_padded_iso() {
        assert_eq!(
            optional_date("dueDate", Some("2024-01-05")).unwrap().as_deref(),
            Some("2024-01-05")
        );
    }

    #[test]
    fn optional_date_treats_empty_as_absent() {
        assert_eq!(optional_date("dueDate", Some("")).unwrap(), None);
        assert_eq!(optional_date("dueDate", None).unwrap(), None);
    }

    #[test]
    fn optional_date_rejects_unpadded_and_garbage() {
        assert!(optional_date("dueDate", Some("2024-1-5")).is_err());
        assert!(optional_date("dueDate", Some("05/01/2024")).is_err());
        assert!(optional_date("dueDate", Some("2024-02-30")).is_err());
    }

    #[test]
    fn require_email_checks_shape() {
        assert_eq!(
            require_email("email", Some("ana@example.com")).unwrap(),
            "ana@example.com"
        );
        assert!(require_email("email", Some("ana.example.com")).is_err());
        assert!(require_email("email", Some("@example.com")).is_err());
        assert!(require_email("email", None).is_err());
    }

    #[test]
    fn patch_date_distinguishes_keep_clear_and_set() {
        assert_eq!(patch_date("dueDate", None).unwrap(), None);
        assert_eq!(patch_date("dueDate", Some(None)).unwrap(), Some(None));
        assert_eq!(patch_date("dueDate", Some(Some(""))).unwrap(), Some(None));
        assert_eq!(
            patch_date("dueDate", Some(Some(" 2024-02-29 "))).unwrap(),
            Some(Some("2024-02-29".to_string()))
        );
        assert!(patch_date("dueDate", Some(Some("2024-2-29"))).is_err());
    }
}
