use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::{MAX_STUDENT_NAME_CHARS, MIN_STUDENT_NAME_CHARS};

lazy_static! {
    /// Regex for person names typed into the signup form
    /// Any printable text, no control characters (tabs, newlines, NUL)
    /// - Valid: "Ana", "李小明", "O'Brien", "Jean-Luc Picard"
    /// - Invalid: "Ana\n", "A\tB", "\u{0}x"
    pub static ref PERSON_NAME_REGEX: Regex = Regex::new(r"^[^\p{Cc}]+$").unwrap();
}

/// Trim a student name and check it against the signup rules.
///
/// Returns the trimmed name; this is the form stored and compared for duplicates.
pub fn normalize_student_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    let chars = name.chars().count();

    if chars < MIN_STUDENT_NAME_CHARS {
        return Err("Student name must be at least 2 characters");
    }
    if chars > MAX_STUDENT_NAME_CHARS {
        return Err("Student name must not exceed 100 characters");
    }
    if !PERSON_NAME_REGEX.is_match(name) {
        return Err("Student name must not contain control characters");
    }

    Ok(name.to_string())
}

/// `validator` hook for `student_name` fields
pub fn validate_student_name(value: &str) -> Result<(), ValidationError> {
    normalize_student_name(value)
        .map(|_| ())
        .map_err(|msg| ValidationError::new("student_name").with_message(Cow::Borrowed(msg)))
}

/// `validator` hook rejecting empty or whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Must not be blank")));
    }
    Ok(())
}
