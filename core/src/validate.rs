//! Input validation for create and update drafts.
//!
//! The helpers here normalize user input the same way for every entity:
//! ids must be positive, required text is trimmed and must not be empty, and
//! optional text or ids collapse to `None` when left blank.
//!
//! # Examples
//!
//! ```
//! use storefront_core::{ValidationError, optional_text, require_non_empty, require_positive};
//!
//! assert_eq!(require_non_empty("name", "  Books ").unwrap(), "Books");
//! assert_eq!(optional_text("   "), None);
//! assert_eq!(
//!     require_positive("category id", 0),
//!     Err(ValidationError::NotPositive("category id"))
//! );
//! ```

use thiserror::Error;

/// Draft validation errors.
///
/// Each variant names the offending field so the menu can show it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An id or count that must be greater than zero.
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    /// A required text field is empty or whitespace-only.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    /// A quantity that cannot be negative.
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    /// A NaN or infinite amount.
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    /// A value outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    /// A value that is not one of the accepted choices.
    #[error("invalid {field} '{value}': expected one of {expected}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Fails unless `value` is greater than zero.
pub fn require_positive(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(value)
}

/// Trims `value` and fails if nothing is left.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(trimmed.to_string())
}

/// Fails if `value` is negative.
pub fn require_non_negative<T>(field: &'static str, value: T) -> Result<T, ValidationError>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

/// Like [`require_non_negative`], but NaN and infinities fail too.
pub fn require_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(field));
    }
    require_non_negative(field, value)
}

/// Fails unless `min <= value <= max`.
pub fn require_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i64, ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(value)
}

/// Trims `value`; blank input becomes `None`.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ids of zero or below mean "no reference".
pub fn optional_id(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("id", 3), Ok(3));
        assert_eq!(
            require_positive("id", 0),
            Err(ValidationError::NotPositive("id"))
        );
        assert!(require_positive("id", -4).is_err());
    }

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty("name", " Ana ").unwrap(), "Ana");
        assert_eq!(
            require_non_empty("name", " \t "),
            Err(ValidationError::Empty("name"))
        );
    }

    #[test]
    fn test_require_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("stock", 0_i64), Ok(0));
        assert_eq!(require_non_negative("price", 0.0_f64), Ok(0.0));
        assert_eq!(
            require_non_negative("price", -0.5_f64),
            Err(ValidationError::Negative("price"))
        );
    }

    #[test]
    fn test_require_amount_rejects_non_finite() {
        assert_eq!(require_amount("price", 19.99), Ok(19.99));
        assert_eq!(
            require_amount("price", f64::NAN),
            Err(ValidationError::NotFinite("price"))
        );
        assert_eq!(
            require_amount("price", f64::INFINITY),
            Err(ValidationError::NotFinite("price"))
        );
        assert_eq!(
            require_amount("price", -1.0),
            Err(ValidationError::Negative("price"))
        );
    }

    #[test]
    fn test_require_range_bounds_are_inclusive() {
        assert!(require_range("rating", 1, 1, 5).is_ok());
        assert!(require_range("rating", 5, 1, 5).is_ok());
        assert_eq!(
            require_range("rating", 6, 1, 5).unwrap_err().to_string(),
            "rating must be between 1 and 5"
        );
    }

    #[test]
    fn test_optional_helpers() {
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text(" a@b.c "), Some("a@b.c".to_string()));
        assert_eq!(optional_id(0), None);
        assert_eq!(optional_id(-1), None);
        assert_eq!(optional_id(9), Some(9));
    }
}
