//! # Validation Module
//!
//! Input validation for the console prompts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Prompt Validation                                  │
//! │                                                                         │
//! │  Shopper types "7"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_bounded_int("7", 1, 4) ← THIS MODULE                            │
//! │       │                                                                 │
//! │       ├── not digits?    → NotAnInteger  → "Only integers!"            │
//! │       ├── outside 1..=4? → OutOfRange    → "Only integers between..."  │
//! │       └── OK(7)                                                         │
//! │                                                                         │
//! │  Errors go back to the prompt loop, which asks again.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses a non-negative integer and checks it lies within `min..=max`.
///
/// Only plain digits are accepted: no sign, no decimal point. Surrounding
/// whitespace (including the newline from the console) is ignored.
///
/// ## Example
/// ```rust
/// use grocer_core::validation::parse_bounded_int;
///
/// assert_eq!(parse_bounded_int("3\n", 1, 4).unwrap(), 3);
/// assert!(parse_bounded_int("-3", 1, 4).is_err());
/// assert!(parse_bounded_int("5", 1, 4).is_err());
/// ```
pub fn parse_bounded_int(input: &str, min: i64, max: i64) -> ValidationResult<i64> {
    let trimmed = input.trim();

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger {
            input: trimmed.to_string(),
        });
    }

    // Digits that overflow i64 are certainly above any bound we use
    let value = trimmed.parse::<i64>().unwrap_or(i64::MAX);

    if value < min || value > max {
        return Err(ValidationError::OutOfRange { value, min, max });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_in_range() {
        assert_eq!(parse_bounded_int("1", 1, 4), Ok(1));
        assert_eq!(parse_bounded_int(" 4 ", 1, 4), Ok(4));
        assert_eq!(parse_bounded_int("007", 1, 10), Ok(7));
    }

    #[test]
    fn test_rejects_non_digits() {
        for input in ["", "   ", "abc", "-1", "+2", "2.0", "1 2"] {
            assert!(
                matches!(
                    parse_bounded_int(input, 1, 4),
                    Err(ValidationError::NotAnInteger { .. })
                ),
                "{:?} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            parse_bounded_int("0", 1, 4),
            Err(ValidationError::OutOfRange {
                value: 0,
                min: 1,
                max: 4
            })
        );
        assert!(parse_bounded_int("5", 1, 4).is_err());
        assert!(parse_bounded_int("123456789012345678901234567890", 1, 4).is_err());
    }
}
