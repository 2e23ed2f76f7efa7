// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation for provider credentials
//!
//! [`NonEmptyString`] makes a blank API key unrepresentable. Providers that
//! work without a key take an `Option<NonEmptyString>`, built from raw
//! configuration with [`NonEmptyString::optional`].
//!
//! ```rust
//! use external_apis::NonEmptyString;
//!
//! let key = NonEmptyString::new("freekey").expect("valid key");
//! assert_eq!(key.as_str(), "freekey");
//!
//! assert!(NonEmptyString::new("   ").is_err());
//! assert!(NonEmptyString::optional(Some("")).is_none());
//! ```

use core::fmt;
use std::str::FromStr;

/// A string containing at least one non-whitespace character
#[derive(Clone, PartialEq, Eq)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString`
    ///
    /// Leading and trailing whitespace is stripped.
    ///
    /// # Errors
    ///
    /// Returns a descriptive message if the input is empty or whitespace-only
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(Box::from(trimmed)))
        }
    }

    /// Treat a missing or blank value as absent
    pub fn optional(s: Option<&str>) -> Option<Self> {
        s.and_then(|value| Self::new(value).ok())
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Credentials end up in this type, keep them out of debug logs.
impl fmt::Debug for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NonEmptyString(***)")
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_values() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new(" \t\n").is_err());
        assert!(NonEmptyString::new("a").is_ok());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let key = NonEmptyString::new("  abc123 ").unwrap();
        assert_eq!(key.as_str(), "abc123");
        assert_eq!(key.to_string(), "abc123");
    }

    #[test]
    fn optional_treats_blank_as_absent() {
        assert!(NonEmptyString::optional(None).is_none());
        assert!(NonEmptyString::optional(Some("  ")).is_none());
        assert_eq!(
            NonEmptyString::optional(Some("key")).map(|k| k.to_string()),
            Some("key".to_string())
        );
    }

    #[test]
    fn debug_hides_value() {
        let key = NonEmptyString::new("secret").unwrap();
        assert_eq!(format!("{key:?}"), "NonEmptyString(***)");
    }
}
