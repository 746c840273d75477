//! ISBN business key shared by books, reviews, and synchronisation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of digits in an ISBN-13.
pub const ISBN_LENGTH: usize = 13;

/// Validation errors returned by [`Isbn::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsbnValidationError {
    Empty,
    WrongLength { length: usize },
    NonDigit,
}

impl fmt::Display for IsbnValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "isbn must not be empty"),
            Self::WrongLength { length } => {
                write!(f, "isbn must have {ISBN_LENGTH} digits, got {length}")
            }
            Self::NonDigit => write!(f, "isbn may only contain ASCII digits"),
        }
    }
}

impl std::error::Error for IsbnValidationError {}

/// Book business key.
///
/// [`Isbn::new`] admits only canonical ISBN-13 values and guards what gets
/// synchronised into the catalogue. [`Isbn::lookup_key`] admits any non-blank
/// key so review routes can look books up by whatever key the client sends;
/// keys that no book carries are answered as not found.
///
/// # Examples
/// ```
/// use book_reviews::domain::Isbn;
///
/// let isbn = Isbn::new(" 9780596004651 ").expect("valid isbn");
/// assert_eq!(isbn.as_ref(), "9780596004651");
/// assert!(Isbn::new("32").is_err());
/// assert_eq!(Isbn::lookup_key("32").expect("non-blank").as_ref(), "32");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Validate and construct an [`Isbn`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, IsbnValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IsbnValidationError::Empty);
        }
        if !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(IsbnValidationError::NonDigit);
        }
        if trimmed.len() != ISBN_LENGTH {
            return Err(IsbnValidationError::WrongLength {
                length: trimmed.len(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Construct a lookup key without enforcing the ISBN-13 format.
    pub fn lookup_key(value: impl AsRef<str>) -> Result<Self, IsbnValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IsbnValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = IsbnValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1234567891234")]
    #[case("9780596004651")]
    #[case("  9780596004651\n")]
    fn accepts_thirteen_digits(#[case] raw: &str) {
        let isbn = Isbn::new(raw).expect("valid isbn");
        assert_eq!(isbn.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", IsbnValidationError::Empty)]
    #[case("   ", IsbnValidationError::Empty)]
    #[case("32", IsbnValidationError::WrongLength { length: 2 })]
    #[case("97805960046510", IsbnValidationError::WrongLength { length: 14 })]
    #[case("978-0596004651", IsbnValidationError::NonDigit)]
    #[case("978059600465X", IsbnValidationError::NonDigit)]
    fn rejects_malformed_input(#[case] raw: &str, #[case] expected: IsbnValidationError) {
        assert_eq!(Isbn::new(raw), Err(expected));
    }

    #[rstest]
    #[case("42", "42")]
    #[case(" 31 ", "31")]
    #[case("9780596004651", "9780596004651")]
    fn lookup_key_accepts_any_non_blank_key(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Isbn::lookup_key(raw).map(String::from), Ok(expected.to_owned()));
    }

    #[rstest]
    fn lookup_key_rejects_blank_input() {
        assert_eq!(Isbn::lookup_key("  "), Err(IsbnValidationError::Empty));
    }

    #[rstest]
    fn deserialise_validates() {
        let result: Result<Isbn, _> = serde_json::from_str("\"42\"");
        assert!(result.is_err());
    }
}
