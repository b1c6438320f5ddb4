//! Input shape and range checks for the two game operations.

use std::fmt;

use thiserror::Error;

use crate::session::Secret;

/// Shortest accepted quad code.
pub const QUAD_MIN_LEN: usize = 2;
/// Longest accepted quad code.
pub const QUAD_MAX_LEN: usize = 4;

/// Validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Quad code has the wrong number of characters.
    #[error("quad must be {min} to {max} letters, got {0}", min = QUAD_MIN_LEN, max = QUAD_MAX_LEN)]
    QuadLength(usize),
    /// Quad code contains something other than `A`-`Z`.
    #[error("quad may only contain uppercase letters A-Z, found {0:?}")]
    QuadCharacter(char),
    /// Guess lies outside `[1, 2147483647]`.
    #[error("guess must be between {min} and {max}, got {0}", min = Secret::MIN, max = Secret::MAX)]
    GuessOutOfRange(i64),
}

/// A label matching `[A-Z]{2,4}`, echoed back by `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad(String);

impl Quad {
    /// Validate and wrap a quad code.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if let Some(c) = input.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(ValidationError::QuadCharacter(c));
        }

        // All ASCII at this point, so bytes == chars.
        if !(QUAD_MIN_LEN..=QUAD_MAX_LEN).contains(&input.len()) {
            return Err(ValidationError::QuadLength(input.len()));
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A guess within the secret range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Guess(u32);

impl Guess {
    /// Validate a raw guess.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u32::try_from(value)
            .ok()
            .and_then(Secret::new)
            .map(|s| Self(s.value()))
            .ok_or(ValidationError::GuessOutOfRange(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}
