//! Session token and secret value types.

use std::borrow::Borrow;
use std::fmt;

use uuid::Uuid;

/// Opaque identifier handed to the client by `init`.
///
/// Rendered as 32 lowercase hex characters. Tokens carry 122 random bits
/// (UUIDv4), so uniqueness among live sessions is probabilistic; the store
/// additionally refuses to overwrite a live token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Create a token from a UUID, using its hyphen-less hex form.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.simple().to_string())
    }

    /// Borrow the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The number a client must find.
///
/// Always within `[Secret::MIN, Secret::MAX]`. `Debug` output is redacted so
/// the value cannot leak through logs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Secret(u32);

impl Secret {
    /// Smallest possible secret.
    pub const MIN: u32 = 1;
    /// Largest possible secret (2^31 - 1).
    pub const MAX: u32 = i32::MAX as u32;

    /// Wrap a value, rejecting anything outside `[MIN, MAX]`.
    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Wrap a value already drawn from `[MIN, MAX]`.
    pub(crate) fn from_range(value: u32) -> Self {
        debug_assert!((Self::MIN..=Self::MAX).contains(&value));
        Self(value)
    }

    /// The raw value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}
