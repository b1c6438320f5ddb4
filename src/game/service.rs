//! The `init` and `try` operations on top of the session store.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::{Guess, Quad};
use crate::error::GuessError;
use crate::session::{Disposition, SessionStore, Token};
use crate::Result;

/// Message attached to a successful guess.
pub const FOUND_MESSAGE: &str = "Well done, you found the number!";

/// What `init` hands back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitDescriptor {
    pub quad: Quad,
    pub token: Token,
    pub valid_for_seconds: u64,
}

/// Comparison of a guess against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    TooSmall,
    TooBig,
    Found,
}

impl Verdict {
    fn of(guess: Guess, secret: u32) -> Self {
        match guess.value().cmp(&secret) {
            Ordering::Less => Self::TooSmall,
            Ordering::Greater => Self::TooBig,
            Ordering::Equal => Self::Found,
        }
    }

    /// Human-readable note, only present for [`Verdict::Found`].
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Found => Some(FOUND_MESSAGE),
            Self::TooSmall | Self::TooBig => None,
        }
    }
}

/// Result of one `try`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub token: String,
    pub guess: u32,
    pub verdict: Verdict,
}

/// Session protocol handler.
///
/// Draws secrets from the store's random source, so the whole game is
/// deterministic once the store's clock and randomness are fixed.
#[derive(Debug, Clone)]
pub struct GuessService {
    store: Arc<SessionStore>,
}

impl GuessService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Start a session labelled `quad`.
    pub fn init(&self, quad: &str) -> Result<InitDescriptor> {
        let quad = Quad::parse(quad)?;

        self.store.purge_expired();
        let secret = self.store.random_source().secret();
        let token = self.store.create(secret);

        debug!(quad = %quad, token = %token, "session started");

        Ok(InitDescriptor {
            quad,
            token,
            valid_for_seconds: self.store.ttl().as_secs(),
        })
    }

    /// Compare `guess` with the secret behind `token`.
    ///
    /// A correct guess consumes the session atomically: of several
    /// concurrent correct guesses exactly one sees [`Verdict::Found`], the
    /// others get [`GuessError::UnknownOrExpiredToken`].
    pub fn try_guess(&self, token: &str, guess: i64) -> Result<GuessOutcome> {
        let guess = Guess::new(guess)?;

        self.store.purge_expired();
        let verdict = self
            .store
            .resolve(token, |session| match Verdict::of(guess, session.secret.value()) {
                Verdict::Found => Disposition::Remove(Verdict::Found),
                other => Disposition::Retain(other),
            })
            .ok_or(GuessError::UnknownOrExpiredToken)?;

        if verdict == Verdict::Found {
            info!(token, "secret found, session consumed");
        }

        Ok(GuessOutcome {
            token: token.to_string(),
            guess: guess.value(),
            verdict,
        })
    }
}
