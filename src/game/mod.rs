//! Guess-the-number protocol.
//!
//! [`GuessService`] turns the two public operations into store calls:
//!
//! - `init(quad)` validates the label, draws a secret and issues a token.
//! - `try_guess(token, guess)` validates the guess, then compares it with the
//!   secret, consuming the session on a match.
//!
//! Unknown, expired and already-solved tokens are indistinguishable: all of
//! them yield [`GuessError::UnknownOrExpiredToken`](crate::GuessError).

mod service;
mod validation;

pub use service::{GuessOutcome, GuessService, InitDescriptor, Verdict, FOUND_MESSAGE};
pub use validation::{Guess, Quad, ValidationError, QUAD_MAX_LEN, QUAD_MIN_LEN};
