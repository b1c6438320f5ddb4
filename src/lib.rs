//! # number-guess
//!
//! Guess-the-number HTTP service built around a token-session lifecycle.
//!
//! A client calls `init` to receive a token bound to a hidden random number,
//! then calls `try` with guesses until it finds the number or the token
//! expires.
//!
//! ## Features
//!
//! - **Expiring sessions**: tokens are valid for a fixed TTL (60s by default)
//! - **Single use**: a correct guess consumes the token atomically
//! - **Bounded memory**: expired sessions are purged on every request and by
//!   an optional background sweeper
//! - **Deterministic testing**: clock and randomness are injectable
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use number_guess::{GuessService, SessionStore, Verdict};
//!
//! let service = GuessService::new(Arc::new(SessionStore::new()));
//!
//! let init = service.init("NAME")?;
//! let outcome = service.try_guess(init.token.as_str(), 1)?;
//! assert_ne!(outcome.verdict, Verdict::TooBig);
//! # Ok::<(), number_guess::GuessError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use error::{GuessError, Result};
pub use game::{GuessOutcome, GuessService, InitDescriptor, Verdict};
pub use session::{
    Clock, Disposition, ManualClock, RandomSource, Secret, SeededRandom, Session, SessionStore,
    SystemClock, ThreadRandom, Token,
};
