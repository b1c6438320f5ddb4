//! Session management module.
//!
//! This module provides the token-session lifecycle: token and secret
//! generation, time-bounded storage with lazy and eager expiry, and atomic
//! consume-on-success.

mod clock;
mod random;
mod store;
mod sweeper;
mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use store::{Disposition, Session, SessionStore, DEFAULT_TTL, MAX_TTL};
pub use sweeper::spawn_sweeper;
pub use token::{Secret, Token};
