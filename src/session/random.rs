//! Randomness for secrets and tokens.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid};

use super::{Secret, Token};

/// Source of secrets and session tokens.
///
/// Implementations are shared across concurrent requests. `token` must keep
/// producing fresh values: the store draws again whenever it gets a token
/// that is still live.
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Draw a secret uniformly from `[Secret::MIN, Secret::MAX]`.
    fn secret(&self) -> Secret;

    /// Draw a fresh session token.
    fn token(&self) -> Token;
}

/// Per-thread OS-seeded randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn secret(&self) -> Secret {
        draw_secret(&mut rand::thread_rng())
    }

    fn token(&self) -> Token {
        Token::from_uuid(Uuid::new_v4())
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn secret(&self) -> Secret {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw_secret(&mut *rng)
    }

    fn token(&self) -> Token {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let bytes: [u8; 16] = rng.gen();
        Token::from_uuid(Builder::from_random_bytes(bytes).into_uuid())
    }
}

fn draw_secret<R: Rng + ?Sized>(rng: &mut R) -> Secret {
    Secret::from_range(rng.gen_range(Secret::MIN..=Secret::MAX))
}
