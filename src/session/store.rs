//! Session storage and expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{Clock, RandomSource, Secret, SystemClock, ThreadRandom, Token};

/// Default validity window of a session.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Longest validity window a store accepts; larger values are capped.
pub const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A live token-to-secret binding.
#[derive(Debug, Clone)]
pub struct Session {
    /// Lookup key.
    pub token: Token,
    /// The number to find.
    pub secret: Secret,
    /// First instant at which the session is no longer valid.
    pub expires_at: Instant,
}

impl Session {
    /// Whether the session is past its TTL at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// What to do with a session after [`SessionStore::resolve`] inspected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition<R> {
    /// Leave the session in place.
    Retain(R),
    /// Delete the session before the lock is released.
    Remove(R),
}

/// Thread-safe registry of live sessions.
///
/// Every operation runs under one lock. Expired entries are dropped lazily on
/// lookup and eagerly by [`purge_expired`](Self::purge_expired). No operation
/// fails: absence and expiry are reported through the return value.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Token, Session>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl SessionStore {
    /// Create a store using wall-clock time, thread-local randomness and the
    /// default TTL.
    pub fn new() -> Self {
        Self::with_parts(DEFAULT_TTL, Arc::new(SystemClock), Arc::new(ThreadRandom))
    }

    /// Create a store with the default clock and randomness but a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_parts(ttl, Arc::new(SystemClock), Arc::new(ThreadRandom))
    }

    /// Create a store from explicit parts. `ttl` is capped at [`MAX_TTL`].
    pub fn with_parts(ttl: Duration, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: ttl.min(MAX_TTL),
            clock,
            random,
        }
    }

    // The map only holds plain values, so a panic elsewhere cannot leave it
    // half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<Token, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validity window applied to new sessions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Randomness shared with callers that need to draw secrets.
    pub fn random_source(&self) -> &Arc<dyn RandomSource> {
        &self.random
    }

    /// Bind `secret` to a fresh token valid for one TTL.
    ///
    /// A drawn token that collides with a live session is discarded and
    /// redrawn; an expired holder of the same token is overwritten.
    pub fn create(&self, secret: Secret) -> Token {
        let now = self.clock.now();
        let mut sessions = self.lock();

        let token = loop {
            let candidate = self.random.token();
            match sessions.get(&candidate) {
                Some(existing) if !existing.is_expired_at(now) => {
                    warn!(token = %candidate, "token collision with live session, redrawing");
                }
                _ => break candidate,
            }
        };

        let expires_at = now.checked_add(self.ttl).unwrap_or_else(|| {
            warn!(ttl_secs = self.ttl.as_secs(), "session expiry not representable, issuing expired");
            now
        });
        sessions.insert(
            token.clone(),
            Session {
                token: token.clone(),
                secret,
                expires_at,
            },
        );
        debug!(token = %token, live = sessions.len(), "session issued");
        token
    }

    /// Look up the secret behind a live token.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&self, token: &str) -> Option<Secret> {
        let now = self.clock.now();
        let mut sessions = self.lock();
        live_entry(&mut sessions, token, now).map(|s| s.secret)
    }

    /// Inspect a live session and decide its fate in one critical section.
    ///
    /// Returns `None` if the token is unknown or expired; `f` is not called in
    /// that case. When `f` returns [`Disposition::Remove`] no other caller can
    /// observe the session afterwards.
    pub fn resolve<R, F>(&self, token: &str, f: F) -> Option<R>
    where
        F: FnOnce(&Session) -> Disposition<R>,
    {
        let now = self.clock.now();
        let mut sessions = self.lock();
        let session = live_entry(&mut sessions, token, now)?;

        match f(session) {
            Disposition::Retain(r) => Some(r),
            Disposition::Remove(r) => {
                sessions.remove(token);
                Some(r)
            }
        }
    }

    /// Remove a session. Removing an absent token is a no-op.
    ///
    /// Returns whether a session was removed.
    pub fn delete(&self, token: &str) -> bool {
        self.lock().remove(token).is_some()
    }

    /// Drop every session whose TTL has elapsed.
    ///
    /// Returns the number of sessions removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        let removed = before - sessions.len();

        if removed > 0 {
            debug!(removed, live = sessions.len(), "purged expired sessions");
        }
        removed
    }

    /// Whether an entry exists for `token`, expired or not.
    pub fn contains(&self, token: &str) -> bool {
        self.lock().contains_key(token)
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn live_entry<'a>(
    sessions: &'a mut HashMap<Token, Session>,
    token: &str,
    now: Instant,
) -> Option<&'a Session> {
    if sessions.get(token)?.is_expired_at(now) {
        sessions.remove(token);
        debug!(token, "dropped expired session on lookup");
        return None;
    }
    sessions.get(token)
}
