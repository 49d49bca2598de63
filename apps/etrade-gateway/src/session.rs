//! Process-wide authentication session state.
//!
//! The store holds at most one pending request-token pair and at most one
//! authorized session at a time. [`SessionStore::authorized`] is the single
//! gating point every data operation goes through: no call reaches the
//! provider until a verifier exchange has completed.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::config::Environment;

/// OAuth request token issued by handshake step 1.
///
/// Lives from creation until consumed by the verifier exchange or
/// superseded by a new handshake.
#[derive(Clone)]
pub struct RequestTokenPair {
    /// Request token.
    pub token: String,
    /// Request token secret.
    pub secret: String,
}

impl std::fmt::Debug for RequestTokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestTokenPair")
            .field("token", &self.token)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Long-lived access token produced by a successful verifier exchange.
#[derive(Clone)]
pub struct AuthorizedSession {
    /// Access token.
    pub access_token: String,
    /// Access token secret.
    pub access_token_secret: String,
    /// Market data API base URL bound at authentication time.
    pub base_url: String,
    /// Environment the session was established against.
    pub environment: Environment,
}

impl std::fmt::Debug for AuthorizedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedSession")
            .field("access_token", &"[REDACTED]")
            .field("access_token_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Session state errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No request token is pending.
    #[error("no pending handshake")]
    NoPendingHandshake,
    /// No authorized session exists.
    #[error("not authenticated")]
    NotAuthenticated,
}

#[derive(Default)]
struct Slots {
    pending: Option<RequestTokenPair>,
    authorized: Option<AuthorizedSession>,
}

/// The single mutable point of authentication state for the process.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<Slots>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a pending request-token pair, replacing any prior one.
    ///
    /// Replacing the pair invalidates the ability to complete a stale
    /// handshake; an existing authorized session is untouched.
    pub fn begin(&self, pair: RequestTokenPair) {
        let mut slots = self.lock();
        if slots.pending.is_some() {
            tracing::debug!("replacing pending request token");
        }
        slots.pending = Some(pair);
    }

    /// Get the pending request-token pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoPendingHandshake`] if no handshake was
    /// started or the pending pair was already consumed.
    pub fn pending(&self) -> Result<RequestTokenPair, SessionError> {
        self.lock()
            .pending
            .clone()
            .ok_or(SessionError::NoPendingHandshake)
    }

    /// Store an authorized session, consuming the pending pair and
    /// replacing any prior session.
    pub fn complete(&self, session: AuthorizedSession) {
        let mut slots = self.lock();
        slots.pending = None;
        slots.authorized = Some(session);
    }

    /// Get the authorized session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] if no verifier exchange
    /// has completed yet.
    pub fn authorized(&self) -> Result<AuthorizedSession, SessionError> {
        self.lock()
            .authorized
            .clone()
            .ok_or(SessionError::NotAuthenticated)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slots> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
