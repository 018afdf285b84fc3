// src/session.rs
//! Session-scoped credentials.
//!
//! A `Session` is an explicit value handed to the request functions. It is
//! created when the user first saves a key, replaced wholesale on every save
//! and dropped on clear or after sitting idle. Nothing here touches the disk.

use crate::error::NavigatorError;
use std::collections::HashMap;
use std::fmt;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tracing::{debug, error};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    Work24AuthKey,
    AnthropicApiKey,
}

impl CredentialKind {
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialKind::Work24AuthKey => "WORK24_AUTH_KEY",
            CredentialKind::AnthropicApiKey => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::Work24AuthKey => write!(f, "Work24 auth key"),
            CredentialKind::AnthropicApiKey => write!(f, "Anthropic API key"),
        }
    }
}

/// Opaque secret. Only its length and a redacted tail are ever printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input so an empty form field never counts as a key.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn redacted(&self) -> String {
        let len = self.len();
        if len <= 8 {
            return "****".to_string();
        }
        let tail: String = self.0.chars().skip(len - 4).collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.redacted())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    work24_auth_key: Option<Credential>,
    anthropic_api_key: Option<Credential>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(mut self, kind: CredentialKind, credential: Credential) -> Self {
        self.set_credential(kind, credential);
        self
    }

    pub fn set_credential(&mut self, kind: CredentialKind, credential: Credential) {
        match kind {
            CredentialKind::Work24AuthKey => self.work24_auth_key = Some(credential),
            CredentialKind::AnthropicApiKey => self.anthropic_api_key = Some(credential),
        }
    }

    fn slot(&self, kind: CredentialKind) -> Option<&Credential> {
        match kind {
            CredentialKind::Work24AuthKey => self.work24_auth_key.as_ref(),
            CredentialKind::AnthropicApiKey => self.anthropic_api_key.as_ref(),
        }
    }

    /// The credential a request needs, or the error that must short-circuit it.
    pub fn credential(&self, kind: CredentialKind) -> Result<&Credential, NavigatorError> {
        self.slot(kind)
            .ok_or(NavigatorError::MissingCredential(kind))
    }

    pub fn has_credential(&self, kind: CredentialKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Keys set on `self` win; gaps are filled from `fallback`.
    pub fn merged_with(&self, fallback: &Session) -> Session {
        Session {
            work24_auth_key: self
                .work24_auth_key
                .clone()
                .or_else(|| fallback.work24_auth_key.clone()),
            anthropic_api_key: self
                .anthropic_api_key
                .clone()
                .or_else(|| fallback.anthropic_api_key.clone()),
        }
    }

    pub fn clear(&mut self) {
        self.work24_auth_key = None;
        self.anthropic_api_key = None;
    }
}

/// Sessions idle longer than this are dropped, secrets included.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct StoredSession {
    session: Session,
    last_used: Instant,
}

type SessionMap = HashMap<Uuid, StoredSession>;

/// In-memory sessions for the HTTP surface, keyed by the session cookie.
/// Idle entries are evicted whenever the store is touched.
pub struct SessionStore {
    sessions: RwLock<SessionMap>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_idle_timeout(SESSION_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Snapshot of a session; requests read it without holding the lock.
    pub fn get(&self, id: &Uuid) -> Result<Option<Session>, NavigatorError> {
        self.get_at(id, Instant::now())
    }

    pub fn replace(&self, id: Uuid, session: Session) -> Result<(), NavigatorError> {
        self.replace_at(id, session, Instant::now())
    }

    pub fn remove(&self, id: &Uuid) -> Result<bool, NavigatorError> {
        Ok(self.write()?.remove(id).is_some())
    }

    pub fn len(&self) -> usize {
        match self.sessions.read() {
            Ok(sessions) => sessions.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, id: &Uuid, now: Instant) -> Result<Option<Session>, NavigatorError> {
        let mut sessions = self.write()?;
        self.evict_idle(&mut sessions, now);
        Ok(sessions.get_mut(id).map(|stored| {
            stored.last_used = now;
            stored.session.clone()
        }))
    }

    fn replace_at(&self, id: Uuid, session: Session, now: Instant) -> Result<(), NavigatorError> {
        let mut sessions = self.write()?;
        self.evict_idle(&mut sessions, now);
        sessions.insert(
            id,
            StoredSession {
                session,
                last_used: now,
            },
        );
        Ok(())
    }

    fn evict_idle(&self, sessions: &mut SessionMap, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, stored| {
            now.saturating_duration_since(stored.last_used) < self.idle_timeout
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {} idle sessions", evicted);
        }
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionMap>, NavigatorError> {
        self.sessions.write().map_err(|_| {
            error!("Session store lock is poisoned");
            NavigatorError::Unclassified("session store is unavailable".to_string())
        })
    }
}
