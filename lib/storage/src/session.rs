use crate::users::User;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Login sessions keyed by opaque token.
pub trait SessionStore: Send + Sync {
    /// Start a session for `user` and return its token.
    fn create(&self, user: User) -> String;

    fn get(&self, token: &str) -> Option<User>;

    /// End a session. Returns whether it existed.
    fn remove(&self, token: &str) -> bool;
}

/// Sessions live this long after login unless configured otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Session {
    user: User,
    expires_at: Instant,
}

impl Session {
    #[inline]
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local sessions with UUID v4 tokens.
///
/// Each session expires `ttl` after login. Expired entries are invisible to
/// [`SessionStore::get`] and are purged whenever a new session is created,
/// so the map stays bounded by the logins of one TTL window.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stored sessions, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Drop expired sessions. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| s.is_live(now));
        before - sessions.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, user: User) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        sessions.retain(|_, s| s.is_live(now));
        sessions.insert(
            token.clone(),
            Session {
                user,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    fn get(&self, token: &str) -> Option<User> {
        let now = Instant::now();
        self.sessions
            .read()
            .get(token)
            .filter(|s| s.is_live(now))
            .map(|s| s.user.clone())
    }

    fn remove(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }
}
