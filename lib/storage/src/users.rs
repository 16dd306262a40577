use crate::error::{Result, StorageError};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Public view of a registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Account storage keyed by unique email.
pub trait CredentialStore: Send + Sync {
    /// Register a new account. Fails with [`StorageError::EmailTaken`] if the
    /// email is already in use.
    fn register(&self, username: &str, email: &str, password: &str) -> Result<User>;

    /// Check a password. `Ok(None)` means unknown email or wrong password.
    fn verify(&self, email: &str, password: &str) -> Result<Option<User>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    username: String,
    email: String,
    salt: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl StoredUser {
    fn user(&self) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// In-memory credential store, optionally mirrored to a JSON file.
///
/// Passwords are kept as salted SHA-256 digests. When a file is configured
/// every registration rewrites it atomically.
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, StoredUser>>,
    path: Option<PathBuf>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            path: None,
        }
    }

    /// Open a file-backed store, reading existing accounts if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let users: HashMap<String, StoredUser> = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            let stored: Vec<StoredUser> = serde_json::from_str(&data)?;
            stored.into_iter().map(|u| (u.email.clone(), u)).collect()
        } else {
            HashMap::new()
        };
        info!("Credential store opened at {:?}: {} users", path, users.len());

        Ok(Self {
            users: RwLock::new(users),
            path: Some(path),
        })
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn persist(&self, users: &HashMap<String, StoredUser>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut stored: Vec<&StoredUser> = users.values().collect();
        stored.sort_by(|a, b| a.email.cmp(&b.email));
        let data = serde_json::to_vec_pretty(&stored)?;

        AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
            .write(|f| std::io::Write::write_all(f, &data))
            .map_err(|e| StorageError::Persistence(e.to_string()))
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let username = username.trim();
        let email = normalize_email(email);
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(StorageError::MissingFields);
        }

        let mut users = self.users.write();
        if users.contains_key(&email) {
            return Err(StorageError::EmailTaken);
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let stored = StoredUser {
            username: username.to_string(),
            email: email.clone(),
            password_hash: hash_password(&salt, password),
            salt,
            created_at: Utc::now(),
        };
        let user = stored.user();
        users.insert(email.clone(), stored);

        if let Err(e) = self.persist(&users) {
            users.remove(&email);
            return Err(e);
        }
        Ok(user)
    }

    fn verify(&self, email: &str, password: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        let users = self.users.read();
        Ok(users
            .get(&email)
            .filter(|u| hash_password(&u.salt, password) == u.password_hash)
            .map(StoredUser::user))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
