use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::Role;

/// The only session state the client ever persists: the bearer token pair
/// and the role it was issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokens {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Immutable snapshot handed to views once at startup. Components receive it
/// by reference and never re-derive session state ad hoc.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub access_token: String,
    pub role: Option<Role>,
}

impl SessionContext {
    pub fn from_tokens(tokens: &SessionTokens) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            role: tokens.role,
        }
    }
}

/// Persistence seam for session tokens.
///
/// Persistence is best-effort, like the browser storage it replaces: a
/// failed write is logged and the in-flight request proceeds with whatever
/// state it already has.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Option<SessionTokens>;
    async fn save(&self, tokens: SessionTokens);
    async fn clear(&self);
}

/// In-memory store for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<SessionTokens>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: SessionTokens) -> Self {
        Self {
            inner: RwLock::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Option<SessionTokens> {
        self.inner.read().await.clone()
    }

    async fn save(&self, tokens: SessionTokens) {
        *self.inner.write().await = Some(tokens);
    }

    async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

/// File-backed store: one JSON document at a fixed path, rewritten whole on
/// every save.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Option<SessionTokens> {
        let raw = tokio::fs::read(&self.path).await.ok()?;
        match serde_json::from_slice(&raw) {
            Ok(tokens) => Some(tokens),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "Ignoring unreadable session file");
                None
            }
        }
    }

    async fn save(&self, tokens: SessionTokens) {
        let raw = match serde_json::to_vec_pretty(&tokens) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "Failed to encode session tokens");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(error) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %self.path.display(), %error, "Failed to create session directory");
                return;
            }
        }
        if let Err(error) = tokio::fs::write(&self.path, raw).await {
            warn!(path = %self.path.display(), %error, "Failed to persist session tokens");
        }
    }

    async fn clear(&self) {
        if let Err(error) = tokio::fs::remove_file(&self.path).await {
            if error.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %error, "Failed to clear session file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(access: &str) -> SessionTokens {
        SessionTokens {
            access_token: access.to_string(),
            refresh_token: Some("refresh-1".to_string()),
            role: Some(Role::Customer),
        }
    }

    #[tokio::test]
    async fn memory_store_round_trips_and_clears() {
        let store = MemorySessionStore::new();
        assert!(store.load().await.is_none());

        store.save(tokens("access-1")).await;
        assert_eq!(store.load().await, Some(tokens("access-1")));

        store.clear().await;
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.load().await.is_none());

        store.save(tokens("access-2")).await;
        assert_eq!(store.load().await, Some(tokens("access-2")));

        store.clear().await;
        assert!(store.load().await.is_none());
        // Clearing an already-empty store is not an error.
        store.clear().await;
    }

    #[tokio::test]
    async fn file_store_ignores_corrupt_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"not json").await.unwrap();
        let store = FileSessionStore::new(&path);
        assert!(store.load().await.is_none());
    }

    #[test]
    fn context_is_a_plain_snapshot_of_the_tokens() {
        let context = SessionContext::from_tokens(&tokens("access-3"));
        assert_eq!(context.access_token, "access-3");
        assert_eq!(context.role, Some(Role::Customer));
    }
}
