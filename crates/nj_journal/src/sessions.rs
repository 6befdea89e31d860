use nj_core::{Catalog, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::service::JournalService;

/// Explicit map from session id to that session's [`JournalService`].
///
/// Journals are created on `open` and dropped on `close`; there is no
/// ambient global journal. Each service locks its own journal, so sessions
/// never contend with each other; this registry's lock only guards the map.
pub struct SessionRegistry {
    catalog: Arc<dyn Catalog>,
    sessions: RwLock<HashMap<String, Arc<JournalService>>>,
}

impl SessionRegistry {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates the session's journal service, or returns the existing one.
    pub async fn open(&self, session: &str) -> Result<Arc<JournalService>> {
        if session.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "session id must not be blank".to_string(),
            ));
        }
        let mut sessions = self.sessions.write().await;
        let service = sessions
            .entry(session.to_string())
            .or_insert_with(|| {
                info!(session, "opening journal session");
                Arc::new(JournalService::new(self.catalog.clone()))
            })
            .clone();
        Ok(service)
    }

    pub async fn get(&self, session: &str) -> Option<Arc<JournalService>> {
        let sessions = self.sessions.read().await;
        sessions.get(session).cloned()
    }

    /// Tears the session down, dropping its journal. Returns whether a
    /// session existed.
    pub async fn close(&self, session: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let existed = sessions.remove(session).is_some();
        if existed {
            info!(session, "closed journal session");
        }
        existed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use nj_catalog::MemoryCatalog;
    use nj_core::Article;

    async fn registry() -> SessionRegistry {
        let catalog = Arc::new(MemoryCatalog::new());
        catalog
            .seed(vec![
                Article::new(
                    1,
                    "The Daily",
                    "Author 1",
                    "Title 1",
                    "https://example.com/1",
                    "Body text.",
                    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                )
                .unwrap(),
            ])
            .await
            .unwrap();
        SessionRegistry::new(catalog)
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = registry().await;
        let alice = registry.open("alice").await.unwrap();
        let bob = registry.open("bob").await.unwrap();

        alice.add_article_by_id(1).await;
        assert_eq!(alice.list().await.entries.len(), 1);
        assert!(bob.list().await.entries.is_empty());
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn reopening_returns_the_same_journal() {
        let registry = registry().await;
        let first = registry.open("alice").await.unwrap();
        first.add_article_by_id(1).await;

        let second = registry.open("alice").await.unwrap();
        assert_eq!(second.list().await.entries.len(), 1);
    }

    #[tokio::test]
    async fn close_drops_the_journal() {
        let registry = registry().await;
        let service = registry.open("alice").await.unwrap();
        service.add_article_by_id(1).await;

        assert!(registry.close("alice").await);
        assert!(registry.get("alice").await.is_none());
        assert!(!registry.close("alice").await);

        // A fresh open starts empty.
        let reopened = registry.open("alice").await.unwrap();
        assert!(reopened.list().await.entries.is_empty());
    }

    #[tokio::test]
    async fn blank_session_id_is_rejected() {
        let registry = registry().await;
        let err = registry.open("  ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(registry.is_empty().await);
    }
}
