use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nj_core::{Article, Catalog, Error, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct CatalogRecord {
    article: Article,
    read_count: u64,
    deleted: bool,
}

/// Plain in-memory article table. Insertion order is catalog order; deleted
/// rows keep their slot so ids and read counts survive a soft delete.
struct CatalogStore {
    records: Vec<CatalogRecord>,
}

impl CatalogStore {
    fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    fn insert(&mut self, article: Article) -> Result<()> {
        article.validate()?;
        if self.records.iter().any(|r| r.article.id == article.id) {
            return Err(Error::Catalog(format!(
                "article with id {} already exists in the catalog",
                article.id
            )));
        }
        debug!(
            id = article.id,
            title = %article.title,
            "inserting article into catalog"
        );
        self.records.push(CatalogRecord {
            article,
            read_count: 0,
            deleted: false,
        });
        Ok(())
    }

    fn record(&self, id: u64) -> Result<&CatalogRecord> {
        self.records
            .iter()
            .find(|r| r.article.id == id)
            .ok_or_else(|| Error::NotFound(format!("article with id {} not found", id)))
    }

    fn record_mut(&mut self, id: u64) -> Result<&mut CatalogRecord> {
        self.records
            .iter_mut()
            .find(|r| r.article.id == id)
            .ok_or_else(|| Error::NotFound(format!("article with id {} not found", id)))
    }

    fn fetch_by_id(&self, id: u64) -> Result<Article> {
        let record = self.record(id)?;
        if record.deleted {
            return Err(Error::NotFound(format!(
                "article with id {} has been deleted",
                id
            )));
        }
        Ok(record.article.clone())
    }

    fn fetch_by_key(
        &self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> Result<Article> {
        self.records
            .iter()
            .filter(|r| !r.deleted)
            .find(|r| r.article.matches_key(author, title, published_at))
            .map(|r| r.article.clone())
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "article by '{}' titled '{}' published {} not found",
                    author, title, published_at
                ))
            })
    }

    fn increment_read_count(&mut self, id: u64) -> Result<()> {
        let record = self.record_mut(id)?;
        if record.deleted {
            return Err(Error::NotFound(format!(
                "article with id {} has been deleted",
                id
            )));
        }
        record.read_count += 1;
        debug!(id, read_count = record.read_count, "read count incremented");
        Ok(())
    }

    fn soft_delete(&mut self, id: u64) -> Result<()> {
        let record = self.record_mut(id)?;
        if record.deleted {
            return Err(Error::NotFound(format!(
                "article with id {} has already been deleted",
                id
            )));
        }
        record.deleted = true;
        info!(id, "article marked as deleted");
        Ok(())
    }

    fn list_all(&self) -> Vec<Article> {
        self.records
            .iter()
            .filter(|r| !r.deleted)
            .map(|r| r.article.clone())
            .collect()
    }

    fn read_count(&self, id: u64) -> Result<u64> {
        Ok(self.record(id)?.read_count)
    }
}

/// Shared in-memory catalog backend.
pub struct MemoryCatalog {
    store: Arc<RwLock<CatalogStore>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(CatalogStore::new())),
        }
    }

    pub async fn insert(&self, article: Article) -> Result<()> {
        let mut store = self.store.write().await;
        store.insert(article)
    }

    /// Bulk-load fixture articles, stopping at the first invalid one.
    pub async fn seed(&self, articles: Vec<Article>) -> Result<()> {
        let mut store = self.store.write().await;
        for article in articles {
            store.insert(article)?;
        }
        Ok(())
    }

    /// Current read count of an article, deleted or not.
    pub async fn read_count(&self, id: u64) -> Result<u64> {
        let store = self.store.read().await;
        store.read_count(id)
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn fetch_article_by_id(&self, id: u64) -> Result<Article> {
        let store = self.store.read().await;
        store.fetch_by_id(id)
    }

    async fn fetch_article_by_key(
        &self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> Result<Article> {
        let store = self.store.read().await;
        store.fetch_by_key(author, title, published_at)
    }

    async fn increment_read_count(&self, id: u64) -> Result<()> {
        let mut store = self.store.write().await;
        store.increment_read_count(id)
    }

    async fn soft_delete(&self, id: u64) -> Result<()> {
        let mut store = self.store.write().await;
        store.soft_delete(id)
    }

    async fn list_all(&self) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.list_all())
    }
}
