use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::Article;
use crate::Result;

/// The external article store. Journals pull snapshots out of it and push
/// read counts back into it; they never reach past this trait.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch an article by its catalog id
    async fn fetch_article_by_id(&self, id: u64) -> Result<Article>;

    /// Fetch an article by its (author, title, published_at) compound key
    async fn fetch_article_by_key(
        &self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> Result<Article>;

    /// Bump the read count of an article
    async fn increment_read_count(&self, id: u64) -> Result<()>;

    /// Mark an article as deleted without dropping its row
    async fn soft_delete(&self, id: u64) -> Result<()>;

    /// All articles that are not soft-deleted, in catalog order
    async fn list_all(&self) -> Result<Vec<Article>>;
}
