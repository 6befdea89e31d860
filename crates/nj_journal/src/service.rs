use chrono::{DateTime, Utc};
use nj_core::{Article, Catalog, Error};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::entry::JournalEntry;
use crate::journal::Journal;
use crate::reader::ReadTracker;
use crate::stats::JournalStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Stable error kinds handed to the boundary layer. Whatever transport sits
/// on top must carry these through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    OutOfRange,
    NotFound,
    InvalidArgument,
    JournalExhausted,
    PartialFailure,
    Catalog,
}

impl From<&Error> for ErrorKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InvalidArgument(_) | Error::InvalidUrl(_) => ErrorKind::InvalidArgument,
            Error::JournalExhausted { .. } => ErrorKind::JournalExhausted,
            Error::PartialFailure { .. } => ErrorKind::PartialFailure,
            Error::Catalog(_) | Error::External(_) => ErrorKind::Catalog,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl MutationResponse {
    fn success(article_number: Option<usize>) -> Self {
        Self {
            status: Status::Success,
            article_number,
            error_kind: None,
        }
    }

    fn failure(err: &Error) -> Self {
        warn!(error = %err, "journal mutation failed");
        Self {
            status: Status::Error,
            article_number: None,
            error_kind: Some(ErrorKind::from(err)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ReadResponse {
    fn success(article: Article, cursor: usize) -> Self {
        Self {
            status: Status::Success,
            article: Some(article),
            cursor: Some(cursor),
            error_kind: None,
        }
    }

    fn failure(err: &Error, cursor: usize) -> Self {
        warn!(error = %err, "journal read failed");
        Self {
            status: Status::Error,
            article: None,
            cursor: Some(cursor),
            error_kind: Some(ErrorKind::from(err)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkReadResponse {
    pub status: Status,
    pub articles: Vec<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl BulkReadResponse {
    fn success(articles: Vec<Article>, cursor: usize) -> Self {
        Self {
            status: Status::Success,
            articles,
            cursor: Some(cursor),
            error_kind: None,
        }
    }

    fn failure(err: &Error, cursor: usize) -> Self {
        warn!(error = %err, "bulk journal read failed");
        Self {
            status: Status::Error,
            articles: Vec::new(),
            cursor: Some(cursor),
            error_kind: Some(ErrorKind::from(err)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalResponse {
    pub status: Status,
    pub entries: Vec<JournalEntry>,
    pub cursor: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub status: Status,
    pub length: usize,
    pub duration_secs: u64,
}

/// Façade the boundary layer talks to. One per session: it owns the
/// session's journal behind a lock and a handle to the shared catalog, and
/// nothing else. Inputs are validated here; internal errors are folded into
/// the stable [`ErrorKind`] values; nothing is swallowed or retried.
pub struct JournalService {
    journal: Mutex<Journal>,
    catalog: Arc<dyn Catalog>,
    tracker: ReadTracker,
}

impl std::fmt::Debug for JournalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalService").finish_non_exhaustive()
    }
}

impl JournalService {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            journal: Mutex::new(Journal::new()),
            catalog: catalog.clone(),
            tracker: ReadTracker::new(catalog),
        }
    }

    /// Appends an already-materialized article snapshot.
    pub async fn add_article(&self, article: Article) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.append(article) {
            Ok(n) => MutationResponse::success(Some(n)),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    /// Fetches the article from the catalog by id, then appends it.
    pub async fn add_article_by_id(&self, id: u64) -> MutationResponse {
        if id == 0 {
            return MutationResponse::failure(&Error::InvalidArgument(
                "article id must be greater than 0".to_string(),
            ));
        }
        let article = match self.catalog.fetch_article_by_id(id).await {
            Ok(article) => article,
            Err(e) => return MutationResponse::failure(&e),
        };
        self.add_article(article).await
    }

    /// Fetches the article from the catalog by compound key, then appends it.
    pub async fn add_article_by_key(
        &self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> MutationResponse {
        if author.trim().is_empty() || title.trim().is_empty() {
            return MutationResponse::failure(&Error::InvalidArgument(
                "author and title must not be blank".to_string(),
            ));
        }
        let article = match self
            .catalog
            .fetch_article_by_key(author, title, published_at)
            .await
        {
            Ok(article) => article,
            Err(e) => return MutationResponse::failure(&e),
        };
        self.add_article(article).await
    }

    pub async fn remove_by_article_number(&self, n: usize) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.remove_by_article_number(n) {
            Ok(_) => MutationResponse::success(None),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn remove_by_id(&self, id: u64) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.remove_by_id(id) {
            Ok(_) => MutationResponse::success(None),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn remove_by_key(
        &self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.remove_by_key(author, title, published_at) {
            Ok(_) => MutationResponse::success(None),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn swap(&self, n1: usize, n2: usize) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.swap(n1, n2) {
            Ok(()) => MutationResponse::success(None),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn move_to_position(&self, from: usize, to: usize) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.move_to_position(from, to) {
            Ok(()) => MutationResponse::success(Some(to)),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn move_to_front(&self, n: usize) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.move_to_front(n) {
            Ok(()) => MutationResponse::success(Some(1)),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn move_to_end(&self, n: usize) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        let len = journal.len();
        match journal.move_to_end(n) {
            Ok(()) => MutationResponse::success(Some(len)),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    pub async fn clear(&self) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        journal.clear();
        MutationResponse::success(None)
    }

    pub async fn go_to(&self, n: usize) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        match journal.go_to(n) {
            Ok(()) => MutationResponse::success(Some(n)),
            Err(e) => MutationResponse::failure(&e),
        }
    }

    /// Peek at the entry under the cursor without reading it.
    pub async fn current(&self) -> ReadResponse {
        let journal = self.journal.lock().await;
        match journal.current() {
            Ok(entry) => ReadResponse::success(entry.article, journal.cursor()),
            Err(e) => ReadResponse::failure(&e, journal.cursor()),
        }
    }

    pub async fn read_current(&self) -> ReadResponse {
        let mut journal = self.journal.lock().await;
        match self.tracker.read_current(&mut journal).await {
            Ok(article) => ReadResponse::success(article, journal.cursor()),
            Err(e) => ReadResponse::failure(&e, journal.cursor()),
        }
    }

    pub async fn read_entire_journal(&self) -> BulkReadResponse {
        let mut journal = self.journal.lock().await;
        match self.tracker.read_entire_journal(&mut journal).await {
            Ok(articles) => BulkReadResponse::success(articles, journal.cursor()),
            Err(e) => BulkReadResponse::failure(&e, journal.cursor()),
        }
    }

    pub async fn read_rest_of_journal(&self) -> BulkReadResponse {
        let mut journal = self.journal.lock().await;
        match self.tracker.read_rest_of_journal(&mut journal).await {
            Ok(articles) => BulkReadResponse::success(articles, journal.cursor()),
            Err(e) => BulkReadResponse::failure(&e, journal.cursor()),
        }
    }

    pub async fn rewind(&self) -> MutationResponse {
        let mut journal = self.journal.lock().await;
        self.tracker.rewind(&mut journal);
        MutationResponse::success(None)
    }

    pub async fn list(&self) -> JournalResponse {
        let journal = self.journal.lock().await;
        JournalResponse {
            status: Status::Success,
            entries: journal.entries(),
            cursor: journal.cursor(),
        }
    }

    pub async fn stats(&self) -> StatsResponse {
        let journal = self.journal.lock().await;
        let stats = JournalStats::of(&journal);
        StatsResponse {
            status: Status::Success,
            length: stats.length,
            duration_secs: stats.duration.as_secs(),
        }
    }
}
