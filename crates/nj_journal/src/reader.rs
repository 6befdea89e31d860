use chrono::{DateTime, Utc};
use nj_core::{Article, Catalog, Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::journal::Journal;

/// One recorded read: which article, and when.
#[derive(Debug, Clone, Copy)]
pub struct ReadEvent {
    pub article_id: u64,
    pub read_at: DateTime<Utc>,
}

/// Walks a journal's cursor and writes each read through to the catalog.
///
/// The read count write-through is issued synchronously before a read is
/// reported successful. The journal mutation is authoritative: if the
/// catalog call fails, the cursor stays advanced and the failure surfaces as
/// [`Error::PartialFailure`] so the caller can retry the count.
pub struct ReadTracker {
    catalog: Arc<dyn Catalog>,
}

impl ReadTracker {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Reads the entry under the cursor and advances the cursor by one.
    pub async fn read_current(&self, journal: &mut Journal) -> Result<Article> {
        let entry = journal.current()?;
        info!(
            id = entry.article.id,
            title = %entry.article.title,
            article_number = entry.article_number,
            "reading article"
        );
        journal.advance();
        self.record_read(entry.article.id).await?;
        Ok(entry.article)
    }

    /// Rewinds, then reads every article in order. Fails with
    /// [`Error::JournalExhausted`] only on an empty journal; on an exhausted
    /// one it starts over from the first article.
    pub async fn read_entire_journal(&self, journal: &mut Journal) -> Result<Vec<Article>> {
        if journal.is_empty() {
            return Err(Error::JournalExhausted {
                cursor: journal.cursor(),
                length: 0,
            });
        }
        info!(length = journal.len(), "reading the entire journal");
        journal.rewind();
        self.drain(journal).await
    }

    /// Reads from the cursor to the end. Fails with
    /// [`Error::JournalExhausted`] when nothing is left to read.
    pub async fn read_rest_of_journal(&self, journal: &mut Journal) -> Result<Vec<Article>> {
        if journal.is_exhausted() {
            return Err(Error::JournalExhausted {
                cursor: journal.cursor(),
                length: journal.len(),
            });
        }
        info!(
            cursor = journal.cursor(),
            length = journal.len(),
            "reading the rest of the journal"
        );
        self.drain(journal).await
    }

    /// Resets the cursor without emitting read events or touching order.
    pub fn rewind(&self, journal: &mut Journal) {
        journal.rewind();
    }

    async fn drain(&self, journal: &mut Journal) -> Result<Vec<Article>> {
        let mut read = Vec::new();
        while !journal.is_exhausted() {
            read.push(self.read_current(journal).await?);
        }
        Ok(read)
    }

    async fn record_read(&self, article_id: u64) -> Result<()> {
        let event = ReadEvent {
            article_id,
            read_at: Utc::now(),
        };
        debug!(
            article_id = event.article_id,
            read_at = %event.read_at,
            "recording read event"
        );
        self.catalog
            .increment_read_count(event.article_id)
            .await
            .map_err(|e| Error::PartialFailure {
                article_id: event.article_id,
                reason: e.to_string(),
            })
    }
}
