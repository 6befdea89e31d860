use chrono::{DateTime, Utc};
use nj_core::{Article, Error, Result};
use tracing::{debug, info, warn};

use crate::entry::JournalEntry;

/// A user's personal ordered reading queue.
///
/// Holds article snapshots in reading order plus a 1-based cursor pointing at
/// the next unread entry. The cursor ranges over `[1, len + 1]`; `len + 1`
/// means the journal is exhausted. One journal belongs to one session;
/// callers serialize access to it.
#[derive(Debug)]
pub struct Journal {
    articles: Vec<Article>,
    cursor: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            cursor: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Article number of the next unread entry; `len() + 1` once exhausted.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor > self.articles.len()
    }

    /// Appends an article at the end and returns its article number.
    /// The cursor does not move.
    pub fn append(&mut self, article: Article) -> Result<usize> {
        article.validate()?;
        info!(id = article.id, title = %article.title, "appending article to journal");
        self.articles.push(article);
        Ok(self.articles.len())
    }

    /// Removes the entry at article number `n` and returns its article.
    ///
    /// Entries behind it shift down one slot. A cursor past `n` moves with
    /// its entry; a cursor at `n` stays put so the next article is not
    /// skipped.
    pub fn remove_by_article_number(&mut self, n: usize) -> Result<Article> {
        self.check_article_number(n)?;
        let article = self.articles.remove(n - 1);
        if self.cursor > n {
            self.cursor -= 1;
        }
        info!(id = article.id, article_number = n, "removed article from journal");
        Ok(article)
    }

    /// Removes the first entry whose article id matches.
    pub fn remove_by_id(&mut self, id: u64) -> Result<Article> {
        let n = self
            .find_by_id(id)
            .ok_or_else(|| Error::NotFound(format!("article with id {} not found in journal", id)))?;
        self.remove_by_article_number(n)
    }

    /// Removes the first entry matching the (author, title, published_at)
    /// compound key.
    pub fn remove_by_key(
        &mut self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> Result<Article> {
        let n = self.find_by_key(author, title, published_at).ok_or_else(|| {
            Error::NotFound(format!(
                "article by '{}' titled '{}' published {} not found in journal",
                author, title, published_at
            ))
        })?;
        self.remove_by_article_number(n)
    }

    /// Exchanges the entries at two article numbers.
    ///
    /// The cursor keeps its numeric slot, so after a swap it may point at a
    /// different entry than before. `move_to_position` is the
    /// content-tracking counterpart.
    pub fn swap(&mut self, n1: usize, n2: usize) -> Result<()> {
        self.check_article_number(n1)?;
        self.check_article_number(n2)?;
        if n1 == n2 {
            warn!(article_number = n1, "refusing to swap an article with itself");
            return Err(Error::InvalidArgument(format!(
                "cannot swap article number {} with itself",
                n1
            )));
        }
        self.articles.swap(n1 - 1, n2 - 1);
        debug!(n1, n2, "swapped journal entries");
        Ok(())
    }

    /// Moves the entry at `from` to article number `to`, shifting everything
    /// between by one slot.
    ///
    /// The cursor follows the entry it pointed at before the move, wherever
    /// that entry lands. An exhausted cursor is left alone.
    pub fn move_to_position(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_article_number(from)?;
        self.check_article_number(to)?;
        if from == to {
            return Ok(());
        }

        let tracked = if self.cursor <= self.articles.len() {
            Some(self.cursor - 1)
        } else {
            None
        };

        let article = self.articles.remove(from - 1);
        self.articles.insert(to - 1, article);

        if let Some(old_index) = tracked {
            self.cursor = Self::shifted_index(old_index, from - 1, to - 1) + 1;
        }
        debug!(from, to, cursor = self.cursor, "moved journal entry");
        Ok(())
    }

    /// Where the entry at 0-based `index` lands after the entry at `from`
    /// is removed and reinserted at `to`.
    fn shifted_index(index: usize, from: usize, to: usize) -> usize {
        if index == from {
            return to;
        }
        let after_removal = if index > from { index - 1 } else { index };
        if after_removal >= to {
            after_removal + 1
        } else {
            after_removal
        }
    }

    pub fn move_to_front(&mut self, n: usize) -> Result<()> {
        self.move_to_position(n, 1)
    }

    pub fn move_to_end(&mut self, n: usize) -> Result<()> {
        let len = self.articles.len();
        self.move_to_position(n, len)
    }

    /// Empties the journal and resets the cursor to 1.
    pub fn clear(&mut self) {
        if self.articles.is_empty() {
            warn!("clearing an empty journal");
        }
        self.articles.clear();
        self.cursor = 1;
    }

    /// Sets the cursor to article number `n`.
    pub fn go_to(&mut self, n: usize) -> Result<()> {
        self.check_article_number(n)?;
        info!(article_number = n, "moving cursor");
        self.cursor = n;
        Ok(())
    }

    /// Resets the cursor to the first article. Order is untouched.
    pub fn rewind(&mut self) {
        info!("rewinding journal to the beginning");
        self.cursor = 1;
    }

    /// The entry at article number `n`.
    pub fn entry(&self, n: usize) -> Result<JournalEntry> {
        self.check_article_number(n)?;
        Ok(JournalEntry {
            article_number: n,
            article: self.articles[n - 1].clone(),
        })
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Result<JournalEntry> {
        if self.is_exhausted() {
            return Err(Error::JournalExhausted {
                cursor: self.cursor,
                length: self.articles.len(),
            });
        }
        self.entry(self.cursor)
    }

    /// All entries in reading order with their current article numbers.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.articles
            .iter()
            .enumerate()
            .map(|(i, article)| JournalEntry {
                article_number: i + 1,
                article: article.clone(),
            })
            .collect()
    }

    /// Borrowing walk over the articles in reading order.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    /// Article number of the first entry with this id.
    pub fn find_by_id(&self, id: u64) -> Option<usize> {
        self.articles.iter().position(|a| a.id == id).map(|i| i + 1)
    }

    /// Article number of the first entry matching the compound key.
    pub fn find_by_key(
        &self,
        author: &str,
        title: &str,
        published_at: DateTime<Utc>,
    ) -> Option<usize> {
        self.articles
            .iter()
            .position(|a| a.matches_key(author, title, published_at))
            .map(|i| i + 1)
    }

    pub(crate) fn advance(&mut self) {
        debug_assert!(self.cursor <= self.articles.len());
        self.cursor += 1;
    }

    fn check_article_number(&self, n: usize) -> Result<()> {
        if n < 1 || n > self.articles.len() {
            warn!(
                article_number = n,
                length = self.articles.len(),
                "article number out of range"
            );
            return Err(Error::OutOfRange {
                article_number: n,
                length: self.articles.len(),
            });
        }
        Ok(())
    }
}
