use nj_core::Article;
use std::time::Duration;

use crate::journal::Journal;

/// Reading speed used to estimate article durations.
pub const WORDS_PER_MINUTE: u64 = 200;

/// Derived, read-only view of a journal: how many articles it holds and how
/// long reading all of them is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalStats {
    pub length: usize,
    pub duration: Duration,
}

impl JournalStats {
    pub fn of(journal: &Journal) -> Self {
        let duration = journal.articles().map(reading_time).sum();
        Self {
            length: journal.len(),
            duration,
        }
    }
}

/// Estimated time to read one article: whitespace-separated word count at
/// [`WORDS_PER_MINUTE`], rounded up to whole seconds, at least one second
/// for any non-empty content.
pub fn reading_time(article: &Article) -> Duration {
    let words = article.content.split_whitespace().count() as u64;
    if words == 0 {
        return Duration::ZERO;
    }
    let secs = (words * 60).div_ceil(WORDS_PER_MINUTE);
    Duration::from_secs(secs.max(1))
}
