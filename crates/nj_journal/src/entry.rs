use nj_core::Article;
use serde::Serialize;

/// An article paired with its current 1-based position in the journal.
///
/// Article numbers are derived from sequence position at the moment of
/// observation, never stored, so they always form a contiguous `1..=len`
/// run. Any structural mutation invalidates previously observed numbers;
/// callers re-fetch entries after mutating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub article_number: usize,
    pub article: Article,
}
