pub mod entry;
pub mod journal;
pub mod reader;
pub mod service;
pub mod sessions;
pub mod stats;

pub use entry::JournalEntry;
pub use journal::Journal;
pub use reader::{ReadEvent, ReadTracker};
pub use service::{
    BulkReadResponse, ErrorKind, JournalResponse, JournalService, MutationResponse, ReadResponse,
    StatsResponse, Status,
};
pub use sessions::SessionRegistry;
pub use stats::{JournalStats, WORDS_PER_MINUTE};

pub mod prelude {
    pub use super::{
        Journal, JournalEntry, JournalService, JournalStats, ReadTracker, SessionRegistry,
    };
    pub use nj_core::{Article, Catalog, Error, Result};
}
