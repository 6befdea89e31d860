use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Article number {article_number} is out of range for a journal of {length}")]
    OutOfRange {
        article_number: usize,
        length: usize,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Journal exhausted: cursor {cursor} is past the last of {length} articles")]
    JournalExhausted { cursor: usize, length: usize },

    #[error("Read recorded, but the catalog read count for article {article_id} was not: {reason}")]
    PartialFailure { article_id: u64, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
