pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::Catalog;
pub use error::Error;
pub use types::Article;
pub type Result<T> = std::result::Result<T, Error>;
