pub mod backends;

pub use backends::*;

pub mod prelude {
    pub use super::backends::*;
    pub use nj_core::{Article, Catalog, Error, Result};
}
