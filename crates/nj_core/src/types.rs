use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Articles published in or before this year are rejected as catalog noise.
pub const MIN_PUBLICATION_YEAR: i32 = 1900;

/// A snapshot of an article's identity and metadata, taken when it enters a
/// journal. Journals own their snapshots; editing the catalog afterwards does
/// not change what a journal holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    /// Publication the article appeared in.
    pub name: String,
    pub author: String,
    pub title: String,
    pub url: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Result<Self> {
        let article = Self {
            id,
            name: name.into(),
            author: author.into(),
            title: title.into(),
            url: url.into(),
            content: content.into(),
            published_at,
        };
        article.validate()?;
        Ok(article)
    }

    /// Checks the fields a journal relies on: a positive id, a non-blank
    /// author and title, a parseable URL and a plausible publication date.
    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(Error::InvalidArgument(
                "article id must be greater than 0".to_string(),
            ));
        }
        if self.author.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "article {} has no author",
                self.id
            )));
        }
        if self.title.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "article {} has no title",
                self.id
            )));
        }
        Url::parse(&self.url).map_err(|e| Error::InvalidUrl(format!("{}: {}", self.url, e)))?;
        if self.published_at.year() <= MIN_PUBLICATION_YEAR {
            return Err(Error::InvalidArgument(format!(
                "article {} publication year must be after {}, got {}",
                self.id,
                MIN_PUBLICATION_YEAR,
                self.published_at.year()
            )));
        }
        Ok(())
    }

    /// Compound-key match on (author, title, published_at). This is the
    /// second lookup strategy next to plain id equality.
    pub fn matches_key(&self, author: &str, title: &str, published_at: DateTime<Utc>) -> bool {
        self.author == author && self.title == title && self.published_at == published_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn published() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn valid_article_passes_validation() {
        let article = Article::new(
            1,
            "The Daily",
            "A. Writer",
            "A headline",
            "https://example.com/a",
            "Some words here.",
            published(),
        );
        assert!(article.is_ok());
    }

    #[test]
    fn zero_id_is_rejected() {
        let err = Article::new(
            0,
            "The Daily",
            "A. Writer",
            "A headline",
            "https://example.com/a",
            "",
            published(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn blank_author_and_title_are_rejected() {
        let err = Article::new(
            1,
            "The Daily",
            "   ",
            "A headline",
            "https://example.com/a",
            "",
            published(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = Article::new(
            1,
            "The Daily",
            "A. Writer",
            "",
            "https://example.com/a",
            "",
            published(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = Article::new(
            1,
            "The Daily",
            "A. Writer",
            "A headline",
            "not a url",
            "",
            published(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn publication_year_before_1901_is_rejected() {
        let err = Article::new(
            1,
            "The Daily",
            "A. Writer",
            "A headline",
            "https://example.com/a",
            "",
            Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn compound_key_matches_all_three_fields() {
        let article = Article::new(
            1,
            "The Daily",
            "A. Writer",
            "A headline",
            "https://example.com/a",
            "",
            published(),
        )
        .unwrap();
        assert!(article.matches_key("A. Writer", "A headline", published()));
        assert!(!article.matches_key("A. Writer", "Another headline", published()));
        assert!(!article.matches_key("B. Writer", "A headline", published()));
    }
}
