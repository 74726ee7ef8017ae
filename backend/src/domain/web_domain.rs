//! Website domains awaiting review.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SubjectCode;

/// Surrogate identifier of a domain row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct WebDomainId(i32);

/// Raised when a domain identifier is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("domain id must be a positive integer")]
pub struct InvalidWebDomainId;

impl WebDomainId {
    /// Validate and wrap a database identifier.
    pub fn new(id: i32) -> Result<Self, InvalidWebDomainId> {
        if id <= 0 {
            return Err(InvalidWebDomainId);
        }
        Ok(Self(id))
    }

    /// Raw database value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for WebDomainId {
    type Error = InvalidWebDomainId;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WebDomainId> for i32 {
    fn from(value: WebDomainId) -> Self {
        value.0
    }
}

impl fmt::Display for WebDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A website domain imported for a subject.
///
/// `url` is kept verbatim; imports may pack several comma-separated URLs
/// into it. Use [`WebDomain::urls`] for the split list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebDomain {
    id: WebDomainId,
    domain: String,
    subject_code: SubjectCode,
    url: String,
}

impl WebDomain {
    /// Assemble a domain from stored values.
    pub fn new(
        id: WebDomainId,
        domain: impl Into<String>,
        subject_code: SubjectCode,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            subject_code,
            url: url.into(),
        }
    }

    pub fn id(&self) -> WebDomainId {
        self.id
    }

    /// Host name, e.g. `example.edu`.
    pub fn domain(&self) -> &str {
        self.domain.as_str()
    }

    pub fn subject_code(&self) -> &SubjectCode {
        &self.subject_code
    }

    /// Raw URL column.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Individual URLs, trimmed, blanks dropped.
    ///
    /// # Examples
    /// ```
    /// use rating_backend::domain::{SubjectCode, WebDomain, WebDomainId};
    ///
    /// let domain = WebDomain::new(
    ///     WebDomainId::new(1).unwrap(),
    ///     "example.edu",
    ///     SubjectCode::new("MATH").unwrap(),
    ///     "https://example.edu/a, https://example.edu/b,",
    /// );
    /// assert_eq!(
    ///     domain.urls(),
    ///     vec!["https://example.edu/a", "https://example.edu/b"]
    /// );
    /// ```
    pub fn urls(&self) -> Vec<&str> {
        self.url
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn domain_with_url(url: &str) -> WebDomain {
        WebDomain::new(
            WebDomainId::new(4).expect("valid id"),
            "example.edu",
            SubjectCode::new("MATH").expect("valid code"),
            url,
        )
    }

    #[rstest]
    #[case("https://a.example", vec!["https://a.example"])]
    #[case("https://a.example,https://b.example", vec!["https://a.example", "https://b.example"])]
    #[case(" , ", vec![])]
    #[case("", vec![])]
    fn urls_split_on_commas(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(domain_with_url(raw).urls(), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn id_rejects_non_positive(#[case] raw: i32) {
        assert_eq!(WebDomainId::new(raw), Err(InvalidWebDomainId));
    }
}
