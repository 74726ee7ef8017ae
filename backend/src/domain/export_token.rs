//! Shared secret guarding the statistics endpoints.

use std::fmt;

use sha2::{Digest, Sha256};

/// Outcome of checking a caller-supplied token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    Accepted,
    /// Token missing or wrong.
    Rejected,
    /// The deployment has no token configured; the endpoints are closed.
    NotConfigured,
}

/// Static token compared for exact equality.
///
/// Both sides are hashed with SHA-256 before comparison so the comparison
/// time does not depend on how much of the candidate matches.
#[derive(Clone)]
pub struct ExportToken {
    digest: Option<[u8; 32]>,
    fingerprint: Option<String>,
}

impl ExportToken {
    /// Build from the configured value. Blank values count as unset.
    pub fn new(configured: Option<&str>) -> Self {
        match configured.filter(|token| !token.trim().is_empty()) {
            Some(token) => {
                let digest: [u8; 32] = Sha256::digest(token.as_bytes()).into();
                let fingerprint = hex::encode(digest.get(..4).unwrap_or_default());
                Self {
                    digest: Some(digest),
                    fingerprint: Some(fingerprint),
                }
            }
            None => Self::disabled(),
        }
    }

    /// A token that rejects every request with [`TokenCheck::NotConfigured`].
    pub fn disabled() -> Self {
        Self {
            digest: None,
            fingerprint: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// Short hex prefix of the token digest, safe to log.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Check a candidate from the request.
    ///
    /// # Examples
    /// ```
    /// use rating_backend::domain::{ExportToken, TokenCheck};
    ///
    /// let token = ExportToken::new(Some("s3cret"));
    /// assert_eq!(token.check(Some("s3cret")), TokenCheck::Accepted);
    /// assert_eq!(token.check(Some("S3cret")), TokenCheck::Rejected);
    /// assert_eq!(ExportToken::disabled().check(Some("s3cret")), TokenCheck::NotConfigured);
    /// ```
    pub fn check(&self, candidate: Option<&str>) -> TokenCheck {
        let Some(expected) = self.digest else {
            return TokenCheck::NotConfigured;
        };
        let Some(candidate) = candidate else {
            return TokenCheck::Rejected;
        };
        let actual: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        let difference = expected
            .iter()
            .zip(actual.iter())
            .fold(0_u8, |acc, (left, right)| acc | (left ^ right));
        if difference == 0 {
            TokenCheck::Accepted
        } else {
            TokenCheck::Rejected
        }
    }
}

impl fmt::Debug for ExportToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportToken")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}
