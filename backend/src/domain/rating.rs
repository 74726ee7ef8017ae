//! Reviewer ratings of a domain.
//!
//! A rating carries three integer scores in `1..=10` and an optional
//! remark. Validation happens here, before any write reaches storage, and
//! distinguishes an absent score from a present-but-invalid one so clients
//! can tell "you forgot a field" apart from "0 is not a score".

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{UserId, WebDomainId};

/// Lowest accepted score.
pub const SCORE_MIN: u8 = 1;
/// Highest accepted score.
pub const SCORE_MAX: u8 = 10;

/// The three scored dimensions of a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreField {
    Relevance,
    Popularity,
    Professionalism,
}

impl ScoreField {
    /// Field name as it appears in request and response bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Popularity => "popularity",
            Self::Professionalism => "professionalism",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for rating input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingValidationError {
    #[error("{field} is required")]
    MissingScore { field: ScoreField },
    #[error("{field} must be between 1 and 10, got {value}")]
    ScoreOutOfRange { field: ScoreField, value: i64 },
}

impl RatingValidationError {
    /// Offending field.
    pub fn field(&self) -> ScoreField {
        match self {
            Self::MissingScore { field } | Self::ScoreOutOfRange { field, .. } => *field,
        }
    }

    /// Machine-readable reason reported to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingScore { .. } => "missing_field",
            Self::ScoreOutOfRange { .. } => "score_out_of_range",
        }
    }
}

/// A single score in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Score(u8);

impl Score {
    /// Validate a raw value for `field`.
    pub fn new(field: ScoreField, value: i64) -> Result<Self, RatingValidationError> {
        match u8::try_from(value) {
            Ok(score) if (SCORE_MIN..=SCORE_MAX).contains(&score) => Ok(Self(score)),
            _ => Err(RatingValidationError::ScoreOutOfRange { field, value }),
        }
    }

    /// Validate an optional raw value, reporting absence separately.
    pub fn required(field: ScoreField, value: Option<i64>) -> Result<Self, RatingValidationError> {
        let value = value.ok_or(RatingValidationError::MissingScore { field })?;
        Self::new(field, value)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

/// The three validated scores of a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingScores {
    relevance: Score,
    popularity: Score,
    professionalism: Score,
}

impl RatingScores {
    pub fn new(relevance: Score, popularity: Score, professionalism: Score) -> Self {
        Self {
            relevance,
            popularity,
            professionalism,
        }
    }

    /// Validate raw optional inputs in field order, returning the first
    /// failure.
    ///
    /// # Examples
    /// ```
    /// use rating_backend::domain::{RatingScores, RatingValidationError, ScoreField};
    ///
    /// assert!(RatingScores::try_from_parts(Some(5), Some(7), Some(10)).is_ok());
    /// assert_eq!(
    ///     RatingScores::try_from_parts(None, Some(7), Some(10)),
    ///     Err(RatingValidationError::MissingScore { field: ScoreField::Relevance })
    /// );
    /// ```
    pub fn try_from_parts(
        relevance: Option<i64>,
        popularity: Option<i64>,
        professionalism: Option<i64>,
    ) -> Result<Self, RatingValidationError> {
        Ok(Self::new(
            Score::required(ScoreField::Relevance, relevance)?,
            Score::required(ScoreField::Popularity, popularity)?,
            Score::required(ScoreField::Professionalism, professionalism)?,
        ))
    }

    pub fn relevance(&self) -> Score {
        self.relevance
    }

    pub fn popularity(&self) -> Score {
        self.popularity
    }

    pub fn professionalism(&self) -> Score {
        self.professionalism
    }
}

/// Collapse blank remarks to `None`; keep anything else verbatim.
pub fn normalise_remark(remark: Option<String>) -> Option<String> {
    remark.filter(|text| !text.trim().is_empty())
}

/// Validated rating input for one (domain, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSubmission {
    domain_id: WebDomainId,
    user_id: UserId,
    scores: RatingScores,
    remark: Option<String>,
}

impl RatingSubmission {
    pub fn new(
        domain_id: WebDomainId,
        user_id: UserId,
        scores: RatingScores,
        remark: Option<String>,
    ) -> Self {
        Self {
            domain_id,
            user_id,
            scores,
            remark: normalise_remark(remark),
        }
    }

    pub fn domain_id(&self) -> WebDomainId {
        self.domain_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn scores(&self) -> RatingScores {
        self.scores
    }

    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }
}

/// A stored rating.
///
/// Serialises as `{domainId, relevance, popularity, professionalism,
/// remark, createdAt, updatedAt}`; the owning user is implied by the
/// session and omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    domain_id: WebDomainId,
    #[serde(skip)]
    user_id: UserId,
    #[serde(flatten)]
    scores: RatingScores,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        domain_id: WebDomainId,
        user_id: UserId,
        scores: RatingScores,
        remark: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            domain_id,
            user_id,
            scores,
            remark,
            created_at,
            updated_at,
        }
    }

    pub fn domain_id(&self) -> WebDomainId {
        self.domain_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn scores(&self) -> RatingScores {
        self.scores
    }

    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
