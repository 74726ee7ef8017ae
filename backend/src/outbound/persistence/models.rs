//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types validate
//! stored values and report failures as strings for the adapter to wrap.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    PasswordDigest, Rating, RatingScores, RatingSubmission, SubjectCode, User, UserId, WebDomain,
    WebDomainId,
};

use super::schema::{domains, ratings, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub subject_code: Option<String>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        User::try_from_parts(self.id, &self.username, self.subject_code.as_deref())
            .map_err(|err| format!("invalid user row {}: {err}", self.id))
    }
}

/// Row struct for the login lookup, carrying the digest.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    #[diesel(embed)]
    pub user: UserRow,
    pub password_hash: String,
}

impl CredentialRow {
    pub(crate) fn into_parts(self) -> Result<(User, PasswordDigest), String> {
        let id = self.user.id;
        let user = self.user.into_user()?;
        let digest = PasswordDigest::parse(self.password_hash)
            .map_err(|err| format!("invalid password digest for user {id}: {err}"))?;
        Ok((user, digest))
    }
}

/// Row struct for reading from the domains table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domains)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DomainRow {
    pub id: i32,
    pub domain: String,
    pub subject_code: String,
    pub url: String,
}

impl DomainRow {
    pub(crate) fn into_domain(self) -> Result<WebDomain, String> {
        let id = WebDomainId::new(self.id).map_err(|err| err.to_string())?;
        let subject = SubjectCode::new(&self.subject_code)
            .map_err(|err| format!("invalid subject on domain {}: {err}", self.id))?;
        Ok(WebDomain::new(id, self.domain, subject, self.url))
    }
}

/// Row struct for reading from the ratings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RatingRow {
    pub domain_id: i32,
    pub user_id: i32,
    pub relevance: i16,
    pub popularity: i16,
    pub professionalism: i16,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RatingRow {
    pub(crate) fn into_rating(self) -> Result<Rating, String> {
        let domain_id = WebDomainId::new(self.domain_id).map_err(|err| err.to_string())?;
        let user_id = UserId::new(self.user_id).map_err(|err| err.to_string())?;
        let scores = RatingScores::try_from_parts(
            Some(i64::from(self.relevance)),
            Some(i64::from(self.popularity)),
            Some(i64::from(self.professionalism)),
        )
        .map_err(|err| format!("stored rating out of range: {err}"))?;
        Ok(Rating::new(
            domain_id,
            user_id,
            scores,
            self.remark,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Insertable struct for new ratings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ratings)]
pub(crate) struct NewRatingRow<'a> {
    pub domain_id: i32,
    pub user_id: i32,
    pub relevance: i16,
    pub popularity: i16,
    pub professionalism: i16,
    pub remark: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewRatingRow<'a> {
    pub(crate) fn from_submission(submission: &'a RatingSubmission, now: DateTime<Utc>) -> Self {
        let scores = submission.scores();
        Self {
            domain_id: submission.domain_id().get(),
            user_id: submission.user_id().get(),
            relevance: i16::from(scores.relevance().get()),
            popularity: i16::from(scores.popularity().get()),
            professionalism: i16::from(scores.professionalism().get()),
            remark: submission.remark(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset applied when a reviewer re-submits a rating.
///
/// `remark` is written even when `None` so clearing a remark sticks.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = ratings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RatingChangeset<'a> {
    pub relevance: i16,
    pub popularity: i16,
    pub professionalism: i16,
    pub remark: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> RatingChangeset<'a> {
    pub(crate) fn from_submission(submission: &'a RatingSubmission, now: DateTime<Utc>) -> Self {
        let scores = submission.scores();
        Self {
            relevance: i16::from(scores.relevance().get()),
            popularity: i16::from(scores.popularity().get()),
            professionalism: i16::from(scores.professionalism().get()),
            remark: submission.remark(),
            updated_at: now,
        }
    }
}
