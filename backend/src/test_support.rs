//! In-memory adapters for service and HTTP tests.
//!
//! [`InMemoryStore`] implements every driven port over plain vectors so the
//! real domain services and handlers can be exercised without PostgreSQL.
//! Only compiled for tests or with the `test-support` feature.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageMeta};

use crate::domain::ports::{
    DomainRepository, DomainRepositoryError, RatingRepository, RatingRepositoryError,
    StatsRepository, StatsRepositoryError, StoredCredentials, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    DomainListEntry, DomainListingRequest, DomainListingService, DomainSort, ExportRating,
    ExportRow, ExportScope, ExportToken, PasswordDigest, Rating, RatingService,
    RatingSubmission, SortOrder, StatsService, SubjectCode, SubjectStats, User, UserId,
    UserService, WebDomain, WebDomainId,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

#[derive(Default)]
struct StoreData {
    users: Vec<(User, PasswordDigest)>,
    domains: Vec<WebDomain>,
    ratings: Vec<Rating>,
}

/// Shared in-memory backing store.
#[derive(Default)]
pub struct InMemoryStore {
    data: Mutex<StoreData>,
}

/// Argon2 parameters cheap enough for test suites.
pub fn fast_hasher() -> Argon2<'static> {
    let params = match Params::new(8, 1, 1, None) {
        Ok(params) => params,
        Err(_) => Params::default(),
    };
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a user with a hashed password and return its profile.
    ///
    /// # Panics
    /// Panics when the fixture values are invalid.
    pub fn add_user(&self, username: &str, password: &str, subject: Option<&str>) -> User {
        let mut data = self.lock();
        let next_id = i32::try_from(data.users.len() + 1).unwrap_or(i32::MAX);
        let user = User::try_from_parts(next_id, username, subject)
            .unwrap_or_else(|err| panic!("invalid fixture user {username}: {err}"));
        let digest = PasswordDigest::hash_with(&fast_hasher(), password)
            .unwrap_or_else(|err| panic!("hashing fixture password failed: {err}"));
        data.users.push((user.clone(), digest));
        user
    }

    /// Add a domain and return it.
    ///
    /// # Panics
    /// Panics when the subject code is invalid.
    pub fn add_domain(&self, domain: &str, subject: &str, url: &str) -> WebDomain {
        let mut data = self.lock();
        let next_id = i32::try_from(data.domains.len() + 1).unwrap_or(i32::MAX);
        let id = WebDomainId::new(next_id)
            .unwrap_or_else(|err| panic!("invalid fixture domain id: {err}"));
        let code = SubjectCode::new(subject)
            .unwrap_or_else(|err| panic!("invalid fixture subject {subject}: {err}"));
        let domain = WebDomain::new(id, domain, code, url);
        data.domains.push(domain.clone());
        domain
    }

    /// Remove a user, as an administrator deleting an account would.
    pub fn remove_user(&self, id: UserId) {
        let mut data = self.lock();
        data.users.retain(|(user, _)| user.id() != id);
        data.ratings.retain(|rating| rating.user_id() != id);
    }

    /// Number of stored ratings for a (domain, user) pair.
    pub fn rating_count(&self, domain_id: WebDomainId, user_id: UserId) -> usize {
        self.lock()
            .ratings
            .iter()
            .filter(|rating| rating.domain_id() == domain_id && rating.user_id() == user_id)
            .count()
    }
}

fn find_rating(data: &StoreData, domain_id: WebDomainId, user_id: UserId) -> Option<&Rating> {
    data.ratings
        .iter()
        .find(|rating| rating.domain_id() == domain_id && rating.user_id() == user_id)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.id() == *id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(user, _)| user.username().as_ref() == username)
            .map(|(user, digest)| StoredCredentials {
                user: user.clone(),
                password_digest: digest.clone(),
            }))
    }
}

#[async_trait]
impl DomainRepository for InMemoryStore {
    async fn list_page(
        &self,
        request: &DomainListingRequest,
    ) -> Result<Page<DomainListEntry>, DomainRepositoryError> {
        let data = self.lock();
        let mut entries: Vec<DomainListEntry> = data
            .domains
            .iter()
            .filter(|domain| *domain.subject_code() == request.subject_code)
            .map(|domain| DomainListEntry {
                domain: domain.clone(),
                rating: find_rating(&data, domain.id(), request.user_id).cloned(),
            })
            .collect();

        let by_name = |a: &DomainListEntry, b: &DomainListEntry| {
            a.domain
                .domain()
                .cmp(b.domain.domain())
                .then(a.domain.id().get().cmp(&b.domain.id().get()))
        };
        match (request.sort, request.order) {
            (DomainSort::Domain, _) => entries.sort_by(by_name),
            (DomainSort::Status, SortOrder::Asc) => {
                entries.sort_by(|a, b| a.is_rated().cmp(&b.is_rated()).then(by_name(a, b)));
            }
            (DomainSort::Status, SortOrder::Desc) => {
                entries.sort_by(|a, b| b.is_rated().cmp(&a.is_rated()).then(by_name(a, b)));
            }
        }

        let total = entries.len() as u64;
        let offset = usize::try_from(request.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page.limit()).unwrap_or(usize::MAX);
        let items = entries.into_iter().skip(offset).take(limit).collect();
        Ok(Page::new(items, PageMeta::new(request.page, total)))
    }

    async fn count_rated(
        &self,
        subject: &SubjectCode,
        user_id: &UserId,
    ) -> Result<u64, DomainRepositoryError> {
        let data = self.lock();
        let count = data
            .domains
            .iter()
            .filter(|domain| domain.subject_code() == subject)
            .filter(|domain| find_rating(&data, domain.id(), *user_id).is_some())
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn find(
        &self,
        domain_id: &WebDomainId,
        user_id: &UserId,
    ) -> Result<Option<Rating>, RatingRepositoryError> {
        Ok(find_rating(&self.lock(), *domain_id, *user_id).cloned())
    }

    async fn insert(
        &self,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Rating, RatingRepositoryError> {
        let mut data = self.lock();
        if !data
            .domains
            .iter()
            .any(|domain| domain.id() == submission.domain_id())
        {
            return Err(RatingRepositoryError::domain_not_found(
                submission.domain_id().get(),
            ));
        }
        if find_rating(&data, submission.domain_id(), submission.user_id()).is_some() {
            return Err(RatingRepositoryError::duplicate());
        }
        let rating = Rating::new(
            submission.domain_id(),
            submission.user_id(),
            submission.scores(),
            submission.remark().map(str::to_owned),
            now,
            now,
        );
        data.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn update(
        &self,
        submission: &RatingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Option<Rating>, RatingRepositoryError> {
        let mut data = self.lock();
        let Some(slot) = data.ratings.iter_mut().find(|rating| {
            rating.domain_id() == submission.domain_id() && rating.user_id() == submission.user_id()
        }) else {
            return Ok(None);
        };
        let updated = Rating::new(
            submission.domain_id(),
            submission.user_id(),
            submission.scores(),
            submission.remark().map(str::to_owned),
            slot.created_at(),
            now,
        );
        *slot = updated.clone();
        Ok(Some(updated))
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    async fn subject_stats(&self) -> Result<Vec<SubjectStats>, StatsRepositoryError> {
        let data = self.lock();
        let rated: BTreeSet<i32> = data
            .ratings
            .iter()
            .map(|rating| rating.domain_id().get())
            .collect();
        let mut counts: BTreeMap<SubjectCode, (u64, u64)> = BTreeMap::new();
        for domain in &data.domains {
            let entry = counts.entry(domain.subject_code().clone()).or_default();
            entry.0 += 1;
            if rated.contains(&domain.id().get()) {
                entry.1 += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(code, (total, rated))| SubjectStats::new(code, total, rated))
            .collect())
    }

    async fn export_rows(
        &self,
        scope: &ExportScope,
    ) -> Result<Vec<ExportRow>, StatsRepositoryError> {
        let data = self.lock();
        let mut domains: Vec<&WebDomain> = data
            .domains
            .iter()
            .filter(|domain| scope.subject().is_none_or(|code| domain.subject_code() == code))
            .collect();
        domains.sort_by(|a, b| {
            a.subject_code()
                .as_ref()
                .cmp(b.subject_code().as_ref())
                .then(a.domain().cmp(b.domain()))
                .then(a.id().get().cmp(&b.id().get()))
        });

        let mut rows = Vec::new();
        for domain in domains {
            let row = |rating: Option<ExportRating>| ExportRow {
                subject_code: domain.subject_code().clone(),
                domain: domain.domain().to_owned(),
                url: domain.url().to_owned(),
                rating,
            };
            let ratings: Vec<&Rating> = data
                .ratings
                .iter()
                .filter(|rating| rating.domain_id() == domain.id())
                .collect();
            if ratings.is_empty() {
                rows.push(row(None));
                continue;
            }
            for rating in ratings {
                let rater = data
                    .users
                    .iter()
                    .find(|(user, _)| user.id() == rating.user_id())
                    .map(|(user, _)| user.username().to_string())
                    .unwrap_or_default();
                rows.push(row(Some(ExportRating {
                    rater,
                    scores: rating.scores(),
                    remark: rating.remark().map(str::to_owned),
                    rated_at: rating.updated_at(),
                })));
            }
        }
        Ok(rows)
    }
}

/// Build [`HttpState`] wired to real services over `store`.
pub fn http_state(store: Arc<InMemoryStore>, token: ExportToken) -> HttpState {
    let users = Arc::new(UserService::new(store.clone()));
    let ratings = Arc::new(RatingService::new(store.clone()));
    HttpState::new(HttpStatePorts {
        login: users.clone(),
        users,
        domains: Arc::new(DomainListingService::new(store.clone())),
        ratings: ratings.clone(),
        ratings_query: ratings,
        stats: Arc::new(StatsService::new(store, token)),
    })
}
