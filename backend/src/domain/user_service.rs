//! Reviewer account services: login and session re-validation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository, UsersQuery};
use crate::domain::{Error, LoginCredentials, PasswordDigest, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service implementing [`LoginService`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                warn!(%message, "user repository unavailable");
                Error::service_unavailable("user repository unavailable")
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    /// Argon2 is CPU bound; keep it off the async workers.
    async fn verify(digest: Option<PasswordDigest>, password: &str) -> Result<bool, Error> {
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || match digest {
            Some(digest) => digest.verify(password.as_str()),
            None => {
                PasswordDigest::verify_dummy(password.as_str());
                false
            }
        })
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
    }
}

#[async_trait]
impl<R> LoginService for UserService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(Self::map_persistence_error)?;

        let (user, digest) = match stored {
            Some(record) => (Some(record.user), Some(record.password_digest)),
            None => (None, None),
        };

        let verified = Self::verify(digest, credentials.password()).await?;
        match user {
            Some(user) if verified => Ok(user),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
