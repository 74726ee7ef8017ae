//! Driving port for reading reviewer profiles.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for profile lookups.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Reload the user behind a session; `None` when the row is gone.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
