//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! session re-validation here: every protected handler resolves the session
//! user id back to a stored user before doing any work.

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Resolve the logged-in user, reloading it from storage.
///
/// A session pointing at a user that no longer exists is purged so the stale
/// cookie is not presented again.
pub async fn require_user(session: &SessionContext, state: &HttpState) -> ApiResult<User> {
    let user_id = session.require_user_id()?;
    match state.users.find_user(&user_id).await? {
        Some(user) => Ok(user),
        None => {
            tracing::info!(user_id = user_id.get(), "session refers to unknown user");
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}
