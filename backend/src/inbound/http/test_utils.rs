//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::json;

use crate::domain::ExportToken;
use crate::inbound::http::api_services;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::test_support::{InMemoryStore, http_state};

/// Export token configured by [`seeded_state`].
pub const TEST_EXPORT_TOKEN: &str = "test-export-token";
/// Password shared by the seeded reviewers.
pub const TEST_PASSWORD: &str = "correct horse";

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// A store with two MATH domains, one BIO domain and two reviewers:
/// `teacher1` (MATH) and `unassigned` (no subject).
pub fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.add_user("teacher1", TEST_PASSWORD, Some("MATH"));
    store.add_user("unassigned", TEST_PASSWORD, None);
    store.add_domain("beta.edu", "MATH", "https://beta.edu");
    store.add_domain("alpha.edu", "MATH", "https://alpha.edu/a,https://alpha.edu/b");
    store.add_domain("cells.org", "BIO", "https://cells.org");
    store
}

/// [`HttpState`] over [`seeded_store`] with [`TEST_EXPORT_TOKEN`].
pub fn seeded_state() -> HttpState {
    http_state(seeded_store(), ExportToken::new(Some(TEST_EXPORT_TOKEN)))
}

/// Application under test: the full `/api/v1` surface over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(api_services),
        )
}

/// Log in through the API and return the issued session cookie.
pub async fn login_cookie<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": TEST_PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}
