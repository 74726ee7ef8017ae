//! Shared helpers for HTTP flow tests over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use rating_backend::Trace;
use rating_backend::domain::ExportToken;
use rating_backend::inbound::http::api_services;
use rating_backend::test_support::{InMemoryStore, http_state};
use serde_json::json;

pub const PASSWORD: &str = "flow password";
pub const TOKEN: &str = "flow-token";

/// Store with reviewers `ana` and `ben`, both on HIST, and three HIST domains.
pub fn store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.add_user("ana", PASSWORD, Some("HIST"));
    store.add_user("ben", PASSWORD, Some("HIST"));
    store.add_domain("rome.example", "HIST", "https://rome.example");
    store.add_domain("athens.example", "HIST", "https://athens.example");
    store.add_domain("carthage.example", "HIST", "https://carthage.example");
    store
}

pub async fn init_app(
    store: Arc<InMemoryStore>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state(
                store,
                ExportToken::new(Some(TOKEN)),
            )))
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(session).configure(api_services)),
    )
    .await
}

pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login as {username} failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
