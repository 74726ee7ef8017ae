//! Domain rating backend.
//!
//! Reviewers log in, page through the domains of their subject and rate
//! each one; operators pull progress statistics and CSV exports with a
//! shared token. Layout follows ports and adapters: [`domain`] holds types,
//! services and ports, [`inbound`] the HTTP adapter, [`outbound`] the
//! PostgreSQL adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
