//! Rating handlers.
//!
//! ```text
//! GET  /api/v1/ratings/{domainId}
//! POST /api/v1/ratings {"domainId":12,"relevance":8,"popularity":5,"professionalism":7}
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, Rating, RatingScores, RatingSubmission, User, WebDomainId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_user;
use crate::inbound::http::schemas::{ErrorSchema, RatingSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, rating_validation_error,
};

const DOMAIN_ID: FieldName = FieldName::new("domainId");

/// Rating upsert body for `POST /api/v1/ratings`.
///
/// Every field is optional at the wire level so a missing score can be
/// reported as `missing_field` rather than a generic parse failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    #[schema(example = 12)]
    pub domain_id: Option<i64>,
    #[schema(minimum = 1, maximum = 10, example = 8)]
    pub relevance: Option<i64>,
    #[schema(minimum = 1, maximum = 10, example = 5)]
    pub popularity: Option<i64>,
    #[schema(minimum = 1, maximum = 10, example = 7)]
    pub professionalism: Option<i64>,
    /// Free text; blank remarks are stored as `null`.
    pub remark: Option<String>,
}

fn parse_domain_id(raw: i64) -> Result<WebDomainId, Error> {
    i32::try_from(raw)
        .ok()
        .and_then(|id| WebDomainId::new(id).ok())
        .ok_or_else(|| {
            invalid_value_error(
                DOMAIN_ID,
                "domainId must be a positive integer".to_owned(),
                &raw.to_string(),
            )
        })
}

impl RatingRequest {
    fn into_submission(self, user: &User) -> Result<RatingSubmission, Error> {
        let domain_id = self
            .domain_id
            .ok_or_else(|| missing_field_error(DOMAIN_ID))
            .and_then(parse_domain_id)?;
        let scores =
            RatingScores::try_from_parts(self.relevance, self.popularity, self.professionalism)
                .map_err(rating_validation_error)?;
        Ok(RatingSubmission::new(
            domain_id,
            user.id(),
            scores,
            self.remark,
        ))
    }
}

/// Return the caller's rating for a domain, or `null` when not yet rated.
#[utoipa::path(
    get,
    path = "/api/v1/ratings/{domainId}",
    params(("domainId" = i32, Path, description = "Domain identifier")),
    responses(
        (status = 200, description = "The caller's rating, or null", body = RatingSchema),
        (status = 400, description = "Invalid domain id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "getRating"
)]
#[get("/ratings/{domain_id}")]
pub async fn get_rating(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Option<Rating>>> {
    let user = require_user(&session, &state).await?;
    let domain_id = parse_domain_id(i64::from(path.into_inner()))?;
    let rating = state.ratings_query.find_rating(&domain_id, &user.id()).await?;
    Ok(web::Json(rating))
}

/// Insert or replace the caller's rating for a domain.
#[utoipa::path(
    post,
    path = "/api/v1/ratings",
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Stored rating", body = RatingSchema),
        (status = 400, description = "Missing or out-of-range field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown domain", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "submitRating"
)]
#[post("/ratings")]
pub async fn submit_rating(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RatingRequest>,
) -> ApiResult<web::Json<Rating>> {
    let user = require_user(&session, &state).await?;
    let submission = payload.into_inner().into_submission(&user)?;
    let rating = state.ratings.submit_rating(submission).await?;
    tracing::info!(
        domain_id = rating.domain_id().get(),
        user_id = user.id().get(),
        "rating stored"
    );
    Ok(web::Json(rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExportToken, UserId};
    use crate::inbound::http::test_utils::{
        TEST_EXPORT_TOKEN, login_cookie, seeded_store, test_app,
    };
    use crate::test_support::http_state;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn reviewer() -> User {
        User::try_from_parts(1, "teacher1", Some("MATH")).expect("valid user")
    }

    #[rstest]
    #[case(RatingRequest::default(), "domainId", "missing_field")]
    #[case(
        RatingRequest { domain_id: Some(0), ..RatingRequest::default() },
        "domainId",
        "invalid_value"
    )]
    #[case(
        RatingRequest { domain_id: Some(i64::from(i32::MAX) + 1), ..RatingRequest::default() },
        "domainId",
        "invalid_value"
    )]
    #[case(
        RatingRequest { domain_id: Some(1), popularity: Some(5), professionalism: Some(5), ..RatingRequest::default() },
        "relevance",
        "missing_field"
    )]
    #[case(
        RatingRequest { domain_id: Some(1), relevance: Some(0), popularity: Some(5), professionalism: Some(5), ..RatingRequest::default() },
        "relevance",
        "score_out_of_range"
    )]
    #[case(
        RatingRequest { domain_id: Some(1), relevance: Some(5), popularity: Some(5), professionalism: Some(11), ..RatingRequest::default() },
        "professionalism",
        "score_out_of_range"
    )]
    fn invalid_requests_name_field_and_code(
        #[case] request: RatingRequest,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = request.into_submission(&reviewer()).expect_err("invalid");
        let details = err.details().expect("details");
        assert_eq!(details.get("field"), Some(&json!(field)));
        assert_eq!(details.get("code"), Some(&json!(code)));
    }

    #[rstest]
    fn blank_remark_is_dropped() {
        let submission = RatingRequest {
            domain_id: Some(2),
            relevance: Some(1),
            popularity: Some(10),
            professionalism: Some(5),
            remark: Some("   ".into()),
        }
        .into_submission(&reviewer())
        .expect("valid");
        assert_eq!(submission.remark(), None);
        assert_eq!(submission.user_id(), reviewer().id());
    }

    #[actix_web::test]
    async fn resubmission_replaces_the_single_rating() {
        let store = seeded_store();
        let app = actix_test::init_service(test_app(http_state(
            store.clone(),
            ExportToken::new(Some(TEST_EXPORT_TOKEN)),
        )))
        .await;
        let cookie = login_cookie(&app, "teacher1").await;

        for (relevance, remark) in [(3, "first"), (9, "second")] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri("/api/v1/ratings")
                    .cookie(cookie.clone())
                    .set_json(json!({
                        "domainId": 2,
                        "relevance": relevance,
                        "popularity": 4,
                        "professionalism": 6,
                        "remark": remark,
                    }))
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let domain_id = WebDomainId::new(2).expect("id");
        let user_id = UserId::new(1).expect("id");
        assert_eq!(store.rating_count(domain_id, user_id), 1);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ratings/2")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("relevance"), Some(&json!(9)));
        assert_eq!(body.get("remark"), Some(&json!("second")));
        assert_eq!(body.get("domainId"), Some(&json!(2)));
    }

    #[actix_web::test]
    async fn unrated_domain_reads_as_null() {
        let app = actix_test::init_service(test_app(http_state(
            seeded_store(),
            ExportToken::disabled(),
        )))
        .await;
        let cookie = login_cookie(&app, "teacher1").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ratings/1")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), b"null");
    }

    #[rstest]
    #[case("/api/v1/ratings/abc")]
    #[case("/api/v1/ratings/0")]
    #[actix_web::test]
    async fn malformed_domain_id_is_rejected(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(http_state(
            seeded_store(),
            ExportToken::disabled(),
        )))
        .await;
        let cookie = login_cookie(&app, "teacher1").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
    }

    #[actix_web::test]
    async fn unknown_domain_is_not_found() {
        let app = actix_test::init_service(test_app(http_state(
            seeded_store(),
            ExportToken::disabled(),
        )))
        .await;
        let cookie = login_cookie(&app, "teacher1").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/ratings")
                .cookie(cookie)
                .set_json(json!({
                    "domainId": 404,
                    "relevance": 5,
                    "popularity": 5,
                    "professionalism": 5,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_json_uses_the_error_body() {
        let app = actix_test::init_service(test_app(http_state(
            seeded_store(),
            ExportToken::disabled(),
        )))
        .await;
        let cookie = login_cookie(&app, "teacher1").await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/ratings")
                .cookie(cookie)
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"domainId\": ")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
        assert!(body.get("traceId").is_some());
    }
}
