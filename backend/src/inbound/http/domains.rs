//! Domain list handler.
//!
//! ```text
//! GET /api/v1/domains?page=1&pageSize=50&sortBy=status&sortOrder=desc
//! ```

use actix_web::{get, web};
use pagination::PageRequest;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{DomainListing, DomainSort, Error, ListingOptions, SortOrder};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_user;
use crate::inbound::http::schemas::{DomainListingSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request_error, sort_value_error};

/// Query parameters for `GET /api/v1/domains`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct DomainListParams {
    /// One-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page, at most 500. Defaults to 50.
    pub page_size: Option<u32>,
    /// `domain` or `status`. Defaults to `domain`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`, case-insensitive. Defaults to `asc`. Only the
    /// `status` sort honours it; the name sort is always ascending.
    pub sort_order: Option<String>,
}

impl TryFrom<DomainListParams> for ListingOptions {
    type Error = Error;

    fn try_from(params: DomainListParams) -> Result<Self, Self::Error> {
        let page =
            PageRequest::from_optional(params.page, params.page_size).map_err(page_request_error)?;
        let sort = params
            .sort_by
            .as_deref()
            .map(str::parse::<DomainSort>)
            .transpose()
            .map_err(sort_value_error)?
            .unwrap_or_default();
        let order = params
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()
            .map_err(sort_value_error)?
            .unwrap_or_default();
        Ok(Self { page, sort, order })
    }
}

/// List the domains of the reviewer's subject with their own ratings.
#[utoipa::path(
    get,
    path = "/api/v1/domains",
    params(DomainListParams),
    responses(
        (status = 200, description = "Page of domains", body = DomainListingSchema),
        (status = 400, description = "Invalid paging or sort parameters", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "No subject assigned", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["domains"],
    operation_id = "listDomains"
)]
#[get("/domains")]
pub async fn list_domains(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<DomainListParams>,
) -> ApiResult<web::Json<DomainListing>> {
    let user = require_user(&session, &state).await?;
    let options = ListingOptions::try_from(params.into_inner())?;
    let listing = state.domains.list_domains(&user, options).await?;
    Ok(web::Json(listing))
}
