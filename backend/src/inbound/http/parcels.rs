//! Parcel handlers for signed-in users.
//!
//! ```text
//! POST /api/v1/parcels {"senderName":"Juan Dela Cruz",...}
//! GET /api/v1/parcels?status=pending&search=makati
//! GET /api/v1/parcels/{id}
//! GET /api/v1/parcels/{id}/tracking
//! GET /api/v1/dashboard
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ApiResult, DeliveryStatus, Error, Parcel, ParcelDraft, ParcelFilter, ParcelId,
    TimelineEntry, User, UserDashboard, timeline,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string accepted by parcel list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParcelListQuery {
    /// Exact status to keep, e.g. `in_transit`.
    pub status: Option<String>,
    /// Case-insensitive text matched against tracking number, recipient and
    /// delivery city.
    pub search: Option<String>,
}

impl TryFrom<ParcelListQuery> for ParcelFilter {
    type Error = Error;

    fn try_from(query: ParcelListQuery) -> Result<Self, Self::Error> {
        let status = query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(str::parse::<DeliveryStatus>)
            .transpose()
            .map_err(|err| Error::validation("status", "unknown_status", err.to_string()))?;
        Ok(Self {
            status,
            search: query.search,
        })
    }
}

/// Progress bar and timeline for one parcel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelTracking {
    #[schema(value_type = String, example = "parcel-abc1234")]
    pub parcel_id: ParcelId,
    #[schema(example = "EVO1234567PH")]
    pub tracking_number: String,
    pub status: DeliveryStatus,
    #[schema(example = "In Transit")]
    pub label: String,
    #[schema(example = 60)]
    pub progress: u8,
    pub timeline: Vec<TimelineEntry>,
}

impl From<&Parcel> for ParcelTracking {
    fn from(parcel: &Parcel) -> Self {
        Self {
            parcel_id: parcel.id().clone(),
            tracking_number: parcel.tracking_number().to_string(),
            status: parcel.status(),
            label: parcel.status().label(),
            progress: parcel.status().progress(),
            timeline: timeline(parcel),
        }
    }
}

/// Parse a path segment; malformed ids are reported as unknown parcels.
pub(crate) fn parse_parcel_id(raw: &str) -> Result<ParcelId, Error> {
    ParcelId::new(raw).map_err(|_| Error::parcel_not_found(raw))
}

/// Load a parcel the signed-in user may see.
///
/// Parcels owned by someone else look missing to non-admins.
async fn visible_parcel(state: &HttpState, user: &User, raw_id: &str) -> ApiResult<Parcel> {
    let id = parse_parcel_id(raw_id)?;
    state
        .parcels_query
        .parcel_by_id(&id)
        .await?
        .filter(|parcel| user.is_admin() || parcel.is_owned_by(user.id()))
        .ok_or_else(|| Error::parcel_not_found(id.as_ref()))
}

/// Create a pending parcel owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/parcels",
    request_body = ParcelDraft,
    responses(
        (status = 201, description = "Parcel created", body = Parcel),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "createParcel"
)]
#[post("/parcels")]
pub async fn create_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ParcelDraft>,
) -> ApiResult<HttpResponse> {
    let user = state.auth_session(session).require_user()?;
    let parcel = state
        .parcels
        .create_parcel(user.id(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(parcel))
}

/// List the signed-in user's parcels.
#[utoipa::path(
    get,
    path = "/api/v1/parcels",
    params(ParcelListQuery),
    responses(
        (status = 200, description = "Own parcels", body = [Parcel]),
        (status = 400, description = "Unknown status filter", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "listParcels"
)]
#[get("/parcels")]
pub async fn list_parcels(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ParcelListQuery>,
) -> ApiResult<web::Json<Vec<Parcel>>> {
    let user = state.auth_session(session).require_user()?;
    let filter = ParcelFilter::try_from(query.into_inner())?;
    let parcels = state.parcels_query.user_parcels(user.id()).await?;
    Ok(web::Json(filter.apply(parcels)))
}

/// Fetch one parcel.
#[utoipa::path(
    get,
    path = "/api/v1/parcels/{id}",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Parcel", body = Parcel),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown or not visible", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "getParcel"
)]
#[get("/parcels/{id}")]
pub async fn get_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Parcel>> {
    let user = state.auth_session(session).require_user()?;
    visible_parcel(&state, &user, &path).await.map(web::Json)
}

/// Progress and timeline for one parcel.
#[utoipa::path(
    get,
    path = "/api/v1/parcels/{id}/tracking",
    params(("id" = String, Path, description = "Parcel identifier")),
    responses(
        (status = 200, description = "Tracking view", body = ParcelTracking),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Unknown or not visible", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "trackParcel"
)]
#[get("/parcels/{id}/tracking")]
pub async fn track_parcel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ParcelTracking>> {
    let user = state.auth_session(session).require_user()?;
    let parcel = visible_parcel(&state, &user, &path).await?;
    Ok(web::Json(ParcelTracking::from(&parcel)))
}

/// Dashboard figures for the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "User dashboard", body = UserDashboard),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["parcels"],
    operation_id = "userDashboard"
)]
#[get("/dashboard")]
pub async fn user_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserDashboard>> {
    let user = state.auth_session(session).require_user()?;
    let parcels = state.parcels_query.user_parcels(user.id()).await?;
    Ok(web::Json(UserDashboard::from_parcels(parcels)))
}

#[cfg(test)]
#[path = "parcels_tests.rs"]
mod tests;
