//! Route guard endpoint.
//!
//! ```text
//! GET /api/v1/navigation?path=/admin
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ApiResult, AppRoute, Error, GuardDecision, RouteAccess, guard};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query for `GET /api/v1/navigation`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    /// Front-end path about to be rendered.
    pub path: String,
}

/// Guard outcome for one path.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    #[schema(example = "/admin")]
    pub path: String,
    pub access: RouteAccess,
    #[serde(flatten)]
    pub decision: GuardDecision,
}

/// Decide whether the current session may open `path`.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Guard decision", body = NavigationResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["navigation"],
    operation_id = "guardNavigation",
    security([])
)]
#[get("/navigation")]
pub async fn guard_navigation(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NavigationQuery>,
) -> ApiResult<web::Json<NavigationResponse>> {
    let user = state.auth_session(session).restore()?;
    let NavigationQuery { path } = query.into_inner();
    let route = AppRoute::parse(&path);
    Ok(web::Json(NavigationResponse {
        access: route.access(),
        decision: guard(&route, user.as_ref()),
        path,
    }))
}
