//! Sidebar preference stored in the session cookie.
//!
//! ```text
//! GET /api/v1/preferences/sidebar
//! PUT /api/v1/preferences/sidebar {"collapsed":true}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sidebar state; `false` means expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SidebarPreference {
    pub collapsed: bool,
}

/// Read the sidebar preference.
#[utoipa::path(
    get,
    path = "/api/v1/preferences/sidebar",
    responses(
        (status = 200, description = "Sidebar preference", body = SidebarPreference),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "getSidebarPreference",
    security([])
)]
#[get("/preferences/sidebar")]
pub async fn get_sidebar(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SidebarPreference>> {
    let collapsed = state.auth_session(session).sidebar_collapsed()?;
    Ok(web::Json(SidebarPreference { collapsed }))
}

/// Store the sidebar preference.
#[utoipa::path(
    put,
    path = "/api/v1/preferences/sidebar",
    request_body = SidebarPreference,
    responses(
        (status = 200, description = "Stored preference", body = SidebarPreference),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["preferences"],
    operation_id = "updateSidebarPreference",
    security([])
)]
#[put("/preferences/sidebar")]
pub async fn update_sidebar(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SidebarPreference>,
) -> ApiResult<web::Json<SidebarPreference>> {
    let preference = payload.into_inner();
    state
        .auth_session(session)
        .set_sidebar_collapsed(preference.collapsed)?;
    Ok(web::Json(preference))
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use serde_json::json;

    use crate::inbound::http::test_utils::{call_json, session_cookie, test_app, test_state};

    #[actix_web::test]
    async fn sidebar_defaults_to_expanded_and_round_trips() {
        let app = test::init_service(test_app(test_state())).await;

        let (status, body) = call_json(
            &app,
            test::TestRequest::get().uri("/api/v1/preferences/sidebar"),
            None,
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "collapsed": false }));

        let response = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/preferences/sidebar")
                .set_json(json!({ "collapsed": true }))
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let cookie = session_cookie(&response);

        let (_, body) = call_json(
            &app,
            test::TestRequest::get().uri("/api/v1/preferences/sidebar"),
            Some(&cookie),
        )
        .await;
        assert_eq!(body, json!({ "collapsed": true }));
    }
}
