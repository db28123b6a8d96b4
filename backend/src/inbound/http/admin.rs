//! Administrator parcel handlers.
//!
//! ```text
//! GET /api/v1/admin/parcels?status=pending
//! PATCH /api/v1/admin/parcels/{id}/status {"status":"accepted"}
//! GET /api/v1/admin/dashboard
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AdminDashboard, ApiResult, DeliveryStatus, Error, Parcel, ParcelFilter};
use crate::inbound::http::parcels::{ParcelListQuery, parse_parcel_id};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for `PATCH /api/v1/admin/parcels/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: DeliveryStatus,
}

/// List every parcel in the store.
#[utoipa::path(
    get,
    path = "/api/v1/admin/parcels",
    params(ParcelListQuery),
    responses(
        (status = 200, description = "All parcels", body = [Parcel]),
        (status = 400, description = "Unknown status filter", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not an admin", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAllParcels"
)]
#[get("/admin/parcels")]
pub async fn list_all_parcels(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ParcelListQuery>,
) -> ApiResult<web::Json<Vec<Parcel>>> {
    state.auth_session(session).require_admin()?;
    let filter = ParcelFilter::try_from(query.into_inner())?;
    let parcels = state.parcels_query.all_parcels().await?;
    Ok(web::Json(filter.apply(parcels)))
}

/// Overwrite a parcel's status.
///
/// Any status may follow any other; `delivered` stamps `deliveredAt`.
#[utoipa::path(
    patch,
    path = "/api/v1/admin/parcels/{id}/status",
    params(("id" = String, Path, description = "Parcel identifier")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated parcel", body = Parcel),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not an admin", body = Error),
        (status = 404, description = "Unknown parcel", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "updateParcelStatus"
)]
#[patch("/admin/parcels/{id}/status")]
pub async fn update_parcel_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<Parcel>> {
    state.auth_session(session).require_admin()?;
    let id = parse_parcel_id(&path)?;
    state
        .parcels
        .update_parcel_status(&id, payload.status)
        .await
        .map(web::Json)
}

/// Dashboard figures across every parcel.
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboard),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Not an admin", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDashboard"
)]
#[get("/admin/dashboard")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AdminDashboard>> {
    state.auth_session(session).require_admin()?;
    let parcels = state.parcels_query.all_parcels().await?;
    Ok(web::Json(AdminDashboard::from_parcels(parcels)))
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{
        call_json, login_as, parcel_form, test_app, test_state,
    };

    async fn create_as_user(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Value {
        let user = login_as(app, "user@example.com").await;
        let request = test::TestRequest::post()
            .uri("/api/v1/parcels")
            .set_json(parcel_form());
        let (status, body) = call_json(app, request, Some(&user)).await;
        assert_eq!(status, 201);
        body
    }

    #[rstest]
    #[case("/api/v1/admin/parcels")]
    #[case("/api/v1/admin/dashboard")]
    #[actix_web::test]
    async fn regular_users_are_forbidden(#[case] uri: &str) {
        let app = test::init_service(test_app(test_state())).await;
        let user = login_as(&app, "user@example.com").await;

        let (status, body) = call_json(&app, test::TestRequest::get().uri(uri), Some(&user)).await;
        assert_eq!(status, 403);
        assert_eq!(body["code"], "forbidden");

        let (status, _) = call_json(&app, test::TestRequest::get().uri(uri), None).await;
        assert_eq!(status, 401);
    }

    #[actix_web::test]
    async fn admin_approves_then_delivers_a_parcel() {
        let app = test::init_service(test_app(test_state())).await;
        let created = create_as_user(&app).await;
        let id = created["id"].as_str().expect("parcel id");
        let admin = login_as(&app, "admin@evoexpress.com").await;
        let uri = format!("/api/v1/admin/parcels/{id}/status");

        let (status, accepted) = call_json(
            &app,
            test::TestRequest::patch()
                .uri(&uri)
                .set_json(json!({ "status": "accepted" })),
            Some(&admin),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(accepted["status"], "accepted");
        assert!(accepted["deliveredAt"].is_null());

        let (_, delivered) = call_json(
            &app,
            test::TestRequest::patch()
                .uri(&uri)
                .set_json(json!({ "status": "delivered" })),
            Some(&admin),
        )
        .await;
        assert_eq!(delivered["status"], "delivered");
        assert!(delivered["deliveredAt"].is_string());
    }

    #[actix_web::test]
    async fn unknown_parcel_is_not_found() {
        let app = test::init_service(test_app(test_state())).await;
        let admin = login_as(&app, "admin@evoexpress.com").await;

        let (status, body) = call_json(
            &app,
            test::TestRequest::patch()
                .uri("/api/v1/admin/parcels/parcel-missing/status")
                .set_json(json!({ "status": "accepted" })),
            Some(&admin),
        )
        .await;

        assert_eq!(status, 404);
        assert_eq!(body["details"]["code"], "parcel_not_found");
    }

    #[actix_web::test]
    async fn admin_sees_every_parcel_and_pending_queue() {
        let app = test::init_service(test_app(test_state())).await;
        create_as_user(&app).await;
        create_as_user(&app).await;
        let admin = login_as(&app, "admin@evoexpress.com").await;

        let (_, all) = call_json(
            &app,
            test::TestRequest::get().uri("/api/v1/admin/parcels?status=pending"),
            Some(&admin),
        )
        .await;
        assert_eq!(all.as_array().map(Vec::len), Some(2));

        let (status, dashboard) = call_json(
            &app,
            test::TestRequest::get().uri("/api/v1/admin/dashboard"),
            Some(&admin),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(dashboard["total"], 2);
        assert_eq!(dashboard["pending"], 2);
        assert_eq!(dashboard["inProgress"], 0);
        assert_eq!(dashboard["pendingApproval"].as_array().map(Vec::len), Some(2));
    }
}
