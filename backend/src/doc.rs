//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP handler under `/api/v1` plus the health
//! probes, the domain schemas they exchange and the session cookie security
//! scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AdminDashboard, DeliveryAddress, DeliveryStatus, Dimensions, Error, ErrorCode, GuardDecision,
    Parcel, ParcelDraft, ParcelType, Role, RouteAccess, TimelineEntry, TimelineState, User,
    UserDashboard,
};
use crate::inbound::http::admin::StatusUpdateRequest;
use crate::inbound::http::auth::{LoginRequest, ProfileRequest, RegisterRequest};
use crate::inbound::http::navigation::NavigationResponse;
use crate::inbound::http::parcels::ParcelTracking;
use crate::inbound::http::preferences::SidebarPreference;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EVO Express parcel API",
        description = "Parcel booking, tracking and approval behind a cookie session."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::update_profile,
        crate::inbound::http::preferences::get_sidebar,
        crate::inbound::http::preferences::update_sidebar,
        crate::inbound::http::navigation::guard_navigation,
        crate::inbound::http::parcels::create_parcel,
        crate::inbound::http::parcels::list_parcels,
        crate::inbound::http::parcels::get_parcel,
        crate::inbound::http::parcels::track_parcel,
        crate::inbound::http::parcels::user_dashboard,
        crate::inbound::http::admin::list_all_parcels,
        crate::inbound::http::admin::update_parcel_status,
        crate::inbound::http::admin::admin_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        Parcel,
        ParcelDraft,
        ParcelType,
        DeliveryAddress,
        Dimensions,
        DeliveryStatus,
        TimelineEntry,
        TimelineState,
        UserDashboard,
        AdminDashboard,
        RouteAccess,
        GuardDecision,
        LoginRequest,
        RegisterRequest,
        ProfileRequest,
        StatusUpdateRequest,
        SidebarPreference,
        NavigationResponse,
        ParcelTracking,
    )),
    tags(
        (name = "auth", description = "Sign-in, registration and profile"),
        (name = "parcels", description = "Parcels owned by the signed-in user"),
        (name = "admin", description = "Parcel approval and status updates"),
        (name = "navigation", description = "Client route guard"),
        (name = "preferences", description = "UI preferences kept in the session"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            other => panic!("expected Object schema, got {other:?}"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "traceId")]
    #[case("User", "role")]
    #[case("Dimensions", "length")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/parcels")]
    #[case("/api/v1/parcels/{id}/tracking")]
    #[case("/api/v1/admin/parcels/{id}/status")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
