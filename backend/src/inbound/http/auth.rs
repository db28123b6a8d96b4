//! Sign-in, registration and profile handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"admin@evoexpress.com","password":"password"}
//! POST /api/v1/register {"name":"Ana","email":"ana@example.com","password":"longenough"}
//! POST /api/v1/logout
//! GET /api/v1/session
//! PUT /api/v1/profile {"name":"Ana Reyes","email":"ana@example.com"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@evoexpress.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

/// Registration request body for `POST /api/v1/register`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Profile update body for `PUT /api/v1/profile`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
}

/// Authenticate and store the user in the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = User, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let LoginRequest { email, password } = payload.into_inner();
    let user = state
        .auth_session(session)
        .login(&email, &password)
        .await?;
    Ok(web::Json(user))
}

/// Create a `user` account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered and signed in", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
        confirm_password,
    } = payload.into_inner();
    let user = state
        .auth_session(session)
        .register(
            &name,
            &email,
            &password,
            confirm_password.as_deref(),
        )
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Forget the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    state.auth_session(session).logout();
    HttpResponse::NoContent().finish()
}

/// Return the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Signed-in user", body = User),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    state.auth_session(session).require_user().map(web::Json)
}

/// Rewrite the signed-in user's name and email.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<User>> {
    let ProfileRequest { name, email } = payload.into_inner();
    state
        .auth_session(session)
        .update_profile(&name, &email)
        .map(web::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{
        call_json, login_as, session_cookie, test_app, test_state,
    };
    use actix_web::test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("admin@evoexpress.com", "admin")]
    #[case("user@example.com", "user")]
    #[actix_web::test]
    async fn login_returns_role_tagged_user(#[case] email: &str, #[case] role: &str) {
        let app = test::init_service(test_app(test_state())).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": "password" }));
        let (status, body) = call_json(&app, request, None).await;

        assert_eq!(status, 200);
        assert_eq!(body["role"], role);
    }

    #[rstest]
    #[case("x@x.com", "wrong", 401, "invalid_credentials")]
    #[case("USER@example.com", "password", 401, "invalid_credentials")]
    #[case("not-an-email", "password", 400, "invalid_email")]
    #[case("user@example.com", "", 400, "empty_password")]
    #[actix_web::test]
    async fn login_failures_carry_detail_codes(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected_status: u16,
        #[case] expected_code: &str,
    ) {
        let app = test::init_service(test_app(test_state())).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": password }));
        let (status, body) = call_json(&app, request, None).await;

        assert_eq!(status, expected_status);
        assert_eq!(body["details"]["code"], expected_code);
    }

    #[actix_web::test]
    async fn session_reflects_login_and_logout() {
        let app = test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "user@example.com").await;

        let (status, body) =
            call_json(&app, test::TestRequest::get().uri("/api/v1/session"), Some(&cookie)).await;
        assert_eq!(status, 200);
        assert_eq!(body["id"], "user-456");

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status().as_u16(), 204);
        let cleared = response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .map(|c| c.into_owned());

        let (status, _) =
            call_json(&app, test::TestRequest::get().uri("/api/v1/session"), cleared.as_ref())
                .await;
        assert_eq!(status, 401);
    }

    #[actix_web::test]
    async fn register_signs_in_and_rejects_demo_emails() {
        let app = test::init_service(test_app(test_state())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(json!({
                    "name": "Ana Reyes",
                    "email": "ana@example.com",
                    "password": "longenough",
                    "confirmPassword": "longenough"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status().as_u16(), 201);
        let cookie = session_cookie(&response);
        let (_, body) =
            call_json(&app, test::TestRequest::get().uri("/api/v1/session"), Some(&cookie)).await;
        assert_eq!(body["email"], "ana@example.com");
        assert_eq!(body["role"], "user");

        let request = test::TestRequest::post().uri("/api/v1/register").set_json(json!({
            "name": "Impostor",
            "email": "admin@evoexpress.com",
            "password": "longenough"
        }));
        let (status, body) = call_json(&app, request, None).await;
        assert_eq!(status, 409);
        assert_eq!(body["details"]["code"], "email_in_use");
    }

    #[actix_web::test]
    async fn profile_update_persists_in_the_session() {
        let app = test::init_service(test_app(test_state())).await;
        let cookie = login_as(&app, "user@example.com").await;

        let response = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/v1/profile")
                .cookie(cookie)
                .set_json(json!({ "name": "Renamed", "email": "renamed@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);
        let cookie = session_cookie(&response);

        let (_, body) =
            call_json(&app, test::TestRequest::get().uri("/api/v1/session"), Some(&cookie)).await;
        assert_eq!(body["name"], "Renamed");
        assert_eq!(body["id"], "user-456");
    }

    #[actix_web::test]
    async fn profile_update_requires_sign_in() {
        let app = test::init_service(test_app(test_state())).await;
        let request = test::TestRequest::put()
            .uri("/api/v1/profile")
            .set_json(json!({ "name": "Someone", "email": "someone@example.com" }));

        let (status, body) = call_json(&app, request, None).await;

        assert_eq!(status, 401);
        assert_eq!(body["code"], "unauthorized");
    }
}
