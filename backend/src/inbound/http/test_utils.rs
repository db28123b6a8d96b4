//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::Trace;
use crate::domain::ParcelService;
use crate::domain::ports::SeededRandomSource;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::identity::DemoIdentityProvider;
use crate::outbound::persistence::InMemoryParcelRepository;
use crate::test_support::{MutableClock, fixture_now};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// State backed by the in-memory store, demo identities, a fixed clock and
/// a seeded random source.
pub fn test_state() -> HttpState {
    let random = Arc::new(SeededRandomSource::new(42));
    let service = Arc::new(ParcelService::new(
        Arc::new(InMemoryParcelRepository::new()),
        Arc::new(MutableClock::new(fixture_now())),
        random.clone(),
    ));
    let identity = Arc::new(DemoIdentityProvider::new(random));
    HttpState::new(HttpStatePorts {
        parcels: service.clone(),
        parcels_query: service,
        credentials: identity.clone(),
        registrar: identity,
    })
}

/// Application with every `/api/v1` handler mounted over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(configure_api),
        )
}

/// Sign in and return the session cookie.
pub async fn login_as(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": "password" }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed for {email}");
    session_cookie(&response)
}

/// Request JSON with an optional session cookie, returning status and body.
pub async fn call_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (u16, Value) {
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

/// Valid creation form in wire format.
pub fn parcel_form() -> Value {
    json!({
        "senderName": "Juan Dela Cruz",
        "senderPhone": "+63 912 000 0000",
        "senderEmail": "juan@example.com",
        "recipientName": "Maria Santos",
        "recipientPhone": "+63 917 000 0000",
        "recipientEmail": "maria@example.com",
        "pickupAddress": {
            "street": "1 Rizal Ave",
            "city": "Manila",
            "state": "Metro Manila",
            "postalCode": "1000",
            "country": "Philippines"
        },
        "deliveryAddress": {
            "street": "2 Ayala Ave",
            "city": "Makati",
            "state": "Metro Manila",
            "postalCode": "1200",
            "country": "Philippines"
        },
        "weight": 1.5,
        "dimensions": { "length": 20.0, "width": 15.0, "height": 10.0 },
        "parcelType": "small_package",
        "description": "Books"
    })
}
