//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so the crate's `cfg(test)`
//! doubles are not visible here. This module rebuilds the few pieces the
//! suites need on top of the public API.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use evo_backend::Trace;
use evo_backend::domain::ParcelService;
use evo_backend::domain::ports::{RandomSource, SeededRandomSource};
use evo_backend::inbound::http::configure_api;
use evo_backend::inbound::http::state::{HttpState, HttpStatePorts};
use evo_backend::outbound::identity::DemoIdentityProvider;
use evo_backend::outbound::persistence::InMemoryParcelRepository;

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Store plus the HTTP state built over it.
pub struct Harness {
    pub parcels: Arc<InMemoryParcelRepository>,
    pub random: Arc<dyn RandomSource>,
    pub state: HttpState,
}

pub fn harness() -> Harness {
    let parcels = Arc::new(InMemoryParcelRepository::new());
    let random: Arc<dyn RandomSource> = Arc::new(SeededRandomSource::new(11));
    let service = Arc::new(ParcelService::new(
        parcels.clone(),
        Arc::new(FixedClock(fixed_now())),
        random.clone(),
    ));
    let identity = Arc::new(DemoIdentityProvider::new(random.clone()));
    let state = HttpState::new(HttpStatePorts {
        parcels: service.clone(),
        parcels_query: service,
        credentials: identity.clone(),
        registrar: identity,
    });
    Harness {
        parcels,
        random,
        state,
    }
}

pub fn app(
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
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/v1").wrap(session).configure(configure_api))
}

pub fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Response status, trace header, JSON body and refreshed session cookie.
pub struct Reply {
    pub status: u16,
    pub trace_id: Option<String>,
    pub body: Value,
    pub cookie: Option<Cookie<'static>>,
}

pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> Reply {
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let cookie = session_cookie(&response);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Reply {
        status,
        trace_id,
        body,
        cookie,
    }
}

pub async fn login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let reply = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": "password" })),
        None,
    )
    .await;
    assert_eq!(reply.status, 200, "login failed: {}", reply.body);
    reply.cookie.expect("session cookie")
}

pub fn parcel_form(city: &str) -> Value {
    json!({
        "senderName": "Lito Ramos",
        "senderPhone": "+63 917 111 2222",
        "senderEmail": "lito@example.com",
        "recipientName": "Carmen Villa",
        "recipientPhone": "+63 917 333 4444",
        "recipientEmail": "carmen@example.com",
        "pickupAddress": {
            "street": "10 Taft Ave",
            "city": "Manila",
            "state": "Metro Manila",
            "postalCode": "1000",
            "country": "Philippines"
        },
        "deliveryAddress": {
            "street": "55 EDSA",
            "city": city,
            "state": "Metro Manila",
            "postalCode": "1100",
            "country": "Philippines",
            "additionalInfo": "Leave with guard"
        },
        "weight": 2.0,
        "dimensions": { "length": 30.0, "width": 20.0, "height": 10.0 },
        "parcelType": "fragile",
        "description": "Ceramic vase"
    })
}
