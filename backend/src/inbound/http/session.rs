//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! [`SessionContext`] wraps the Actix cookie session and implements the
//! domain [`SessionStore`] port so [`crate::domain::AuthSession`] can run
//! against it unchanged.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{SessionStore, SessionStoreError};

/// Newtype wrapper exposing the cookie session as a [`SessionStore`].
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionStore for SessionContext {
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.0
            .get::<String>(key)
            .map_err(|error| SessionStoreError::read(error.to_string()))
    }

    fn store(&self, key: &str, value: String) -> Result<(), SessionStoreError> {
        self.0
            .insert(key, value)
            .map_err(|error| SessionStoreError::write(error.to_string()))
    }

    fn remove(&self, key: &str) {
        self.0.remove(key);
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    match session.store("greeting", "hello".to_owned()) {
                        Ok(()) => HttpResponse::Ok().finish(),
                        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
                    }
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    match session.load("greeting") {
                        Ok(value) => HttpResponse::Ok().body(value.unwrap_or_default()),
                        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
                    }
                }),
            )
            .route(
                "/clear",
                web::get().to(|session: SessionContext| async move {
                    session.remove("greeting");
                    HttpResponse::Ok().finish()
                }),
            )
    }

    #[actix_web::test]
    async fn values_round_trip_through_the_cookie() {
        let app = test::init_service(session_test_app()).await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        assert_eq!(test::read_body(get_res).await, "hello");
    }

    #[actix_web::test]
    async fn missing_values_load_as_none() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(test::read_body(res).await.is_empty());
    }

    #[actix_web::test]
    async fn removed_values_are_gone_on_the_next_request() {
        let app = test::init_service(session_test_app()).await;
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res);

        let clear_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/clear")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let mut request = test::TestRequest::get().uri("/get");
        if let Some(cleared) = clear_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            request = request.cookie(cleared.into_owned());
        }

        let get_res = test::call_service(&app, request.to_request()).await;
        assert!(test::read_body(get_res).await.is_empty());
    }
}
