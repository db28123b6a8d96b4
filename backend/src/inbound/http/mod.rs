//! HTTP inbound adapter exposing the parcel REST endpoints.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod navigation;
pub mod parcels;
pub mod preferences;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

/// Register every `/api/v1` handler.
///
/// Callers mount the result under a scope that carries the session
/// middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use evo_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(auth::current_session)
        .service(auth::update_profile)
        .service(preferences::get_sidebar)
        .service(preferences::update_sidebar)
        .service(navigation::guard_navigation)
        .service(parcels::create_parcel)
        .service(parcels::list_parcels)
        .service(parcels::get_parcel)
        .service(parcels::track_parcel)
        .service(parcels::user_dashboard)
        .service(admin::list_all_parcels)
        .service(admin::update_parcel_status)
        .service(admin::admin_dashboard);
}
