//! Backend entry-point: loads settings, wires the parcel services and serves
//! the REST API with OpenAPI docs in debug builds.

mod server;

use actix_web::cookie::SameSite;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use evo_backend::inbound::http::health::HealthState;
use evo_backend::settings::{AppSettings, BuildMode};
use server::{ServerConfig, create_server};

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(startup_error)?;
    let key = settings
        .session_key(BuildMode::from_debug_assertions())
        .map_err(startup_error)?;
    let bind_addr = settings.bind_addr().map_err(startup_error)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr)
        .with_latency(settings.simulated_latency());
    if settings.seed_example_parcels {
        config = config.with_example_parcels(settings.example_owner().map_err(startup_error)?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    let result = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    result
}
