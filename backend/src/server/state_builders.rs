//! Builders wiring the in-memory adapters into the HTTP state.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tracing::info;

use evo_backend::domain::ports::{RandomSource, ThreadRandomSource, TokioSleeper};
use evo_backend::domain::{
    ExampleParcelSeeder, ExampleParcelSeedingError, ParcelService, SeedOutcome, UserId,
};
use evo_backend::inbound::http::state::{HttpState, HttpStatePorts};
use evo_backend::outbound::identity::DemoIdentityProvider;
use evo_backend::outbound::persistence::InMemoryParcelRepository;

/// Process-wide adapters shared by every worker.
pub(crate) struct Backend {
    pub(crate) http_state: HttpState,
    parcels: Arc<InMemoryParcelRepository>,
    random: Arc<dyn RandomSource>,
}

/// Construct the single parcel store and the services over it.
pub(crate) fn build_backend(latency: Duration) -> Backend {
    let parcels = Arc::new(InMemoryParcelRepository::new());
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandomSource);
    let service = Arc::new(
        ParcelService::new(parcels.clone(), Arc::new(DefaultClock), random.clone())
            .with_latency(Arc::new(TokioSleeper), latency),
    );
    let identity = Arc::new(DemoIdentityProvider::new(random.clone()));
    let http_state = HttpState::new(HttpStatePorts {
        parcels: service.clone(),
        parcels_query: service,
        credentials: identity.clone(),
        registrar: identity,
    });
    info!(latency_ms = latency.as_millis(), "parcel services ready");
    Backend {
        http_state,
        parcels,
        random,
    }
}

impl Backend {
    /// Run example seeding against the shared store.
    pub(crate) async fn seed_examples(
        &self,
        owner: &UserId,
    ) -> Result<SeedOutcome, ExampleParcelSeedingError> {
        ExampleParcelSeeder::new(
            self.parcels.clone(),
            Arc::new(DefaultClock),
            self.random.clone(),
        )
        .seed_if_empty(owner)
        .await
    }
}
