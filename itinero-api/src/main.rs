use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use itinero_advisor::{GeminiAdvisor, StubAdvisor};
use itinero_api::{app, notify::MockMailer, AppState};
use itinero_core::advisor::ItineraryAdvisor;
use itinero_core::session::Session;
use itinero_store::{DatasetCatalog, DbClient, SqliteBookingStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "itinero_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = itinero_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Itinero API on port {}", config.server.port);

    // Dataset preflight: a missing file halts the process here
    let catalog = DatasetCatalog::new(
        &config.datasets.flights_csv,
        &config.datasets.hotels_csv,
        Duration::from_secs(config.datasets.cache_ttl_seconds),
    );
    catalog.preflight().expect("Dataset files missing");

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to open booking database");
    db.migrate().await.expect("Failed to run migrations");

    // Live advisor only when a credential is configured
    let advisor: Arc<dyn ItineraryAdvisor> = match config.advisor.api_key.as_deref() {
        Some(key) if !key.is_empty() => Arc::new(
            GeminiAdvisor::new(
                config.advisor.base_url.as_str(),
                key,
                config.advisor.model.as_str(),
                config.advisor.temperature,
            )
            .expect("Failed to build advisory client"),
        ),
        _ => {
            tracing::warn!("No advisory credential configured; itinerary generation is stubbed");
            Arc::new(StubAdvisor)
        }
    };

    let app_state = AppState {
        catalog: Arc::new(catalog),
        bookings: Arc::new(SqliteBookingStore::new(db.pool.clone())),
        advisor,
        mailer: Arc::new(MockMailer),
        session: Arc::new(RwLock::new(Session::new())),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
