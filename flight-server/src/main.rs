use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flight_server::airport::{AirportClient, AirportLookup, GovernorConfig, LookupState};
use flight_server::config::AppConfig;
use flight_server::flights::{FlightClient, FlightSearch};
use flight_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flight_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Create airport lookup
    let airport_client =
        AirportClient::new(config.airport_client()).expect("Failed to create airport client");
    if !airport_client.has_key() {
        warn!("RAPIDAPI_KEY not set; airport lookups use the local table and flight searches will fail");
    }
    let lookup_config = config.lookup();
    let lookup_state = Arc::new(LookupState::new(&lookup_config, GovernorConfig::default()));
    let airports = AirportLookup::new(airport_client, lookup_state, lookup_config);

    // Create flight search
    let flight_client =
        FlightClient::new(config.flight_client()).expect("Failed to create flight client");
    let flights = FlightSearch::new(flight_client, config.defaults.clone());

    // Build app state and router
    let state = AppState::new(airports, flights);
    let app = create_router(state, &config.static_dir);

    // Bind and serve
    let addr = config.bind_addr;
    info!(
        %addr,
        local_airports_only = config.force_local_airports,
        "Flight search listening on http://{addr}"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
