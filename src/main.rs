// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fleet_telemetry::application::dashboard_service::DashboardService;
use fleet_telemetry::application::fleet_service::FleetService;
use fleet_telemetry::application::heat_map_service::HeatMapService;
use fleet_telemetry::application::streaming_service::StreamingTelemetryService;
use fleet_telemetry::infrastructure::config::load_app_config;
use fleet_telemetry::infrastructure::json_fleet_repository::JsonFleetRepository;
use fleet_telemetry::presentation::app_state::AppState;
use fleet_telemetry::presentation::handlers::{
    health_check, list_vehicles, stream_telemetry, vehicle_heat_maps,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;
    let settings = config.simulation.settings();
    let defaults = config.defaults.profile_defaults();

    // Create repository (infrastructure layer)
    let repository = Arc::new(JsonFleetRepository::new(&config.fleet.path));

    // Create services (application layer)
    let fleet_service = FleetService::new(repository);
    let heat_maps = HeatMapService::new(config.heat_map.smoothing_passes);
    let dashboard_service = DashboardService::new(fleet_service.clone(), heat_maps, defaults);
    let streaming_service = StreamingTelemetryService::new(
        fleet_service.clone(),
        heat_maps,
        settings,
        defaults,
        config.simulation.channel_capacity,
    );

    // Create application state
    let state = Arc::new(AppState {
        fleet_service,
        dashboard_service,
        streaming_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:id/heatmaps", get(vehicle_heat_maps))
        .route("/telemetry/stream", get(stream_telemetry))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting fleet-telemetry service on {} (step {}s, window {}, fleet {})",
        addr,
        settings.step_seconds,
        settings.window,
        config.fleet.path
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
