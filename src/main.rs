// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use crate::application::analytics_service::AnalyticsService;
use crate::application::plant_repository::PlantRepository;
use crate::application::plant_service::PlantService;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::application::telemetry_service::TelemetryService;
use crate::infrastructure::config::{load_plants_config, load_server_config, load_storage_config};
use crate::infrastructure::influx_repository::InfluxRepository;
use crate::infrastructure::memory_plant_repository::InMemoryPlantRepository;
use crate::infrastructure::memory_telemetry_repository::InMemoryTelemetryRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let server_config = load_server_config()?;
    let storage_config = load_storage_config()?;
    let plants_config = load_plants_config()?;

    // Create repositories (infrastructure layer)
    let telemetry: Arc<dyn TelemetryRepository> = match storage_config.influx {
        Some(influx) => {
            tracing::info!(host = %influx.host, database = %influx.database, "Storing readings in InfluxDB");
            Arc::new(InfluxRepository::new(influx))
        }
        None => {
            tracing::warn!("No [influx] configuration found, readings are kept in memory only");
            Arc::new(InMemoryTelemetryRepository::new())
        }
    };
    let plants: Arc<dyn PlantRepository> =
        Arc::new(InMemoryPlantRepository::from_config(&plants_config, Utc::now()));
    tracing::info!("Loaded {} plants from config", plants_config.plants.len());

    // Create services (application layer)
    let state = Arc::new(AppState {
        plant_service: PlantService::new(plants.clone()),
        telemetry_service: TelemetryService::new(plants.clone(), telemetry.clone()),
        analytics_service: AnalyticsService::new(plants, telemetry),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = server_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", server_config.server.bind))?;
    tracing::info!("Starting plant-care-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
