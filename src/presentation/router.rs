// HTTP routes and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_plant, get_average_stats, get_forecast, get_health, get_hourly_stats, get_settings,
    health_check, list_plants, list_readings, receive_sensor_data, update_settings,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/plants", get(list_plants).post(create_plant))
        .route("/api/sensor/data", post(receive_sensor_data))
        .route("/api/plants/:plant_id/readings", get(list_readings))
        .route(
            "/api/plants/:plant_id/settings",
            get(get_settings).put(update_settings),
        )
        .route("/api/plants/:plant_id/analytics/forecast", get(get_forecast))
        .route("/api/plants/:plant_id/analytics/health", get(get_health))
        .route("/api/plants/:plant_id/analytics/stats", get(get_average_stats))
        .route("/api/plants/:plant_id/analytics/hourly", get(get_hourly_stats))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
