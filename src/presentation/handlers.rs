// HTTP request handlers
use crate::domain::forecast::Forecast;
use crate::domain::health::{HealthReport, DEFAULT_PERIOD_DAYS};
use crate::domain::plant::{NewPlant, Plant, PlantId};
use crate::domain::reading::{NewReading, Reading};
use crate::domain::summary::{AverageStats, HourlyTemperature};
use crate::domain::thresholds::{PlantSettings, ThresholdsUpdate};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiResult;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_PAGE_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct PageQuery {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct PeriodQuery {
    pub period_days: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_plants(
    Query(page): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Plant>>> {
    let plants = state
        .plant_service
        .list_plants(page.skip.unwrap_or(0), page.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
        .await?;
    Ok(Json(plants))
}

pub async fn create_plant(
    State(state): State<Arc<AppState>>,
    Json(new_plant): Json<NewPlant>,
) -> ApiResult<Json<Plant>> {
    Ok(Json(state.plant_service.create_plant(new_plant).await?))
}

/// Telemetry ingest from a device
pub async fn receive_sensor_data(
    State(state): State<Arc<AppState>>,
    Json(new_reading): Json<NewReading>,
) -> ApiResult<Json<Reading>> {
    Ok(Json(state.telemetry_service.record_reading(new_reading).await?))
}

/// Full reading history for a plant, oldest first
pub async fn list_readings(
    Path(plant_id): Path<PlantId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Reading>>> {
    Ok(Json(state.telemetry_service.history(plant_id).await?))
}

pub async fn get_settings(
    Path(plant_id): Path<PlantId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PlantSettings>> {
    Ok(Json(state.plant_service.get_settings(plant_id).await?))
}

pub async fn update_settings(
    Path(plant_id): Path<PlantId>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ThresholdsUpdate>,
) -> ApiResult<Json<PlantSettings>> {
    Ok(Json(state.plant_service.update_settings(plant_id, update).await?))
}

/// Moisture forecast (EWMA with temperature correction)
pub async fn get_forecast(
    Path(plant_id): Path<PlantId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Forecast>> {
    Ok(Json(state.analytics_service.forecast(plant_id).await?))
}

pub async fn get_health(
    Path(plant_id): Path<PlantId>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthReport>> {
    let period_days = query.period_days.unwrap_or(DEFAULT_PERIOD_DAYS);
    Ok(Json(state.analytics_service.health(plant_id, period_days).await?))
}

pub async fn get_average_stats(
    Path(plant_id): Path<PlantId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AverageStats>> {
    Ok(Json(state.analytics_service.average_stats(plant_id).await?))
}

pub async fn get_hourly_stats(
    Path(plant_id): Path<PlantId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HourlyTemperature>>> {
    Ok(Json(state.analytics_service.hourly_profile(plant_id).await?))
}
