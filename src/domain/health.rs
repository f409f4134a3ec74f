// Health scorer - rates a window of readings against plant thresholds
use serde::Serialize;

use super::error::AnalyticsError;
use super::plant::PlantId;
use super::precision::round_to;
use super::reading::Reading;
use super::thresholds::Thresholds;

pub const DEFAULT_PERIOD_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Perfect,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Critical,
    #[serde(rename = "No Data")]
    NoData,
}

impl HealthStatus {
    /// Map a 0-100 health index to a status, highest band first.
    pub fn from_index(health_index: f64) -> Self {
        if health_index >= 90.0 {
            HealthStatus::Perfect
        } else if health_index >= 75.0 {
            HealthStatus::Good
        } else if health_index >= 50.0 {
            HealthStatus::NeedsAttention
        } else {
            HealthStatus::Critical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub plant_id: PlantId,
    pub health_index: f64,
    pub status: HealthStatus,
    pub period_days: u32,
    pub total_readings: usize,
}

/// Points for one reading: 1.0 when moisture and temperature are both in
/// range, 0.5 when exactly one is, 0.0 otherwise. Light is not scored.
pub fn reading_points(reading: &Reading, thresholds: &Thresholds) -> f64 {
    match (
        thresholds.moisture_ok(reading.soil_moisture),
        thresholds.temperature_ok(reading.temperature),
    ) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => 0.0,
    }
}

/// Score readings already restricted to the trailing `period_days` window.
pub fn score(
    plant_id: PlantId,
    readings: &[Reading],
    thresholds: Option<&Thresholds>,
    period_days: u32,
) -> Result<HealthReport, AnalyticsError> {
    let thresholds = thresholds.ok_or(AnalyticsError::ConfigurationMissing)?;

    if readings.is_empty() {
        return Ok(HealthReport {
            plant_id,
            health_index: 0.0,
            status: HealthStatus::NoData,
            period_days,
            total_readings: 0,
        });
    }

    let points: f64 = readings
        .iter()
        .map(|reading| reading_points(reading, thresholds))
        .sum();
    let health_index = round_to(points / readings.len() as f64 * 100.0, 2);

    Ok(HealthReport {
        plant_id,
        health_index,
        status: HealthStatus::from_index(health_index),
        period_days,
        total_readings: readings.len(),
    })
}
