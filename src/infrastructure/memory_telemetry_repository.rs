// In-memory reading store, used when no InfluxDB is configured
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::plant::PlantId;
use crate::domain::reading::Reading;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryTelemetryRepository {
    readings: RwLock<HashMap<PlantId, Vec<Reading>>>,
}

impl InMemoryTelemetryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TelemetryRepository for InMemoryTelemetryRepository {
    async fn record_reading(&self, reading: &Reading) -> Result<()> {
        let mut readings = self.readings.write().await;
        let series = readings.entry(reading.plant_id).or_default();

        // keep each series sorted; equal timestamps stay in arrival order
        let at = series.partition_point(|r| r.timestamp <= reading.timestamp);
        series.insert(at, reading.clone());
        Ok(())
    }

    async fn readings(&self, plant_id: PlantId, since: Option<DateTime<Utc>>) -> Result<Vec<Reading>> {
        let readings = self.readings.read().await;
        let Some(series) = readings.get(&plant_id) else {
            return Ok(Vec::new());
        };

        let start = since.map_or(0, |t| series.partition_point(|r| r.timestamp < t));
        Ok(series[start..].to_vec())
    }
}
