// Repository trait for sensor reading storage
use crate::domain::plant::PlantId;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Persist a single reading
    async fn record_reading(&self, reading: &Reading) -> anyhow::Result<()>;

    /// Readings for a plant in chronological order
    /// Only readings at or after `since` are returned when it is set
    async fn readings(
        &self,
        plant_id: PlantId,
        since: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<Reading>>;
}
