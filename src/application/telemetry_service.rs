// Telemetry service - Use cases for ingesting and listing readings
use crate::application::error::ServiceResult;
use crate::application::plant_repository::{require_plant, PlantRepository};
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::plant::PlantId;
use crate::domain::reading::{NewReading, Reading};
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct TelemetryService {
    plants: Arc<dyn PlantRepository>,
    telemetry: Arc<dyn TelemetryRepository>,
}

impl TelemetryService {
    pub fn new(plants: Arc<dyn PlantRepository>, telemetry: Arc<dyn TelemetryRepository>) -> Self {
        Self { plants, telemetry }
    }

    pub async fn record_reading(&self, new_reading: NewReading) -> ServiceResult<Reading> {
        require_plant(self.plants.as_ref(), new_reading.plant_id).await?;
        new_reading.validate()?;

        let reading = new_reading.into_reading(Utc::now());
        self.telemetry.record_reading(&reading).await?;

        tracing::debug!(
            plant_id = reading.plant_id,
            soil_moisture = reading.soil_moisture,
            temperature = reading.temperature,
            light_level = reading.light_level,
            "Recorded reading"
        );
        Ok(reading)
    }

    pub async fn history(&self, plant_id: PlantId) -> ServiceResult<Vec<Reading>> {
        require_plant(self.plants.as_ref(), plant_id).await?;
        Ok(self.telemetry.readings(plant_id, None).await?)
    }
}
