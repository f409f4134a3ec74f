// Sensor reading domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::plant::PlantId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub plant_id: PlantId,
    /// Volumetric soil moisture in percent
    pub soil_moisture: i32,
    /// Air temperature in °C
    pub temperature: f64,
    pub light_level: i32,
    pub timestamp: DateTime<Utc>,
}

/// Telemetry payload as sent by a device. The server stamps the time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReading {
    pub plant_id: PlantId,
    pub soil_moisture: i32,
    pub temperature: f64,
    pub light_level: i32,
}

impl NewReading {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0..=100).contains(&self.soil_moisture) {
            return Err(ValidationError::MoistureOutOfRange(self.soil_moisture));
        }
        if !self.temperature.is_finite() {
            return Err(ValidationError::NonFiniteTemperature);
        }
        if self.light_level < 0 {
            return Err(ValidationError::NegativeLight(self.light_level));
        }
        Ok(())
    }

    pub fn into_reading(self, timestamp: DateTime<Utc>) -> Reading {
        Reading {
            plant_id: self.plant_id,
            soil_moisture: self.soil_moisture,
            temperature: self.temperature,
            light_level: self.light_level,
            timestamp,
        }
    }
}
