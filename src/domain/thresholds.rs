// Per-plant comfort thresholds and their partial updates
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::plant::PlantId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min_moisture: i32,
    pub max_moisture: i32,
    pub min_temperature: f64,
    pub max_temperature: f64,
    /// Stored for display; not part of the health score
    pub min_light_level: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_moisture: 30,
            max_moisture: 80,
            min_temperature: 15.0,
            max_temperature: 30.0,
            min_light_level: 200,
        }
    }
}

/// Partial threshold update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThresholdsUpdate {
    pub min_moisture: Option<i32>,
    pub max_moisture: Option<i32>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_light_level: Option<i32>,
}

impl Thresholds {
    pub fn moisture_ok(&self, soil_moisture: i32) -> bool {
        (self.min_moisture..=self.max_moisture).contains(&soil_moisture)
    }

    pub fn temperature_ok(&self, temperature: f64) -> bool {
        self.min_temperature <= temperature && temperature <= self.max_temperature
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_moisture > self.max_moisture {
            return Err(ValidationError::MoistureBounds {
                min: self.min_moisture,
                max: self.max_moisture,
            });
        }
        if self.min_temperature > self.max_temperature {
            return Err(ValidationError::TemperatureBounds {
                min: self.min_temperature,
                max: self.max_temperature,
            });
        }
        Ok(())
    }

    /// Overlay `update` onto these thresholds, rejecting inverted ranges.
    pub fn merge(&self, update: &ThresholdsUpdate) -> Result<Thresholds, ValidationError> {
        let merged = Thresholds {
            min_moisture: update.min_moisture.unwrap_or(self.min_moisture),
            max_moisture: update.max_moisture.unwrap_or(self.max_moisture),
            min_temperature: update.min_temperature.unwrap_or(self.min_temperature),
            max_temperature: update.max_temperature.unwrap_or(self.max_temperature),
            min_light_level: update.min_light_level.unwrap_or(self.min_light_level),
        };
        merged.validate()?;
        Ok(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSettings {
    pub plant_id: PlantId,
    #[serde(flatten)]
    pub thresholds: Thresholds,
    pub updated_at: DateTime<Utc>,
}

impl PlantSettings {
    pub fn new(plant_id: PlantId, thresholds: Thresholds, updated_at: DateTime<Utc>) -> Self {
        Self {
            plant_id,
            thresholds,
            updated_at,
        }
    }

    pub fn apply(
        &self,
        update: &ThresholdsUpdate,
        now: DateTime<Utc>,
    ) -> Result<PlantSettings, ValidationError> {
        let thresholds = self.thresholds.merge(update)?;
        Ok(PlantSettings::new(self.plant_id, thresholds, now))
    }
}
