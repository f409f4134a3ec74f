// Domain errors for analytics and input validation
use thiserror::Error;

/// Expected, recoverable outcomes of the analytics engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The forecaster needs at least two readings.
    #[error("Not enough data for forecast")]
    InsufficientData,

    /// No threshold configuration exists for the plant.
    #[error("Plant settings not found")]
    ConfigurationMissing,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("soil_moisture must be between 0 and 100, got {0}")]
    MoistureOutOfRange(i32),

    #[error("light_level must not be negative, got {0}")]
    NegativeLight(i32),

    #[error("temperature must be a finite number")]
    NonFiniteTemperature,

    #[error("min_moisture ({min}) must not exceed max_moisture ({max})")]
    MoistureBounds { min: i32, max: i32 },

    #[error("min_temperature ({min}) must not exceed max_temperature ({max})")]
    TemperatureBounds { min: f64, max: f64 },
}
