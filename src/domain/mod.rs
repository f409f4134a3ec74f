// Domain layer - Plant telemetry model and analytics engine
pub mod error;
pub mod forecast;
pub mod health;
pub mod plant;
pub mod precision;
pub mod reading;
pub mod summary;
pub mod thresholds;
