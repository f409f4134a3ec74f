// Application layer - Use cases and repository ports
pub mod analytics_service;
pub mod error;
pub mod plant_repository;
pub mod plant_service;
pub mod telemetry_repository;
pub mod telemetry_service;
