// Application state for HTTP handlers
use crate::application::analytics_service::AnalyticsService;
use crate::application::plant_service::PlantService;
use crate::application::telemetry_service::TelemetryService;

#[derive(Clone)]
pub struct AppState {
    pub plant_service: PlantService,
    pub telemetry_service: TelemetryService,
    pub analytics_service: AnalyticsService,
}
