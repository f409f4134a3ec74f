// Analytics service - Feeds reading snapshots into the analytics engine
use crate::application::error::ServiceResult;
use crate::application::plant_repository::{require_plant, PlantRepository};
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::forecast::{self, Forecast};
use crate::domain::health::{self, HealthReport};
use crate::domain::plant::PlantId;
use crate::domain::summary::{self, AverageStats, HourlyTemperature};
use chrono::{TimeDelta, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct AnalyticsService {
    plants: Arc<dyn PlantRepository>,
    telemetry: Arc<dyn TelemetryRepository>,
}

impl AnalyticsService {
    pub fn new(plants: Arc<dyn PlantRepository>, telemetry: Arc<dyn TelemetryRepository>) -> Self {
        Self { plants, telemetry }
    }

    pub async fn forecast(&self, plant_id: PlantId) -> ServiceResult<Forecast> {
        require_plant(self.plants.as_ref(), plant_id).await?;

        let readings = self.telemetry.readings(plant_id, None).await?;
        tracing::debug!(plant_id, readings = readings.len(), "Forecasting moisture");

        Ok(forecast::forecast(&readings)?)
    }

    /// Score the trailing `period_days` window against the stored thresholds.
    /// Missing settings are reported, not defaulted.
    pub async fn health(&self, plant_id: PlantId, period_days: u32) -> ServiceResult<HealthReport> {
        require_plant(self.plants.as_ref(), plant_id).await?;

        let thresholds = self
            .plants
            .get_settings(plant_id)
            .await?
            .map(|settings| settings.thresholds);

        // Windows reaching past the representable range cover the whole history
        let since = TimeDelta::try_days(i64::from(period_days))
            .and_then(|window| Utc::now().checked_sub_signed(window));
        let readings = self.telemetry.readings(plant_id, since).await?;
        tracing::debug!(plant_id, period_days, readings = readings.len(), "Scoring plant health");

        Ok(health::score(plant_id, &readings, thresholds.as_ref(), period_days)?)
    }

    pub async fn average_stats(&self, plant_id: PlantId) -> ServiceResult<AverageStats> {
        require_plant(self.plants.as_ref(), plant_id).await?;
        let readings = self.telemetry.readings(plant_id, None).await?;
        Ok(summary::average_stats(&readings))
    }

    pub async fn hourly_profile(&self, plant_id: PlantId) -> ServiceResult<Vec<HourlyTemperature>> {
        require_plant(self.plants.as_ref(), plant_id).await?;
        let readings = self.telemetry.readings(plant_id, None).await?;
        Ok(summary::hourly_profile(&readings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ServiceError;
    use crate::domain::error::AnalyticsError;
    use crate::domain::health::HealthStatus;
    use crate::domain::reading::Reading;
    use crate::domain::thresholds::{PlantSettings, Thresholds};
    use crate::infrastructure::config::{PlantSeed, PlantsConfig};
    use crate::infrastructure::memory_plant_repository::InMemoryPlantRepository;
    use crate::infrastructure::memory_telemetry_repository::InMemoryTelemetryRepository;

    fn fixture() -> (AnalyticsService, Arc<dyn PlantRepository>, Arc<dyn TelemetryRepository>) {
        let config = PlantsConfig {
            plants: vec![PlantSeed {
                id: 1,
                name: "Fern".to_string(),
                species: "Nephrolepis".to_string(),
                photo_url: None,
                thresholds: None,
            }],
        };
        let plants: Arc<dyn PlantRepository> =
            Arc::new(InMemoryPlantRepository::from_config(&config, Utc::now()));
        let telemetry: Arc<dyn TelemetryRepository> = Arc::new(InMemoryTelemetryRepository::new());
        (
            AnalyticsService::new(plants.clone(), telemetry.clone()),
            plants,
            telemetry,
        )
    }

    async fn record(telemetry: &dyn TelemetryRepository, days_ago: i64, soil_moisture: i32) {
        let reading = Reading {
            plant_id: 1,
            soil_moisture,
            temperature: 20.0,
            light_level: 300,
            timestamp: Utc::now() - TimeDelta::days(days_ago),
        };
        telemetry.record_reading(&reading).await.unwrap();
    }

    #[tokio::test]
    async fn test_health_only_scores_trailing_window() {
        let (service, plants, telemetry) = fixture();
        plants
            .save_settings(PlantSettings::new(1, Thresholds::default(), Utc::now()))
            .await
            .unwrap();

        // dry readings long ago, good readings this week
        record(telemetry.as_ref(), 20, 5).await;
        record(telemetry.as_ref(), 10, 5).await;
        record(telemetry.as_ref(), 2, 55).await;
        record(telemetry.as_ref(), 1, 60).await;

        let weekly = service.health(1, 7).await.unwrap();
        assert_eq!(weekly.total_readings, 2);
        assert_eq!(weekly.health_index, 100.0);
        assert_eq!(weekly.status, HealthStatus::Perfect);

        let monthly = service.health(1, 30).await.unwrap();
        assert_eq!(monthly.total_readings, 4);
        assert_eq!(monthly.health_index, 75.0);
        assert_eq!(monthly.status, HealthStatus::Good);

        let forever = service.health(1, u32::MAX).await.unwrap();
        assert_eq!(forever.total_readings, 4);
    }

    #[tokio::test]
    async fn test_health_does_not_default_settings() {
        let (service, plants, _) = fixture();

        let result = service.health(1, 7).await;

        assert!(matches!(
            result,
            Err(ServiceError::Analytics(AnalyticsError::ConfigurationMissing))
        ));
        assert!(plants.get_settings(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_plant() {
        let (service, _, _) = fixture();
        assert!(matches!(
            service.forecast(404).await,
            Err(ServiceError::PlantNotFound(404))
        ));
    }

    #[tokio::test]
    async fn test_forecast_uses_full_history() {
        let (service, _, telemetry) = fixture();
        record(telemetry.as_ref(), 40, 50).await;
        record(telemetry.as_ref(), 30, 50).await;

        let forecast = service.forecast(1).await.unwrap();
        assert_eq!(forecast.forecast_ewma_corrected, 50.0);
        assert!(!forecast.alert);
    }
}
