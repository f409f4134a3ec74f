// Plant service - Use cases for the plant catalog and threshold settings
use crate::application::error::ServiceResult;
use crate::application::plant_repository::{require_plant, PlantRepository};
use crate::domain::plant::{NewPlant, Plant, PlantId};
use crate::domain::thresholds::{PlantSettings, Thresholds, ThresholdsUpdate};
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct PlantService {
    repository: Arc<dyn PlantRepository>,
}

impl PlantService {
    pub fn new(repository: Arc<dyn PlantRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_plants(&self, skip: usize, limit: usize) -> ServiceResult<Vec<Plant>> {
        Ok(self.repository.list_plants(skip, limit).await?)
    }

    pub async fn create_plant(&self, new_plant: NewPlant) -> ServiceResult<Plant> {
        let plant = self.repository.create_plant(new_plant).await?;
        tracing::info!(plant_id = plant.plant_id, name = %plant.name, "Registered plant");
        Ok(plant)
    }

    /// Current settings, creating the defaults on first access
    pub async fn get_settings(&self, plant_id: PlantId) -> ServiceResult<PlantSettings> {
        require_plant(self.repository.as_ref(), plant_id).await?;

        if let Some(settings) = self.repository.get_settings(plant_id).await? {
            return Ok(settings);
        }

        tracing::info!(plant_id, "No settings stored, creating defaults");
        let defaults = PlantSettings::new(plant_id, Thresholds::default(), Utc::now());
        Ok(self.repository.save_settings(defaults).await?)
    }

    pub async fn update_settings(
        &self,
        plant_id: PlantId,
        update: ThresholdsUpdate,
    ) -> ServiceResult<PlantSettings> {
        let current = self.get_settings(plant_id).await?;
        let updated = current.apply(&update, Utc::now())?;

        tracing::debug!(plant_id, ?update, "Updating plant settings");
        Ok(self.repository.save_settings(updated).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ServiceError;
    use crate::domain::error::ValidationError;
    use crate::infrastructure::memory_plant_repository::InMemoryPlantRepository;

    async fn service_with_plant() -> PlantService {
        let service = PlantService::new(Arc::new(InMemoryPlantRepository::new()));
        service
            .create_plant(NewPlant {
                name: "Aloe".to_string(),
                species: "Aloe vera".to_string(),
                photo_url: Some("http://example.com/aloe.jpg".to_string()),
            })
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn test_settings_created_once() {
        let service = service_with_plant().await;

        let first = service.get_settings(1).await.unwrap();
        let second = service.get_settings(1).await.unwrap();

        assert_eq!(first.thresholds, Thresholds::default());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_merges_and_persists() {
        let service = service_with_plant().await;
        let update = ThresholdsUpdate {
            min_moisture: Some(20),
            max_moisture: Some(50),
            ..Default::default()
        };

        service.update_settings(1, update).await.unwrap();
        let stored = service.get_settings(1).await.unwrap();

        assert_eq!(stored.thresholds.min_moisture, 20);
        assert_eq!(stored.thresholds.max_moisture, 50);
        assert_eq!(stored.thresholds.max_temperature, 30.0);
    }

    #[tokio::test]
    async fn test_invalid_update_keeps_previous() {
        let service = service_with_plant().await;
        let update = ThresholdsUpdate {
            min_temperature: Some(35.0),
            ..Default::default()
        };

        let result = service.update_settings(1, update).await;

        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::TemperatureBounds { .. }))
        ));
        assert_eq!(service.get_settings(1).await.unwrap().thresholds, Thresholds::default());
    }

    #[tokio::test]
    async fn test_settings_for_unknown_plant() {
        let service = service_with_plant().await;
        assert!(matches!(
            service.get_settings(2).await,
            Err(ServiceError::PlantNotFound(2))
        ));
    }
}
