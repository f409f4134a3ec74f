// Repository trait for the plant catalog and per-plant settings
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::plant::{NewPlant, Plant, PlantId};
use crate::domain::thresholds::PlantSettings;
use async_trait::async_trait;

#[async_trait]
pub trait PlantRepository: Send + Sync {
    /// List plants ordered by id
    async fn list_plants(&self, skip: usize, limit: usize) -> anyhow::Result<Vec<Plant>>;

    async fn get_plant(&self, plant_id: PlantId) -> anyhow::Result<Option<Plant>>;

    /// Register a plant and assign it the next free id
    async fn create_plant(&self, new_plant: NewPlant) -> anyhow::Result<Plant>;

    /// Stored settings, if any. Never fabricates defaults.
    async fn get_settings(&self, plant_id: PlantId) -> anyhow::Result<Option<PlantSettings>>;

    /// Insert or replace the settings for a plant
    async fn save_settings(&self, settings: PlantSettings) -> anyhow::Result<PlantSettings>;
}

/// Look up a plant, turning absence into `PlantNotFound`
pub async fn require_plant(
    repository: &dyn PlantRepository,
    plant_id: PlantId,
) -> ServiceResult<Plant> {
    repository
        .get_plant(plant_id)
        .await?
        .ok_or(ServiceError::PlantNotFound(plant_id))
}
