// In-memory plant catalog seeded from configuration
use crate::application::plant_repository::PlantRepository;
use crate::domain::plant::{NewPlant, Plant, PlantId};
use crate::domain::thresholds::PlantSettings;
use crate::infrastructure::config::PlantsConfig;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Debug)]
struct Catalog {
    plants: BTreeMap<PlantId, Plant>,
    settings: HashMap<PlantId, PlantSettings>,
    next_id: PlantId,
}

#[derive(Debug)]
pub struct InMemoryPlantRepository {
    catalog: RwLock<Catalog>,
}

impl InMemoryPlantRepository {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog {
                plants: BTreeMap::new(),
                settings: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Register the configured plants; seeds with thresholds also get settings
    pub fn from_config(config: &PlantsConfig, now: DateTime<Utc>) -> Self {
        let mut plants = BTreeMap::new();
        let mut settings = HashMap::new();

        for seed in &config.plants {
            let new_plant = NewPlant {
                name: seed.name.clone(),
                species: seed.species.clone(),
                photo_url: seed.photo_url.clone(),
            };
            if plants.insert(seed.id, Plant::new(seed.id, new_plant, now)).is_some() {
                tracing::warn!("Duplicate plant id {} in config, keeping the last entry", seed.id);
            }
            // A later duplicate replaces the whole entry, settings included
            match &seed.thresholds {
                Some(thresholds) => {
                    settings.insert(seed.id, PlantSettings::new(seed.id, thresholds.clone(), now));
                }
                None => {
                    settings.remove(&seed.id);
                }
            }
        }

        let next_id = plants.keys().next_back().map_or(1, |id| id + 1);

        Self {
            catalog: RwLock::new(Catalog {
                plants,
                settings,
                next_id,
            }),
        }
    }
}

impl Default for InMemoryPlantRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlantRepository for InMemoryPlantRepository {
    async fn list_plants(&self, skip: usize, limit: usize) -> Result<Vec<Plant>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.plants.values().skip(skip).take(limit).cloned().collect())
    }

    async fn get_plant(&self, plant_id: PlantId) -> Result<Option<Plant>> {
        Ok(self.catalog.read().await.plants.get(&plant_id).cloned())
    }

    async fn create_plant(&self, new_plant: NewPlant) -> Result<Plant> {
        let mut catalog = self.catalog.write().await;
        let plant_id = catalog.next_id;
        catalog.next_id += 1;

        let plant = Plant::new(plant_id, new_plant, Utc::now());
        catalog.plants.insert(plant_id, plant.clone());
        Ok(plant)
    }

    async fn get_settings(&self, plant_id: PlantId) -> Result<Option<PlantSettings>> {
        Ok(self.catalog.read().await.settings.get(&plant_id).cloned())
    }

    async fn save_settings(&self, settings: PlantSettings) -> Result<PlantSettings> {
        let mut catalog = self.catalog.write().await;
        catalog.settings.insert(settings.plant_id, settings.clone());
        Ok(settings)
    }
}
