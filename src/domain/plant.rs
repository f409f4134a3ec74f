// Plant domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PlantId = i64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    pub plant_id: PlantId,
    pub name: String,
    pub species: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering a plant
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlant {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Plant {
    pub fn new(plant_id: PlantId, new_plant: NewPlant, created_at: DateTime<Utc>) -> Self {
        Self {
            plant_id,
            name: new_plant.name,
            species: new_plant.species,
            photo_url: new_plant.photo_url,
            created_at,
        }
    }
}
