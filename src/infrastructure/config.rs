use crate::domain::plant::PlantId;
use crate::domain::thresholds::Thresholds;
use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "PLANT_CARE";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Readings are kept in memory when no InfluxDB section is configured
    #[serde(default)]
    pub influx: Option<InfluxSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlantsConfig {
    #[serde(default)]
    pub plants: Vec<PlantSeed>,
}

/// A plant registered at startup, optionally with its thresholds
#[derive(Debug, Deserialize, Clone)]
pub struct PlantSeed {
    pub id: PlantId,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

fn default_measurement() -> String {
    "plant_sensor".to_string()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR)
}

pub fn load_storage_config() -> anyhow::Result<StorageConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/influx").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_plants_config() -> anyhow::Result<PlantsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/plants").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a query string
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}
