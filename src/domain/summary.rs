// Aggregate summaries over a plant's reading history
use std::collections::BTreeMap;

use chrono::Timelike;
use serde::Serialize;

use super::precision::round_to;
use super::reading::Reading;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageStats {
    pub avg_moisture: f64,
    pub avg_temp: f64,
    pub avg_light: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyTemperature {
    pub hour: u32,
    pub avg_temp: f64,
}

/// Mean moisture, temperature and light, rounded to one decimal.
pub fn average_stats(readings: &[Reading]) -> AverageStats {
    if readings.is_empty() {
        return AverageStats {
            avg_moisture: 0.0,
            avg_temp: 0.0,
            avg_light: 0.0,
        };
    }

    let n = readings.len() as f64;
    let mean = |field: fn(&Reading) -> f64| {
        round_to(readings.iter().map(field).sum::<f64>() / n, 1)
    };

    AverageStats {
        avg_moisture: mean(|r| f64::from(r.soil_moisture)),
        avg_temp: mean(|r| r.temperature),
        avg_light: mean(|r| f64::from(r.light_level)),
    }
}

/// Average temperature per UTC hour of day, ordered by hour.
/// Hours without readings are omitted.
pub fn hourly_profile(readings: &[Reading]) -> Vec<HourlyTemperature> {
    let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

    for reading in readings {
        let bucket = buckets.entry(reading.timestamp.hour()).or_insert((0.0, 0));
        bucket.0 += reading.temperature;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, (sum, count))| HourlyTemperature {
            hour,
            avg_temp: round_to(sum / count as f64, 1),
        })
        .collect()
}
