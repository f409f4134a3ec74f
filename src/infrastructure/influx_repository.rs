// InfluxDB repository implementation
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::plant::PlantId;
use crate::domain::reading::Reading;
use crate::infrastructure::config::{prepare_query, InfluxSettings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::collections::HashMap;

const READINGS_QUERY: &str = "SELECT \"soil_moisture\", \"temperature\", \"light_level\" FROM \"${measurement}\" WHERE \"plant_id\" = '${plant_id}'${window} ORDER BY time ASC";

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    client: reqwest::Client,
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    measurement: String,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    columns: Vec<String>,
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl InfluxRepository {
    pub fn new(settings: InfluxSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token,
            database: settings.database,
            retention_policy: settings.retention_policy,
            measurement: settings.measurement,
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    fn build_write_url(&self) -> String {
        format!(
            "{}/write?db={}&rp={}&precision=ns",
            self.host, self.database, self.retention_policy
        )
    }

    fn readings_query(&self, plant_id: PlantId, since: Option<DateTime<Utc>>) -> String {
        let window = since
            .map(|t| format!(" AND time >= '{}'", t.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .unwrap_or_default();

        let mut vars = HashMap::new();
        vars.insert("measurement".to_string(), self.measurement.clone());
        vars.insert("plant_id".to_string(), plant_id.to_string());
        vars.insert("window".to_string(), window);
        prepare_query(READINGS_QUERY, &vars)
    }

    /// Encode a reading as a single line of InfluxDB line protocol.
    /// Points sharing tags and timestamp overwrite each other, so the
    /// timestamp is written at full nanosecond precision.
    fn to_line_protocol(&self, reading: &Reading) -> Result<String> {
        let timestamp = reading
            .timestamp
            .timestamp_nanos_opt()
            .context("Reading timestamp is outside the nanosecond range")?;

        Ok(format!(
            "{},plant_id={} soil_moisture={}i,temperature={},light_level={}i {}",
            self.measurement,
            reading.plant_id,
            reading.soil_moisture,
            reading.temperature,
            reading.light_level,
            timestamp
        ))
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse> {
        let url = self.build_query_url(query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB query failed with status {}: {}", status, body);
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .context("Failed to parse InfluxDB response")?;

        // Check for errors in the response
        if let Some(result) = data.results.first() {
            if let Some(error) = &result.error {
                anyhow::bail!("InfluxDB query error: {}", error);
            }
        }

        Ok(data)
    }

    async fn execute_write(&self, body: String) -> Result<()> {
        let response = self
            .client
            .post(self.build_write_url())
            .header("Authorization", format!("Token {}", self.token))
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .context("Failed to send write to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB write failed with status {}: {}", status, body);
        }

        Ok(())
    }

    /// Turn query rows into readings, skipping rows with missing fields
    fn parse_readings(plant_id: PlantId, response: &InfluxQLResponse) -> Vec<Reading> {
        let mut readings = Vec::new();

        let Some(series) = response.results.first().and_then(|r| r.series.as_ref()) else {
            return readings;
        };

        for s in series {
            let column = |name: &str| s.columns.iter().position(|c| c == name);
            let (Some(time_idx), Some(moisture_idx), Some(temp_idx), Some(light_idx)) = (
                column("time"),
                column("soil_moisture"),
                column("temperature"),
                column("light_level"),
            ) else {
                tracing::warn!("Unexpected InfluxDB columns: {:?}", s.columns);
                continue;
            };

            for row in &s.values {
                let parsed = (
                    row.get(time_idx)
                        .and_then(|v| v.as_str())
                        .and_then(|t| DateTime::parse_from_rfc3339(t).ok()),
                    row.get(moisture_idx)
                        .and_then(|v| v.as_i64())
                        .and_then(|v| i32::try_from(v).ok()),
                    row.get(temp_idx).and_then(|v| v.as_f64()),
                    row.get(light_idx)
                        .and_then(|v| v.as_i64())
                        .and_then(|v| i32::try_from(v).ok()),
                );

                match parsed {
                    (Some(time), Some(moisture), Some(temperature), Some(light)) => {
                        readings.push(Reading {
                            plant_id,
                            soil_moisture: moisture,
                            temperature,
                            light_level: light,
                            timestamp: time.to_utc(),
                        });
                    }
                    _ => tracing::debug!("Skipping incomplete or out-of-range row for plant {}: {:?}", plant_id, row),
                }
            }
        }

        readings
    }
}

#[async_trait]
impl TelemetryRepository for InfluxRepository {
    async fn record_reading(&self, reading: &Reading) -> Result<()> {
        let line = self.to_line_protocol(reading)?;
        tracing::debug!("Writing line: {}", line);
        self.execute_write(line).await
    }

    async fn readings(&self, plant_id: PlantId, since: Option<DateTime<Utc>>) -> Result<Vec<Reading>> {
        let query = self.readings_query(plant_id, since);

        tracing::debug!("Executing readings query: {}", query);
        let response = self.execute_query(&query).await?;

        let readings = Self::parse_readings(plant_id, &response);
        tracing::debug!("Found {} readings for plant {}", readings.len(), plant_id);
        Ok(readings)
    }
}
