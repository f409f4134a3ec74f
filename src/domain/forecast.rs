// Moisture forecaster - adaptive EWMA with temperature correction
use serde::Serialize;

use super::error::AnalyticsError;
use super::precision::round_to;
use super::reading::Reading;

/// Corrected forecasts strictly below this moisture percentage raise an alert.
pub const ALERT_MOISTURE: f64 = 30.0;

/// Variance (in moisture² units) above which a series counts as volatile.
const VOLATILITY_VARIANCE: f64 = 50.0;
const VOLATILE_ALPHA: f64 = 0.4;
const STABLE_ALPHA: f64 = 0.2;
const FALLBACK_ALPHA: f64 = 0.5;

const REFERENCE_TEMPERATURE: f64 = 25.0;
const DRYING_RATE_PER_DEGREE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub current_moisture: f64,
    pub forecast_ewma_corrected: f64,
    pub trend: f64,
    pub alert: bool,
}

/// Forecast near-term soil moisture from readings in chronological order.
///
/// Needs at least two readings. Forecast and trend are rounded to two
/// decimals in the result only; the alert is decided on the unrounded value.
pub fn forecast(readings: &[Reading]) -> Result<Forecast, AnalyticsError> {
    let [_, .., latest] = readings else {
        return Err(AnalyticsError::InsufficientData);
    };

    let moisture: Vec<f64> = readings
        .iter()
        .map(|r| f64::from(r.soil_moisture))
        .collect();

    let alpha = smoothing_factor(&moisture);
    let smoothed = ewma(&moisture, alpha).ok_or(AnalyticsError::InsufficientData)?;
    let corrected = temperature_correction(smoothed, latest.temperature);

    let current = f64::from(latest.soil_moisture);

    Ok(Forecast {
        current_moisture: current,
        forecast_ewma_corrected: round_to(corrected, 2),
        trend: round_to(corrected - current, 2),
        alert: is_low_moisture(corrected),
    })
}

/// Pick α from the population variance of the series.
pub fn smoothing_factor(values: &[f64]) -> f64 {
    if values.is_empty() {
        return FALLBACK_ALPHA;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    if variance > VOLATILITY_VARIANCE {
        VOLATILE_ALPHA
    } else {
        STABLE_ALPHA
    }
}

/// Exponentially weighted moving average seeded with the first value.
pub fn ewma(values: &[f64], alpha: f64) -> Option<f64> {
    let (seed, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold(*seed, |smoothed, value| alpha * value + (1.0 - alpha) * smoothed),
    )
}

/// Scale a forecast down when it is hotter than the reference temperature.
pub fn temperature_correction(forecast: f64, temperature: f64) -> f64 {
    let factor = if temperature > REFERENCE_TEMPERATURE {
        1.0 + DRYING_RATE_PER_DEGREE * (temperature - REFERENCE_TEMPERATURE)
    } else {
        1.0
    };
    forecast / factor
}

pub fn is_low_moisture(forecast: f64) -> bool {
    forecast < ALERT_MOISTURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn series(points: &[(i32, f64)]) -> Vec<Reading> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(soil_moisture, temperature))| Reading {
                plant_id: 1,
                soil_moisture,
                temperature,
                light_level: 500,
                timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64 * 3600, 0).unwrap(),
            })
            .collect()
    }

    fn moisture_only(values: &[i32], temperature: f64) -> Vec<Reading> {
        let points: Vec<(i32, f64)> = values.iter().map(|&m| (m, temperature)).collect();
        series(&points)
    }

    #[test]
    fn test_requires_two_readings() {
        assert_eq!(forecast(&[]), Err(AnalyticsError::InsufficientData));
        assert_eq!(
            forecast(&moisture_only(&[55], 20.0)),
            Err(AnalyticsError::InsufficientData)
        );
        assert!(forecast(&moisture_only(&[55, 54], 20.0)).is_ok());
    }

    #[test]
    fn test_constant_series_forecasts_itself() {
        let stable = forecast(&moisture_only(&[55, 55, 55, 55], 20.0)).unwrap();
        assert_eq!(stable.forecast_ewma_corrected, 55.0);
        assert_eq!(stable.trend, 0.0);
        assert!(!stable.alert);

        let long = forecast(&moisture_only(&[72; 40], 25.0)).unwrap();
        assert_eq!(long.forecast_ewma_corrected, 72.0);
    }

    #[test]
    fn test_smoothing_factor_switches_on_variance() {
        assert_eq!(smoothing_factor(&[40.0, 60.0, 40.0, 60.0, 40.0]), 0.4);
        assert_eq!(smoothing_factor(&[50.0, 52.0, 50.0, 52.0, 50.0]), 0.2);
        assert_eq!(smoothing_factor(&[]), 0.5);
    }

    #[test]
    fn test_volatile_and_stable_trajectories() {
        // variance 96, α = 0.4: 40 → 48 → 44.8 → 50.88 → 46.528
        let volatile = forecast(&moisture_only(&[40, 60, 40, 60, 40], 20.0)).unwrap();
        assert_eq!(volatile.forecast_ewma_corrected, 46.53);
        assert_eq!(volatile.trend, 6.53);

        // variance 0.96, α = 0.2: 50 → 50.4 → 50.32 → 50.656 → 50.5248
        let stable = forecast(&moisture_only(&[50, 52, 50, 52, 50], 20.0)).unwrap();
        assert_eq!(stable.forecast_ewma_corrected, 50.52);
        assert_eq!(stable.trend, 0.52);
    }

    #[test]
    fn test_trend_can_be_negative() {
        // spike on the last reading: variance 300, α = 0.4
        let result = forecast(&moisture_only(&[40, 40, 40, 80], 20.0)).unwrap();
        assert_eq!(result.current_moisture, 80.0);
        assert_eq!(result.forecast_ewma_corrected, 56.0);
        assert_eq!(result.trend, -24.0);
    }

    #[test]
    fn test_heat_lowers_forecast_monotonically() {
        let baseline = forecast(&moisture_only(&[50, 50, 50], 25.0))
            .unwrap()
            .forecast_ewma_corrected;
        assert_eq!(baseline, 50.0);

        let mut previous = baseline;
        for temperature in [25.5, 26.0, 28.0, 30.0, 35.0, 40.0] {
            let readings = series(&[(50, 20.0), (50, 20.0), (50, temperature)]);
            let value = forecast(&readings).unwrap().forecast_ewma_corrected;
            assert!(value < previous, "{temperature}°C gave {value}, expected < {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_only_latest_temperature_counts() {
        let hot_history = series(&[(50, 40.0), (50, 40.0), (50, 22.0)]);
        assert_eq!(forecast(&hot_history).unwrap().forecast_ewma_corrected, 50.0);

        let hot_now = series(&[(50, 22.0), (50, 22.0), (50, 30.0)]);
        assert_eq!(forecast(&hot_now).unwrap().forecast_ewma_corrected, 40.0);
    }

    #[test]
    fn test_alert_boundary() {
        assert!(is_low_moisture(29.999));
        assert!(!is_low_moisture(30.0));
        assert!(!is_low_moisture(30.001));

        assert!(!forecast(&moisture_only(&[31, 31], 20.0)).unwrap().alert);
        // 30 / 1.05 ≈ 28.57
        assert!(forecast(&moisture_only(&[30, 30], 26.0)).unwrap().alert);
    }

    #[test]
    fn test_ewma_fold() {
        assert_eq!(ewma(&[], 0.2), None);
        assert_eq!(ewma(&[12.0], 0.2), Some(12.0));
        assert_eq!(ewma(&[10.0, 20.0], 0.5), Some(15.0));
    }

    #[test]
    fn test_forecast_is_repeatable() {
        let readings = series(&[(63, 21.0), (58, 23.5), (71, 26.2), (49, 27.9), (52, 24.1)]);
        assert_eq!(forecast(&readings), forecast(&readings));
    }
}
