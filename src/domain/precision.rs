// Rounding helpers for result payloads

/// Round to `digits` decimal places, ties to even.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round_ties_even() / scale
}
