use crate::CoreError;

/// Placeholder reported for a value the broker could not deliver.
pub const NULL_VALUE: f64 = -99.0;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal digits for display.
pub fn round_to_digits(v: f64, digits: u32) -> f64 {
    let scale = 10_f64.powi(digits as i32);
    (v * scale).round() / scale
}
