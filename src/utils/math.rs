//! Mathematical utility functions

/// Round to a fixed number of decimal places (half away from zero)
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Clamp a running score into [0, 100] and round it to the nearest integer.
/// Non-finite input collapses to 0.
pub fn clamp_score(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    score.clamp(0.0, 100.0).round() as u8
}
