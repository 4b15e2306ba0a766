//! CIGRE emissivity of an ageing conductor surface.
//!
//! ```text
//! ε = 0.23 + 0.7 × age / (1.22 + age)
//! ```
//!
//! A new conductor starts at 0.23 and tends to 0.93 as the surface darkens.

use crate::errors::{require_non_negative, CalcResult};

/// Emissivity after `age_years` of service.
pub fn cigre_emissivity(age_years: f64) -> CalcResult<f64> {
    require_non_negative("age_years", age_years)?;
    Ok(0.23 + (0.7 * age_years) / (1.22 + age_years))
}
