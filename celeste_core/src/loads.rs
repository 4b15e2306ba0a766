//! # Span Loading
//!
//! Turns a cable plus the climatic hypothesis into the uniform load the
//! catenary hangs under, and projects surveyed span dimensions through the
//! topographic skew angle.
//!
//! ## Unit weight
//!
//! ```text
//! w_v = m × g / 10                 (daN/m, bare cable weight)
//! w_t = P × d                      (daN/m, wind on the projected diameter)
//! w   = sqrt(w_v² + w_t²)          (resultant in the swung plane)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use celeste_core::cables;
//! use celeste_core::loads::SpanLoading;
//!
//! let aster = cables::find("Aster 570").unwrap();
//! let still = SpanLoading::compute(&aster, None).unwrap();
//! let windy = SpanLoading::compute(&aster, Some(36.0)).unwrap();
//! assert!(windy.resultant_dan_per_m > still.resultant_dan_per_m);
//! ```

use serde::{Deserialize, Serialize};

use crate::cables::CableSpec;
use crate::errors::{require_finite, require_non_negative, require_positive, CalcError, CalcResult};
use crate::units::{DecaPascals, Grades, Radians};

/// Uniform load carried by the cable (daN/m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanLoading {
    /// Bare cable weight
    pub vertical_dan_per_m: f64,

    /// Transverse wind load, zero in still air
    pub wind_dan_per_m: f64,

    /// Vector resultant of weight and wind
    pub resultant_dan_per_m: f64,

    /// Swing of the loaded plane away from vertical (grades)
    pub swing_angle_grade: f64,
}

impl SpanLoading {
    /// Compute the load for a cable under an optional wind pressure (daPa).
    pub fn compute(cable: &CableSpec, wind_pressure_dapa: Option<f64>) -> CalcResult<Self> {
        let vertical = cable.linear_weight().0;
        let wind = match wind_pressure_dapa {
            Some(p) => {
                require_non_negative("wind_pressure_daPa", p)?;
                DecaPascals(p).on_diameter(cable.diameter()).0
            }
            None => 0.0,
        };

        let resultant = vertical.hypot(wind);
        let swing: Grades = Radians(wind.atan2(vertical)).into();

        Ok(SpanLoading {
            vertical_dan_per_m: vertical,
            wind_dan_per_m: wind,
            resultant_dan_per_m: resultant,
            swing_angle_grade: swing.0,
        })
    }

    /// Overload coefficient m = w / w_v used on sag-tension tables
    pub fn overload_factor(&self) -> f64 {
        self.resultant_dan_per_m / self.vertical_dan_per_m
    }

    /// True when wind adds load
    pub fn has_wind(&self) -> bool {
        self.wind_dan_per_m > 0.0
    }
}

/// Span dimensions after the topographic skew correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewedSpan {
    /// Horizontal span along the true line direction (m)
    pub span_length_m: f64,

    /// Height difference, positive when the far support is higher (m)
    pub height_difference_m: f64,

    /// Ratio applied to the surveyed span (1 / cos θ)
    pub skew_factor: f64,
}

impl SkewedSpan {
    /// Largest usable skew: at 100 gr the line would run perpendicular to the survey axis.
    pub const MAX_ANGLE_GRADE: f64 = 100.0;

    /// Project surveyed span dimensions through an optional skew angle.
    ///
    /// The angle is measured between the survey axis and the line, so the
    /// span along the line is `L / cos θ`. The height difference is vertical
    /// and passes through unchanged.
    pub fn project(span_length_m: f64, height_difference_m: f64, angle_grade: Option<f64>) -> CalcResult<Self> {
        require_positive("span_length_m", span_length_m)?;
        require_finite("delta_h_m", height_difference_m)?;

        let skew_factor = match angle_grade {
            None => 1.0,
            Some(angle) => {
                require_finite("angle_topo_grade", angle)?;
                if angle.abs() >= Self::MAX_ANGLE_GRADE {
                    return Err(CalcError::invalid_input(
                        "angle_topo_grade",
                        angle.to_string(),
                        "Skew angle must be strictly between -100 and 100 grades",
                    ));
                }
                let theta: Radians = Grades(angle).into();
                1.0 / theta.0.cos()
            }
        };

        Ok(SkewedSpan {
            span_length_m: span_length_m * skew_factor,
            height_difference_m,
            skew_factor,
        })
    }

    /// Chord length b = sqrt(L² + Δh²)
    pub fn chord_m(&self) -> f64 {
        (self.span_length_m.powi(2) + self.height_difference_m.powi(2)).sqrt()
    }
}
