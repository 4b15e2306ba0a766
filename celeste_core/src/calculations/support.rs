//! # Support Loads
//!
//! Forces a solved span applies to its two supports, and the VHL resultant
//! used when checking a pylon.
//!
//! At each support the cable pulls with the constant horizontal component
//! `T0` and a vertical component `T0·sinh(x/c)`, `x` being the horizontal
//! offset from the lowest point. When the lowest point falls outside the
//! span the lower support sees a negative vertical component: the cable
//! lifts it.

use serde::{Deserialize, Serialize};

use super::span::SpanResult;

/// Resultant of the horizontal and longitudinal loads on a support (daN).
///
/// `R = sqrt(H² + L²)`
pub fn vhl_resultant(horizontal_dan: f64, longitudinal_dan: f64) -> f64 {
    horizontal_dan.hypot(longitudinal_dan)
}

/// Cable pull on one support (daN).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CablePull {
    /// Horizontal component along the line
    pub horizontal_dan: f64,

    /// Downward component, negative on uplift
    pub vertical_dan: f64,

    /// Total cable tension at the attachment
    pub total_dan: f64,
}

impl CablePull {
    /// True when the cable pulls the support upwards
    pub fn is_uplift(&self) -> bool {
        self.vertical_dan < 0.0
    }
}

/// Cable pulls at both ends of a span.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanReactions {
    /// Lower support (A)
    pub lower: CablePull,

    /// Higher support (B)
    pub higher: CablePull,
}

impl SpanReactions {
    /// Support pulls of a solved span.
    ///
    /// A degenerate result (zero tension) gives zero pulls.
    pub fn from_span(result: &SpanResult) -> Self {
        let t0 = result.tensions.t0_dan;
        let c = result.solution.parameter_m;
        if t0 <= 0.0 || c <= 0.0 {
            return SpanReactions::default();
        }

        let x_a = result.geometry.low_point_m;
        let x_b = result.solution.effective_span_m - x_a;

        SpanReactions {
            lower: CablePull {
                horizontal_dan: t0,
                vertical_dan: t0 * (x_a / c).sinh(),
                total_dan: result.tensions.ta_dan,
            },
            higher: CablePull {
                horizontal_dan: t0,
                vertical_dan: t0 * (x_b / c).sinh(),
                total_dan: result.tensions.tb_dan,
            },
        }
    }

    /// Combined vertical load on both supports, equal to the cable weight (daN)
    pub fn total_vertical_dan(&self) -> f64 {
        self.lower.vertical_dan + self.higher.vertical_dan
    }
}

/// Longitudinal unbalance on a suspension support between two spans (daN).
///
/// Positive when the span ahead pulls harder than the span behind.
pub fn longitudinal_unbalance(behind: &SpanResult, ahead: &SpanResult) -> f64 {
    ahead.tensions.t0_dan - behind.tensions.t0_dan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cables;
    use crate::calculations::span::{solve, SpanInput};
    use crate::config::SolverConfig;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn solved(span: f64, dh: f64, rho: f64) -> SpanResult {
        let input = SpanInput::new(span, dh, cables::find("Aster 570").unwrap(), rho);
        solve(&input, &SolverConfig::default()).unwrap()
    }

    #[test]
    fn test_vhl_resultant() {
        assert_abs_diff_eq!(vhl_resultant(300.0, 400.0), 500.0, epsilon = 1e-12);
        assert_eq!(vhl_resultant(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pull_components_match_tension() {
        let result = solved(500.0, 10.0, 2000.0);
        let r = SpanReactions::from_span(&result);

        for pull in [r.lower, r.higher] {
            let total = pull.horizontal_dan.hypot(pull.vertical_dan);
            assert_relative_eq!(total, pull.total_dan, max_relative = 1e-9);
        }
        assert!(!r.lower.is_uplift());
        assert!(r.higher.vertical_dan > r.lower.vertical_dan);
    }

    #[test]
    fn test_vertical_pulls_carry_cable_weight() {
        let result = solved(500.0, 10.0, 2000.0);
        let r = SpanReactions::from_span(&result);
        let weight = result.solution.unit_load_dan_per_m * result.geometry.arc_length_m;
        assert_relative_eq!(r.total_vertical_dan(), weight, max_relative = 1e-9);
    }

    #[test]
    fn test_uplift_on_steep_span() {
        let result = solved(200.0, 80.0, 3000.0);
        let r = SpanReactions::from_span(&result);
        assert!(r.lower.is_uplift());
        assert!(!r.higher.is_uplift());
    }

    #[test]
    fn test_longitudinal_unbalance() {
        let behind = solved(400.0, 0.0, 2000.0);
        let mut ahead = behind.clone();
        ahead.tensions.t0_dan += 150.0;
        assert_abs_diff_eq!(longitudinal_unbalance(&behind, &ahead), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_span_gives_zero_pulls() {
        let result = SpanResult::default();
        assert_eq!(SpanReactions::from_span(&result), SpanReactions::default());
    }
}
