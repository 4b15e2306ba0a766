//! # Residual Rupture Load
//!
//! Breaking strength left in a cable after strand damage. The residual load
//! (CRR) removes the rupture contribution of every broken strand from the
//! rated load (CRA). The load retained for design (CR) is the lower of the
//! residual load and 95 % of the rated load.
//!
//! ```text
//! CRR = CRA - Σ (nbc × crb)
//! CR  = min(0.95 × CRA, CRR)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use celeste_core::cables::{residual_rupture, BrokenWires};
//!
//! let broken = [BrokenWires { count: 3, strand_rupture_dan: 500.0 }];
//! let r = residual_rupture(17200.0, &broken).unwrap();
//! assert_eq!(r.crr_dan, 15700.0);
//! assert_eq!(r.cr_dan, 15700.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Retained fraction of the rated load for an undamaged cable
const RATED_LOAD_FACTOR: f64 = 0.95;

/// A group of identical broken strands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrokenWires {
    /// Number of broken strands (nbc)
    pub count: u32,

    /// Rupture load of one strand (crb, daN)
    pub strand_rupture_dan: f64,
}

/// Residual rupture figures (daN).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualRupture {
    /// Residual rupture load CRR
    pub crr_dan: f64,

    /// Design rupture load CR
    pub cr_dan: f64,

    /// Total strength lost to broken strands
    pub lost_dan: f64,
}

/// Compute the residual rupture load of a damaged cable.
pub fn residual_rupture(cra_dan: f64, broken_wires: &[BrokenWires]) -> CalcResult<ResidualRupture> {
    require_positive("cra_dan", cra_dan)?;
    for group in broken_wires {
        require_non_negative("strand_rupture_dan", group.strand_rupture_dan)?;
    }

    let lost_dan: f64 = broken_wires
        .iter()
        .map(|g| f64::from(g.count) * g.strand_rupture_dan)
        .sum();
    let crr_dan = cra_dan - lost_dan;

    if crr_dan <= 0.0 {
        return Err(CalcError::calculation_failed(
            "ResidualRupture",
            format!("Broken strands remove {lost_dan} daN from a rated load of {cra_dan} daN"),
        ));
    }

    Ok(ResidualRupture {
        crr_dan,
        cr_dan: (cra_dan * RATED_LOAD_FACTOR).min(crr_dan),
        lost_dan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_broken_wires() {
        let r = residual_rupture(17200.0, &[]).unwrap();
        assert_eq!(r.crr_dan, 17200.0);
        assert_relative_eq!(r.cr_dan, 16340.0, epsilon = 1e-9);
        assert_eq!(r.lost_dan, 0.0);
    }

    #[test]
    fn test_with_broken_wires() {
        let broken = [
            BrokenWires { count: 2, strand_rupture_dan: 500.0 },
            BrokenWires { count: 1, strand_rupture_dan: 500.0 },
        ];
        let r = residual_rupture(17200.0, &broken).unwrap();
        assert_eq!(r.crr_dan, 15700.0);
        assert_eq!(r.cr_dan, (17200.0_f64 * 0.95).min(15700.0));
    }

    #[test]
    fn test_cable_fully_destroyed() {
        let broken = [BrokenWires { count: 40, strand_rupture_dan: 500.0 }];
        let err = residual_rupture(17200.0, &broken).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_invalid_rated_load() {
        assert!(residual_rupture(0.0, &[]).is_err());
        let broken = [BrokenWires { count: 1, strand_rupture_dan: -5.0 }];
        assert!(residual_rupture(1000.0, &broken).is_err());
    }
}
