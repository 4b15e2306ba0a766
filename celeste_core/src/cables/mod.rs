//! # Cables
//!
//! Conductor and guard-wire definitions, the built-in catalog and the
//! cable-level checks that do not depend on a span.
//!
//! ## JSON Example
//!
//! Field names follow the request contract used by the front end:
//!
//! ```json
//! {
//!   "name": "Aster 570",
//!   "mass_lin_kg_per_m": 1.631,
//!   "E_MPa": 78000,
//!   "section_mm2": 564.6,
//!   "alpha_1e6_per_C": 19.1,
//!   "rupture_dan": 17200,
//!   "diameter_mm": 31.5
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use celeste_core::cables;
//!
//! let aster = cables::find("aster 570").unwrap();
//! assert_eq!(aster.rupture_dan, 17200.0);
//! println!("w = {:.3} daN/m", aster.linear_weight().0);
//! ```

pub mod catalog;
pub mod emissivity;
pub mod rupture;

pub use catalog::{catalog, find, names};
pub use emissivity::cigre_emissivity;
pub use rupture::{residual_rupture, BrokenWires, ResidualRupture};

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::units::{DaNPerMeter, DecaNewtons, KgPerMeter, Meters, Millimeters, Newtons};

/// Role of a cable on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CableKind {
    /// Phase conductor
    #[default]
    Conductor,
    /// Earth (guard) wire
    Guard,
    /// Guard wire with embedded optical fibre or mixed duty
    Mixed,
}

impl CableKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CableKind::Conductor => "Conductor",
            CableKind::Guard => "Guard wire",
            CableKind::Mixed => "Mixed",
        }
    }
}

/// Physical and mechanical properties of a cable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    /// Catalog designation (e.g., "Aster 570")
    pub name: String,

    /// Conductor, guard wire or mixed
    #[serde(default)]
    pub kind: CableKind,

    /// Linear mass (kg/m)
    pub mass_lin_kg_per_m: f64,

    /// Final modulus of elasticity (MPa)
    #[serde(rename = "E_MPa")]
    pub e_mpa: f64,

    /// Total cross-section (mm²)
    pub section_mm2: f64,

    /// Thermal expansion coefficient (1e-6 /°C)
    #[serde(rename = "alpha_1e6_per_C")]
    pub alpha_1e6_per_c: f64,

    /// Rated breaking load (daN)
    pub rupture_dan: f64,

    /// Outer diameter (mm)
    pub diameter_mm: f64,

    /// Admissible working load (daN), when the catalog provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admissible_dan: Option<f64>,
}

impl CableSpec {
    /// Validate that every physical property is in range.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("cable.mass_lin_kg_per_m", self.mass_lin_kg_per_m)?;
        require_positive("cable.E_MPa", self.e_mpa)?;
        require_positive("cable.section_mm2", self.section_mm2)?;
        require_non_negative("cable.alpha_1e6_per_C", self.alpha_1e6_per_c)?;
        require_positive("cable.rupture_dan", self.rupture_dan)?;
        require_positive("cable.diameter_mm", self.diameter_mm)?;
        if let Some(admissible) = self.admissible_dan {
            require_positive("cable.admissible_dan", admissible)?;
        }
        Ok(())
    }

    /// Bare cable weight per metre (daN/m)
    pub fn linear_weight(&self) -> DaNPerMeter {
        KgPerMeter(self.mass_lin_kg_per_m).into()
    }

    /// Outer diameter in metres
    pub fn diameter(&self) -> Meters {
        Millimeters(self.diameter_mm).into()
    }

    /// Axial stiffness E·A (daN)
    pub fn axial_stiffness(&self) -> DecaNewtons {
        // MPa × mm² = N
        Newtons(self.e_mpa * self.section_mm2).into()
    }

    /// Thermal expansion coefficient (1/°C)
    pub fn alpha_per_c(&self) -> f64 {
        self.alpha_1e6_per_c * 1e-6
    }

    /// Elastic strain produced by a tension (daN)
    pub fn elastic_strain(&self, tension: DecaNewtons) -> f64 {
        tension.0 / self.axial_stiffness().0
    }

    /// Display label, e.g. "Aster 570 (Conductor, 1.631 kg/m)"
    pub fn display_name(&self) -> String {
        format!(
            "{} ({}, {} kg/m)",
            self.name,
            self.kind.display_name(),
            self.mass_lin_kg_per_m
        )
    }
}

impl std::fmt::Display for CableSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
