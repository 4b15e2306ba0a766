//! # Solver Configuration
//!
//! Every threshold the span solver applies lives in [`SolverConfig`]. The
//! defaults follow the CELESTE application domain; a JSON file can override
//! any subset of them.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "rho_convention": "Loaded",
//!   "safety_ratio": 0.35,
//!   "max_span_m": 1200.0
//! }
//! ```
//!
//! Missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::load_json;

/// Environment variable holding the path of a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "CELESTEX_CONFIG";

/// How the caller's ρ relates to the catenary parameter of the loaded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RhoConvention {
    /// ρ describes the reference state: bare conductor weight, reference
    /// temperature. Wind and temperature changes are carried through the
    /// length-conservation (change of state) equation.
    #[default]
    Reference,
    /// ρ already is the catenary parameter under the applied load.
    Loaded,
}

impl RhoConvention {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            RhoConvention::Reference => "Reference state",
            RhoConvention::Loaded => "Loaded state",
        }
    }
}

/// Tunable parameters of the span solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Interpretation of the caller-supplied ρ
    pub rho_convention: RhoConvention,

    /// Relative step tolerance on the catenary parameter
    pub rel_tol: f64,

    /// Iteration cap for the root finder
    pub max_iters: usize,

    /// Number of halvings/doublings allowed while bracketing the root
    pub max_bracket_steps: usize,

    /// Fraction of the rupture load above which a warning is raised
    pub safety_ratio: f64,

    /// Longest span considered numerically comfortable (m)
    pub max_span_m: f64,

    /// ρ below this value triggers a "very low ρ" warning (m)
    pub min_rho_m: f64,

    /// ρ above this value triggers a "very high ρ" warning (m)
    pub max_rho_m: f64,

    /// ρ / span below this ratio is treated as a near-degenerate catenary
    pub min_rho_to_span: f64,

    /// Wind pressure limit of the CELESTE domain (daPa)
    pub celeste_max_wind_dapa: f64,

    /// Topographic angle limit of the CELESTE domain (grades)
    pub celeste_max_angle_grade: f64,

    /// Round geometry to 0.01 m and tensions to 1 daN in API responses
    pub round_output: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            rho_convention: RhoConvention::Reference,
            rel_tol: 1e-6,
            max_iters: 100,
            max_bracket_steps: 60,
            safety_ratio: 0.40,
            max_span_m: 1500.0,
            min_rho_m: 500.0,
            max_rho_m: 10_000.0,
            min_rho_to_span: 0.5,
            celeste_max_wind_dapa: 36.0,
            celeste_max_angle_grade: 15.0,
            round_output: false,
        }
    }
}

impl SolverConfig {
    /// Load a configuration file and validate it.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let config: SolverConfig = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `CELESTEX_CONFIG`, or defaults when unset.
    pub fn from_env() -> CalcResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(SolverConfig::default()),
        }
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.rel_tol > 0.0 && self.rel_tol < 1.0) {
            return Err(CalcError::invalid_input(
                "rel_tol",
                self.rel_tol.to_string(),
                "Tolerance must lie in (0, 1)",
            ));
        }
        if self.max_iters == 0 {
            return Err(CalcError::invalid_input(
                "max_iters",
                self.max_iters.to_string(),
                "At least one iteration is required",
            ));
        }
        if !(self.safety_ratio > 0.0 && self.safety_ratio <= 1.0) {
            return Err(CalcError::invalid_input(
                "safety_ratio",
                self.safety_ratio.to_string(),
                "Safety ratio must lie in (0, 1]",
            ));
        }
        if self.min_rho_m >= self.max_rho_m {
            return Err(CalcError::invalid_input(
                "min_rho_m",
                self.min_rho_m.to_string(),
                "Lower ρ bound must be below the upper bound",
            ));
        }
        if self.max_span_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "max_span_m",
                self.max_span_m.to_string(),
                "Maximum span must be positive",
            ));
        }
        Ok(())
    }
}
