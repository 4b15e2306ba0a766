//! # Span Mechanical Calculation
//!
//! Sag and tension of one conductor span between two supports, from the span
//! geometry, the cable and its catenary parameter ρ.
//!
//! ## Method
//!
//! 1. Unit weight `w` combines the bare cable weight with the transverse wind
//!    load (see [`crate::loads`]). A topographic skew angle lengthens the span
//!    to `L / cos θ`.
//! 2. Under the [`RhoConvention::Reference`] convention, ρ describes the cable
//!    at the reference state (no wind, reference temperature). When wind or a
//!    temperature change is applied, the parameter `c` of the loaded state is
//!    found from conservation of the unstressed cable length:
//!
//!    ```text
//!    S(c) = S_u · (1 + α·ΔT) · (1 + c·w / EA)
//!    S_u  = S(ρ) / (1 + ρ·w_v / EA)
//!    ```
//!
//!    Under [`RhoConvention::Loaded`], `c = ρ`.
//! 3. Geometry and tensions follow from the [`Catenary`]:
//!    `T0 = c·w`, `TA = T0·cosh(x_A/c)`, `TB = T0·cosh(x_B/c)`.
//!
//! Only malformed input returns `Err`. Convergence trouble, overload and
//! advisories are reported in `errors` / `warnings` beside a best-effort result.
//!
//! ## Example
//!
//! ```rust
//! use celeste_core::cables;
//! use celeste_core::calculations::span::{solve, SpanInput};
//! use celeste_core::config::SolverConfig;
//!
//! let input = SpanInput::new(500.0, 10.0, cables::find("Aster 570").unwrap(), 2000.0);
//! let result = solve(&input, &SolverConfig::default()).unwrap();
//!
//! println!("F1 = {:.2} m, TB = {:.0} daN", result.geometry.f1_m, result.tensions.tb_dan);
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};

use super::catenary::Catenary;
use super::root_finding::{expand_bracket, solve_bracketed, Root, RootConfig, RootError};
use crate::cables::CableSpec;
use crate::config::{RhoConvention, SolverConfig};
use crate::errors::{require_finite, require_non_negative, require_positive, CalcError, CalcResult};
use crate::loads::{SkewedSpan, SpanLoading};
use crate::units::DecaNewtons;

/// Input parameters for one span.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "P12-P13",
///   "span_length_m": 500.0,
///   "delta_h_m": 10.0,
///   "cable": { "name": "Aster 570", "mass_lin_kg_per_m": 1.631, "E_MPa": 78000,
///              "section_mm2": 564.6, "alpha_1e6_per_C": 19.1,
///              "rupture_dan": 17200, "diameter_mm": 31.5 },
///   "rho_m": 2000.0,
///   "wind_pressure_daPa": 36.0,
///   "angle_topo_grade": 4.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanInput {
    /// User label (e.g., "P12-P13")
    #[serde(default)]
    pub label: String,

    /// Horizontal distance between the supports (m)
    pub span_length_m: f64,

    /// Height difference (m), positive when the far support is higher
    pub delta_h_m: f64,

    /// Cable strung on the span
    pub cable: CableSpec,

    /// Catenary parameter ρ (m)
    pub rho_m: f64,

    /// Transverse wind pressure (daPa)
    #[serde(rename = "wind_pressure_daPa", default, skip_serializing_if = "Option::is_none")]
    pub wind_pressure_dapa: Option<f64>,

    /// Topographic skew angle (grades)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_topo_grade: Option<f64>,

    /// Temperature change from the reference state (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_delta_c: Option<f64>,
}

impl SpanInput {
    /// Span in still air at the reference temperature.
    pub fn new(span_length_m: f64, delta_h_m: f64, cable: CableSpec, rho_m: f64) -> Self {
        SpanInput {
            label: String::new(),
            span_length_m,
            delta_h_m,
            cable,
            rho_m,
            wind_pressure_dapa: None,
            angle_topo_grade: None,
            temperature_delta_c: None,
        }
    }

    /// Set the wind pressure (daPa)
    pub fn with_wind(mut self, wind_pressure_dapa: f64) -> Self {
        self.wind_pressure_dapa = Some(wind_pressure_dapa);
        self
    }

    /// Set the topographic skew angle (grades)
    pub fn with_angle(mut self, angle_topo_grade: f64) -> Self {
        self.angle_topo_grade = Some(angle_topo_grade);
        self
    }

    /// Set the temperature change from the reference state (°C)
    pub fn with_temperature_delta(mut self, temperature_delta_c: f64) -> Self {
        self.temperature_delta_c = Some(temperature_delta_c);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("span_length_m", self.span_length_m)?;
        require_finite("delta_h_m", self.delta_h_m)?;
        self.cable.validate()?;
        require_positive("rho_m", self.rho_m)?;
        if let Some(p) = self.wind_pressure_dapa {
            require_non_negative("wind_pressure_daPa", p)?;
        }
        if let Some(angle) = self.angle_topo_grade {
            require_finite("angle_topo_grade", angle)?;
        }
        if let Some(dt) = self.temperature_delta_c {
            require_finite("temperature_delta_c", dt)?;
            if 1.0 + self.cable.alpha_per_c() * dt <= 0.0 {
                return Err(CalcError::invalid_input(
                    "temperature_delta_c",
                    dt.to_string(),
                    "Thermal contraction would consume the whole cable length",
                ));
            }
        }
        Ok(())
    }

    fn temperature_delta(&self) -> f64 {
        self.temperature_delta_c.unwrap_or(0.0)
    }
}

/// Span geometry (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanGeometry {
    /// Chord length b = sqrt(L² + Δh²)
    pub b_m: f64,

    /// Mid-span sag
    #[serde(rename = "F1_m")]
    pub f1_m: f64,

    /// Sag at the lowest point (chord to vertex), zero when the vertex
    /// falls outside the span
    #[serde(rename = "F2_m")]
    pub f2_m: f64,

    /// Drop from the higher support to the lowest point on the span
    #[serde(rename = "H_m")]
    pub h_m: f64,

    /// Horizontal distance from the lower support to the vertex
    pub low_point_m: f64,

    /// Cable length between the supports
    pub arc_length_m: f64,
}

/// Cable tensions (daN).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanTensions {
    /// Horizontal component, constant along the span
    #[serde(rename = "T0_dan")]
    pub t0_dan: f64,

    /// Tension at the lower support
    #[serde(rename = "TA_dan")]
    pub ta_dan: f64,

    /// Tension at the higher support
    #[serde(rename = "TB_dan")]
    pub tb_dan: f64,

    /// max(TA, TB) / rupture load
    pub rupture_ratio: f64,
}

/// How the catenary parameter was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SolutionInfo {
    /// Catenary parameter c of the loaded state (m)
    pub parameter_m: f64,

    /// Resultant unit load w (daN/m)
    pub unit_load_dan_per_m: f64,

    /// Horizontal span after skew correction (m)
    pub effective_span_m: f64,

    /// Root-finder iterations (zero when no refinement was needed)
    pub iterations: usize,

    /// True when c came from the change-of-state solve
    pub refined: bool,
}

/// Results from the span calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "geometry": { "b_m": 500.1, "F1_m": 15.65, "F2_m": 15.25, "H_m": 21.05, ... },
///   "tensions": { "T0_dan": 3200.0, "TA_dan": 3217.7, "TB_dan": 3233.7, ... },
///   "warnings": [],
///   "errors": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanResult {
    /// Sag figures
    pub geometry: SpanGeometry,

    /// Support tensions
    pub tensions: SpanTensions,

    /// Non-blocking advisories, in order of detection
    pub warnings: Vec<String>,

    /// Blocking conditions, in order of detection
    pub errors: Vec<String>,

    /// Solver details
    pub solution: SolutionInfo,
}

impl SpanResult {
    /// True when no blocking condition was found
    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    /// Copy rounded to 0.01 m and 1 daN, the precision quoted on line drawings
    pub fn rounded(&self) -> SpanResult {
        let round_m = |v: f64| (v * 100.0).round() / 100.0;
        let mut out = self.clone();
        out.geometry = SpanGeometry {
            b_m: round_m(self.geometry.b_m),
            f1_m: round_m(self.geometry.f1_m),
            f2_m: round_m(self.geometry.f2_m),
            h_m: round_m(self.geometry.h_m),
            low_point_m: round_m(self.geometry.low_point_m),
            arc_length_m: round_m(self.geometry.arc_length_m),
        };
        out.tensions = SpanTensions {
            t0_dan: self.tensions.t0_dan.round(),
            ta_dan: self.tensions.ta_dan.round(),
            tb_dan: self.tensions.tb_dan.round(),
            rupture_ratio: self.tensions.rupture_ratio,
        };
        out
    }
}

/// Solve one span.
///
/// # Returns
///
/// * `Ok(SpanResult)` - Always produced for well-formed input, possibly with
///   entries in `errors`
/// * `Err(CalcError)` - Malformed input, nothing was computed
pub fn solve(input: &SpanInput, config: &SolverConfig) -> CalcResult<SpanResult> {
    input.validate()?;
    config.validate()?;

    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if let Some(p) = input.wind_pressure_dapa {
        if p > config.celeste_max_wind_dapa {
            warnings.push(format!(
                "Wind pressure {} daPa exceeds {} daPa (outside CELESTE conditions)",
                p, config.celeste_max_wind_dapa
            ));
        }
    }
    if let Some(angle) = input.angle_topo_grade {
        if angle.abs() > config.celeste_max_angle_grade {
            warnings.push(format!(
                "Angle of {} grades exceeds {} grades (outside CELESTE conditions)",
                angle, config.celeste_max_angle_grade
            ));
        }
    }

    let skewed = SkewedSpan::project(input.span_length_m, input.delta_h_m, input.angle_topo_grade)?;
    let loading = SpanLoading::compute(&input.cable, input.wind_pressure_dapa)?;
    let span = skewed.span_length_m;
    let rise = skewed.height_difference_m.abs();
    let rho = input.rho_m;

    if span > config.max_span_m {
        warnings.push(format!(
            "Span of {:.1} m exceeds the plausible maximum of {} m: results are numerically sensitive",
            span, config.max_span_m
        ));
    }
    if rho < config.min_rho_m {
        warnings.push(format!("ρ very low ({} m < {} m): check the sag hypothesis", rho, config.min_rho_m));
    }
    if rho > config.max_rho_m {
        warnings.push(format!("ρ very high ({} m > {} m): check the tension hypothesis", rho, config.max_rho_m));
    }
    if rho < span * config.min_rho_to_span {
        warnings.push(format!(
            "ρ = {} m is small against a {:.1} m span (near-degenerate catenary): results are numerically sensitive",
            rho, span
        ));
    }

    let needs_refinement = loading.has_wind() || input.temperature_delta() != 0.0;
    let mut info = SolutionInfo {
        parameter_m: rho,
        unit_load_dan_per_m: loading.resultant_dan_per_m,
        effective_span_m: span,
        iterations: 0,
        refined: false,
    };

    match config.rho_convention {
        RhoConvention::Loaded => {
            if input.temperature_delta() != 0.0 {
                warnings.push(
                    "temperature_delta_c ignored: ρ is taken as the loaded-state parameter".to_string(),
                );
            }
        }
        RhoConvention::Reference if needs_refinement => {
            match refine_parameter(input, &loading, span, rise, config) {
                Ok(root) => {
                    info.parameter_m = root.x;
                    info.iterations = root.iters;
                    info.refined = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, rho, "change of state did not converge, keeping ρ");
                    errors.push(format!(
                        "non-convergent tension solution ({e}); unrefined ρ = {rho} m used"
                    ));
                }
            }
        }
        RhoConvention::Reference => {}
    }

    let c = info.parameter_m;
    let w = loading.resultant_dan_per_m;
    let catenary = Catenary::new(c, span, rise);
    let b_m = skewed.chord_m();

    let t0 = c * w;
    let ta = t0 * catenary.tension_factor_a();
    let tb = t0 * catenary.tension_factor_b();
    let rupture_ratio = ta.max(tb) / input.cable.rupture_dan;

    let mut geometry = SpanGeometry {
        b_m,
        f1_m: catenary.mid_span_sag(),
        f2_m: catenary.vertex_sag(),
        h_m: catenary.drop_from_high_support(),
        low_point_m: catenary.x0,
        arc_length_m: catenary.arc_length(),
    };
    let tensions = SpanTensions {
        t0_dan: t0,
        ta_dan: ta,
        tb_dan: tb,
        rupture_ratio,
    };

    let finite = [geometry.f1_m, geometry.f2_m, geometry.h_m, geometry.arc_length_m, ta, tb, rupture_ratio]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        tracing::warn!(c, span, rise, "catenary overflow");
        errors.push(format!(
            "degenerate catenary geometry: parameter {c:.3} m cannot hang over a {span:.1} m span"
        ));
        return Ok(SpanResult {
            geometry: SpanGeometry { b_m, ..SpanGeometry::default() },
            tensions: SpanTensions::default(),
            warnings,
            errors,
            solution: info,
        });
    }

    if !catenary.low_point_inside() {
        geometry.f2_m = 0.0;
        warnings.push(format!(
            "lowest point outside span (vertex {:.1} m before the lower support): F2 taken at the lower support",
            -catenary.x0
        ));
    }

    if rupture_ratio > config.safety_ratio {
        warnings.push(format!(
            "Maximum tension {:.0} daN reaches {:.1} % of the rupture load ({} daN)",
            ta.max(tb),
            rupture_ratio * 100.0,
            input.cable.rupture_dan
        ));
    }
    if rupture_ratio > 1.0 {
        errors.push(format!(
            "Tension {:.0} daN exceeds the rupture load of {} daN (breaking load): physically infeasible configuration",
            ta.max(tb),
            input.cable.rupture_dan
        ));
    }

    tracing::debug!(
        label = %input.label,
        c,
        t0,
        ta,
        tb,
        warnings = warnings.len(),
        errors = errors.len(),
        "span solved"
    );

    Ok(SpanResult {
        geometry,
        tensions,
        warnings,
        errors,
        solution: info,
    })
}

/// Solve the change-of-state equation for the loaded catenary parameter.
fn refine_parameter(
    input: &SpanInput,
    loading: &SpanLoading,
    span: f64,
    rise: f64,
    config: &SolverConfig,
) -> Result<Root, RootError> {
    let cable = &input.cable;
    let rho = input.rho_m;
    let ea = cable.axial_stiffness().0;
    let w = loading.resultant_dan_per_m;

    // Length the cable would have with no tension, at the reference temperature
    let reference_length = Catenary::new(rho, span, rise).arc_length();
    let reference_tension = DecaNewtons(rho * loading.vertical_dan_per_m);
    let unstressed = reference_length / (1.0 + cable.elastic_strain(reference_tension));
    let free_length = unstressed * (1.0 + cable.alpha_per_c() * input.temperature_delta());

    let residual = |c: f64| {
        let catenary = Catenary::new(c, span, rise);
        let value = catenary.arc_length() - free_length * (1.0 + cable.elastic_strain(DecaNewtons(c * w)));
        let slope = catenary.arc_length_slope() - free_length * w / ea;
        (value, slope)
    };

    let (lo, hi) = expand_bracket(|c| residual(c).0, rho, config.max_bracket_steps)?;
    tracing::debug!(lo, hi, "change of state bracketed");

    let root = solve_bracketed(
        residual,
        lo,
        hi,
        RootConfig {
            rel_tol: config.rel_tol,
            max_iters: config.max_iters,
        },
    )?;
    tracing::debug!(c = root.x, iters = root.iters, residual = root.residual, "change of state converged");
    Ok(root)
}
