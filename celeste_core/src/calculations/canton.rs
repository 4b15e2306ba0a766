//! # Canton (Section of Line)
//!
//! A canton is the run of spans between two anchor supports. All spans carry
//! the same cable, strung at the same catenary parameter ρ.
//!
//! ## Ruling span (Blondel)
//!
//! ```text
//! a_eq = sqrt(Σa³ / Σa)
//! K    = Σa / a_eq
//! ```
//!
//! ## CELESTE application domain
//!
//! With `a1` the longest span, `a2` the shortest and `h_max` the largest
//! height difference:
//!
//! - `a1/a2 < 3`: requires `h_max/a2 ≤ 0.8`
//! - `a1/a2 ≥ 3`: requires `h_max/a2 ≤ 0.4`
//!
//! ## Example
//!
//! ```rust
//! use celeste_core::cables;
//! use celeste_core::calculations::canton::{solve_canton, CantonInput, CantonSpan};
//! use celeste_core::config::SolverConfig;
//!
//! let input = CantonInput {
//!     label: "Canton 12".to_string(),
//!     cable: cables::find("Aster 570").unwrap(),
//!     rho_m: 2000.0,
//!     wind_pressure_dapa: None,
//!     temperature_delta_c: None,
//!     spans: vec![
//!         CantonSpan::new("P1-P2", 400.0, 5.0),
//!         CantonSpan::new("P2-P3", 450.0, -12.0),
//!     ],
//! };
//!
//! let result = solve_canton(&input, &SolverConfig::default()).unwrap();
//! assert_eq!(result.spans.len(), 2);
//! assert!(result.passes());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::span::{self, SpanInput, SpanResult};
use crate::cables::CableSpec;
use crate::config::SolverConfig;
use crate::errors::{require_positive, CalcError, CalcResult};

/// Current canton file schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Ratio a1/a2 separating the two CELESTE height-difference limits
const SPAN_RATIO_LIMIT: f64 = 3.0;

/// h_max/a2 limit for regular cantons (a1/a2 < 3)
const REGULAR_HEIGHT_RATIO: f64 = 0.8;

/// h_max/a2 limit for irregular cantons (a1/a2 ≥ 3)
const IRREGULAR_HEIGHT_RATIO: f64 = 0.4;

/// One span of a canton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonSpan {
    /// Support pair (e.g., "P12-P13")
    #[serde(default)]
    pub label: String,

    /// Horizontal span (m)
    pub span_length_m: f64,

    /// Height difference (m), positive when the far support is higher
    pub delta_h_m: f64,

    /// Topographic skew angle (grades)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_topo_grade: Option<f64>,
}

impl CantonSpan {
    /// Span without skew.
    pub fn new(label: impl Into<String>, span_length_m: f64, delta_h_m: f64) -> Self {
        CantonSpan {
            label: label.into(),
            span_length_m,
            delta_h_m,
            angle_topo_grade: None,
        }
    }
}

/// Input for a canton calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonInput {
    /// User label (e.g., "Canton 12")
    #[serde(default)]
    pub label: String,

    /// Cable strung on every span
    pub cable: CableSpec,

    /// Catenary parameter ρ shared by all spans (m)
    pub rho_m: f64,

    /// Transverse wind pressure (daPa)
    #[serde(rename = "wind_pressure_daPa", default, skip_serializing_if = "Option::is_none")]
    pub wind_pressure_dapa: Option<f64>,

    /// Temperature change from the reference state (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_delta_c: Option<f64>,

    /// Spans in line order
    pub spans: Vec<CantonSpan>,
}

impl CantonInput {
    /// Validate input parameters.
    ///
    /// Per-span values are checked again by the span solver; this catches an
    /// empty canton and reports which span is malformed.
    pub fn validate(&self) -> CalcResult<()> {
        if self.spans.is_empty() {
            return Err(CalcError::missing_field("spans"));
        }
        self.cable.validate()?;
        require_positive("rho_m", self.rho_m)?;
        for (i, s) in self.spans.iter().enumerate() {
            self.span_input(s).validate().map_err(|e| match e {
                CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
                    field: format!("spans[{}].{}", i, field),
                    value,
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// Build the span solver input for one span of this canton.
    pub fn span_input(&self, span: &CantonSpan) -> SpanInput {
        SpanInput {
            label: span.label.clone(),
            span_length_m: span.span_length_m,
            delta_h_m: span.delta_h_m,
            cable: self.cable.clone(),
            rho_m: self.rho_m,
            wind_pressure_dapa: self.wind_pressure_dapa,
            angle_topo_grade: span.angle_topo_grade,
            temperature_delta_c: self.temperature_delta_c,
        }
    }

    /// Longest span a1 (m)
    pub fn longest_span(&self) -> f64 {
        self.spans.iter().map(|s| s.span_length_m).fold(0.0, f64::max)
    }

    /// Shortest span a2 (m)
    pub fn shortest_span(&self) -> f64 {
        self.spans
            .iter()
            .map(|s| s.span_length_m)
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest absolute height difference h_max (m)
    pub fn max_height_difference(&self) -> f64 {
        self.spans.iter().map(|s| s.delta_h_m.abs()).fold(0.0, f64::max)
    }
}

/// Blondel ruling span.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquivalentSpan {
    /// Equivalent span a_eq (m)
    pub a_eq_m: f64,

    /// Coefficient K = Σa / a_eq
    pub k: f64,
}

/// Compute the ruling span of a sequence of span lengths.
///
/// An empty sequence gives zeros.
pub fn equivalent_span(spans: &[f64]) -> EquivalentSpan {
    let sum_a: f64 = spans.iter().sum();
    let sum_a3: f64 = spans.iter().map(|a| a.powi(3)).sum();

    let a_eq_m = if sum_a > 0.0 { (sum_a3 / sum_a).sqrt() } else { 0.0 };
    let k = if a_eq_m > 0.0 { sum_a / a_eq_m } else { 0.0 };

    EquivalentSpan { a_eq_m, k }
}

/// Check a canton against the CELESTE application domain.
///
/// # Arguments
///
/// * `a1` - Longest span of the canton (m)
/// * `a2` - Shortest span of the canton (m)
/// * `h_max` - Largest height difference of the canton (m)
///
/// # Returns
///
/// Domain violations as messages, empty when the canton is in domain.
pub fn validate_domain(a1: f64, a2: f64, h_max: f64) -> Vec<String> {
    let ratio = if a2 > 0.0 { a1 / a2 } else { 0.0 };
    let h_ratio = if a2 > 0.0 { h_max / a2 } else { 0.0 };

    let mut errors = Vec::new();
    if ratio < SPAN_RATIO_LIMIT {
        if h_ratio > REGULAR_HEIGHT_RATIO {
            errors.push(format!(
                "CELESTE domain not met: h_max/a2 = {:.2} > {} (for a1/a2 = {:.2} < {})",
                h_ratio, REGULAR_HEIGHT_RATIO, ratio, SPAN_RATIO_LIMIT
            ));
        }
    } else if h_ratio > IRREGULAR_HEIGHT_RATIO {
        errors.push(format!(
            "CELESTE domain not met: h_max/a2 = {:.2} > {} (for a1/a2 = {:.2} ≥ {})",
            h_ratio, IRREGULAR_HEIGHT_RATIO, ratio, SPAN_RATIO_LIMIT
        ));
    }
    errors
}

/// Result for one span of a canton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonSpanResult {
    /// Span label
    pub label: String,

    /// Span solver output
    pub result: SpanResult,
}

/// Results from a canton calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonResult {
    /// Canton label
    pub label: String,

    /// Ruling span of the canton
    pub equivalent_span: EquivalentSpan,

    /// CELESTE domain violations
    pub domain_errors: Vec<String>,

    /// Per-span results in line order
    pub spans: Vec<CantonSpanResult>,

    /// Largest tension found on any support (daN)
    pub max_tension_dan: f64,

    /// Label of the span carrying `max_tension_dan`
    pub governing_span: String,
}

impl CantonResult {
    /// True when the canton is in domain and every span passes
    pub fn passes(&self) -> bool {
        self.domain_errors.is_empty() && self.spans.iter().all(|s| s.result.passes())
    }

    /// Warnings and errors of every span, prefixed with the span label
    pub fn messages(&self) -> Vec<String> {
        let mut out = self.domain_errors.clone();
        for s in &self.spans {
            for m in s.result.errors.iter().chain(s.result.warnings.iter()) {
                out.push(format!("{}: {}", s.label, m));
            }
        }
        out
    }
}

/// Solve every span of a canton and check the application domain.
pub fn solve_canton(input: &CantonInput, config: &SolverConfig) -> CalcResult<CantonResult> {
    input.validate()?;

    let lengths: Vec<f64> = input.spans.iter().map(|s| s.span_length_m).collect();
    let equivalent = equivalent_span(&lengths);
    let domain_errors = validate_domain(
        input.longest_span(),
        input.shortest_span(),
        input.max_height_difference(),
    );

    let mut spans = Vec::with_capacity(input.spans.len());
    let mut max_tension_dan = 0.0;
    let mut governing_span = String::new();

    for s in &input.spans {
        let result = span::solve(&input.span_input(s), config)?;
        let peak = result.tensions.ta_dan.max(result.tensions.tb_dan);
        if peak > max_tension_dan {
            max_tension_dan = peak;
            governing_span = s.label.clone();
        }
        spans.push(CantonSpanResult {
            label: s.label.clone(),
            result,
        });
    }

    tracing::debug!(
        label = %input.label,
        spans = spans.len(),
        a_eq = equivalent.a_eq_m,
        domain_errors = domain_errors.len(),
        "canton solved"
    );

    Ok(CantonResult {
        label: input.label.clone(),
        equivalent_span: equivalent,
        domain_errors,
        spans,
        max_tension_dan,
        governing_span,
    })
}

/// Canton file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the file was created
    pub created: DateTime<Utc>,

    /// When the file was last modified
    pub modified: DateTime<Utc>,
}

/// A canton as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantonFile {
    /// File metadata
    pub meta: CantonMetadata,

    /// Canton definition
    pub canton: CantonInput,
}

impl CantonFile {
    /// Wrap a canton with fresh metadata.
    pub fn new(canton: CantonInput) -> Self {
        let now = Utc::now();
        CantonFile {
            meta: CantonMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            canton,
        }
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cables;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sample_canton() -> CantonInput {
        CantonInput {
            label: "Canton 12".to_string(),
            cable: cables::find("Aster 570").unwrap(),
            rho_m: 2000.0,
            wind_pressure_dapa: None,
            temperature_delta_c: None,
            spans: vec![
                CantonSpan::new("P1-P2", 400.0, 5.0),
                CantonSpan::new("P2-P3", 500.0, -12.0),
                CantonSpan::new("P3-P4", 450.0, 8.0),
                CantonSpan::new("P4-P5", 380.0, 0.0),
            ],
        }
    }

    #[test]
    fn test_equivalent_span_single() {
        let eq = equivalent_span(&[400.0]);
        assert_abs_diff_eq!(eq.a_eq_m, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eq.k, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_equivalent_span_multiple() {
        let spans = [400.0, 500.0, 450.0, 380.0];
        let eq = equivalent_span(&spans);

        let sum_a: f64 = spans.iter().sum();
        let sum_a3: f64 = spans.iter().map(|a: &f64| a.powi(3)).sum();
        let expected = (sum_a3 / sum_a).sqrt();
        assert_relative_eq!(eq.a_eq_m, expected, max_relative = 1e-12);
        assert_relative_eq!(eq.k, sum_a / expected, max_relative = 1e-12);
        // Ruling span sits between the mean and the longest span
        assert!(eq.a_eq_m > sum_a / 4.0 && eq.a_eq_m < 500.0);
    }

    #[test]
    fn test_equivalent_span_empty() {
        assert_eq!(equivalent_span(&[]), EquivalentSpan::default());
    }

    #[test]
    fn test_domain_valid() {
        // a1/a2 = 2 < 3, h_max/a2 = 0.5
        assert!(validate_domain(400.0, 200.0, 100.0).is_empty());
    }

    #[test]
    fn test_domain_regular_canton_too_steep() {
        // a1/a2 = 2 < 3, h_max/a2 = 0.9
        let errors = validate_domain(400.0, 200.0, 180.0);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("0.8"));
    }

    #[test]
    fn test_domain_irregular_canton_too_steep() {
        // a1/a2 = 3, h_max/a2 = 0.5
        let errors = validate_domain(600.0, 200.0, 100.0);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("0.4"));
    }

    #[test]
    fn test_solve_canton() {
        let input = sample_canton();
        let result = solve_canton(&input, &SolverConfig::default()).unwrap();

        assert_eq!(result.spans.len(), 4);
        assert!(result.passes());
        assert_eq!(result.governing_span, "P2-P3");
        assert_eq!(result.spans[1].result.tensions.tb_dan, result.max_tension_dan);
        assert!(result.equivalent_span.a_eq_m > 380.0);
    }

    #[test]
    fn test_canton_span_matches_single_span_solve() {
        let input = sample_canton();
        let canton = solve_canton(&input, &SolverConfig::default()).unwrap();
        let single = span::solve(&input.span_input(&input.spans[2]), &SolverConfig::default()).unwrap();
        assert_eq!(canton.spans[2].result, single);
    }

    #[test]
    fn test_canton_out_of_domain() {
        let mut input = sample_canton();
        input.spans.push(CantonSpan::new("P5-P6", 120.0, 60.0));
        let result = solve_canton(&input, &SolverConfig::default()).unwrap();
        assert!(!result.passes());
        assert!(result.messages()[0].contains("CELESTE domain"));
    }

    #[test]
    fn test_empty_canton_rejected() {
        let mut input = sample_canton();
        input.spans.clear();
        assert_eq!(
            solve_canton(&input, &SolverConfig::default()).unwrap_err(),
            CalcError::missing_field("spans")
        );
    }

    #[test]
    fn test_bad_span_reports_index() {
        let mut input = sample_canton();
        input.spans[1].span_length_m = -1.0;
        match input.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "spans[1].span_length_m"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_canton_file_metadata() {
        let mut file = CantonFile::new(sample_canton());
        assert_eq!(file.meta.version, SCHEMA_VERSION);
        let created = file.meta.created;
        file.touch();
        assert!(file.meta.modified >= created);
    }
}
