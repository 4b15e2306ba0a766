//! # Line Mechanics Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `solve*(input, config) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`span`] - Sag and tensions of one span
//! - [`canton`] - Run of spans between anchors, ruling span and domain check
//! - [`support`] - Cable pulls on supports
//!
//! [`catenary`] and [`root_finding`] are the numerical building blocks.

pub mod canton;
pub mod catenary;
pub mod root_finding;
pub mod span;
pub mod support;

use serde::{Deserialize, Serialize};

pub use canton::{solve_canton, CantonFile, CantonInput, CantonResult, CantonSpan};
pub use catenary::Catenary;
pub use span::{solve, SpanInput, SpanResult};
pub use support::{vhl_resultant, SpanReactions};

use crate::config::SolverConfig;
use crate::errors::CalcResult;

/// Enum wrapper for all calculation inputs.
///
/// Lets a batch file mix single spans and whole cantons while keeping clean,
/// tagged JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Single span
    Span(SpanInput),
    /// Section of line
    Canton(CantonInput),
}

/// Output matching a [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    /// Single span result
    Span(SpanResult),
    /// Section of line result
    Canton(CantonResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Span(s) => &s.label,
            CalculationItem::Canton(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Span(_) => "Span",
            CalculationItem::Canton(_) => "Canton",
        }
    }

    /// Run the calculation
    pub fn run(&self, config: &SolverConfig) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Span(s) => span::solve(s, config).map(CalculationOutput::Span),
            CalculationItem::Canton(c) => solve_canton(c, config).map(CalculationOutput::Canton),
        }
    }
}

impl CalculationOutput {
    /// True when no blocking condition was found
    pub fn passes(&self) -> bool {
        match self {
            CalculationOutput::Span(r) => r.passes(),
            CalculationOutput::Canton(r) => r.passes(),
        }
    }
}
