//! # celeste_core - Overhead Line Mechanics Engine
//!
//! `celeste_core` is the computational heart of CELESTE X: sag and tension of
//! overhead line conductors hung between pylons. All inputs and outputs are
//! JSON-serializable, so the same types serve the CLI, a web front end or an
//! LLM tool call.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types for rejected input, advisory
//!   strings for everything the engineer should see beside a result
//!
//! ## Quick Start
//!
//! ```rust
//! use celeste_core::api::handle_span_json;
//! use celeste_core::config::SolverConfig;
//!
//! let request = r#"{
//!     "span_length_m": 500.0,
//!     "delta_h_m": 10.0,
//!     "cable": { "name": "Aster 570" },
//!     "rho_m": 2000.0
//! }"#;
//!
//! let response = handle_span_json(request, &SolverConfig::default());
//! assert!(response.contains("\"success\":true"));
//! ```
//!
//! ## Modules
//!
//! - [`api`] - JSON request/response contract
//! - [`calculations`] - Span, canton and support calculations
//! - [`cables`] - Cable definitions, catalog, residual rupture load, emissivity
//! - [`loads`] - Wind loading and topographic skew
//! - [`config`] - Solver thresholds and tolerances
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON files with atomic saves

pub mod api;
pub mod cables;
pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use api::{handle_span_json, handle_span_request, SpanCalcRequest, SpanCalcResponse};
pub use cables::CableSpec;
pub use calculations::span::{solve, SpanInput, SpanResult};
pub use config::{RhoConvention, SolverConfig};
pub use errors::{CalcError, CalcResult};
