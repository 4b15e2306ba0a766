//! # JSON Request/Response Contract
//!
//! The span solver as seen by a front end: one JSON request in, one JSON
//! response out.
//!
//! ## Request
//!
//! ```json
//! {
//!   "span_length_m": 500.0,
//!   "delta_h_m": 10.0,
//!   "cable": { "name": "Aster 570" },
//!   "rho_m": 2000.0,
//!   "wind_pressure_daPa": 20.0,
//!   "angle_topo_grade": 4.0
//! }
//! ```
//!
//! The cable is either complete, or just the `name` of a catalog entry; any
//! field given beside a catalog name overrides the catalog value.
//!
//! ## Response
//!
//! ```json
//! { "success": true, "result": { "geometry": { ... }, "tensions": { ... },
//!                                "warnings": [], "errors": [] } }
//! ```
//!
//! `success: false` carries the structured [`CalcError`] and means the
//! request was rejected before any computation.

use serde::{Deserialize, Serialize};

use crate::cables::{self, CableKind, CableSpec};
use crate::calculations::span::{self, SpanInput, SpanResult};
use crate::config::SolverConfig;
use crate::errors::{CalcError, CalcResult};

/// Cable as sent by a client: complete, or a catalog name plus overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CableKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_lin_kg_per_m: Option<f64>,

    #[serde(rename = "E_MPa", default, skip_serializing_if = "Option::is_none")]
    pub e_mpa: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_mm2: Option<f64>,

    #[serde(rename = "alpha_1e6_per_C", default, skip_serializing_if = "Option::is_none")]
    pub alpha_1e6_per_c: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rupture_dan: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admissible_dan: Option<f64>,
}

impl CableRequest {
    /// Request for a catalog cable by name.
    pub fn named(name: impl Into<String>) -> Self {
        CableRequest {
            name: Some(name.into()),
            ..CableRequest::default()
        }
    }

    fn has_properties(&self) -> bool {
        self.mass_lin_kg_per_m.is_some()
            || self.e_mpa.is_some()
            || self.section_mm2.is_some()
            || self.alpha_1e6_per_c.is_some()
            || self.rupture_dan.is_some()
            || self.diameter_mm.is_some()
    }

    /// Resolve into a full cable definition.
    ///
    /// A name found in the catalog supplies every value not given here. An
    /// unknown name with no properties is `CableNotFound`; otherwise each
    /// missing property is a `MissingField` named `cable.<field>`.
    pub fn resolve(&self) -> CalcResult<CableSpec> {
        let base = match &self.name {
            Some(name) => match cables::find(name) {
                Ok(spec) => Some(spec),
                Err(e) if !self.has_properties() => return Err(e),
                Err(_) => None,
            },
            None => None,
        };

        let spec = match base {
            Some(catalog) => CableSpec {
                name: catalog.name,
                kind: self.kind.unwrap_or(catalog.kind),
                mass_lin_kg_per_m: self.mass_lin_kg_per_m.unwrap_or(catalog.mass_lin_kg_per_m),
                e_mpa: self.e_mpa.unwrap_or(catalog.e_mpa),
                section_mm2: self.section_mm2.unwrap_or(catalog.section_mm2),
                alpha_1e6_per_c: self.alpha_1e6_per_c.unwrap_or(catalog.alpha_1e6_per_c),
                rupture_dan: self.rupture_dan.unwrap_or(catalog.rupture_dan),
                diameter_mm: self.diameter_mm.unwrap_or(catalog.diameter_mm),
                admissible_dan: self.admissible_dan.or(catalog.admissible_dan),
            },
            None => CableSpec {
                name: self
                    .name
                    .clone()
                    .ok_or_else(|| CalcError::missing_field("cable.name"))?,
                kind: self.kind.unwrap_or_default(),
                mass_lin_kg_per_m: required(self.mass_lin_kg_per_m, "mass_lin_kg_per_m")?,
                e_mpa: required(self.e_mpa, "E_MPa")?,
                section_mm2: required(self.section_mm2, "section_mm2")?,
                alpha_1e6_per_c: required(self.alpha_1e6_per_c, "alpha_1e6_per_C")?,
                rupture_dan: required(self.rupture_dan, "rupture_dan")?,
                diameter_mm: required(self.diameter_mm, "diameter_mm")?,
                admissible_dan: self.admissible_dan,
            },
        };

        spec.validate()?;
        Ok(spec)
    }
}

fn required(value: Option<f64>, field: &str) -> CalcResult<f64> {
    value.ok_or_else(|| CalcError::missing_field(format!("cable.{}", field)))
}

/// Span calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanCalcRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    pub span_length_m: f64,

    pub delta_h_m: f64,

    pub cable: CableRequest,

    pub rho_m: f64,

    #[serde(rename = "wind_pressure_daPa", default, skip_serializing_if = "Option::is_none")]
    pub wind_pressure_dapa: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_topo_grade: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_delta_c: Option<f64>,
}

impl SpanCalcRequest {
    /// Resolve the cable and build the solver input.
    pub fn to_input(&self) -> CalcResult<SpanInput> {
        Ok(SpanInput {
            label: self.label.clone(),
            span_length_m: self.span_length_m,
            delta_h_m: self.delta_h_m,
            cable: self.cable.resolve()?,
            rho_m: self.rho_m,
            wind_pressure_dapa: self.wind_pressure_dapa,
            angle_topo_grade: self.angle_topo_grade,
            temperature_delta_c: self.temperature_delta_c,
        })
    }
}

/// Span calculation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanCalcResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SpanResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CalcError>,
}

impl SpanCalcResponse {
    /// Successful computation, possibly carrying errors in the result
    pub fn computed(result: SpanResult) -> Self {
        SpanCalcResponse {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Request rejected before computation
    pub fn rejected(error: CalcError) -> Self {
        SpanCalcResponse {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Answer a decoded request.
pub fn handle_span_request(request: &SpanCalcRequest, config: &SolverConfig) -> SpanCalcResponse {
    let outcome = request
        .to_input()
        .and_then(|input| span::solve(&input, config));

    match outcome {
        Ok(result) if config.round_output => SpanCalcResponse::computed(result.rounded()),
        Ok(result) => SpanCalcResponse::computed(result),
        Err(e) => {
            tracing::debug!(code = e.error_code(), error = %e, "span request rejected");
            SpanCalcResponse::rejected(e)
        }
    }
}

/// Answer a raw JSON request with a JSON response.
pub fn handle_span_json(request_json: &str, config: &SolverConfig) -> String {
    let response = match serde_json::from_str::<SpanCalcRequest>(request_json) {
        Ok(request) => handle_span_request(&request, config),
        Err(e) => SpanCalcResponse::rejected(CalcError::serialization(format!("Invalid request: {}", e))),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "response serialization failed");
        format!(
            r#"{{"success":false,"error":{{"type":"SerializationError","details":{{"reason":{:?}}}}}}}"#,
            e.to_string()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn reference_request() -> Value {
        json!({
            "span_length_m": 500.0,
            "delta_h_m": 10.0,
            "cable": {
                "name": "Aster 570",
                "mass_lin_kg_per_m": 1.631,
                "E_MPa": 78000,
                "section_mm2": 564.6,
                "alpha_1e6_per_C": 19.1,
                "rupture_dan": 17200,
                "diameter_mm": 31.5
            },
            "rho_m": 2000.0
        })
    }

    fn respond(request: &Value) -> Value {
        let out = handle_span_json(&request.to_string(), &SolverConfig::default());
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_reference_request() {
        let response = respond(&reference_request());
        assert_eq!(response["success"], true);

        let result = &response["result"];
        for key in ["b_m", "F1_m", "F2_m", "H_m"] {
            assert!(result["geometry"][key].is_f64(), "missing geometry.{}", key);
        }
        for key in ["T0_dan", "TA_dan", "TB_dan"] {
            assert!(result["tensions"][key].is_f64(), "missing tensions.{}", key);
        }
        assert_eq!(result["errors"], json!([]));
        assert!(response.get("error").is_none());
    }

    #[test]
    fn test_catalog_name_only() {
        let mut request = reference_request();
        request["cable"] = json!({ "name": "aster 570" });
        let by_name = respond(&request);
        let full = respond(&reference_request());
        assert_eq!(by_name["result"], full["result"]);
    }

    #[test]
    fn test_catalog_override() {
        let cable = CableRequest {
            rupture_dan: Some(9000.0),
            ..CableRequest::named("Aster 570")
        };
        let spec = cable.resolve().unwrap();
        assert_eq!(spec.rupture_dan, 9000.0);
        assert_eq!(spec.mass_lin_kg_per_m, 1.631);
    }

    #[test]
    fn test_unknown_cable_name() {
        assert_eq!(
            CableRequest::named("Mystery 1").resolve().unwrap_err(),
            CalcError::cable_not_found("Mystery 1")
        );
    }

    #[test]
    fn test_partial_custom_cable() {
        let mut request = reference_request();
        request["cable"] = json!({ "name": "Custom", "mass_lin_kg_per_m": 1.2, "E_MPa": 60000 });
        let response = respond(&request);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["type"], "MissingField");
        assert_eq!(response["error"]["details"]["field"], "cable.section_mm2");
    }

    #[test]
    fn test_invalid_span_rejected() {
        let mut request = reference_request();
        request["span_length_m"] = json!(0.0);
        let response = respond(&request);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["type"], "InvalidInput");
        assert!(response.get("result").is_none());
    }

    #[test]
    fn test_malformed_json() {
        let out = handle_span_json("{ not json", &SolverConfig::default());
        let response: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["type"], "SerializationError");
    }

    #[test]
    fn test_overload_is_success_with_errors() {
        let mut request = reference_request();
        request["rho_m"] = json!(11000.0);
        let response = respond(&request);
        assert_eq!(response["success"], true);
        assert!(!response["result"]["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_rounded_output() {
        let config = SolverConfig {
            round_output: true,
            ..SolverConfig::default()
        };
        let out = handle_span_json(&reference_request().to_string(), &config);
        let response: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["result"]["tensions"]["T0_dan"], 3200.0);
    }
}
