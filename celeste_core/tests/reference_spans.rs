//! End-to-end span and canton scenarios through the public API.

use approx::assert_relative_eq;
use celeste_core::api::{handle_span_json, CableRequest, SpanCalcRequest};
use celeste_core::cables;
use celeste_core::calculations::canton::{solve_canton, CantonFile, CantonInput, CantonSpan};
use celeste_core::file_io::{load_canton, save_canton};
use celeste_core::{handle_span_request, solve, RhoConvention, SolverConfig, SpanInput};
use serde_json::Value;

fn aster(span: f64, dh: f64, rho: f64) -> SpanInput {
    SpanInput::new(span, dh, cables::find("Aster 570").unwrap(), rho)
}

#[test]
fn tension_ordering_holds_across_spans() {
    let config = SolverConfig::default();
    for &span in &[100.0, 350.0, 600.0, 1200.0] {
        for &dh in &[-150.0, -20.0, 0.0, 35.0, 150.0] {
            for &rho in &[800.0, 2000.0, 4000.0] {
                for wind in [None, Some(20.0)] {
                    let mut input = aster(span, dh, rho);
                    input.wind_pressure_dapa = wind;
                    let r = solve(&input, &config).unwrap();
                    let t = r.tensions;
                    assert!(t.t0_dan > 0.0);
                    assert!(t.ta_dan >= t.t0_dan, "TA < T0 for L={} dh={} rho={}", span, dh, rho);
                    assert!(t.tb_dan >= t.ta_dan, "TB < TA for L={} dh={} rho={}", span, dh, rho);
                    assert_eq!(r.geometry.b_m, (span * span + dh * dh).sqrt());
                }
            }
        }
    }
}

#[test]
fn sags_decrease_as_rho_grows() {
    let config = SolverConfig::default();
    let mut previous: Option<(f64, f64)> = None;
    for rho in (1000..=5000).step_by(250) {
        let r = solve(&aster(500.0, 10.0, rho as f64), &config).unwrap();
        if let Some((f1, f2)) = previous {
            assert!(r.geometry.f1_m < f1);
            assert!(r.geometry.f2_m < f2);
        }
        previous = Some((r.geometry.f1_m, r.geometry.f2_m));
    }
}

#[test]
fn solve_is_deterministic() {
    let input = aster(500.0, 10.0, 2000.0).with_wind(30.0).with_temperature_delta(-10.0);
    let config = SolverConfig::default();
    let first = solve(&input, &config).unwrap();
    let second = solve(&input, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn conventions_agree_in_still_air() {
    let input = aster(450.0, -25.0, 1800.0);
    let reference = solve(&input, &SolverConfig::default()).unwrap();
    let loaded = solve(
        &input,
        &SolverConfig {
            rho_convention: RhoConvention::Loaded,
            ..SolverConfig::default()
        },
    )
    .unwrap();
    assert_eq!(reference.geometry, loaded.geometry);
    assert_eq!(reference.tensions, loaded.tensions);
}

#[test]
fn change_of_state_conserves_unstressed_length() {
    let input = aster(500.0, 10.0, 2000.0).with_wind(36.0);
    let cable = input.cable.clone();
    let r = solve(&input, &SolverConfig::default()).unwrap();

    let ea = cable.axial_stiffness().0;
    let w_v = cable.linear_weight().0;
    let reference = solve(&aster(500.0, 10.0, 2000.0), &SolverConfig::default()).unwrap();

    let unstressed_ref = reference.geometry.arc_length_m / (1.0 + 2000.0 * w_v / ea);
    let unstressed_windy = r.geometry.arc_length_m / (1.0 + r.tensions.t0_dan / ea);
    assert_relative_eq!(unstressed_ref, unstressed_windy, max_relative = 1e-7);
}

#[test]
fn json_contract_reference_case() {
    let request = serde_json::json!({
        "span_length_m": 500,
        "delta_h_m": 10,
        "cable": {
            "name": "Aster 570",
            "mass_lin_kg_per_m": 1.631,
            "E_MPa": 78000,
            "section_mm2": 564.6,
            "alpha_1e6_per_C": 19.1,
            "rupture_dan": 17200,
            "diameter_mm": 31.5
        },
        "rho_m": 2000
    });
    let out = handle_span_json(&request.to_string(), &SolverConfig::default());
    let response: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(response["success"], true);
    let t0 = response["result"]["tensions"]["T0_dan"].as_f64().unwrap();
    assert_relative_eq!(t0, 3200.0, max_relative = 1e-4);
    assert!(response["result"]["warnings"].as_array().unwrap().len() <= 1);
}

#[test]
fn wind_raises_tension_through_the_api() {
    let mut request = SpanCalcRequest {
        label: String::new(),
        span_length_m: 500.0,
        delta_h_m: 10.0,
        cable: CableRequest::named("Aster 570"),
        rho_m: 2000.0,
        wind_pressure_dapa: None,
        angle_topo_grade: None,
        temperature_delta_c: None,
    };
    let config = SolverConfig::default();
    let still = handle_span_request(&request, &config).result.unwrap();
    request.wind_pressure_dapa = Some(20.0);
    let windy = handle_span_request(&request, &config).result.unwrap();
    assert!(windy.tensions.t0_dan > still.tensions.t0_dan);
}

#[test]
fn canton_file_round_trip_and_solve() {
    let input = CantonInput {
        label: "Canton 3".to_string(),
        cable: cables::find("Pétunia 612").unwrap(),
        rho_m: 2200.0,
        wind_pressure_dapa: Some(18.0),
        temperature_delta_c: Some(15.0),
        spans: vec![
            CantonSpan::new("P10-P11", 380.0, 4.0),
            CantonSpan::new("P11-P12", 420.0, -9.0),
            CantonSpan::new("P12-P13", 510.0, 22.0),
        ],
    };
    let path = std::env::temp_dir().join(format!("celeste_canton_{}.json", std::process::id()));
    save_canton(&CantonFile::new(input.clone()), &path).unwrap();
    let loaded = load_canton(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.canton, input);
    let result = solve_canton(&loaded.canton, &SolverConfig::default()).unwrap();
    assert!(result.passes(), "unexpected messages: {:?}", result.messages());
    assert_eq!(result.governing_span, "P12-P13");
    assert!(result.spans.iter().all(|s| s.result.solution.refined));
}
