//! # CELESTE X CLI Application
//!
//! Command-line front end over the span solver's JSON contract.
//!
//! ```text
//! celeste_cli solve <request.json>    Solve one span, print the JSON response
//! celeste_cli canton <canton.json>    Solve a canton file, print the JSON result
//! celeste_cli cables                  List the built-in cable catalog
//! celeste_cli                         Interactive prompt
//!
//! Options:
//!   --config <path>   Solver configuration (otherwise $CELESTEX_CONFIG, then defaults)
//!   --output <path>   Write JSON to a file instead of stdout
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=celeste_core=debug` to follow the solver.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use celeste_core::api::{handle_span_request, CableRequest, SpanCalcRequest, SpanCalcResponse};
use celeste_core::calculations::canton::solve_canton;
use celeste_core::calculations::span::SpanResult;
use celeste_core::calculations::support::SpanReactions;
use celeste_core::config::SolverConfig;
use celeste_core::{cables, file_io, CalcError, CalcResult};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
enum Command {
    Solve(PathBuf),
    Canton(PathBuf),
    Cables,
    Interactive,
    Help,
}

#[derive(Debug, PartialEq)]
struct Options {
    command: Command,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut output = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--output" | "-o" => {
                i += 1;
                let path = args.get(i).ok_or("--output needs a path")?;
                output = Some(PathBuf::from(path));
            }
            "--help" | "-h" => positional.insert(0, "help".to_string()),
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let command = match positional.first().map(String::as_str) {
        None => Command::Interactive,
        Some("help") => Command::Help,
        Some("cables") => Command::Cables,
        Some("solve") => Command::Solve(PathBuf::from(
            positional.get(1).ok_or("solve needs a request file")?,
        )),
        Some("canton") => Command::Canton(PathBuf::from(
            positional.get(1).ok_or("canton needs a canton file")?,
        )),
        Some(other) => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Options {
        command,
        config_path,
        output,
    })
}

fn print_usage() {
    eprintln!("Usage: celeste_cli [solve <request.json> | canton <canton.json> | cables] [--config <path>] [--output <path>]");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> CalcResult<SolverConfig> {
    match path {
        Some(path) => SolverConfig::load(path),
        None => SolverConfig::from_env(),
    }
}

fn to_pretty<T: Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))
}

fn emit(json: &str, output: Option<&Path>) -> CalcResult<()> {
    match output {
        Some(path) => {
            file_io::write_atomic(path, json.as_bytes())?;
            eprintln!("Saved {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run_solve(path: &Path, config: &SolverConfig) -> CalcResult<SpanCalcResponse> {
    let request: SpanCalcRequest = file_io::load_json(path)?;
    Ok(handle_span_request(&request, config))
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_string(prompt, "").parse().unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn optional(value: f64) -> Option<f64> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}

fn run_interactive(config: &SolverConfig) -> SpanCalcResponse {
    println!("CELESTE X - Overhead Line Span Calculator");
    println!("=========================================");
    println!();

    let span_length_m = prompt_f64("Span length (m) [500.0]: ", 500.0);
    let delta_h_m = prompt_f64("Height difference (m) [10.0]: ", 10.0);
    let cable = prompt_string("Cable [Aster 570]: ", "Aster 570");
    let rho_m = prompt_f64("Catenary parameter ρ (m) [2000.0]: ", 2000.0);
    let wind = prompt_f64("Wind pressure (daPa) [0]: ", 0.0);
    let angle = prompt_f64("Topographic angle (grades) [0]: ", 0.0);

    let request = SpanCalcRequest {
        label: "CLI".to_string(),
        span_length_m,
        delta_h_m,
        cable: CableRequest::named(cable),
        rho_m,
        wind_pressure_dapa: optional(wind),
        angle_topo_grade: optional(angle),
        temperature_delta_c: None,
    };

    println!();
    let response = handle_span_request(&request, config);
    match (&response.result, &response.error) {
        (Some(result), _) => print_report(&request, result),
        (None, Some(e)) => eprintln!("Error: {}", e),
        (None, None) => {}
    }
    response
}

fn print_report(request: &SpanCalcRequest, result: &SpanResult) {
    let g = &result.geometry;
    let t = &result.tensions;
    let reactions = SpanReactions::from_span(result);

    println!("═══════════════════════════════════════");
    println!("  SPAN CALCULATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Span:     {:.1} m (Δh = {:.1} m)", request.span_length_m, request.delta_h_m);
    println!("  Cable:    {}", request.cable.name.as_deref().unwrap_or("custom"));
    println!("  ρ:        {:.0} m (c = {:.1} m)", request.rho_m, result.solution.parameter_m);
    println!("  w:        {:.3} daN/m", result.solution.unit_load_dan_per_m);
    println!();
    println!("Geometry:");
    println!("  b  = {:.2} m", g.b_m);
    println!("  F1 = {:.2} m", g.f1_m);
    println!("  F2 = {:.2} m", g.f2_m);
    println!("  H  = {:.2} m", g.h_m);
    println!();
    println!("Tensions:");
    println!("  T0 = {:.0} daN", t.t0_dan);
    println!("  TA = {:.0} daN (vertical {:.0} daN)", t.ta_dan, reactions.lower.vertical_dan);
    println!("  TB = {:.0} daN (vertical {:.0} daN)", t.tb_dan, reactions.higher.vertical_dan);
    println!(
        "  Rupture ratio: {:.1} % {}",
        t.rupture_ratio * 100.0,
        status_icon(t.rupture_ratio <= 1.0)
    );

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &result.warnings {
            println!("  [WARN] {}", w);
        }
    }
    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        for e in &result.errors {
            println!("  [FAIL] {}", e);
        }
    }

    println!();
    println!("═══════════════════════════════════════");
    println!("  RESULT: {}", if result.passes() { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════");
    println!();
}

fn print_cables() {
    println!("{:<16} {:<11} {:>9} {:>9} {:>8} {:>11}", "Name", "Kind", "kg/m", "mm²", "Ø mm", "Rupture daN");
    for cable in cables::catalog() {
        println!(
            "{:<16} {:<11} {:>9.3} {:>9.1} {:>8.1} {:>11.0}",
            cable.name,
            cable.kind.display_name(),
            cable.mass_lin_kg_per_m,
            cable.section_mm2,
            cable.diameter_mm,
            cable.rupture_dan
        );
    }
}

fn run(options: &Options) -> CalcResult<bool> {
    let config = load_config(options.config_path.as_deref())?;
    tracing::debug!(convention = config.rho_convention.display_name(), "configuration loaded");
    let output = options.output.as_deref();

    match &options.command {
        Command::Help => {
            print_usage();
            Ok(true)
        }
        Command::Cables => {
            print_cables();
            Ok(true)
        }
        Command::Solve(path) => {
            let response = run_solve(path, &config)?;
            emit(&to_pretty(&response)?, output)?;
            Ok(response.success)
        }
        Command::Canton(path) => {
            let file = file_io::load_canton(path)?;
            let result = solve_canton(&file.canton, &config)?;
            emit(&to_pretty(&result)?, output)?;
            Ok(result.passes())
        }
        Command::Interactive => {
            let response = run_interactive(&config);
            println!("JSON Output:");
            emit(&to_pretty(&response)?, output)?;
            Ok(response.success)
        }
    }
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_usage();
            std::process::exit(2);
        }
    };

    match run(&options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
