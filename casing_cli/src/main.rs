//! # Casing Design CLI
//!
//! Loads a casing program (`.csg` JSON), stages its sections, runs the
//! design calculation and prints burst, collapse and tension design factors.
//! Without a program path it runs the built-in three-string demo well.
//!
//! ```text
//! casing_cli well-7.csg --settings casing.toml --json --output well-7-design.json
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=casing_core=debug` to trace staging.

use std::path::PathBuf;
use std::process::ExitCode;

use casing_core::program::CasingProgram;
use casing_core::{
    load_program, save_design, save_program, BuildMethod, CalcError, CalcResult, CalcSettings,
    CasingDesign,
};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "casing_cli")]
#[command(about = "Casing string design verification - burst, collapse and tension")]
#[command(version)]
struct CliArgs {
    /// Casing program file (.csg); runs the demo well when omitted
    program: Option<PathBuf>,

    /// TOML file with calculation settings (pore gradient, buoyancy density)
    #[arg(long, env = "CASING_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Override the program's build method
    #[arg(long, value_enum)]
    method: Option<MethodArg>,

    /// Print the label-keyed results table as JSON
    #[arg(long)]
    json: bool,

    /// Save the results table as JSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the demo program to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_example: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    TopDown,
    BottomUp,
}

impl From<MethodArg> for BuildMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::TopDown => BuildMethod::TopDown,
            MethodArg::BottomUp => BuildMethod::BottomUp,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), "{}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> CalcResult<()> {
    if let Some(path) = &args.write_example {
        save_program(&CasingProgram::example(), path)?;
        info!(path = %path.display(), "wrote demo casing program");
        return Ok(());
    }

    let mut program = match &args.program {
        Some(path) => load_program(path)?,
        None => {
            info!("no program given, running demo well");
            CasingProgram::example()
        }
    };

    if let Some(path) = &args.settings {
        program.settings = CalcSettings::load_from_file(path)?;
    }
    if let Some(method) = args.method {
        program.method = method.into();
    }

    let well = program.build_well()?;
    info!(
        well = %program.meta.well_name,
        method = %well.method(),
        sections = well.sections().len(),
        complete = well.is_complete(),
        "casing program staged"
    );

    let design = well.calculate()?;

    print_summary(&program, &design);

    if args.json {
        let json = serde_json::to_string_pretty(&design).map_err(|e| CalcError::serialization(e.to_string()))?;
        println!();
        println!("{}", json);
    }

    if let Some(path) = &args.output {
        save_design(&design, path)?;
        info!(path = %path.display(), "saved design report");
    }

    Ok(())
}

fn print_summary(program: &CasingProgram, design: &CasingDesign) {
    let well = design.well();
    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  CASING DESIGN: {}", program.meta.well_name);
    println!("═══════════════════════════════════════════════════════════════════════");
    println!(
        "  MD {:.0} ft | TVD {:.0} ft | TOL {:.0} ft | FG {:.3} psi/ft | {}",
        well.max_md_depth,
        well.max_tvd_depth,
        well.tol,
        well.frac_gradient,
        design.method()
    );
    if !design.is_complete() {
        println!("  WARNING: sections do not span the full well");
    }
    println!();
    println!(
        "  {:<14} {:>7} {:>7} {:>7} {:>8} {:>8} {:>8} {:>8}",
        "String", "Top", "Bottom", "TOC", "MAPS", "Burst", "Collapse", "Tension"
    );
    println!("  {}", "─".repeat(69));
    for (label, section) in design.iter() {
        println!(
            "  {:<14} {:>7.0} {:>7.0} {:>7.0} {:>8.0} {:>8} {:>8} {:>8}",
            label,
            section.top,
            section.bottom(),
            section.mechanics.toc,
            section.burst.maps,
            format_df(section.burst.burst_df),
            format_df(section.mechanics.collapse_df),
            format_df(section.mechanics.tension_df),
        );
    }
    println!();
    match design.governing() {
        Some(check) => println!(
            "  GOVERNING: {} {} DF = {:.2}",
            check.label, check.kind, check.design_factor
        ),
        None => println!("  GOVERNING: none (all checks unconstrained)"),
    }
    println!("═══════════════════════════════════════════════════════════════════════");
}

fn format_df(df: f64) -> String {
    if df.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.2}", df)
    }
}
