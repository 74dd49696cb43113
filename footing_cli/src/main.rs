//! # Footing CLI
//!
//! Runs the demo pad and combined footings, or every footing in a saved
//! `.ftg` project:
//!
//! ```text
//! footing_cli                  # demo footings
//! footing_cli project.ftg      # every item in the project
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `footing_core=info`).

use std::path::Path;
use std::process::ExitCode;

use footing_core::calculations::combined_footing::{self, CombinedFootingInput};
use footing_core::calculations::pad_footing::{self, PadFootingInput};
use footing_core::calculations::report::{ColumnInput, SelfWeightInput};
use footing_core::calculations::{CalculationResult, FootingReport};
use footing_core::geometry::Axis;
use footing_core::loads::{ColumnLoads, LimitStateFactors, LoadEffect, LoadVector};
use footing_core::materials::DesignParameters;
use footing_core::{load_project, CalcError, CalcResult};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("footing_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn demo_pad() -> PadFootingInput {
    let loads = ColumnLoads::default()
        .with_load(LoadEffect::Axial, LoadVector::new(770.0, 330.0, 0.0))
        .with_load(LoadEffect::HorizontalX, LoadVector::new(35.0, 15.0, 0.0))
        .with_load(LoadEffect::MomentX, LoadVector::new(78.0, 34.0, 0.0));
    PadFootingInput {
        label: "Demo pad F-1".to_string(),
        length_mm: 3600.0,
        width_mm: 3000.0,
        column: ColumnInput {
            length_mm: 450.0,
            width_mm: 450.0,
            x_mm: 1800.0,
            y_mm: 1500.0,
            loads,
        },
        self_weight: SelfWeightInput {
            thickness_mm: 550.0,
            soil_depth_mm: 0.0,
            soil_unit_weight: 18.0,
            concrete_unit_weight: 24.0,
            consider_self_weight: true,
        },
        bearing_capacity: 150.0,
        factors: LimitStateFactors::default(),
        design: DesignParameters {
            fck: 30.0,
            fyk: 500.0,
            ..DesignParameters::default()
        },
    }
}

fn demo_combined() -> CombinedFootingInput {
    let axial = |permanent, imposed| {
        ColumnLoads::default().with_load(LoadEffect::Axial, LoadVector::new(permanent, imposed, 0.0))
    };
    CombinedFootingInput {
        label: "Demo combined CF-1".to_string(),
        length_mm: 4600.0,
        width_mm: 2300.0,
        column_spacing_mm: 3000.0,
        columns: [
            ColumnInput {
                length_mm: 300.0,
                width_mm: 300.0,
                x_mm: 540.0,
                y_mm: 1145.0,
                loads: axial(1000.0, 200.0),
            },
            ColumnInput {
                length_mm: 400.0,
                width_mm: 400.0,
                x_mm: 3540.0,
                y_mm: 1145.0,
                loads: axial(1400.0, 300.0),
            },
        ],
        self_weight: SelfWeightInput {
            thickness_mm: 850.0,
            soil_depth_mm: 0.0,
            soil_unit_weight: 18.0,
            concrete_unit_weight: 24.0,
            consider_self_weight: false,
        },
        bearing_capacity: 300.0,
        factors: LimitStateFactors::default(),
        design: DesignParameters::default(),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn print_report(label: &str, report: &FootingReport) {
    println!("═══════════════════════════════════════");
    println!("  {}", label);
    println!("═══════════════════════════════════════");
    println!();
    for combination in &report.combinations {
        println!("{}: {}", combination.name, combination.equation);
    }
    println!("Self-weight: concrete {:.3} kN/m², soil {:.3} kN/m²", report.foundation_loads[0], report.foundation_loads[1]);
    for state in [&report.sls, &report.uls] {
        let q = state.pressures.as_array();
        println!(
            "{}: Fz = {:.3} kN, ex = {} mm, ey = {} mm, q = [{:.3}, {:.3}, {:.3}, {:.3}] kN/m²",
            state.limit_state, state.force_z, state.eccentricity_x, state.eccentricity_y, q[0], q[1], q[2], q[3]
        );
    }
    println!();

    for axis in [Axis::X, Axis::Y] {
        let design = report.design.axis(axis);
        print!(
            "{}: M = {:.3} kN·m, V = {:.3} kN, bottom {}",
            axis,
            design.demand.sagging_moment,
            design.demand.design_shear,
            design.bottom.provision.bar_mark()
        );
        match &design.top {
            Some(top) => println!(", top {} (hogging {:.3} kN·m)", top.provision.bar_mark(), design.demand.hogging_moment),
            None => println!(),
        }
    }
    println!();

    println!("Checks:");
    for verdict in report.verdicts() {
        println!("  {:<7} {}", status_icon(verdict.passes), verdict);
    }
    for column in &report.design.punching {
        let skipped = [&column.one_depth, &column.two_depths].iter().filter(|c| c.is_none()).count();
        if skipped > 0 {
            println!("  [N/A]   Column {}: {} punching perimeter(s) lie inside the column", column.column + 1, skipped);
        }
    }
    if report.needs_compression_steel() {
        println!("  [WARN]  Compression reinforcement required");
    }
    println!();
    println!("  RESULT: {}", report.status());
    println!();
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!("JSON Output:");
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Could not serialize result: {}", e),
    }
    println!();
}

fn print_error(label: &str, error: &CalcError) {
    eprintln!("{}: {}", label, error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn run_result(label: &str, result: CalcResult<CalculationResult>) -> bool {
    match result {
        Ok(result) => {
            print_report(label, result.report());
            print_json(&result);
            result.passes()
        }
        Err(e) => {
            print_error(label, &e);
            false
        }
    }
}

fn run_demo() -> bool {
    println!("Footing design demo");
    println!();

    let pad = demo_pad();
    let pad_ok = run_result(&pad.label, pad_footing::calculate(&pad).map(CalculationResult::PadFooting));

    let combined = demo_combined();
    let combined_ok = run_result(
        &combined.label,
        combined_footing::calculate(&combined).map(CalculationResult::CombinedFooting),
    );
    pad_ok && combined_ok
}

fn run_project(path: &Path) -> bool {
    tracing::info!(path = %path.display(), "loading project");
    let project = match load_project(path) {
        Ok(project) => project,
        Err(e) => {
            print_error(&path.display().to_string(), &e);
            return false;
        }
    };
    println!(
        "Project {} for {} ({} footings, engineer {})",
        project.meta.job_id,
        project.meta.client,
        project.item_count(),
        project.meta.engineer
    );
    println!();

    let mut all_ok = true;
    for (id, result) in project.calculate_all() {
        let label = project.get_item(&id).map(|item| item.label().to_string()).unwrap_or_else(|| id.to_string());
        all_ok &= run_result(&label, result);
    }
    all_ok
}

fn main() -> ExitCode {
    init_logging();

    let ok = match std::env::args().nth(1) {
        Some(path) => run_project(Path::new(&path)),
        None => run_demo(),
    };
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
