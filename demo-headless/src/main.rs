use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vlm_core::core_types::{Degrees, KgPerCubicMeter, MetersPerSecond};
use vlm_core::geometry::{Plane, PlaneDefinition};
use vlm_core::solver::{FlowConditions, SolverConfig, TracingObserver, Vlm};

/// Solver selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverKind {
    /// Steady horseshoe lattice
    LiftingLine,
    /// Ring lattice with free-wake time marching
    LiftingSurface,
}

/// Vortex lattice demo with configurable wing and flow parameters
#[derive(Parser, Debug)]
#[command(name = "vlm-demo")]
#[command(about = "Vortex lattice aerodynamics demo", long_about = None)]
struct Args {
    /// Plane definition JSON (`{ "plane": { "S_ref", "b_ref", "c_ref", "wing": [...] } }`)
    #[arg(short, long)]
    plane: Option<PathBuf>,

    /// Full span of the generated rectangular wing (ignored with --plane)
    #[arg(long, default_value_t = 10.0)]
    span: f64,

    /// Chord of the generated rectangular wing (ignored with --plane)
    #[arg(long, default_value_t = 1.0)]
    chord: f64,

    /// Chordwise panels of the generated wing
    #[arg(short = 'n', long, default_value_t = 1)]
    chordwise: usize,

    /// Spanwise panels of the generated half wing
    #[arg(short = 'm', long, default_value_t = 10)]
    spanwise: usize,

    /// Freestream speed in m/s
    #[arg(short = 'q', long, default_value_t = 30.0)]
    speed: f64,

    /// Angle of attack in degrees
    #[arg(short, long, default_value_t = 10.0)]
    alpha: f64,

    /// Sideslip angle in degrees
    #[arg(short, long, default_value_t = 0.0)]
    beta: f64,

    /// Air density in kg/m³
    #[arg(short = 'r', long, default_value_t = 1.225)]
    density: f64,

    /// Solver to run
    #[arg(short, long, value_enum, default_value_t = SolverKind::LiftingLine)]
    solver: SolverKind,

    /// Wake iterations for the lifting-surface solver
    #[arg(short = 'k', long, default_value_t = 10)]
    wake_iterations: usize,

    /// Model both halves explicitly instead of using the y = 0 mirror image
    #[arg(long)]
    no_symmetry: bool,

    /// Print the per-panel table
    #[arg(long)]
    panels: bool,
}

/// Top-level layout of a plane definition file
#[derive(Debug, Deserialize)]
struct PlaneFile {
    plane: PlaneDefinition,
}

fn load_plane(path: &Path) -> Result<PlaneDefinition, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let file: PlaneFile = serde_json::from_str(&contents)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(file.plane)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== Vortex Lattice Demo ===\n");

    let definition = if let Some(path) = &args.plane {
        println!("Loading plane from {}", path.display());
        load_plane(path)?
    } else if args.no_symmetry {
        PlaneDefinition::rectangular_full(args.span, args.chord, args.chordwise, 2 * args.spanwise)
    } else {
        PlaneDefinition::rectangular_half(0.5 * args.span, args.chord, args.chordwise, args.spanwise)
    };

    let plane = Plane::from_definition(&definition)?;
    let reference = *plane.reference();
    println!(
        "Plane: {} wings, {} panels, S_ref={:.3}, b_ref={:.3}, c_ref={:.3}",
        plane.wings().len(),
        plane.panel_count(),
        reference.area,
        reference.span,
        reference.chord
    );

    let config = if args.no_symmetry {
        SolverConfig::full_span()
    } else {
        SolverConfig::default()
    };

    let conditions = FlowConditions {
        freestream_speed: MetersPerSecond::new(args.speed),
        alpha: Degrees::new(args.alpha),
        beta: Degrees::new(args.beta),
        density: KgPerCubicMeter::new(args.density),
    };
    println!(
        "Flow: Q={}, alpha={}, beta={}, rho={}\n",
        conditions.freestream_speed, conditions.alpha, conditions.beta, conditions.density
    );

    let mut vlm = Vlm::new(plane, config)?.with_observer(TracingObserver);

    let start = Instant::now();
    let coefficients = match args.solver {
        SolverKind::LiftingLine => vlm.run_lifting_line(&conditions)?,
        SolverKind::LiftingSurface => {
            let summary = vlm.run_lifting_surface(&conditions, args.wake_iterations)?;
            println!("{:>5} {:>10} {:>11}", "k", "CL", "CDi");
            for record in &summary.history {
                println!("{:>5} {:>10.5} {:>11.6}", record.iteration, record.cl, record.cdi);
            }
            println!();
            summary.coefficients
        }
    };
    let elapsed = start.elapsed();

    if args.panels {
        println!(
            "{:>4} {:>4} {:>4} {:>9} {:>9} {:>12} {:>10} {:>10}",
            "wing", "row", "col", "y", "dy", "circulation", "w_ind", "dL"
        );
        for (w, layout) in vlm.plane().wings().iter().enumerate() {
            for panel in &vlm.plane().panels()[layout.range.clone()] {
                println!(
                    "{:>4} {:>4} {:>4} {:>9.4} {:>9.4} {:>12.5} {:>10.5} {:>10.4}",
                    w,
                    panel.row,
                    panel.col,
                    panel.collocation.y,
                    panel.dy,
                    panel.circulation,
                    panel.w_ind,
                    panel.d_lift
                );
            }
        }
        println!();
    }

    if let Some(kind) = vlm.solver_type() {
        println!("Solver: {kind}");
    }
    println!("{coefficients}");
    println!("Lift = {:.3} N, induced drag = {:.4} N", coefficients.lift, coefficients.induced_drag);
    println!("Elapsed: {:.1} ms", elapsed.as_secs_f64() * 1000.0);

    info!("Demo finished");
    Ok(())
}
