//! Vortex lattice solvers
//!
//! [`Vlm`] owns a [`Plane`] for the duration of a session and offers two
//! entry points:
//!
//! - [`Vlm::run_lifting_line`]: steady solve with one horseshoe vortex per
//!   panel.
//! - [`Vlm::run_lifting_surface`]: ring vortex per panel plus a free wake
//!   that is shed, convected and rolled up over a fixed number of iterations.
//!
//! Solved circulation, downwash and load increments are written back into the
//! plane's panels only after a solve succeeds.
//!
//! # Example
//!
//! ```rust
//! use vlm_core::geometry::{Plane, PlaneDefinition};
//! use vlm_core::solver::{FlowConditions, SolverConfig, Vlm};
//!
//! let plane = Plane::from_definition(&PlaneDefinition::rectangular_half(5.0, 1.0, 1, 10))?;
//! let mut vlm = Vlm::new(plane, SolverConfig::default())?;
//! let coefficients = vlm.run_lifting_line(&FlowConditions::new(30.0, 10.0))?;
//! assert!(coefficients.cl > 0.0);
//! # Ok::<(), vlm_core::VlmError>(())
//! ```

pub mod config;
pub mod forces;
pub mod influence;
mod lifting_line;
mod lifting_surface;
pub mod linear;
pub mod observer;
pub mod profiler;
pub mod wake;

pub use config::{FlowConditions, SolverConfig};
pub use forces::{integrate_forces, CirculationConvention, ForceCoefficients, LoadDistribution};
pub use influence::{InfluenceContext, InfluenceMatrices};
pub use linear::{CirculationSolver, SolveResult};
pub use observer::{IterationRecord, NullObserver, SolveObserver, SolveStage, TracingObserver};
pub use profiler::ProfilerScope;
pub use wake::{Wake, WakeState};

use crate::error::Result;
use crate::geometry::Plane;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which solver produced the current results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverType {
    /// Steady horseshoe lattice
    LiftingLine,
    /// Ring lattice with free wake
    LiftingSurface,
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverType::LiftingLine => f.write_str("lifting line"),
            SolverType::LiftingSurface => f.write_str("lifting surface"),
        }
    }
}

/// Outcome of an unsteady lifting-surface run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsteadySummary {
    /// Coefficients from the final iteration
    pub coefficients: ForceCoefficients,
    /// One record per iteration, `k = 0..=K`
    pub history: Vec<IterationRecord>,
    /// Whether the last two CL values agreed within the configured tolerance;
    /// `None` when no tolerance is configured
    pub converged: Option<bool>,
}

/// A solve session over one plane
pub struct Vlm {
    plane: Plane,
    config: SolverConfig,
    wakes: Vec<Wake>,
    observer: Box<dyn SolveObserver>,
    coefficients: Option<ForceCoefficients>,
    solver_type: Option<SolverType>,
}

impl Vlm {
    /// Start a session
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `config` fails validation
    pub fn new(plane: Plane, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            plane,
            config,
            wakes: Vec::new(),
            observer: Box::new(NullObserver),
            coefficients: None,
            solver_type: None,
        })
    }

    /// Replace the progress observer
    #[must_use]
    pub fn with_observer(mut self, observer: impl SolveObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// The plane, including the most recently published panel results
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Solver parameters
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Wakes left by the last lifting-surface run; empty otherwise
    pub fn wakes(&self) -> &[Wake] {
        &self.wakes
    }

    /// Coefficients of the last successful run
    pub fn coefficients(&self) -> Option<ForceCoefficients> {
        self.coefficients
    }

    /// Lift coefficient of the last successful run (0 before any run)
    pub fn cl(&self) -> f64 {
        self.coefficients.map_or(0.0, |c| c.cl)
    }

    /// Induced drag coefficient of the last successful run (0 before any run)
    pub fn cdi(&self) -> f64 {
        self.coefficients.map_or(0.0, |c| c.cdi)
    }

    /// Solver used by the last successful run
    pub fn solver_type(&self) -> Option<SolverType> {
        self.solver_type
    }

    /// Clear panel results, wakes and coefficients
    pub fn reset(&mut self) {
        for panel in self.plane.panels_mut() {
            panel.reset_solution();
        }
        self.wakes.clear();
        self.coefficients = None;
        self.solver_type = None;
    }

    /// End the session and hand back the plane
    pub fn into_plane(self) -> Plane {
        self.plane
    }

    fn publish(&mut self, solution: &SolveResult, loads: &LoadDistribution) {
        for (i, panel) in self.plane.panels_mut().iter_mut().enumerate() {
            panel.circulation = solution.circulation[i];
            panel.w_ind = solution.downwash[i];
            panel.d_lift = loads.d_lift[i];
            panel.d_drag = loads.d_drag[i];
        }
        self.coefficients = Some(loads.coefficients);
    }
}
