//! Progress reporting seam
//!
//! The numerical core never prints; it reports progress to an injected
//! observer, and a host decides how (or whether) to present it.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Phase of a solve that a progress update refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStage {
    /// Building the body influence matrices
    Assembly,
    /// Factorising and solving the linear system
    Solve,
    /// One iteration of the unsteady loop finished
    TimeMarching,
}

impl fmt::Display for SolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStage::Assembly => "assembly",
            SolveStage::Solve => "solve",
            SolveStage::TimeMarching => "time marching",
        };
        f.write_str(name)
    }
}

/// Aerodynamic state after one iteration of the unsteady loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration index `k` (0 = no wake)
    pub iteration: usize,
    /// Lift coefficient at this iteration
    pub cl: f64,
    /// Induced drag coefficient at this iteration
    pub cdi: f64,
    /// Point rows in the first wing's wake
    pub wake_rows: usize,
    /// Wall time spent on this iteration
    pub elapsed_ms: f64,
}

/// Receives progress from a running solve
///
/// Calls happen on the thread that invoked the solve, in order.
pub trait SolveObserver: Send + Sync {
    /// `fraction` runs from 0.0 to 1.0 within `stage`
    fn on_progress(&self, stage: SolveStage, fraction: f64);

    /// Called after every unsteady iteration
    fn on_iteration(&self, record: &IterationRecord) {
        let _ = record;
    }
}

/// Discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SolveObserver for NullObserver {
    fn on_progress(&self, _stage: SolveStage, _fraction: f64) {}
}

/// Forwards updates to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SolveObserver for TracingObserver {
    fn on_progress(&self, stage: SolveStage, fraction: f64) {
        debug!("{}: {:.0}%", stage, fraction * 100.0);
    }

    fn on_iteration(&self, record: &IterationRecord) {
        info!(
            "Iteration {}: CL={:.5}, CDi={:.6}, wake rows={}, {:.1}ms",
            record.iteration, record.cl, record.cdi, record.wake_rows, record.elapsed_ms
        );
    }
}
