//! Unsteady ring-vortex solve with a free wake
//!
//! ```text
//! assemble a, b (rings) and factorise once
//! seed every wake at its trailing edge
//! for k in 0..=K
//!     k > 0: shed one wake row, wake velocity at collocation points
//!     solve a Γ = -(V∞ + v_wake) · n
//!     integrate forces
//!     roll up wake points by v_induced · dt
//! publish the final iteration into the panels
//! ```
//!
//! # Wake Model
//!
//! - New rows are shed rigidly, `wake_spacing_fraction` of each wing's mean
//!   chord behind the previous ones
//! - Existing points are then convected by the local induced velocity
//!   (body rings plus every wake, with the mirror image)
//! - Circulation is fixed once shed; only the body is re-solved
//!
//! # References
//!
//! - Katz & Plotkin (2001), *Low-Speed Aerodynamics*, 2nd ed., ch. 13:
//!   time-stepping vortex ring lattice with a force-free wake

use super::forces::{integrate_forces, CirculationConvention};
use super::influence::{
    induced_velocity_at, rhs_with_wake, wake_velocity_at_collocation, InfluenceContext,
};
use super::linear::CirculationSolver;
use super::observer::{IterationRecord, SolveStage};
use super::profiler::ProfilerScope;
use super::wake::Wake;
use super::{FlowConditions, SolverType, UnsteadySummary, Vlm};
use crate::core_types::{Meters, Seconds, Vec3};
use crate::error::{Result, VlmError};
use crate::vortex::InducedVelocity;
use tracing::{debug, info};

impl Vlm {
    /// Run `wake_iterations` time steps of the free-wake ring solve
    ///
    /// The loop always performs iterations `0..=wake_iterations`; iteration 0
    /// has no wake cells. Each wing sheds rows spaced by
    /// `wake_spacing_fraction` of its own mean chord. Panel results,
    /// coefficients and wakes are published once, after the final iteration,
    /// and hold that iteration's values. Downwash is `b · Γ` from the body
    /// lattice alone.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if `wake_iterations` is 0 or the flow
    ///   conditions are invalid; nothing is solved
    /// - `SingularSystem` if the ring influence matrix cannot be factorised or
    ///   an iteration yields non-finite circulation; results from any previous
    ///   run are left untouched
    pub fn run_lifting_surface(
        &mut self,
        conditions: &FlowConditions,
        wake_iterations: usize,
    ) -> Result<UnsteadySummary> {
        if wake_iterations < 1 {
            return Err(VlmError::invalid_parameter(
                "wake_iterations",
                &format!("must be at least 1, got {wake_iterations}"),
            ));
        }
        conditions.validate()?;
        let _scope = ProfilerScope::new("lifting surface");

        let spacing = self.config.wake_spacing_fraction;
        let dx: Vec<Meters> = (0..self.plane.wings().len())
            .map(|w| Meters::new(spacing * self.plane.mean_chord(w)))
            .collect();
        let dt = self.config.rollup_time_step.map_or_else(
            || Meters::new(spacing * self.plane.reference().chord) / conditions.freestream_speed,
            Seconds::new,
        );
        let freestream = conditions.freestream_velocity();

        info!(
            "Lifting surface: {} panels, {} wings, {} iterations, dt={}",
            self.plane.panel_count(),
            self.plane.wings().len(),
            wake_iterations,
            dt
        );

        let solver = {
            let context = InfluenceContext::ring(&self.plane, &self.config);
            self.observer.on_progress(SolveStage::Assembly, 0.0);
            let _assembly = ProfilerScope::new("ring assembly");
            let matrices = context.assemble();
            self.observer.on_progress(SolveStage::Assembly, 1.0);
            CirculationSolver::new(matrices)?
        };

        let mut wakes: Vec<Wake> = (0..self.plane.wings().len())
            .map(|w| {
                let mut wake = Wake::new(w);
                wake.seed(self.plane.trailing_edge(w));
                wake
            })
            .collect();

        let mut history = Vec::with_capacity(wake_iterations + 1);
        let mut latest = None;

        for k in 0..=wake_iterations {
            let iteration = ProfilerScope::new("wake iteration");

            let wake_velocity = if k == 0 {
                vec![InducedVelocity::zero(); self.plane.panel_count()]
            } else {
                for wake in &mut wakes {
                    let w = wake.wing();
                    wake.time_step(self.plane.trailing_edge(w), *dx[w]);
                }
                wake_velocity_at_collocation(
                    self.plane.panels(),
                    &wakes,
                    self.config.cutoff_radius,
                    self.config.symmetric,
                )
            };

            let rhs = rhs_with_wake(self.plane.panels(), &freestream, &wake_velocity);
            let solution = solver.solve(&rhs)?;
            let loads = integrate_forces(
                &self.plane,
                &solution,
                conditions,
                CirculationConvention::ChordwiseDifference,
            );

            self.roll_up(&mut wakes, *dt, k == wake_iterations);

            let record = IterationRecord {
                iteration: k,
                cl: loads.coefficients.cl,
                cdi: loads.coefficients.cdi,
                wake_rows: wakes.first().map_or(0, Wake::row_count),
                elapsed_ms: iteration.elapsed_ms(),
            };
            debug!(
                "Iteration {}/{}: CL={:.5}, CDi={:.6}",
                k, wake_iterations, record.cl, record.cdi
            );
            self.observer.on_iteration(&record);
            self.observer.on_progress(
                SolveStage::TimeMarching,
                (k + 1) as f64 / (wake_iterations + 1) as f64,
            );
            history.push(record);
            latest = Some((solution, loads));
        }

        let converged = self.config.convergence_tolerance.map(|tol| {
            history
                .windows(2)
                .last()
                .is_some_and(|pair| (pair[1].cl - pair[0].cl).abs() <= tol)
        });

        let Some((solution, loads)) = latest else {
            return Err(VlmError::invalid_parameter(
                "wake_iterations",
                "no iteration was run",
            ));
        };
        self.publish(&solution, &loads);
        self.wakes = wakes;
        self.solver_type = Some(SolverType::LiftingSurface);

        let coefficients = loads.coefficients;
        info!(
            "Lifting surface finished: {}, converged={:?}",
            coefficients, converged
        );

        Ok(UnsteadySummary {
            coefficients,
            history,
            converged,
        })
    }

    /// Displace wake points by the velocity induced by body rings and every
    /// wake, evaluated on the undisplaced lattice
    ///
    /// On the final iteration the row attached to the trailing edge stays put.
    fn roll_up(&self, wakes: &mut [Wake], dt: f64, final_iteration: bool) {
        let _scope = ProfilerScope::new("wake rollup");
        let first_row = usize::from(final_iteration);
        let context = InfluenceContext::ring(&self.plane, &self.config);

        let frozen: &[Wake] = wakes;
        let displacements: Vec<Vec<Vec<Vec3>>> = frozen
            .iter()
            .map(|wake| {
                wake.point_rows()
                    .iter()
                    .skip(first_row)
                    .map(|row| {
                        induced_velocity_at(&context, row, frozen)
                            .into_iter()
                            .map(|v| v * dt)
                            .collect()
                    })
                    .collect()
            })
            .collect();

        for (wake, offsets) in wakes.iter_mut().zip(&displacements) {
            wake.displace(first_row, offsets);
        }
    }
}
