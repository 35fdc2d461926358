//! Steady horseshoe-vortex solve

use super::forces::{integrate_forces, CirculationConvention, ForceCoefficients};
use super::influence::{freestream_rhs, InfluenceContext};
use super::linear::CirculationSolver;
use super::observer::SolveStage;
use super::profiler::ProfilerScope;
use super::{FlowConditions, SolverType, Vlm};
use crate::error::Result;
use tracing::info;

impl Vlm {
    /// Solve the steady horseshoe lattice for `conditions`
    ///
    /// Every panel carries a horseshoe vortex whose trailing legs run
    /// `far_field_factor × b_ref` downstream along the angle of attack.
    ///
    /// # Errors
    /// - `InvalidConfiguration` for bad flow conditions
    /// - `SingularSystem` if the influence matrix cannot be solved; panel
    ///   results are left untouched
    pub fn run_lifting_line(&mut self, conditions: &FlowConditions) -> Result<ForceCoefficients> {
        conditions.validate()?;
        let _scope = ProfilerScope::new("lifting line");

        info!(
            "Lifting line: {} panels, Q={}, alpha={}, beta={}",
            self.plane.panel_count(),
            conditions.freestream_speed,
            conditions.alpha,
            conditions.beta
        );

        let (solution, loads) = {
            let context = InfluenceContext::horseshoe(&self.plane, &self.config, conditions);

            self.observer.on_progress(SolveStage::Assembly, 0.0);
            let matrices = {
                let _assembly = ProfilerScope::new("horseshoe assembly");
                context.assemble()
            };
            self.observer.on_progress(SolveStage::Assembly, 1.0);

            let solver = CirculationSolver::new(matrices)?;
            let rhs = freestream_rhs(self.plane.panels(), &conditions.freestream_velocity());
            let solution = solver.solve(&rhs)?;
            self.observer.on_progress(SolveStage::Solve, 1.0);

            let loads = integrate_forces(
                &self.plane,
                &solution,
                conditions,
                CirculationConvention::OwnCirculation,
            );
            (solution, loads)
        };

        self.publish(&solution, &loads);
        self.wakes.clear();
        self.solver_type = Some(SolverType::LiftingLine);

        info!("Lifting line finished: {}", loads.coefficients);
        Ok(loads.coefficients)
    }
}
