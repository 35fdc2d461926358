//! Kutta–Joukowski force integration
//!
//! Per panel:
//!
//! ```text
//! dL  =  ρ Q∞ Γ_eff dy
//! dDi = -ρ w  Γ_eff dy
//! ```
//!
//! `Γ_eff` is either the panel's own circulation or, for ring lattices, the
//! jump in circulation relative to the panel directly upstream: adjacent
//! rings share their spanwise legs, so only the difference is carried by the
//! bound vortex of a downstream row.

use super::config::FlowConditions;
use super::linear::SolveResult;
use crate::geometry::Plane;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the effective bound-vortex strength of a panel is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CirculationConvention {
    /// Every panel carries its own circulation (horseshoe lattice)
    OwnCirculation,
    /// Panels behind the leading-edge row carry `Γ_i - Γ_upstream` (ring lattice)
    ChordwiseDifference,
}

/// Integrated loads and their coefficients
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceCoefficients {
    /// Lift coefficient `L / (½ρ S_ref Q∞²)`
    pub cl: f64,
    /// Induced drag coefficient `Di / (½ρ S_ref Q∞²)`
    pub cdi: f64,
    /// Total lift
    pub lift: f64,
    /// Total induced drag
    pub induced_drag: f64,
}

impl ForceCoefficients {
    /// Span efficiency `CL² / (π AR CDi)`, `None` when there is no induced drag
    ///
    /// `aspect_ratio` must refer to the same reference area as the coefficients.
    pub fn span_efficiency(&self, aspect_ratio: f64) -> Option<f64> {
        (self.cdi.abs() > f64::EPSILON)
            .then(|| self.cl * self.cl / (std::f64::consts::PI * aspect_ratio * self.cdi))
    }
}

impl fmt::Display for ForceCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CL = {:.5}, CDi = {:.6}", self.cl, self.cdi)
    }
}

/// Per-panel load increments plus their integral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDistribution {
    /// Effective bound-vortex strength of every panel
    pub effective_circulation: Vec<f64>,
    /// Lift increment of every panel
    pub d_lift: Vec<f64>,
    /// Induced drag increment of every panel
    pub d_drag: Vec<f64>,
    /// Totals and coefficients
    pub coefficients: ForceCoefficients,
}

/// Integrate panel forces for one solve
///
/// Pure function of its inputs: calling it again on the same solution gives
/// the same result.
pub fn integrate_forces(
    plane: &Plane,
    solution: &SolveResult,
    conditions: &FlowConditions,
    convention: CirculationConvention,
) -> LoadDistribution {
    let rho = *conditions.density;
    let speed = *conditions.freestream_speed;
    let gamma = &solution.circulation;

    let effective_circulation: Vec<f64> = (0..plane.panel_count())
        .map(|i| match convention {
            CirculationConvention::OwnCirculation => gamma[i],
            CirculationConvention::ChordwiseDifference => match plane.upstream_of(i) {
                Some(up) => gamma[i] - gamma[up],
                None => gamma[i],
            },
        })
        .collect();

    let (d_lift, d_drag): (Vec<f64>, Vec<f64>) = plane
        .panels()
        .iter()
        .zip(&effective_circulation)
        .zip(solution.downwash.iter())
        .map(|((panel, g), w)| (rho * speed * g * panel.dy, -rho * w * g * panel.dy))
        .unzip();

    let lift: f64 = d_lift.iter().sum();
    let induced_drag: f64 = d_drag.iter().sum();
    let q_s = conditions.dynamic_pressure() * plane.reference().area;

    LoadDistribution {
        effective_circulation,
        d_lift,
        d_drag,
        coefficients: ForceCoefficients {
            cl: lift / q_s,
            cdi: induced_drag / q_s,
            lift,
            induced_drag,
        },
    }
}
