//! Influence-matrix assembly and induced-velocity queries
//!
//! Each collocation point `i` sees every body element `j` (plus its mirror
//! image when the model is symmetric). The normal component of the total
//! velocity induced by a unit-strength element fills `a[i][j]`; the normal
//! component of the streamwise-leg velocity fills `b[i][j]`.
//!
//! Rows are independent, so assembly and every velocity query run in
//! parallel over the field point with rayon. Each worker writes only its own
//! row, and rows are summed in a fixed order, so results do not depend on the
//! thread count.

use super::config::{FlowConditions, SolverConfig};
use super::wake::Wake;
use crate::core_types::Vec3;
use crate::geometry::{Panel, Plane};
use crate::vortex::{with_mirror_image, InducedVelocity, VortexElement};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

/// Dense body-body influence matrices
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceMatrices {
    /// Normal velocity at `i` per unit circulation on `j` (system matrix)
    pub a: DMatrix<f64>,
    /// Streamwise-leg normal velocity at `i` per unit circulation on `j`
    pub b: DMatrix<f64>,
}

impl InfluenceMatrices {
    /// Dimension N of the square system
    pub fn size(&self) -> usize {
        self.a.nrows()
    }
}

/// Everything needed to evaluate body elements: the panels, which element
/// each panel carries and the kernel parameters
#[derive(Debug, Clone, Copy)]
pub struct InfluenceContext<'a> {
    panels: &'a [Panel],
    element: VortexElement,
    trailing: Vec3,
    cutoff: f64,
    symmetric: bool,
}

impl<'a> InfluenceContext<'a> {
    /// Horseshoe elements with trailing legs `far_field_factor × b_ref` long,
    /// pitched by the angle of attack
    pub fn horseshoe(plane: &'a Plane, config: &SolverConfig, conditions: &FlowConditions) -> Self {
        let alpha = conditions.alpha.to_radians();
        let length = config.far_field_factor * plane.reference().span;
        Self {
            panels: plane.panels(),
            element: VortexElement::Horseshoe,
            trailing: Vec3::new(alpha.cos(), 0.0, alpha.sin()) * length,
            cutoff: config.cutoff_radius,
            symmetric: config.symmetric,
        }
    }

    /// Closed ring elements on every body panel
    pub fn ring(plane: &'a Plane, config: &SolverConfig) -> Self {
        Self {
            panels: plane.panels(),
            element: VortexElement::Ring,
            trailing: Vec3::zeros(),
            cutoff: config.cutoff_radius,
            symmetric: config.symmetric,
        }
    }

    /// Element kind carried by each body panel
    pub fn element(&self) -> VortexElement {
        self.element
    }

    fn corners(&self, panel: &Panel) -> [Vec3; 4] {
        match self.element {
            VortexElement::Horseshoe => panel.horseshoe(&self.trailing),
            VortexElement::Ring => *panel.ring(),
        }
    }

    /// Velocity at `point` induced by body panel `j` with strength `circulation`
    pub fn panel_velocity(&self, point: &Vec3, j: usize, circulation: f64) -> InducedVelocity {
        with_mirror_image(
            self.element,
            point,
            &self.corners(&self.panels[j]),
            circulation,
            self.cutoff,
            self.symmetric,
        )
    }

    /// Build `a` and `b` over every pair of body panels
    pub fn assemble(&self) -> InfluenceMatrices {
        let n = self.panels.len();

        let rows: Vec<(Vec<f64>, Vec<f64>)> = (0..n)
            .into_par_iter()
            .map(|i| {
                let receiver = &self.panels[i];
                let mut a_row = Vec::with_capacity(n);
                let mut b_row = Vec::with_capacity(n);
                for j in 0..n {
                    let v = self.panel_velocity(&receiver.collocation, j, 1.0);
                    a_row.push(v.total.dot(&receiver.normal));
                    b_row.push(v.downwash.dot(&receiver.normal));
                }
                (a_row, b_row)
            })
            .collect();

        let a = DMatrix::from_row_iterator(n, n, rows.iter().flat_map(|(a, _)| a.iter().copied()));
        let b = DMatrix::from_row_iterator(n, n, rows.iter().flat_map(|(_, b)| b.iter().copied()));
        InfluenceMatrices { a, b }
    }

    /// Velocity at `point` induced by every body panel at its current
    /// circulation
    pub fn body_velocity(&self, point: &Vec3) -> InducedVelocity {
        let mut sum = InducedVelocity::zero();
        for (j, panel) in self.panels.iter().enumerate() {
            sum += self.panel_velocity(point, j, panel.circulation);
        }
        sum
    }
}

/// Velocity at `point` induced by every cell of every wake
pub fn wake_velocity(point: &Vec3, wakes: &[Wake], cutoff: f64, symmetric: bool) -> InducedVelocity {
    let mut sum = InducedVelocity::zero();
    for wake in wakes {
        for (corners, gamma) in wake.cells() {
            sum += with_mirror_image(VortexElement::Ring, point, &corners, gamma, cutoff, symmetric);
        }
    }
    sum
}

/// Wake-induced velocity at every body collocation point
pub fn wake_velocity_at_collocation(
    panels: &[Panel],
    wakes: &[Wake],
    cutoff: f64,
    symmetric: bool,
) -> Vec<InducedVelocity> {
    panels
        .par_iter()
        .map(|panel| wake_velocity(&panel.collocation, wakes, cutoff, symmetric))
        .collect()
}

/// Total induced velocity (body rings plus every wake) at each point of
/// `points`
pub fn induced_velocity_at(
    context: &InfluenceContext<'_>,
    points: &[Vec3],
    wakes: &[Wake],
) -> Vec<Vec3> {
    points
        .par_iter()
        .map(|p| {
            context.body_velocity(p).total
                + wake_velocity(p, wakes, context.cutoff, context.symmetric).total
        })
        .collect()
}

/// Flow-tangency right-hand side for the freestream alone: `-V∞ · nᵢ`
pub fn freestream_rhs(panels: &[Panel], freestream: &Vec3) -> DVector<f64> {
    DVector::from_iterator(panels.len(), panels.iter().map(|p| -freestream.dot(&p.normal)))
}

/// Flow-tangency right-hand side including wake-induced velocity:
/// `-(V∞ + v_wake,i) · nᵢ`
pub fn rhs_with_wake(
    panels: &[Panel],
    freestream: &Vec3,
    wake: &[InducedVelocity],
) -> DVector<f64> {
    DVector::from_iterator(
        panels.len(),
        panels
            .iter()
            .zip(wake)
            .map(|(p, w)| -(freestream + w.total).dot(&p.normal)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlaneDefinition;
    use approx::assert_relative_eq;

    fn half_wing(n: usize, m: usize) -> Plane {
        Plane::from_definition(&PlaneDefinition::rectangular_half(5.0, 1.0, n, m)).unwrap()
    }

    #[test]
    fn test_horseshoe_diagonal_is_negative() {
        let plane = half_wing(1, 6);
        let config = SolverConfig::default();
        let ctx = InfluenceContext::horseshoe(&plane, &config, &FlowConditions::new(30.0, 5.0));
        let m = ctx.assemble();
        assert_eq!(m.size(), 6);
        for i in 0..6 {
            assert!(m.a[(i, i)] < 0.0, "a[{i}][{i}] = {}", m.a[(i, i)]);
            assert!(m.b[(i, i)] < 0.0);
        }
    }

    #[test]
    fn test_ring_matrix_is_finite() {
        let plane = half_wing(3, 4);
        let ctx = InfluenceContext::ring(&plane, &SolverConfig::default());
        let m = ctx.assemble();
        assert_eq!(m.a.shape(), (12, 12));
        assert!(m.a.iter().chain(m.b.iter()).all(|v| v.is_finite()));
    }

    #[test]
    fn test_parallel_assembly_matches_serial() {
        let plane = half_wing(2, 5);
        let ctx = InfluenceContext::ring(&plane, &SolverConfig::default());
        let m = ctx.assemble();
        let panels = plane.panels();
        for i in 0..panels.len() {
            for j in 0..panels.len() {
                let v = ctx.panel_velocity(&panels[i].collocation, j, 1.0);
                assert_eq!(m.a[(i, j)], v.total.dot(&panels[i].normal));
            }
        }
    }

    #[test]
    fn test_mirror_image_reinforces_root() {
        let plane = half_wing(1, 4);
        let flow = FlowConditions::new(30.0, 5.0);
        let sym = InfluenceContext::horseshoe(&plane, &SolverConfig::default(), &flow).assemble();
        let plain =
            InfluenceContext::horseshoe(&plane, &SolverConfig::full_span(), &flow).assemble();
        // The image cancels the root trailing leg, so the root panel sees
        // less of its own downwash
        assert!(plain.a[(0, 0)] < sym.a[(0, 0)]);
        assert!(sym.a[(0, 0)] < 0.0);
    }

    #[test]
    fn test_freestream_rhs() {
        let plane = half_wing(1, 3);
        let flow = FlowConditions::new(30.0, 10.0);
        let rhs = freestream_rhs(plane.panels(), &flow.freestream_velocity());
        for value in rhs.iter() {
            assert_relative_eq!(*value, -30.0 * 10.0_f64.to_radians().sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rhs_with_zero_wake_equals_freestream() {
        let plane = half_wing(2, 3);
        let v = FlowConditions::new(20.0, 4.0).freestream_velocity();
        let wake = vec![InducedVelocity::zero(); plane.panel_count()];
        assert_eq!(rhs_with_wake(plane.panels(), &v, &wake), freestream_rhs(plane.panels(), &v));
    }

    #[test]
    fn test_empty_wake_induces_nothing() {
        let plane = half_wing(1, 3);
        let mut wake = Wake::new(0);
        wake.seed(plane.trailing_edge(0));
        let v = wake_velocity_at_collocation(plane.panels(), &[wake], 1e-10, true);
        assert!(v.iter().all(|w| *w == InducedVelocity::zero()));
    }
}
