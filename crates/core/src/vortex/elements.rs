//! Horseshoe and ring vortices built from line-vortex segments
//!
//! Both elements report two velocities: the total induced by every segment,
//! and the "downwash" part induced by the streamwise legs only. The latter
//! excludes the spanwise bound-vortex legs so that induced drag does not
//! include bound-vortex self-induction.
//!
//! Corner labelling follows [`Panel::ring`](crate::geometry::Panel::ring):
//!
//! ```text
//!     B--C -> y
//!     |  |
//!     A--D
//!     |
//!     x
//! ```
//!
//! Horseshoe: A'→B→C→D' (A', D' far downstream). Ring: A→B→C→D→A.
//! In both, A→B and C→D are the streamwise legs.

use super::kernel::line_vortex;
use crate::core_types::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Velocity induced by one element at a field point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InducedVelocity {
    /// Sum over every segment of the element
    pub total: Vec3,
    /// Sum over the streamwise legs only
    pub downwash: Vec3,
}

impl InducedVelocity {
    /// No induced velocity
    pub fn zero() -> Self {
        Self::default()
    }

    /// Combine a real contribution with its y = 0 mirror image
    ///
    /// `image` must be the element's velocity evaluated at the reflected field
    /// point. The x and z components add and the y components subtract.
    #[must_use]
    pub fn combine_image(self, image: InducedVelocity) -> Self {
        Self {
            total: combine_components(&self.total, &image.total),
            downwash: combine_components(&self.downwash, &image.downwash),
        }
    }
}

fn combine_components(real: &Vec3, image: &Vec3) -> Vec3 {
    Vec3::new(real.x + image.x, real.y - image.y, real.z + image.z)
}

impl Add for InducedVelocity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total + rhs.total,
            downwash: self.downwash + rhs.downwash,
        }
    }
}

impl AddAssign for InducedVelocity {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.downwash += rhs.downwash;
    }
}

/// Reflect a point across the y = 0 symmetry plane
#[inline]
#[must_use]
pub fn reflect_y(point: &Vec3) -> Vec3 {
    Vec3::new(point.x, -point.y, point.z)
}

/// Horseshoe vortex with corners `[A', B, C, D']`
///
/// B→C is the bound vortex; A'→B and C→D' are the trailing legs, already
/// extended far downstream by the caller.
#[must_use]
pub fn horseshoe_vortex(
    point: &Vec3,
    corners: &[Vec3; 4],
    circulation: f64,
    cutoff: f64,
) -> InducedVelocity {
    let [a, b, c, d] = corners;
    let ab = line_vortex(point, a, b, circulation, cutoff);
    let bc = line_vortex(point, b, c, circulation, cutoff);
    let cd = line_vortex(point, c, d, circulation, cutoff);

    InducedVelocity {
        total: ab + bc + cd,
        downwash: ab + cd,
    }
}

/// Closed ring vortex with corners `[A, B, C, D]`
#[must_use]
pub fn ring_vortex(
    point: &Vec3,
    corners: &[Vec3; 4],
    circulation: f64,
    cutoff: f64,
) -> InducedVelocity {
    let [a, b, c, d] = corners;
    let ab = line_vortex(point, a, b, circulation, cutoff);
    let bc = line_vortex(point, b, c, circulation, cutoff);
    let cd = line_vortex(point, c, d, circulation, cutoff);
    let da = line_vortex(point, d, a, circulation, cutoff);

    InducedVelocity {
        total: ab + bc + cd + da,
        downwash: ab + cd,
    }
}

/// Composite element kind used by influence assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VortexElement {
    /// Bound vortex plus two long trailing legs (steady solve)
    Horseshoe,
    /// Closed four-segment loop (body panels in the unsteady solve, wake cells)
    Ring,
}

impl VortexElement {
    /// Velocity induced by an element of this kind
    #[must_use]
    pub fn induced_velocity(
        self,
        point: &Vec3,
        corners: &[Vec3; 4],
        circulation: f64,
        cutoff: f64,
    ) -> InducedVelocity {
        match self {
            VortexElement::Horseshoe => horseshoe_vortex(point, corners, circulation, cutoff),
            VortexElement::Ring => ring_vortex(point, corners, circulation, cutoff),
        }
    }
}

/// Velocity induced by an element plus, if `symmetric`, its y = 0 mirror image
#[must_use]
pub fn with_mirror_image(
    element: VortexElement,
    point: &Vec3,
    corners: &[Vec3; 4],
    circulation: f64,
    cutoff: f64,
    symmetric: bool,
) -> InducedVelocity {
    let real = element.induced_velocity(point, corners, circulation, cutoff);
    if !symmetric {
        return real;
    }
    let image = element.induced_velocity(&reflect_y(point), corners, circulation, cutoff);
    real.combine_image(image)
}
