//! Lattice panel with its derived vortex geometry
//!
//! Panel corner layout (x downstream, y spanwise):
//!
//! ```text
//!     P1--P2 -> y
//!     :   :
//!     P4--P3
//!     |
//!     x
//! ```
//!
//! Vortex corner layout:
//!
//! ```text
//!     B--C -> y
//!     :  :
//!     A--D
//!     |
//!     x
//! ```
//!
//! `B`-`C` is the bound vortex on the quarter-chord line. `A` and `D` sit on
//! the quarter-chord line of the panel behind, so `A→B` is the inboard
//! trailing leg, `C→D` the outboard trailing leg and `D→A` the starting vortex.

use crate::core_types::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A planar quadrilateral lattice element and its solved state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    corners: [Vec3; 4],
    ring: [Vec3; 4],

    /// Panel area
    pub area: f64,
    /// Collocation point at 3/4 chord where flow tangency is enforced
    pub collocation: Vec3,
    /// Unit normal; the zero vector for a degenerate panel
    pub normal: Vec3,
    /// Spanwise width, the distance between P1 and P2
    pub dy: f64,
    /// Chordwise row within the wing (0 = leading edge row)
    pub row: usize,
    /// Spanwise column within the wing (0 = root)
    pub col: usize,

    /// Solved circulation strength
    pub circulation: f64,
    /// Solved induced downwash (normal component from trailing legs)
    pub w_ind: f64,
    /// Lift increment
    pub d_lift: f64,
    /// Induced drag increment
    pub d_drag: f64,
}

impl Panel {
    /// Build a panel from its four corners and lattice position
    ///
    /// Derived geometry is computed once here; only the solved state changes
    /// afterwards.
    pub fn new(corners: [Vec3; 4], row: usize, col: usize) -> Self {
        let [p1, p2, p3, p4] = corners;

        let p12 = p2 - p1;
        let p23 = p3 - p2;
        let p34 = p4 - p3;
        let p41 = p1 - p4;
        let area = 0.5 * (p12.cross(&p23) + p34.cross(&p41)).norm();

        let inboard_chord = p4 - p1;
        let outboard_chord = p3 - p2;

        let b = p1 + inboard_chord * 0.25;
        let c = p2 + outboard_chord * 0.25;
        let a = b + inboard_chord;
        let d = c + outboard_chord;

        let cp_inboard = p1 + inboard_chord * 0.75;
        let cp_outboard = p2 + outboard_chord * 0.75;
        let collocation = cp_inboard + (cp_outboard - cp_inboard) * 0.5;

        let normal = (collocation - p2)
            .cross(&(collocation - p1))
            .try_normalize(f64::MIN_POSITIVE)
            .unwrap_or_else(|| {
                warn!(
                    "Degenerate panel at row {}, col {}: zero-norm normal, influence row will be empty",
                    row, col
                );
                Vec3::zeros()
            });

        Self {
            corners,
            ring: [a, b, c, d],
            area,
            collocation,
            normal,
            dy: p12.norm(),
            row,
            col,
            circulation: 0.0,
            w_ind: 0.0,
            d_lift: 0.0,
            d_drag: 0.0,
        }
    }

    /// Corner points `[P1, P2, P3, P4]`
    pub fn corners(&self) -> &[Vec3; 4] {
        &self.corners
    }

    /// Ring vortex corners `[A, B, C, D]`
    pub fn ring(&self) -> &[Vec3; 4] {
        &self.ring
    }

    /// Bound vortex endpoints `(B, C)`
    pub fn bound_vortex(&self) -> (Vec3, Vec3) {
        (self.ring[1], self.ring[2])
    }

    /// Horseshoe vortex corners `[A', B, C, D']` with the trailing legs
    /// extended by `trailing` from the bound vortex endpoints
    pub fn horseshoe(&self, trailing: &Vec3) -> [Vec3; 4] {
        let (b, c) = self.bound_vortex();
        [b + trailing, b, c, c + trailing]
    }

    /// True for panels in the first chordwise row
    pub fn is_leading_edge(&self) -> bool {
        self.row == 0
    }

    /// Panel outline as four line segments
    pub fn edges(&self) -> [[Vec3; 2]; 4] {
        let [p1, p2, p3, p4] = self.corners;
        [[p1, p2], [p2, p3], [p3, p4], [p4, p1]]
    }

    pub(crate) fn reset_solution(&mut self) {
        self.circulation = 0.0;
        self.w_ind = 0.0;
        self.d_lift = 0.0;
        self.d_drag = 0.0;
    }
}
