//! Free-wake lattice trailing one wing
//!
//! The wake is stored as rows of ring-corner points, newest first:
//!
//! ```text
//!   row 0   TE ---o-----o-----o---     attached at the trailing edge
//!                 | v00 | v01 |
//!   row 1     ----o-----o-----o---
//!                 | v10 | v11 |
//!   row 2     ----o-----o-----o---     oldest
//! ```
//!
//! `points` always has one more row than `vorticity`, and every point row
//! has one more point than the wing has trailing-edge panels. Each time step
//! shifts the whole lattice downstream, prepends a fresh trailing-edge row and
//! prepends the trailing-edge circulations as the strengths of the new cells.

use crate::core_types::Vec3;
use crate::geometry::Panel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle of a wake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WakeState {
    /// No rows yet
    Uninitialized,
    /// Row 0 captured from the trailing edge, no cells
    Seeded,
    /// At least one time step taken
    Advancing,
}

/// Ring-vortex lattice shed by one wing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wake {
    wing: usize,
    state: WakeState,
    points: Vec<Vec<Vec3>>,
    vorticity: Vec<Vec<f64>>,
}

/// Ring corners of the trailing edge: the first panel's `A`, then every
/// panel's `D`
fn trailing_edge_points(trailing_edge: &[Panel]) -> Vec<Vec3> {
    let mut row = Vec::with_capacity(trailing_edge.len() + 1);
    if let Some(first) = trailing_edge.first() {
        row.push(first.ring()[0]);
    }
    row.extend(trailing_edge.iter().map(|p| p.ring()[3]));
    row
}

impl Wake {
    /// Empty wake for wing `wing`
    pub fn new(wing: usize) -> Self {
        Self {
            wing,
            state: WakeState::Uninitialized,
            points: Vec::new(),
            vorticity: Vec::new(),
        }
    }

    /// Index of the wing this wake trails
    pub fn wing(&self) -> usize {
        self.wing
    }

    /// Current lifecycle state
    pub fn state(&self) -> WakeState {
        self.state
    }

    /// Capture the trailing edge as row 0, discarding any existing rows
    pub fn seed(&mut self, trailing_edge: &[Panel]) {
        self.points = vec![trailing_edge_points(trailing_edge)];
        self.vorticity.clear();
        self.state = WakeState::Seeded;
    }

    /// Shift the lattice downstream by `dx` and shed a new row from the
    /// trailing edge
    ///
    /// An uninitialized wake is seeded first, so its first step produces one
    /// cell row.
    pub fn time_step(&mut self, trailing_edge: &[Panel], dx: f64) {
        if self.state == WakeState::Uninitialized {
            self.seed(trailing_edge);
        }

        for point in self.points.iter_mut().flatten() {
            point.x += dx;
        }
        self.points.insert(0, trailing_edge_points(trailing_edge));
        self.vorticity
            .insert(0, trailing_edge.iter().map(|p| p.circulation).collect());
        self.state = WakeState::Advancing;

        debug!(
            "Wake {} stepped: {} point rows, {} cell rows",
            self.wing,
            self.points.len(),
            self.vorticity.len()
        );
    }

    /// Point rows, newest (trailing edge) first
    pub fn point_rows(&self) -> &[Vec<Vec3>] {
        &self.points
    }

    /// Cell strengths, newest first
    pub fn vorticity_rows(&self) -> &[Vec<f64>] {
        &self.vorticity
    }

    /// Number of point rows
    pub fn row_count(&self) -> usize {
        self.points.len()
    }

    /// Total number of ring cells
    pub fn cell_count(&self) -> usize {
        self.vorticity.iter().map(Vec::len).sum()
    }

    /// Every ring cell as `([A, B, C, D], strength)`
    ///
    /// `B`-`C` lies on the upstream row so the corner order matches a body
    /// panel ring; the first cell row's `B`-`C` leg cancels the trailing-edge
    /// panels' `D`-`A` leg when their strengths agree.
    pub fn cells(&self) -> impl Iterator<Item = ([Vec3; 4], f64)> + '_ {
        self.vorticity.iter().enumerate().flat_map(move |(r, strengths)| {
            let upstream = &self.points[r];
            let downstream = &self.points[r + 1];
            strengths.iter().enumerate().map(move |(p, &gamma)| {
                (
                    [downstream[p], upstream[p], upstream[p + 1], downstream[p + 1]],
                    gamma,
                )
            })
        })
    }

    /// Move every point in rows `first_row..` by the matching entry of
    /// `displacements` (indexed from `first_row`)
    pub(crate) fn displace(&mut self, first_row: usize, displacements: &[Vec<Vec3>]) {
        for (row, offsets) in self.points.iter_mut().skip(first_row).zip(displacements) {
            for (point, offset) in row.iter_mut().zip(offsets) {
                *point += offset;
            }
        }
    }

    /// Wake lattice as line segments: every point row plus the streamwise
    /// lines joining consecutive rows
    pub fn segments(&self) -> Vec<[Vec3; 2]> {
        let mut segments = Vec::new();
        for row in &self.points {
            segments.extend(row.windows(2).map(|w| [w[0], w[1]]));
        }
        for pair in self.points.windows(2) {
            segments.extend(pair[0].iter().zip(&pair[1]).map(|(a, b)| [*a, *b]));
        }
        segments
    }
}
