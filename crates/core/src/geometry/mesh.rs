//! Flat-plate lattice generation from a wing definition
//!
//! Points are generated chordwise station by chordwise station; within a
//! station they run from root to tip across every section, sharing the
//! station where two sections meet. Panels are emitted spanwise first, then
//! chordwise, so panel `row * spanwise + col` sits directly behind panel
//! `(row - 1) * spanwise + col`.

use super::definition::WingDefinition;
use super::panel::Panel;
use crate::core_types::Vec3;
use crate::error::{Result, VlmError};

/// Panels of one wing in lattice order, plus the lattice dimensions
#[derive(Debug, Clone)]
pub struct WingMesh {
    /// Panels, spanwise-first within each chordwise row
    pub panels: Vec<Panel>,
    /// Number of chordwise rows
    pub chordwise: usize,
    /// Number of spanwise columns
    pub spanwise: usize,
}

/// Chordwise offset from the leading edge for fraction `t` of a chord
/// rotated about the leading edge by `incidence` (nose up positive)
fn chordwise_offset(chord: f64, t: f64, incidence_rad: f64) -> Vec3 {
    let x = chord * t;
    let (sin, cos) = incidence_rad.sin_cos();
    Vec3::new(x * cos, 0.0, -x * sin)
}

/// Generate the lattice points of a wing as `(n + 1) × (m + 1)` rows
fn lattice_points(wing: &WingDefinition) -> Vec<Vec<Vec3>> {
    let n = wing.chordwise_panels;
    let m = wing.spanwise_panels();

    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let mut station = Vec::with_capacity(m + 1);
            for (s, section) in wing.sections.iter().enumerate() {
                let p1 = section.leading_edge(0)
                    + chordwise_offset(section.chords[0], t, section.incidence[0].to_radians().value());
                let p2 = section.leading_edge(1)
                    + chordwise_offset(section.chords[1], t, section.incidence[1].to_radians().value());
                let p1p2 = p2 - p1;

                let first = usize::from(s != 0);
                for k in first..=section.spanwise_panels {
                    let u = k as f64 / section.spanwise_panels as f64;
                    station.push(p1 + p1p2 * u);
                }
            }
            station
        })
        .collect()
}

/// Generate the panel lattice for one wing
///
/// # Errors
/// Returns `DegenerateGeometry` if the wing has no panels in either direction
/// or if a generated lattice point is not finite
pub fn generate_wing_mesh(wing: &WingDefinition) -> Result<WingMesh> {
    let n = wing.chordwise_panels;
    let m = wing.spanwise_panels();
    if n == 0 || m == 0 {
        return Err(VlmError::degenerate(format!(
            "cannot mesh a {n}x{m} lattice"
        )));
    }

    let points = lattice_points(wing);
    if points.iter().flatten().any(|p| !p.iter().all(|c| c.is_finite())) {
        return Err(VlmError::degenerate("non-finite lattice point"));
    }

    let mut panels = Vec::with_capacity(n * m);
    for i in 0..n {
        for j in 0..m {
            let corners = [
                points[i][j],
                points[i][j + 1],
                points[i + 1][j + 1],
                points[i + 1][j],
            ];
            panels.push(Panel::new(corners, i, j));
        }
    }

    Ok(WingMesh {
        panels,
        chordwise: n,
        spanwise: m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Degrees;
    use crate::geometry::definition::{PlaneDefinition, SectionDefinition};
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_mesh_dimensions() {
        let def = PlaneDefinition::rectangular_half(5.0, 1.0, 3, 10);
        let mesh = generate_wing_mesh(&def.wings[0]).unwrap();
        assert_eq!(mesh.panels.len(), 30);
        assert_eq!(mesh.chordwise, 3);
        assert_eq!(mesh.spanwise, 10);

        // Spanwise first, then chordwise
        assert_eq!((mesh.panels[0].row, mesh.panels[0].col), (0, 0));
        assert_eq!((mesh.panels[9].row, mesh.panels[9].col), (0, 9));
        assert_eq!((mesh.panels[10].row, mesh.panels[10].col), (1, 0));
    }

    #[test]
    fn test_panels_tile_the_planform() {
        let def = PlaneDefinition::rectangular_half(5.0, 1.0, 4, 10);
        let mesh = generate_wing_mesh(&def.wings[0]).unwrap();
        let total: f64 = mesh.panels.iter().map(|p| p.area).sum();
        assert_relative_eq!(total, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_chordwise_neighbours_share_edges() {
        let def = PlaneDefinition::rectangular_half(5.0, 2.0, 2, 4);
        let mesh = generate_wing_mesh(&def.wings[0]).unwrap();
        let front = &mesh.panels[1];
        let back = &mesh.panels[1 + 4];
        assert_eq!(front.corners()[3], back.corners()[0]);
        assert_eq!(front.corners()[2], back.corners()[1]);
    }

    #[test]
    fn test_sections_share_junction_station() {
        let mut def = PlaneDefinition::rectangular_half(2.0, 1.0, 1, 2);
        def.wings[0].sections.push(SectionDefinition::flat(
            [Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 4.0, 0.0)],
            1.0,
            3,
        ));
        let mesh = generate_wing_mesh(&def.wings[0]).unwrap();
        assert_eq!(mesh.spanwise, 5);
        assert_eq!(mesh.panels.len(), 5);
        // Panel 1 ends where panel 2 (first of the outer section) begins
        assert_eq!(mesh.panels[1].corners()[1], mesh.panels[2].corners()[0]);
        assert_relative_eq!(mesh.panels[2].corners()[0].y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_positive_incidence_drops_trailing_edge() {
        let mut def = PlaneDefinition::rectangular_half(2.0, 1.0, 1, 1);
        def.wings[0].sections[0].incidence = [Degrees::new(10.0), Degrees::new(10.0)];
        let mesh = generate_wing_mesh(&def.wings[0]).unwrap();
        let te = mesh.panels[0].corners()[3];
        assert_relative_eq!(te.x, 10.0_f64.to_radians().cos(), epsilon = 1e-12);
        assert_relative_eq!(te.z, -10.0_f64.to_radians().sin(), epsilon = 1e-12);
        // Normal of a nose-up panel leans aft: n = (sin i, 0, cos i)
        assert_relative_eq!(mesh.panels[0].normal.x, 10.0_f64.to_radians().sin(), epsilon = 1e-12);
        assert!(mesh.panels[0].normal.z > 0.0);
    }

    #[test]
    fn test_rejects_empty_lattice() {
        let def = PlaneDefinition::rectangular_half(2.0, 1.0, 0, 4);
        assert!(matches!(
            generate_wing_mesh(&def.wings[0]),
            Err(VlmError::DegenerateGeometry(_))
        ));
    }
}
