//! Panel arena for every wing of a plane
//!
//! All panels live in one flat `Vec<Panel>`; each wing records the index
//! range it occupies and its lattice dimensions. Iteration over "every panel
//! of every wing" is a plain slice iterator, and a wing's trailing edge or a
//! panel's upstream neighbour is found by index arithmetic within its range.

use super::definition::{PlaneDefinition, ReferenceGeometry};
use super::mesh::{generate_wing_mesh, WingMesh};
use super::panel::Panel;
use crate::core_types::Vec3;
use crate::error::{Result, VlmError};
use std::ops::Range;
use tracing::debug;

/// Location of one wing's panels inside the plane arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WingLayout {
    /// Index range of this wing's panels in the arena
    pub range: Range<usize>,
    /// Number of chordwise rows
    pub chordwise: usize,
    /// Number of spanwise columns
    pub spanwise: usize,
}

impl WingLayout {
    /// Arena indices of the trailing-edge row, root to tip
    pub fn trailing_edge(&self) -> Range<usize> {
        (self.range.end - self.spanwise)..self.range.end
    }
}

/// All panels of a plane plus its reference geometry
#[derive(Debug, Clone)]
pub struct Plane {
    panels: Vec<Panel>,
    wings: Vec<WingLayout>,
    reference: ReferenceGeometry,
}

impl Plane {
    /// Mesh every wing of a definition into a plane
    ///
    /// # Errors
    /// Propagates validation and meshing errors from the definition
    pub fn from_definition(definition: &PlaneDefinition) -> Result<Self> {
        definition.validate()?;
        let meshes = definition
            .wings
            .iter()
            .map(generate_wing_mesh)
            .collect::<Result<Vec<_>>>()?;
        Self::new(definition.reference, meshes)
    }

    /// Assemble a plane from meshes supplied by any geometry provider
    ///
    /// # Errors
    /// Returns `DegenerateGeometry` if there are no wings or a mesh's panel
    /// count does not match its lattice dimensions, and `InvalidConfiguration`
    /// for bad reference quantities
    pub fn new(reference: ReferenceGeometry, meshes: Vec<WingMesh>) -> Result<Self> {
        reference.validate()?;
        if meshes.is_empty() {
            return Err(VlmError::degenerate("plane has no wings"));
        }

        let total: usize = meshes.iter().map(|m| m.panels.len()).sum();
        let mut panels = Vec::with_capacity(total);
        let mut wings = Vec::with_capacity(meshes.len());

        for (w, mesh) in meshes.into_iter().enumerate() {
            if mesh.chordwise == 0
                || mesh.spanwise == 0
                || mesh.panels.len() != mesh.chordwise * mesh.spanwise
            {
                return Err(VlmError::degenerate(format!(
                    "wing {w}: {} panels do not form a {}x{} lattice",
                    mesh.panels.len(),
                    mesh.chordwise,
                    mesh.spanwise
                )));
            }
            let start = panels.len();
            panels.extend(mesh.panels);
            wings.push(WingLayout {
                range: start..panels.len(),
                chordwise: mesh.chordwise,
                spanwise: mesh.spanwise,
            });
        }

        debug!(
            "Plane assembled: {} wings, {} panels",
            wings.len(),
            panels.len()
        );

        Ok(Self {
            panels,
            wings,
            reference,
        })
    }

    /// Reference area, span and chord
    pub fn reference(&self) -> &ReferenceGeometry {
        &self.reference
    }

    /// Every panel of every wing, in arena order
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub(crate) fn panels_mut(&mut self) -> &mut [Panel] {
        &mut self.panels
    }

    /// Total panel count across all wings
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Layout of every wing
    pub fn wings(&self) -> &[WingLayout] {
        &self.wings
    }

    /// Panels of wing `w`
    ///
    /// # Panics
    /// If `w` is not below `wings().len()`.
    pub fn wing_panels(&self, w: usize) -> &[Panel] {
        &self.panels[self.wings[w].range.clone()]
    }

    /// Trailing-edge panels of wing `w`, root to tip
    ///
    /// # Panics
    /// If `w` is not below `wings().len()`.
    pub fn trailing_edge(&self, w: usize) -> &[Panel] {
        &self.panels[self.wings[w].trailing_edge()]
    }

    /// Mean chord of wing `w`: panel area over the spanwise extent of its
    /// trailing-edge strip
    ///
    /// Sets the rigid wake spacing of that wing, so a tail sheds rows scaled
    /// to its own chord rather than the reference chord.
    ///
    /// # Panics
    /// If `w` is not below `wings().len()`.
    pub fn mean_chord(&self, w: usize) -> f64 {
        let area: f64 = self.wing_panels(w).iter().map(|p| p.area).sum();
        let span: f64 = self.trailing_edge(w).iter().map(|p| p.dy).sum();
        area / span
    }

    /// Arena index of the panel directly upstream of panel `index`, or `None`
    /// for leading-edge panels
    ///
    /// Relies on the spanwise-first ordering within each wing.
    pub fn upstream_of(&self, index: usize) -> Option<usize> {
        let layout = self.wings.iter().find(|w| w.range.contains(&index))?;
        let local = index - layout.range.start;
        (local >= layout.spanwise).then(|| index - layout.spanwise)
    }

    /// Panel outlines as line segments
    pub fn panel_segments(&self) -> Vec<[Vec3; 2]> {
        self.panels.iter().flat_map(Panel::edges).collect()
    }

    /// Total planform area of the modelled panels
    pub fn wetted_area(&self) -> f64 {
        self.panels.iter().map(|p| p.area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_wing_definition() -> PlaneDefinition {
        let mut def = PlaneDefinition::rectangular_half(5.0, 1.0, 2, 4);
        let mut tail = PlaneDefinition::rectangular_half(2.0, 0.5, 1, 3).wings.remove(0);
        for section in &mut tail.sections {
            for le in &mut section.leading_edges {
                le[0] += 4.0;
            }
        }
        def.wings.push(tail);
        def
    }

    #[test]
    fn test_arena_ranges() {
        let plane = Plane::from_definition(&two_wing_definition()).unwrap();
        assert_eq!(plane.panel_count(), 8 + 3);
        assert_eq!(plane.wings()[0].range, 0..8);
        assert_eq!(plane.wings()[1].range, 8..11);
        assert_eq!(plane.wing_panels(1).len(), 3);
    }

    #[test]
    fn test_trailing_edge_rows() {
        let plane = Plane::from_definition(&two_wing_definition()).unwrap();
        let te = plane.trailing_edge(0);
        assert_eq!(te.len(), 4);
        assert!(te.iter().all(|p| p.row == 1));
        assert_eq!(plane.wings()[1].trailing_edge(), 8..11);
    }

    #[test]
    fn test_upstream_neighbour() {
        let plane = Plane::from_definition(&two_wing_definition()).unwrap();
        assert_eq!(plane.upstream_of(0), None);
        assert_eq!(plane.upstream_of(3), None);
        assert_eq!(plane.upstream_of(4), Some(0));
        assert_eq!(plane.upstream_of(7), Some(3));
        // Single-row tail: every panel is a leading-edge panel
        assert_eq!(plane.upstream_of(9), None);
        assert_eq!(plane.upstream_of(99), None);
    }

    #[test]
    fn test_panel_iteration_is_restartable() {
        let plane = Plane::from_definition(&two_wing_definition()).unwrap();
        let first: Vec<_> = plane.panels().iter().map(|p| p.col).collect();
        let second: Vec<_> = plane.panels().iter().map(|p| p.col).collect();
        assert_eq!(first, second);
        assert_eq!(plane.panel_segments().len(), 4 * plane.panel_count());
    }

    #[test]
    fn test_mean_chord_per_wing() {
        let plane = Plane::from_definition(&two_wing_definition()).unwrap();
        assert!((plane.mean_chord(0) - 1.0).abs() < 1e-12);
        assert!((plane.mean_chord(1) - 0.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_trailing_edge_of_missing_wing_panics() {
        let plane = Plane::from_definition(&two_wing_definition()).unwrap();
        let _ = plane.trailing_edge(2);
    }

    #[test]
    fn test_rejects_mismatched_mesh() {
        let def = PlaneDefinition::rectangular_half(5.0, 1.0, 2, 4);
        let mut mesh = generate_wing_mesh(&def.wings[0]).unwrap();
        mesh.panels.pop();
        assert!(matches!(
            Plane::new(def.reference, vec![mesh]),
            Err(VlmError::DegenerateGeometry(_))
        ));
    }
}
