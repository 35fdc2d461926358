//! Serializable plane definitions
//!
//! The field names follow the plane JSON layout used by existing
//! configurations (`S_ref`, `b_ref`, `c_ref`, `wing[].n`, `wing[].section[]`),
//! so a definition file can be deserialized directly with `serde_json`.

use crate::core_types::{Degrees, Vec3};
use crate::error::{Result, VlmError};
use serde::{Deserialize, Serialize};

/// Reference quantities used to non-dimensionalise forces
///
/// When the solver runs with the y = 0 mirror image, `area` is the area of the
/// modelled (half) geometry so that coefficients match the full aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGeometry {
    /// Reference area `S_ref`
    #[serde(rename = "S_ref")]
    pub area: f64,
    /// Reference span `b_ref`; also scales the horseshoe trailing legs
    #[serde(rename = "b_ref")]
    pub span: f64,
    /// Reference chord `c_ref`; also scales the rigid wake row spacing
    #[serde(rename = "c_ref")]
    pub chord: f64,
}

impl ReferenceGeometry {
    /// Check that every reference quantity is finite and positive
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first offending quantity
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("S_ref", self.area),
            ("b_ref", self.span),
            ("c_ref", self.chord),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(VlmError::invalid_parameter(
                    name,
                    &format!("must be finite and positive, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// One spanwise section of a wing: a straight-tapered strip between two
/// leading-edge stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDefinition {
    /// Number of spanwise panels in this section
    #[serde(rename = "m")]
    pub spanwise_panels: usize,
    /// Inboard and outboard leading-edge coordinates
    pub leading_edges: [[f64; 3]; 2],
    /// Inboard and outboard chord lengths
    pub chords: [f64; 2],
    /// Inboard and outboard incidence angles (positive = nose up)
    #[serde(rename = "i_angle")]
    pub incidence: [Degrees; 2],
}

impl SectionDefinition {
    /// Flat, untwisted section between two leading-edge points with constant chord
    pub fn flat(leading_edges: [Vec3; 2], chord: f64, spanwise_panels: usize) -> Self {
        Self {
            spanwise_panels,
            leading_edges: [leading_edges[0].into(), leading_edges[1].into()],
            chords: [chord, chord],
            incidence: [Degrees::new(0.0), Degrees::new(0.0)],
        }
    }

    /// Leading edge station `k` (0 = inboard, 1 = outboard) as a vector
    pub fn leading_edge(&self, k: usize) -> Vec3 {
        Vec3::from(self.leading_edges[k])
    }
}

/// A lifting surface made of one or more contiguous sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingDefinition {
    /// Number of chordwise panels (shared by every section)
    #[serde(rename = "n")]
    pub chordwise_panels: usize,
    /// Sections ordered from root to tip
    #[serde(rename = "section")]
    pub sections: Vec<SectionDefinition>,
}

impl WingDefinition {
    /// Total spanwise panel count over all sections
    pub fn spanwise_panels(&self) -> usize {
        self.sections.iter().map(|s| s.spanwise_panels).sum()
    }
}

/// Complete plane: reference quantities plus every wing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneDefinition {
    /// Reference area, span and chord
    #[serde(flatten)]
    pub reference: ReferenceGeometry,
    /// Wings in solve order
    #[serde(rename = "wing")]
    pub wings: Vec<WingDefinition>,
}

impl PlaneDefinition {
    /// Flat rectangular half wing from y = 0 to y = `semi_span`
    ///
    /// Intended for symmetric (mirror image) solves: the reference area is the
    /// half-wing area and the reference span is the full span.
    pub fn rectangular_half(
        semi_span: f64,
        chord: f64,
        chordwise_panels: usize,
        spanwise_panels: usize,
    ) -> Self {
        let section = SectionDefinition::flat(
            [Vec3::zeros(), Vec3::new(0.0, semi_span, 0.0)],
            chord,
            spanwise_panels,
        );
        Self {
            reference: ReferenceGeometry {
                area: semi_span * chord,
                span: 2.0 * semi_span,
                chord,
            },
            wings: vec![WingDefinition {
                chordwise_panels,
                sections: vec![section],
            }],
        }
    }

    /// Flat rectangular wing meshed explicitly across y ∈ [−span/2, span/2]
    ///
    /// Intended for solves without the mirror image.
    pub fn rectangular_full(
        span: f64,
        chord: f64,
        chordwise_panels: usize,
        spanwise_panels: usize,
    ) -> Self {
        let section = SectionDefinition::flat(
            [
                Vec3::new(0.0, -0.5 * span, 0.0),
                Vec3::new(0.0, 0.5 * span, 0.0),
            ],
            chord,
            spanwise_panels,
        );
        Self {
            reference: ReferenceGeometry {
                area: span * chord,
                span,
                chord,
            },
            wings: vec![WingDefinition {
                chordwise_panels,
                sections: vec![section],
            }],
        }
    }

    /// Validate the definition before meshing
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for bad reference quantities and
    /// `DegenerateGeometry` for wings or sections that cannot be meshed
    pub fn validate(&self) -> Result<()> {
        self.reference.validate()?;
        if self.wings.is_empty() {
            return Err(VlmError::degenerate("plane has no wings"));
        }
        for (w, wing) in self.wings.iter().enumerate() {
            if wing.chordwise_panels == 0 {
                return Err(VlmError::degenerate(format!(
                    "wing {w}: chordwise panel count must be at least 1"
                )));
            }
            if wing.sections.is_empty() {
                return Err(VlmError::degenerate(format!("wing {w}: no sections")));
            }
            for (s, section) in wing.sections.iter().enumerate() {
                if section.spanwise_panels == 0 {
                    return Err(VlmError::degenerate(format!(
                        "wing {w} section {s}: spanwise panel count must be at least 1"
                    )));
                }
                if section.chords.iter().any(|c| !(c.is_finite() && *c > 0.0)) {
                    return Err(VlmError::degenerate(format!(
                        "wing {w} section {s}: chords must be finite and positive, got {:?}",
                        section.chords
                    )));
                }
                let finite = section
                    .leading_edges
                    .iter()
                    .flatten()
                    .chain(section.incidence.iter().map(|i| &**i))
                    .all(|v| v.is_finite());
                if !finite {
                    return Err(VlmError::degenerate(format!(
                        "wing {w} section {s}: non-finite leading edge or incidence"
                    )));
                }
                if section.leading_edge(0) == section.leading_edge(1) {
                    return Err(VlmError::degenerate(format!(
                        "wing {w} section {s}: zero-length leading edge"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_half_reference() {
        let def = PlaneDefinition::rectangular_half(5.0, 1.0, 2, 10);
        assert_eq!(def.reference.area, 5.0);
        assert_eq!(def.reference.span, 10.0);
        assert_eq!(def.wings[0].spanwise_panels(), 10);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_chord() {
        let mut def = PlaneDefinition::rectangular_half(5.0, 1.0, 2, 10);
        def.wings[0].sections[0].chords = [1.0, 0.0];
        assert!(matches!(
            def.validate(),
            Err(VlmError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_panel_counts() {
        let mut def = PlaneDefinition::rectangular_half(5.0, 1.0, 0, 10);
        assert!(def.validate().is_err());
        def.wings[0].chordwise_panels = 1;
        def.wings[0].sections[0].spanwise_panels = 0;
        assert!(def.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_reference_area() {
        let mut def = PlaneDefinition::rectangular_half(5.0, 1.0, 2, 10);
        def.reference.area = 0.0;
        assert!(matches!(
            def.validate(),
            Err(VlmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_multi_section_spanwise_total() {
        let mut def = PlaneDefinition::rectangular_half(5.0, 1.0, 2, 4);
        def.wings[0].sections.push(SectionDefinition::flat(
            [Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.5, 8.0, 0.0)],
            0.5,
            6,
        ));
        assert_eq!(def.wings[0].spanwise_panels(), 10);
        assert!(def.validate().is_ok());
    }
}
