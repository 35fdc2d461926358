//! Geometry provider: plane definitions, lattice generation and the panel arena
//!
//! A [`PlaneDefinition`] describes wings as straight-tapered sections.
//! [`generate_wing_mesh`] turns each wing into a flat-plate lattice of
//! [`Panel`]s, and [`Plane`] owns the panels of every wing in one flat arena.

pub mod definition;
pub mod mesh;
pub mod panel;
pub mod plane;

pub use definition::{PlaneDefinition, ReferenceGeometry, SectionDefinition, WingDefinition};
pub use mesh::{generate_wing_mesh, WingMesh};
pub use panel::Panel;
pub use plane::{Plane, WingLayout};
