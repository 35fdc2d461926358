//! Vortex induction: the line-vortex kernel and the composite elements built on it

pub mod elements;
pub mod kernel;

pub use elements::{
    horseshoe_vortex, reflect_y, ring_vortex, with_mirror_image, InducedVelocity, VortexElement,
};
pub use kernel::{line_vortex, DEFAULT_CUTOFF};
