//! Vortex Lattice Method Core Library
//!
//! Computes steady and unsteady aerodynamic loads on lifting surfaces by
//! representing each wing as a lattice of discrete vortex elements, solving
//! for their circulation under flow tangency and integrating the resulting
//! Kutta–Joukowski forces.
//!
//! ## Layout
//!
//! - [`vortex`]: Biot–Savart line-vortex kernel, horseshoe and ring elements,
//!   y = 0 mirror images
//! - [`geometry`]: plane definitions, flat-plate lattice generation and the
//!   panel arena
//! - [`solver`]: influence assembly, LU circulation solve, free-wake
//!   time marching and force integration

// Core types and utilities
pub mod core_types;
pub mod error;

pub mod geometry;
pub mod solver;
pub mod vortex;

// Re-export core types
pub use core_types::{Degrees, KgPerCubicMeter, Meters, MetersPerSecond, Radians, Seconds, Vec3};
pub use error::{Result, VlmError};

// Re-export the solve surface
pub use geometry::{Panel, Plane, PlaneDefinition, ReferenceGeometry};
pub use solver::{
    FlowConditions, ForceCoefficients, SolveObserver, SolverConfig, SolverType, UnsteadySummary,
    Vlm,
};
