//! Shared fixtures for integration tests
#![allow(dead_code)]

use vlm_core::geometry::{Plane, PlaneDefinition};
use vlm_core::solver::{SolverConfig, Vlm};

/// Route `tracing` output through the test harness; filter with `RUST_LOG`
#[ctor::ctor]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Flat rectangular half wing from y = 0 to `semi_span`, solved with the mirror image
pub fn half_wing(semi_span: f64, chord: f64, n: usize, m: usize) -> Vlm {
    let plane = Plane::from_definition(&PlaneDefinition::rectangular_half(semi_span, chord, n, m))
        .expect("valid half wing");
    Vlm::new(plane, SolverConfig::default()).expect("default config is valid")
}

/// Flat rectangular wing meshed across the full span, no mirror image
pub fn full_wing(span: f64, chord: f64, n: usize, m: usize) -> Vlm {
    let plane = Plane::from_definition(&PlaneDefinition::rectangular_full(span, chord, n, m))
        .expect("valid full wing");
    Vlm::new(plane, SolverConfig::full_span()).expect("full-span config is valid")
}

/// Classical lifting-line estimate `2π α AR / (AR + 2)`
pub fn lifting_line_estimate(alpha_rad: f64, aspect_ratio: f64) -> f64 {
    2.0 * std::f64::consts::PI * alpha_rad * aspect_ratio / (aspect_ratio + 2.0)
}
