//! Flow conditions and solver tuning parameters

use crate::core_types::{Degrees, KgPerCubicMeter, MetersPerSecond, Vec3};
use crate::error::{Result, VlmError};
use crate::vortex::DEFAULT_CUTOFF;
use serde::{Deserialize, Serialize};

/// Freestream state for one solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowConditions {
    /// Freestream speed Q∞
    pub freestream_speed: MetersPerSecond,
    /// Angle of attack α
    pub alpha: Degrees,
    /// Sideslip angle β
    pub beta: Degrees,
    /// Air density ρ
    pub density: KgPerCubicMeter,
}

impl FlowConditions {
    /// Sea-level conditions at speed `speed` and angle of attack `alpha`, no sideslip
    #[must_use]
    pub fn new(speed: f64, alpha_deg: f64) -> Self {
        Self {
            freestream_speed: MetersPerSecond::new(speed),
            alpha: Degrees::new(alpha_deg),
            beta: Degrees::new(0.0),
            density: KgPerCubicMeter::SEA_LEVEL,
        }
    }

    /// Freestream velocity vector Q∞ (cos α cos β, sin β, sin α cos β)
    #[must_use]
    pub fn freestream_velocity(&self) -> Vec3 {
        let alpha = self.alpha.to_radians();
        let beta = self.beta.to_radians();
        Vec3::new(
            alpha.cos() * beta.cos(),
            beta.sin(),
            alpha.sin() * beta.cos(),
        ) * *self.freestream_speed
    }

    /// Dynamic pressure ½ρQ∞²
    #[must_use]
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * *self.density * *self.freestream_speed * *self.freestream_speed
    }

    /// Check that speed and density are positive and angles are finite
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the offending quantity
    pub fn validate(&self) -> Result<()> {
        if !(self.freestream_speed.is_finite() && *self.freestream_speed > 0.0) {
            return Err(VlmError::invalid_parameter(
                "freestream_speed",
                &format!("must be finite and positive, got {}", self.freestream_speed),
            ));
        }
        if !(self.density.is_finite() && *self.density > 0.0) {
            return Err(VlmError::invalid_parameter(
                "density",
                &format!("must be finite and positive, got {}", self.density),
            ));
        }
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return Err(VlmError::invalid_parameter(
                "alpha/beta",
                "angles must be finite",
            ));
        }
        Ok(())
    }
}

impl Default for FlowConditions {
    /// 30 m/s at 10° angle of attack, sea-level density
    fn default() -> Self {
        Self::new(30.0, 10.0)
    }
}

/// Numerical parameters shared by both solvers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Line-vortex singularity cutoff R
    pub cutoff_radius: f64,

    /// Horseshoe trailing-leg length in reference spans
    pub far_field_factor: f64,

    /// Apply the y = 0 mirror image (half-span model)
    pub symmetric: bool,

    /// Rigid wake row spacing as a fraction of the reference chord
    pub wake_spacing_fraction: f64,

    /// Rollup time increment; `None` uses the convective time of one wake row
    pub rollup_time_step: Option<f64>,

    /// When set, the unsteady loop reports whether the last two CL values
    /// agree within this tolerance. The loop always runs every iteration.
    pub convergence_tolerance: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cutoff_radius: DEFAULT_CUTOFF,
            far_field_factor: 10.0,
            symmetric: true,
            wake_spacing_fraction: 0.25,
            rollup_time_step: None,
            convergence_tolerance: None,
        }
    }
}

impl SolverConfig {
    /// Configuration for a full-span model meshed on both sides of y = 0
    #[must_use]
    pub fn full_span() -> Self {
        Self {
            symmetric: false,
            ..Self::default()
        }
    }

    /// Check every parameter is finite and in range
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the offending parameter
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(VlmError::invalid_parameter(
                    name,
                    &format!("must be finite and positive, got {value}"),
                ))
            }
        };

        if !(self.cutoff_radius.is_finite() && self.cutoff_radius >= 0.0) {
            return Err(VlmError::invalid_parameter(
                "cutoff_radius",
                &format!("must be finite and non-negative, got {}", self.cutoff_radius),
            ));
        }
        positive("far_field_factor", self.far_field_factor)?;
        positive("wake_spacing_fraction", self.wake_spacing_fraction)?;
        if let Some(dt) = self.rollup_time_step {
            positive("rollup_time_step", dt)?;
        }
        if let Some(tol) = self.convergence_tolerance {
            positive("convergence_tolerance", tol)?;
        }
        Ok(())
    }
}
