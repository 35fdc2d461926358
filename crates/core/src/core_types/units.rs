//! Semantic unit types for the quantities that cross the solver API
//!
//! Flight conditions carry their units in the type, so an angle in degrees
//! cannot be passed where radians are expected and a speed cannot stand in
//! for a density. Geometry itself stays in plain `f64` / [`Vec3`](super::Vec3)
//! because the lattice is unit-agnostic.
//!
//! Every unit derefs to its `f64`, orders totally (NaN sorts last) and
//! serialises transparently.
//!
//! # Usage
//! ```
//! use vlm_core::core_types::units::{Degrees, Meters, MetersPerSecond, Radians};
//!
//! let alpha = Degrees::new(10.0);
//! let rad: Radians = alpha.into();
//! assert!((*rad - 0.174_532_925).abs() < 1e-9);
//!
//! let dt = Meters::new(0.25) / MetersPerSecond::new(30.0);
//! assert!((*dt - 0.25 / 30.0).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Div, Mul, Neg};

/// Newtype over `f64` with total ordering, `Deref`, conversions and a
/// fixed-precision `Display`
macro_rules! scalar_unit {
    ($(#[$meta:meta])* $name:ident, $precision:literal, $suffix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(f64);

        impl $name {
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            #[must_use]
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f64 {
            fn from(unit: $name) -> f64 {
                unit.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:.", $precision, "}", $suffix), self.0)
            }
        }
    };
}

scalar_unit!(
    /// Length in geometry units (metres)
    Meters, 3, " m"
);
scalar_unit!(
    /// Time in seconds
    Seconds, 4, " s"
);
scalar_unit!(
    /// Speed in metres per second
    MetersPerSecond, 2, " m/s"
);
scalar_unit!(
    /// Air density in kg/m³
    KgPerCubicMeter, 4, " kg/m³"
);
scalar_unit!(
    /// Angle in degrees
    Degrees, 1, "°"
);
scalar_unit!(
    /// Angle in radians
    Radians, 4, " rad"
);

impl KgPerCubicMeter {
    /// International standard atmosphere density at sea level
    pub const SEA_LEVEL: KgPerCubicMeter = KgPerCubicMeter(1.225);
}

// Convective time of one wake row: spacing / freestream speed
impl Div<MetersPerSecond> for Meters {
    type Output = Seconds;
    fn div(self, rhs: MetersPerSecond) -> Seconds {
        Seconds(self.0 / rhs.0)
    }
}

impl Mul<Seconds> for MetersPerSecond {
    type Output = Meters;
    fn mul(self, rhs: Seconds) -> Meters {
        Meters(self.0 * rhs.0)
    }
}

impl Degrees {
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

impl Neg for Degrees {
    type Output = Degrees;
    fn neg(self) -> Degrees {
        Degrees(-self.0)
    }
}

impl Radians {
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }

    #[inline]
    #[must_use]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    #[inline]
    #[must_use]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Radians {
        d.to_radians()
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Degrees {
        r.to_degrees()
    }
}
