//! # Unit Types
//!
//! Type-safe wrappers for the units used on overhead line drawings. Each is a
//! plain `f64` newtype that serializes as a bare number.
//!
//! ## Units in use
//!
//! Line mechanics in the RTE tradition mixes SI and technical units:
//! - Length: metres (m), cable diameters in millimetres (mm)
//! - Force: decanewtons (daN = 10 N), in which tensions are quoted
//! - Linear weight: kilograms per metre (kg/m) converted to daN/m
//! - Wind pressure: decapascals (daPa = 1 daN/m²)
//! - Angles: grades (400 gr = one turn)
//!
//! ## Example
//!
//! ```rust
//! use celeste_core::units::{DaNPerMeter, KgPerMeter, Meters, Millimeters};
//!
//! let mass = KgPerMeter(1.631);
//! let w: DaNPerMeter = mass.into();
//! assert!((w.0 - 1.600).abs() < 1e-3);
//!
//! let d: Meters = Millimeters(31.5).into();
//! assert_eq!(d.0, 0.0315);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in decanewtons (1 daN = 10 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecaNewtons(pub f64);

impl From<Newtons> for DecaNewtons {
    fn from(n: Newtons) -> Self {
        DecaNewtons(n.0 / 10.0)
    }
}

impl From<DecaNewtons> for Newtons {
    fn from(dan: DecaNewtons) -> Self {
        Newtons(dan.0 * 10.0)
    }
}

// ============================================================================
// Linear Loads
// ============================================================================

/// Linear mass in kilograms per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerMeter(pub f64);

/// Linear load in decanewtons per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaNPerMeter(pub f64);

impl From<KgPerMeter> for DaNPerMeter {
    fn from(mass: KgPerMeter) -> Self {
        DaNPerMeter(mass.0 * GRAVITY / 10.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in decapascals (1 daPa = 10 Pa = 1 daN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecaPascals(pub f64);

impl DecaPascals {
    /// Load per metre on a cylinder of the given diameter facing this pressure
    pub fn on_diameter(self, diameter: Meters) -> DaNPerMeter {
        DaNPerMeter(self.0 * diameter.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in grades (gons), 400 gr per full turn
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grades(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Grades> for Radians {
    fn from(gr: Grades) -> Self {
        Radians(gr.0 * std::f64::consts::PI / 200.0)
    }
}

impl From<Radians> for Grades {
    fn from(rad: Radians) -> Self {
        Grades(rad.0 * 200.0 / std::f64::consts::PI)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(DecaNewtons);
impl_arithmetic!(KgPerMeter);
impl_arithmetic!(DaNPerMeter);
impl_arithmetic!(DecaPascals);
impl_arithmetic!(Grades);
impl_arithmetic!(Radians);
