//! 2D vector over the deterministic scalar.
//!
//! Companion type for simulation positions and velocities. Every component
//! operation routes through `SoftF32`, so vector math inherits the same
//! cross-platform bit-exactness as the scalar; `length` goes through `hypot`
//! to survive extreme magnitudes.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use super::soft_float::SoftF32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftVec2 {
    pub x: SoftF32,
    pub y: SoftF32,
}

impl SoftVec2 {
    pub const ZERO: Self = Self {
        x: SoftF32::ZERO,
        y: SoftF32::ZERO,
    };

    pub const fn new(x: SoftF32, y: SoftF32) -> Self {
        Self { x, y }
    }

    /// Boundary constructor from native floats; bit reinterpretation only.
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self {
            x: SoftF32::from_f32(x),
            y: SoftF32::from_f32(y),
        }
    }

    pub fn dot(self, other: Self) -> SoftF32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> SoftF32 {
        self.dot(self)
    }

    /// Euclidean length via `hypot`, which neither overflows for large
    /// components nor flushes for subnormal ones.
    pub fn length(self) -> SoftF32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> SoftF32 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Self) -> SoftF32 {
        (self - other).length_squared()
    }

    /// Unit vector in the same direction; the zero vector (and any vector
    /// with a non-finite length) stays zero instead of producing NaN.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len.is_zero() || !len.is_finite() {
            return Self::ZERO;
        }
        self / len
    }

    /// Linear interpolation, `t` unclamped.
    pub fn lerp(self, other: Self, t: SoftF32) -> Self {
        self + (other - self) * t
    }

    /// Counter-clockwise perpendicular.
    pub fn perp(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }
}

impl Add for SoftVec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for SoftVec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for SoftVec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<SoftF32> for SoftVec2 {
    type Output = Self;
    fn mul(self, rhs: SoftF32) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<SoftF32> for SoftVec2 {
    type Output = Self;
    fn div(self, rhs: SoftF32) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl AddAssign for SoftVec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for SoftVec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
