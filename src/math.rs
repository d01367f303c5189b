//! Deterministic software floating-point mathematics library.
//!
//! This module provides a deterministic 32-bit float type and operations
//! implemented entirely with integer bit manipulation, ensuring identical
//! behavior across different platforms, architectures, and optimization
//! levels. This is critical for multiplayer lockstep networking where all
//! clients must simulate identically: a single unit-in-the-last-place of
//! divergence desynchronizes the game.
//!
//! The only place native floats appear is at the `f32` boundary conversions,
//! which reinterpret bits without doing any hardware arithmetic.

pub mod soft_float;

mod arith;
mod exp_log;
mod round;
mod trig;
mod vec2;

pub use soft_float::SoftF32;
pub use vec2::SoftVec2;
