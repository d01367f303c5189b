//! The deterministic scalar type used throughout the simulation.
//!
//! `SoftF32` stores an IEEE-754 binary32 bit pattern in a plain `u32` and
//! reimplements every operation with integer arithmetic on the sign, exponent
//! and mantissa fields. The hardware FPU is never consulted, so results are
//! bit-identical on every platform, which is what lockstep clients require.
//!
//! The raw layout is sign(1) + biased exponent(8, bias 127) + mantissa(23),
//! exactly the native `f32` layout. That makes `from_f32`/`to_f32` pure bit
//! reinterpretations, and it means a serialized `SoftF32` can be reread as a
//! native float at interop boundaries.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const SIGN_MASK: u32 = 0x8000_0000;
pub(crate) const EXP_MASK: u32 = 0x7F80_0000;
pub(crate) const FRAC_MASK: u32 = 0x007F_FFFF;
pub(crate) const IMPLICIT_BIT: u32 = 0x0080_0000;
pub(crate) const FRAC_BITS: u32 = 23;
pub(crate) const EXP_BIAS: i32 = 127;

/// Deterministic 32-bit float. Immutable, `Copy`, no heap, no aliasing.
///
/// Every 32-bit pattern decodes into exactly one category: signed zero,
/// subnormal, normal, signed infinity, or NaN. Every operation is a total
/// function over that domain - invalid inputs produce quiet NaN, overflow
/// produces signed infinity, underflow produces signed zero or a subnormal.
/// Nothing panics.
#[derive(Clone, Copy)]
pub struct SoftF32(u32);

impl SoftF32 {
    pub const ZERO: Self = Self(0x0000_0000);
    pub const NEG_ZERO: Self = Self(0x8000_0000);
    pub const ONE: Self = Self(0x3F80_0000);
    pub const NEG_ONE: Self = Self(0xBF80_0000);
    pub const TWO: Self = Self(0x4000_0000);
    pub const HALF: Self = Self(0x3F00_0000);
    /// Largest finite value, 3.4028235e38.
    pub const MAX: Self = Self(0x7F7F_FFFF);
    /// Smallest finite value, -3.4028235e38.
    pub const MIN: Self = Self(0xFF7F_FFFF);
    /// Smallest positive value, the 1.4e-45 subnormal (.NET `Single.Epsilon`
    /// convention, not the machine epsilon).
    pub const EPSILON: Self = Self(0x0000_0001);
    pub const INFINITY: Self = Self(0x7F80_0000);
    pub const NEG_INFINITY: Self = Self(0xFF80_0000);
    /// Canonical quiet NaN. Invalid operations return this pattern; NaN
    /// operands propagate through most operations unchanged.
    pub const NAN: Self = Self(0x7FC0_0000);

    pub const PI: Self = Self(0x4049_0FDB);
    pub const HALF_PI: Self = Self(0x3FC9_0FDB);
    pub const TWO_PI: Self = Self(0x40C9_0FDB);
    pub const E: Self = Self(0x402D_F854);

    /// Construct from a raw IEEE-754 binary32 bit pattern.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bit pattern. This is the serialization format.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Reinterpret a native float's bits. This is NOT a numeric conversion:
    /// the 32 bits are reread as sign/exponent/mantissa fields. Together with
    /// `to_f32` this is the only boundary where native floats appear.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// Reinterpret as a native float, for display and interop only. Results
    /// of native arithmetic on the returned value are not deterministic.
    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Numeric conversion from an integer, round-to-nearest-even when the
    /// magnitude exceeds 24 significant bits. `i32::MIN` needs no special
    /// branch: `unsigned_abs` represents magnitude 2^31 directly.
    pub fn from_i32(value: i32) -> Self {
        if value == 0 {
            return Self::ZERO;
        }
        let sign = if value < 0 { SIGN_MASK } else { 0 };
        let mag = value.unsigned_abs();
        let msb = 31 - mag.leading_zeros();
        let mut exp = (EXP_BIAS as u32) + msb;
        let frac = if msb <= FRAC_BITS {
            (mag << (FRAC_BITS - msb)) & FRAC_MASK
        } else {
            let shift = msb - FRAC_BITS;
            let rem = mag & ((1 << shift) - 1);
            let half = 1 << (shift - 1);
            let mut m = mag >> shift;
            if rem > half || (rem == half && (m & 1) == 1) {
                m += 1;
                if m >> (FRAC_BITS + 1) != 0 {
                    m >>= 1;
                    exp += 1;
                }
            }
            m & FRAC_MASK
        };
        Self(sign | (exp << FRAC_BITS) | frac)
    }

    /// Numeric conversion to an integer, truncating toward zero. The unbiased
    /// exponent selects a left or right shift of the mantissa. Exponents below
    /// zero yield 0, NaN yields 0, values beyond the `i32` range saturate.
    pub fn to_i32(self) -> i32 {
        if self.is_nan() {
            return 0;
        }
        let e = self.exp_field() as i32 - EXP_BIAS;
        if e < 0 {
            return 0;
        }
        if e > 30 {
            // covers infinities too; note -2^31 saturates to its exact value
            return if self.is_sign_negative() {
                i32::MIN
            } else {
                i32::MAX
            };
        }
        let m = self.frac_field() | IMPLICIT_BIT;
        let mag = if e <= FRAC_BITS as i32 {
            m >> (FRAC_BITS as i32 - e)
        } else {
            m << (e - FRAC_BITS as i32)
        };
        if self.is_sign_negative() {
            -(mag as i32)
        } else {
            mag as i32
        }
    }

    // ------------------------------------------------------------------
    // Bit-field accessors
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) const fn sign_field(self) -> u32 {
        self.0 & SIGN_MASK
    }

    #[inline]
    pub(crate) const fn exp_field(self) -> u32 {
        (self.0 >> FRAC_BITS) & 0xFF
    }

    #[inline]
    pub(crate) const fn frac_field(self) -> u32 {
        self.0 & FRAC_MASK
    }

    // ------------------------------------------------------------------
    // Classification
    // ------------------------------------------------------------------

    #[inline]
    pub const fn is_nan(self) -> bool {
        self.exp_field() == 0xFF && self.frac_field() != 0
    }

    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.exp_field() == 0xFF && self.frac_field() == 0
    }

    #[inline]
    pub const fn is_finite(self) -> bool {
        self.exp_field() != 0xFF
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    #[inline]
    pub const fn is_subnormal(self) -> bool {
        self.exp_field() == 0 && self.frac_field() != 0
    }

    #[inline]
    pub const fn is_normal(self) -> bool {
        self.exp_field() != 0 && self.exp_field() != 0xFF
    }

    #[inline]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    #[inline]
    pub const fn is_sign_positive(self) -> bool {
        self.0 & SIGN_MASK == 0
    }

    // ------------------------------------------------------------------
    // Sign-bit operations
    // ------------------------------------------------------------------

    /// Magnitude. Clears the sign bit, works on every category.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0 & !SIGN_MASK)
    }

    /// Magnitude of `self` with the sign bit of `sign`.
    #[inline]
    pub const fn copysign(self, sign: Self) -> Self {
        Self((self.0 & !SIGN_MASK) | (sign.0 & SIGN_MASK))
    }

    /// Smaller of two values, ignoring a NaN operand when the other is a
    /// number.
    pub fn min(self, other: Self) -> Self {
        if self.is_nan() {
            return other;
        }
        if other.is_nan() {
            return self;
        }
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Larger of two values, ignoring a NaN operand when the other is a
    /// number.
    pub fn max(self, other: Self) -> Self {
        if self.is_nan() {
            return other;
        }
        if other.is_nan() {
            return self;
        }
        if self >= other {
            self
        } else {
            other
        }
    }

    // ------------------------------------------------------------------
    // Comparison beyond the IEEE operators
    // ------------------------------------------------------------------

    /// Equality for generic comparers: all NaN patterns are mutually equal,
    /// +0 equals -0. Distinct from `==`, which is IEEE equality where NaN is
    /// never equal to anything including itself. Consistent with `Hash`.
    pub fn equals(self, other: Self) -> bool {
        if self.is_nan() {
            return other.is_nan();
        }
        self == other
    }

    /// Total ordering for sorting. Returns `Equal` for numerically equal
    /// values (±0 included) and when both operands are NaN; a lone NaN orders
    /// below every number, the comparer convention generic sorts expect.
    pub fn sort_cmp(self, other: Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => ordered_key(self.0).cmp(&ordered_key(other.0)),
        }
    }

    /// Bits with ±0 and all NaN patterns collapsed, the hashing/`equals` key.
    fn canonical_bits(self) -> u32 {
        if self.is_nan() {
            Self::NAN.0
        } else if self.is_zero() {
            0
        } else {
            self.0
        }
    }
}

/// Monotonic integer key over non-NaN bit patterns: negative floats reversed,
/// positive floats offset above them. ±0 map to adjacent keys and must be
/// special-cased by callers that need them equal.
fn ordered_key(bits: u32) -> u32 {
    if bits & SIGN_MASK != 0 {
        !bits
    } else {
        bits | SIGN_MASK
    }
}

impl PartialEq for SoftF32 {
    /// IEEE equality: +0 == -0, NaN is not equal to anything.
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        self.0 == other.0 || (self.is_zero() && other.is_zero())
    }
}

impl PartialOrd for SoftF32 {
    /// Returns `None` when either operand is NaN, so `<`, `>`, `<=`, `>=`
    /// are all false on NaN, matching IEEE comparison semantics.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        if self.is_zero() && other.is_zero() {
            return Some(Ordering::Equal);
        }
        Some(ordered_key(self.0).cmp(&ordered_key(other.0)))
    }
}

impl Hash for SoftF32 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.canonical_bits());
    }
}

impl Default for SoftF32 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for SoftF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoftF32({} @ {:#010X})", self.to_f32(), self.0)
    }
}

impl fmt::Display for SoftF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

impl Serialize for SoftF32 {
    /// Serializes the raw bit pattern, not a decimal rendering, so values
    /// survive any round-trip bit-exactly (NaN payloads included).
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SoftF32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Self::from_bits)
    }
}
