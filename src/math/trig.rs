//! Trigonometric functions.
//!
//! Sine uses the Bhaskara I rational approximation after reducing the
//! argument into [0, pi]; it trades ~1.6e-3 of absolute accuracy for a tiny,
//! branch-light kernel, which is plenty for steering and animation math.
//! Arctangent and arccosine follow the classic minimax recipes with
//! per-branch high/low correction constants, and hypot rescales by powers of
//! two so extreme magnitudes neither overflow nor flush to zero.

use super::soft_float::SoftF32;

const SIXTEEN: SoftF32 = SoftF32::from_bits(0x4180_0000);
const FOUR: SoftF32 = SoftF32::from_bits(0x4080_0000);
/// 5*pi^2, the Bhaskara denominator constant.
const FIVE_PI_SQ: SoftF32 = SoftF32::from_bits(0x4245_6460); /* 49.348022 */
const ONE_P5: SoftF32 = SoftF32::from_bits(0x3FC0_0000);

// atan: branch anchors atan(0.5), atan(1), atan(1.5), atan(inf) as
// high/low pairs
const ATAN_HI: [SoftF32; 4] = [
    SoftF32::from_bits(0x3EED_6338), /* 4.6364760399e-01 */
    SoftF32::from_bits(0x3F49_0FDA), /* 7.8539812565e-01 */
    SoftF32::from_bits(0x3F7B_985E), /* 9.8279368877e-01 */
    SoftF32::from_bits(0x3FC9_0FDA), /* 1.5707962513e+00 */
];
const ATAN_LO: [SoftF32; 4] = [
    SoftF32::from_bits(0x31AC_3769), /* 5.0121582440e-09 */
    SoftF32::from_bits(0x3322_2168), /* 3.7748947079e-08 */
    SoftF32::from_bits(0x3314_0FB4), /* 3.4473217170e-08 */
    SoftF32::from_bits(0x33A2_2168), /* 7.5497894159e-08 */
];
const AT: [SoftF32; 5] = [
    SoftF32::from_bits(0x3EAA_AAA9), /* 3.3333328366e-01 */
    SoftF32::from_bits(0xBE4C_CA98), /* -1.9999158382e-01 */
    SoftF32::from_bits(0x3E11_F50D), /* 1.4253635705e-01 */
    SoftF32::from_bits(0xBDDA_1247), /* -1.0648017377e-01 */
    SoftF32::from_bits(0x3D7C_AC25), /* 6.1687607318e-02 */
];

// atan2/acos anchors
const PI_LO: SoftF32 = SoftF32::from_bits(0xB3BB_BD2E); /* -8.7422776573e-08 */
const PI_QUARTER: SoftF32 = SoftF32::from_bits(0x3F49_0FDB);
const THREE_PI_QUARTER: SoftF32 = SoftF32::from_bits(0x4016_CBE4);
const PIO2_HI: SoftF32 = SoftF32::from_bits(0x3FC9_0FDA); /* 1.5707962513e+00 */
const PIO2_LO: SoftF32 = SoftF32::from_bits(0x33A2_2168); /* 7.5497894159e-08 */

// acos rational kernel
const PS0: SoftF32 = SoftF32::from_bits(0x3E2A_AA75); /* 1.6666586697e-01 */
const PS1: SoftF32 = SoftF32::from_bits(0xBD2F_13BA); /* -4.2743422091e-02 */
const PS2: SoftF32 = SoftF32::from_bits(0xBC0D_D36B); /* -8.6563630030e-03 */
const QS1: SoftF32 = SoftF32::from_bits(0xBF34_E5AC); /* -7.0662963390e-01 */

/// The shared asin/acos rational approximation of (asin(sqrt(z)) - sqrt(z)).
fn acos_r(z: SoftF32) -> SoftF32 {
    let p = z * (PS0 + z * (PS1 + z * PS2));
    let q = SoftF32::ONE + z * QS1;
    p / q
}

impl SoftF32 {
    /// Sine of `self` in radians, Bhaskara I approximation.
    ///
    /// The argument is reduced modulo 2*pi into [0, 2*pi), values in
    /// (pi, 2*pi) fold into [0, pi] with a sign flip, then
    /// sin(x) ~ 16x(pi-x) / (5*pi^2 - 4x(pi-x)). Absolute error stays below
    /// about 1.7e-3.
    pub fn sin(self) -> Self {
        if !self.is_finite() {
            return Self::NAN;
        }
        let mut x = self % Self::TWO_PI;
        if x < Self::ZERO {
            x = x + Self::TWO_PI;
        }
        let mut flip = false;
        if x > Self::PI {
            x = x - Self::PI;
            flip = true;
        }
        let t = x * (Self::PI - x);
        let r = (SIXTEEN * t) / (FIVE_PI_SQ - FOUR * t);
        if flip {
            -r
        } else {
            r
        }
    }

    /// Cosine via the quarter-turn phase shift.
    pub fn cos(self) -> Self {
        (self + Self::HALF_PI).sin()
    }

    /// Tangent as sin/cos; poles resolve to ±infinity through the division.
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    /// Arctangent. Four sub-ranges split at 0.4375, 1.1875 and 2.4375, each
    /// mapped into a small interval around one of the `ATAN_HI` anchors.
    pub fn atan(self) -> Self {
        if self.is_nan() {
            return Self::NAN;
        }
        let neg = self.is_sign_negative();
        let ix = self.abs().to_bits();
        if ix >= 0x4C80_0000 {
            // |x| >= 2^26 (or infinite): the limit is the answer
            let z = ATAN_HI[3];
            return if neg { -z } else { z };
        }
        let id: i32;
        let mut x = self;
        if ix < 0x3EE0_0000 {
            // |x| < 0.4375
            if ix < 0x3980_0000 {
                // |x| < 2^-12: atan(x) = x to full precision
                return self;
            }
            id = -1;
        } else {
            x = x.abs();
            if ix < 0x3F98_0000 {
                if ix < 0x3F30_0000 {
                    // [0.4375, 0.6875): center on atan(0.5)
                    id = 0;
                    x = (Self::TWO * x - Self::ONE) / (Self::TWO + x);
                } else {
                    // [0.6875, 1.1875): center on atan(1)
                    id = 1;
                    x = (x - Self::ONE) / (x + Self::ONE);
                }
            } else if ix < 0x401C_0000 {
                // [1.1875, 2.4375): center on atan(1.5)
                id = 2;
                x = (x - ONE_P5) / (Self::ONE + ONE_P5 * x);
            } else {
                // [2.4375, 2^26): fold through the reciprocal
                id = 3;
                x = -Self::ONE / x;
            }
        }
        let z = x * x;
        let w = z * z;
        // split odd/even polynomial halves
        let s1 = z * (AT[0] + w * (AT[2] + w * AT[4]));
        let s2 = w * (AT[1] + w * AT[3]);
        if id < 0 {
            return x - x * (s1 + s2);
        }
        let z = ATAN_HI[id as usize] - ((x * (s1 + s2) - ATAN_LO[id as usize]) - x);
        if neg {
            -z
        } else {
            z
        }
    }

    /// Four-quadrant arctangent of `self`/`x` (self is the ordinate).
    /// All sign/zero/infinity combinations resolve by table before the
    /// reduced ratio reaches `atan`.
    pub fn atan2(self, x: Self) -> Self {
        let y = self;
        if x.is_nan() || y.is_nan() {
            return Self::NAN;
        }
        let ix_full = x.to_bits();
        let iy_full = y.to_bits();
        if ix_full == 0x3F80_0000 {
            return y.atan();
        }
        // 2*sign(x) + sign(y) indexes the quadrant
        let m = ((iy_full >> 31) & 1) | ((ix_full >> 30) & 2);
        let ix = ix_full & 0x7FFF_FFFF;
        let iy = iy_full & 0x7FFF_FFFF;

        if iy == 0 {
            return match m {
                0 | 1 => y, // atan(±0, +anything) = ±0
                2 => Self::PI,
                _ => -Self::PI,
            };
        }
        if ix == 0 {
            return if m & 1 != 0 { -Self::HALF_PI } else { Self::HALF_PI };
        }
        if ix == 0x7F80_0000 {
            return if iy == 0x7F80_0000 {
                match m {
                    0 => PI_QUARTER,
                    1 => -PI_QUARTER,
                    2 => THREE_PI_QUARTER,
                    _ => -THREE_PI_QUARTER,
                }
            } else {
                match m {
                    0 => Self::ZERO,
                    1 => Self::NEG_ZERO,
                    2 => Self::PI,
                    _ => -Self::PI,
                }
            };
        }
        // |y/x| > 2^26: the ratio saturates to a vertical angle
        if ix.wrapping_add(26 << 23) < iy || iy == 0x7F80_0000 {
            return if m & 1 != 0 { -Self::HALF_PI } else { Self::HALF_PI };
        }

        // z = atan(|y/x|), with the x<0 underflow short-circuit
        let z = if m & 2 != 0 && iy.wrapping_add(26 << 23) < ix {
            Self::ZERO
        } else {
            (y / x).abs().atan()
        };
        match m {
            0 => z,
            1 => -z,
            2 => Self::PI - (z - PI_LO),
            _ => (z - PI_LO) - Self::PI,
        }
    }

    /// Arccosine. |x| >= 0.5 reconstructs through 2*(sqrt((1∓x)/2) +
    /// correction); |x| < 0.5 evaluates the rational kernel directly.
    pub fn acos(self) -> Self {
        let hx = self.to_bits();
        let ix = hx & 0x7FFF_FFFF;
        if ix >= 0x3F80_0000 {
            if ix == 0x3F80_0000 {
                if hx >> 31 != 0 {
                    return Self::TWO * PIO2_HI; // acos(-1) = pi
                }
                return Self::ZERO; // acos(1) = 0
            }
            return Self::NAN; // |x| > 1 or NaN
        }
        if ix < 0x3F00_0000 {
            // |x| < 0.5
            if ix <= 0x3280_0000 {
                // |x| < 2^-26: acos(x) rounds to pi/2
                return Self::HALF_PI;
            }
            return PIO2_HI - (self - (PIO2_LO - self * acos_r(self * self)));
        }
        if hx >> 31 != 0 {
            // x < -0.5
            let z = (Self::ONE + self) * Self::HALF;
            let s = z.sqrt();
            let w = acos_r(z) * s - PIO2_LO;
            return Self::TWO * (PIO2_HI - (s + w));
        }
        // x > 0.5
        let z = (Self::ONE - self) * Self::HALF;
        let s = z.sqrt();
        let df = Self::from_bits(s.to_bits() & 0xFFFF_F000);
        let c = (z - df * df) / (s + df);
        let w = acos_r(z) * s + c;
        Self::TWO * (df + w)
    }

    /// Arcsine as the complement of `acos`; domain errors propagate as NaN.
    pub fn asin(self) -> Self {
        if self.is_nan() {
            return Self::NAN;
        }
        Self::HALF_PI - self.acos()
    }

    /// sqrt(self^2 + other^2) without intermediate overflow or underflow.
    ///
    /// The larger magnitude leads, both operands rescale by a power of two
    /// when they sit near the exponent range ends, and the squares accumulate
    /// through a split high/low sum before the root is taken and rescaled.
    pub fn hypot(self, other: Self) -> Self {
        let mut ha = (self.to_bits() & 0x7FFF_FFFF) as i32;
        let mut hb = (other.to_bits() & 0x7FFF_FFFF) as i32;
        let (mut a, mut b) = if hb > ha {
            std::mem::swap(&mut ha, &mut hb);
            (other.abs(), self.abs())
        } else {
            (self.abs(), other.abs())
        };
        if ha - hb > 0x0F00_0000 {
            // magnitudes 2^30 apart: the smaller cannot affect the result
            return a + b;
        }
        let mut k: i32 = 0;
        if ha > 0x5880_0000 {
            // a > 2^50
            if ha >= 0x7F80_0000 {
                // infinity dominates NaN for hypot
                let mut w = a + b;
                if ha == 0x7F80_0000 {
                    w = a;
                }
                if hb == 0x7F80_0000 {
                    w = b;
                }
                return w;
            }
            // scale both down by 2^68
            ha -= 0x2200_0000;
            hb -= 0x2200_0000;
            k += 68;
            a = Self::from_bits(ha as u32);
            b = Self::from_bits(hb as u32);
        }
        if hb < 0x2680_0000 {
            // b < 2^-50
            if hb <= 0x007F_FFFF {
                // subnormal b or zero
                if hb == 0 {
                    return a;
                }
                let t1 = Self::from_bits(0x7E80_0000); // 2^126
                b = b * t1;
                a = a * t1;
                k -= 126;
                ha = a.to_bits() as i32;
                hb = b.to_bits() as i32;
            } else {
                // scale both up by 2^68
                ha += 0x2200_0000;
                hb += 0x2200_0000;
                k -= 68;
                a = Self::from_bits(ha as u32);
                b = Self::from_bits(hb as u32);
            }
        }

        let w = a - b;
        let w = if w > b {
            let t1 = Self::from_bits(ha as u32 & 0xFFFF_F000);
            let t2 = a - t1;
            (t1 * t1 - (b * (-b) - t2 * (a + t1))).sqrt()
        } else {
            let a2 = a + a;
            let y1 = Self::from_bits(hb as u32 & 0xFFFF_F000);
            let y2 = b - y1;
            let t1 = Self::from_bits(((ha + 0x0080_0000) as u32) & 0xFFFF_F000);
            let t2 = a2 - t1;
            (t1 * y1 - (w * (-w) - (t1 * y2 + t2 * b))).sqrt()
        };
        if k != 0 {
            let scale = Self::from_bits((0x3F80_0000i32 + (k << 23)) as u32);
            scale * w
        } else {
            w
        }
    }
}
