//! CIE 1931 lightness curve.
//!
//! Maps a normalized lightness `L*` in \[0, 1\] to the relative luminance that
//! produces it, so that equal steps in the input are perceived as equal steps
//! in brightness:
//!
//! - Linear segment near black: `Y = L / 903.3` for `L <= 8`
//! - Cubic segment elsewhere: `Y = ((L + 16) / 116)^3`
//!
//! where `L = L* * 100`.

#[cfg(not(feature = "std"))]
use num_traits::Float;

// CIE 1931 constants. 903.3 is the commonly cited kappa; sources quoting
// 902.3 carry a typo.

/// Upper bound (in percent) of the linear segment.
const LINEAR_THRESHOLD: f64 = 8.0;
const LINEAR_THRESHOLD_F32: f32 = LINEAR_THRESHOLD as f32;

/// Slope divisor of the linear segment.
const KAPPA: f64 = 903.3;
const KAPPA_F32: f32 = KAPPA as f32;

/// Offset and scale of the cubic segment.
const OFFSET: f64 = 16.0;
const OFFSET_F32: f32 = OFFSET as f32;
const SCALE: f64 = 116.0;
const SCALE_F32: f32 = SCALE as f32;

/// Convert normalized lightness to relative luminance (f64).
///
/// Input: lightness `L*` in \[0, 1\]
/// Output: relative luminance in \[0, 1\]
///
/// No clamping is applied; inputs outside \[0, 1\] follow the same formula.
/// This is the variant used to build PWM tables.
#[inline]
pub fn cie1931_f64(l_star: f64) -> f64 {
    let l = l_star * 100.0;
    if l <= LINEAR_THRESHOLD {
        l / KAPPA
    } else {
        ((l + OFFSET) / SCALE).powf(3.0)
    }
}

/// Convert normalized lightness to relative luminance (f32).
///
/// Input: lightness `L*` in \[0, 1\]
/// Output: relative luminance in \[0, 1\]
///
/// No clamping is applied. Prefer [`cie1931_f64`] when the result is scaled
/// to large integer ranges.
#[inline]
pub fn cie1931(l_star: f32) -> f32 {
    let l = l_star * 100.0;
    if l <= LINEAR_THRESHOLD_F32 {
        l / KAPPA_F32
    } else {
        ((l + OFFSET_F32) / SCALE_F32).powf(3.0)
    }
}
