//! PWM lightness tables.
//!
//! A table maps every raw input in `0..=max_input` to a corrected PWM value in
//! `0..=max_output`. Entries are stored in the narrowest integer type that can
//! hold `max_output`:
//! - up to 255: `u8` (1 byte per entry)
//! - up to 65535: `u16` (2 bytes per entry)
//! - otherwise: `u32` (4 bytes per entry)
//!
//! Storage width never changes the values a table reports.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use num_traits::Float;

use crate::curve::cie1931_f64;
use crate::error::{Error, Result};

/// Input range used when a caller does not pick one (8-bit input).
pub const DEFAULT_MAX_INPUT: u32 = 255;

const U8_MAX: u32 = u8::MAX as u32;
const U16_MAX: u32 = u16::MAX as u32;

/// Round to the nearest integer, ties to even.
#[cfg(feature = "std")]
#[inline]
fn round_half_even(x: f64) -> f64 {
    x.round_ties_even()
}

/// Round to the nearest integer, ties to even.
#[cfg(not(feature = "std"))]
#[inline]
fn round_half_even(x: f64) -> f64 {
    round_half_even_core(x)
}

// `f64::round_ties_even` lives in std; this builds it from `round`, which
// rounds ties away from zero. Halving a tie `k + 0.5` and rounding again
// lands on `k / 2` or `(k + 1) / 2`, whichever makes the result even.
#[cfg_attr(feature = "std", allow(dead_code))]
fn round_half_even_core(x: f64) -> f64 {
    let rounded = Float::round(x);
    if Float::abs(rounded - x) == 0.5 {
        2.0 * Float::round(x / 2.0)
    } else {
        rounded
    }
}

/// Parameters identifying one lightness table.
///
/// `(max_output, max_input)` is not commutative: `(50, 300)` and `(300, 50)`
/// are different tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveParams {
    max_output: u32,
    max_input: u32,
}

impl CurveParams {
    /// Validate and create table parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either value is zero.
    pub fn new(max_output: u32, max_input: u32) -> Result<Self> {
        if max_output == 0 {
            return Err(Error::InvalidArgument {
                name: "max_output",
                value: max_output,
            });
        }
        if max_input == 0 {
            return Err(Error::InvalidArgument {
                name: "max_input",
                value: max_input,
            });
        }
        Ok(Self {
            max_output,
            max_input,
        })
    }

    /// Parameters for an 8-bit input range ([`DEFAULT_MAX_INPUT`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `max_output` is zero.
    pub fn with_default_input(max_output: u32) -> Result<Self> {
        Self::new(max_output, DEFAULT_MAX_INPUT)
    }

    /// Largest value a table entry can take.
    #[inline]
    pub fn max_output(&self) -> u32 {
        self.max_output
    }

    /// Largest raw input (the last table index).
    #[inline]
    pub fn max_input(&self) -> u32 {
        self.max_input
    }

    /// Number of entries in the table (`max_input + 1`).
    #[inline]
    pub fn table_len(&self) -> usize {
        self.max_input as usize + 1
    }
}

/// Backing storage of a [`PwmTable`].
#[derive(Debug, Clone)]
pub enum Entries {
    /// One byte per entry, used when `max_output <= 255`.
    U8(Box<[u8]>),
    /// Two bytes per entry, used when `max_output <= 65535`.
    U16(Box<[u16]>),
    /// Four bytes per entry.
    U32(Box<[u32]>),
}

/// Immutable CIE 1931 lightness table.
///
/// Equality compares entry values only, so a rebuilt table equals the one it
/// replaces.
#[derive(Debug, Clone)]
pub struct PwmTable {
    params: CurveParams,
    entries: Entries,
}

impl PwmTable {
    /// Build a table without consulting any cache.
    ///
    /// Entry `i` is `cie1931(i / max_input) * max_output`, rounded half to
    /// even.
    pub fn build(params: CurveParams) -> Self {
        let max_input = params.max_input as f64;
        let max_output = params.max_output as f64;
        let values = (0..=params.max_input)
            .map(move |i| round_half_even(cie1931_f64(i as f64 / max_input) * max_output));

        // Every value lies in [0, max_output], so the narrowing casts are exact.
        let entries = match params.max_output {
            m if m <= U8_MAX => Entries::U8(values.map(|v| v as u8).collect()),
            m if m <= U16_MAX => Entries::U16(values.map(|v| v as u16).collect()),
            _ => Entries::U32(values.map(|v| v as u32).collect()),
        };

        Self { params, entries }
    }

    /// Parameters this table was built from.
    #[inline]
    pub fn params(&self) -> CurveParams {
        self.params
    }

    /// Largest value in the table.
    #[inline]
    pub fn max_output(&self) -> u32 {
        self.params.max_output
    }

    /// Largest valid index.
    #[inline]
    pub fn max_input(&self) -> u32 {
        self.params.max_input
    }

    /// Number of entries (`max_input + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::U8(t) => t.len(),
            Entries::U16(t) => t.len(),
            Entries::U32(t) => t.len(),
        }
    }

    /// Always `false` for a built table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value for raw input `index`, or `None` past `max_input`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u32> {
        match &self.entries {
            Entries::U8(t) => t.get(index).map(|&v| v as u32),
            Entries::U16(t) => t.get(index).map(|&v| v as u32),
            Entries::U32(t) => t.get(index).copied(),
        }
    }

    /// Direct lookup with the index clamped to `max_input`.
    #[inline]
    pub fn lookup(&self, index: usize) -> u32 {
        let index = index.min(self.len() - 1);
        match &self.entries {
            Entries::U8(t) => t[index] as u32,
            Entries::U16(t) => t[index] as u32,
            Entries::U32(t) => t[index],
        }
    }

    /// Iterate over all values in index order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).map(move |i| self.lookup(i))
    }

    /// Copy the values into a `Vec<u32>`.
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// `true` if entries are stored one byte each.
    #[inline]
    pub fn is_compact(&self) -> bool {
        matches!(self.entries, Entries::U8(_))
    }

    /// Raw bytes of a compact table, ready to copy into a PWM lookup buffer.
    ///
    /// Returns `None` if `max_output > 255`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.entries {
            Entries::U8(t) => Some(t),
            _ => None,
        }
    }

    /// Get the backing storage.
    pub fn entries(&self) -> &Entries {
        &self.entries
    }
}

impl PartialEq for PwmTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for PwmTable {}

/// Formats the table as comma-separated values, e.g. `0,0,1,...,255`.
impl fmt::Display for PwmTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::string::ToString;

    fn build(max_output: u32, max_input: u32) -> PwmTable {
        PwmTable::build(CurveParams::new(max_output, max_input).unwrap())
    }

    #[test]
    fn test_params_reject_zero() {
        assert_eq!(
            CurveParams::new(0, 255),
            Err(Error::InvalidArgument {
                name: "max_output",
                value: 0
            })
        );
        assert_eq!(
            CurveParams::new(255, 0),
            Err(Error::InvalidArgument {
                name: "max_input",
                value: 0
            })
        );
        assert!(CurveParams::with_default_input(0).is_err());
    }

    #[test]
    fn test_default_input() {
        let params = CurveParams::with_default_input(42).unwrap();
        assert_eq!(params.max_input(), 255);
        assert_eq!(params.table_len(), 256);
    }

    #[test]
    fn test_table_8bit() {
        let table = build(255, 255);

        // Check boundaries
        assert_eq!(table.get(0), Some(0));
        assert_eq!(table.get(255), Some(255));
        assert_eq!(table.get(256), None);
        assert_eq!(table.len(), 256);
        assert!(table.is_compact());
        assert_eq!(table.as_bytes().map(<[u8]>::len), Some(256));
    }

    #[test]
    fn test_table_storage_width() {
        assert!(matches!(build(255, 10).entries(), Entries::U8(_)));
        assert!(matches!(build(256, 10).entries(), Entries::U16(_)));
        assert!(matches!(build(65535, 10).entries(), Entries::U16(_)));
        assert!(matches!(build(65536, 10).entries(), Entries::U32(_)));
        assert!(build(2345, 99).as_bytes().is_none());
    }

    #[test]
    fn test_endpoints_exact() {
        for (max_output, max_input) in [(1, 1), (42, 255), (2345, 99), (65536, 7), (u32::MAX, 3)] {
            let table = build(max_output, max_input);
            assert_eq!(table.len(), max_input as usize + 1);
            assert_eq!(table.lookup(0), 0);
            assert_eq!(
                table.lookup(max_input as usize),
                max_output,
                "endpoint mismatch for ({}, {})",
                max_output,
                max_input
            );
        }
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let table = build(1000, 500);
        let values = table.to_vec();
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "table not monotonic: {:?}", pair);
        }
        assert!(values.iter().all(|&v| v <= 1000));
    }

    #[test]
    fn test_middle_grey() {
        // 50% lightness is 18% luminance
        assert_eq!(build(100, 100).get(50), Some(18));
    }

    #[test]
    fn test_lookup_clamps() {
        let table = build(42, 10);
        assert_eq!(table.lookup(10), 42);
        assert_eq!(table.lookup(1000), 42);
    }

    #[test]
    fn test_equality_ignores_storage() {
        let a = build(300, 50);
        let b = build(300, 50);
        assert_eq!(a, b);
        assert_ne!(build(300, 50), build(50, 300));
        assert_ne!(build(300, 255), build(300, 50));
    }

    #[test]
    fn test_core_rounding_matches_ties_even() {
        for (x, expected) in [
            (0.5, 0.0),
            (1.5, 2.0),
            (2.5, 2.0),
            (3.5, 4.0),
            (18.4, 18.0),
            (18.6, 19.0),
            (-0.5, -0.0),
            (-1.5, -2.0),
            (4294967294.5, 4294967294.0),
        ] {
            assert_eq!(round_half_even_core(x), expected, "rounding {}", x);
        }

        for i in 0..2000 {
            let x = i as f64 * 0.25;
            assert_eq!(
                round_half_even_core(x),
                round_half_even(x),
                "core and std rounding disagree at {}",
                x
            );
        }
    }

    #[test]
    fn test_display() {
        let table = build(4, 4);
        let text = table.to_string();
        assert!(text.starts_with("0,"), "{}", text);
        assert!(text.ends_with(",4"), "{}", text);
        assert_eq!(text.split(',').count(), 5);
    }
}
