//! CIE 1931 lightness correction tables for PWM outputs.
//!
//! LED brightness driven by PWM is linear in duty cycle, but the eye is not.
//! A linear fade looks like it jumps out of black and then stalls near full
//! brightness. This crate builds integer lookup tables that map a linear input
//! (`0..=max_input`) to a PWM value (`0..=max_output`) following the CIE 1931
//! lightness curve, so equal input steps look like equal brightness steps.
//!
//! # Module Organization
//!
//! - [`curve`] - The CIE 1931 lightness function (f32/f64)
//! - [`table`] - Table parameters and the immutable [`PwmTable`]
//! - [`cache`] - [`TableCache`] and the process-wide cache functions
//!
//! # Quick Start
//!
//! ```rust
//! use pwm_lightness::get_table_default;
//!
//! // 8-bit input, PWM counter with 42 steps
//! let table = get_table_default(42).unwrap();
//! assert_eq!(table.len(), 256);
//! assert_eq!(table.get(0), Some(0));
//! assert_eq!(table.get(255), Some(42));
//! ```
//!
//! # Custom Ranges
//!
//! ```rust
//! use pwm_lightness::get_table;
//!
//! // 100 input steps onto a 16-bit timer
//! let table = get_table(65535, 100).unwrap();
//! let duty = table.lookup(50);
//! assert!(duty > 11_000 && duty < 13_000);
//! ```
//!
//! # Owning a Cache
//!
//! The free functions share one process-wide cache. Components that want to
//! control the cache lifetime can hold their own:
//!
//! ```rust
//! use pwm_lightness::TableCache;
//! use std::sync::Arc;
//!
//! let cache = TableCache::new();
//! let a = cache.get_table(255, 255).unwrap();
//! let b = cache.get_table(255, 255).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! assert!(a.is_compact());
//!
//! cache.clear();
//! let c = cache.get_table(255, 255).unwrap();
//! assert_eq!(a, c);
//! ```
//!
//! # Rounding
//!
//! Entries are rounded half to even, so `x.5` goes to the nearest even
//! integer. Table values are reproducible across platforms for a given
//! `(max_output, max_input)`.
//!
//! # Feature Flags
//!
//! - `std` (default): Enable the table cache and the process-wide cache
//! - `cli` (default): Build the `pwm-lightness` command-line tool
//!
//! # `no_std` Support
//!
//! Without `std` the crate needs only `alloc`; the curve and
//! [`PwmTable::build`] remain available:
//!
//! ```toml
//! pwm-lightness = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(all(test, not(feature = "std")))]
extern crate std;

// ============================================================================
// Public modules
// ============================================================================

/// Table cache and process-wide cache functions.
#[cfg(feature = "std")]
pub mod cache;

/// The CIE 1931 lightness curve.
pub mod curve;

/// Table parameters and table storage.
pub mod table;

// ============================================================================
// Internal modules
// ============================================================================

mod error;

// ============================================================================
// Re-exports
// ============================================================================

#[cfg(feature = "std")]
pub use cache::{TableCache, clear_cache, get_table, get_table_default};
pub use curve::{cie1931, cie1931_f64};
pub use error::{Error, Result};
pub use table::{CurveParams, DEFAULT_MAX_INPUT, Entries, PwmTable};

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_curve() {
        // Cached tables and direct curve evaluation agree at every index
        let table = TableCache::new().get_table(1000, 200).unwrap();

        for i in 0..=200u32 {
            let direct = (cie1931_f64(i as f64 / 200.0) * 1000.0).round_ties_even() as u32;
            assert_eq!(
                table.lookup(i as usize),
                direct,
                "Mismatch at {}: table={}, direct={}",
                i,
                table.lookup(i as usize),
                direct
            );
        }
    }

    #[test]
    fn test_default_input_range() {
        let table = TableCache::new().get_table_default(7).unwrap();
        assert_eq!(table.max_input(), DEFAULT_MAX_INPUT);
        assert_eq!(table.len(), 256);
        assert_eq!(table.lookup(255), 7);
    }
}
