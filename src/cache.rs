//! Table cache.
//!
//! [`TableCache`] owns the tables it has built and hands out shared
//! references to them. A key is built once per cache generation: the store
//! lock is held while a missing table is computed, so concurrent requests for
//! the same parameters wait for the first build instead of repeating it.
//!
//! The free functions [`get_table`], [`get_table_default`] and
//! [`clear_cache`] operate on a lazily created process-wide cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::error::Result;
use crate::table::{CurveParams, DEFAULT_MAX_INPUT, PwmTable};

/// Process-wide cache used by the free functions.
static GLOBAL_CACHE: OnceLock<TableCache> = OnceLock::new();

/// Store of computed lightness tables keyed by their parameters.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: Mutex<HashMap<CurveParams, Arc<PwmTable>>>,
    builds: AtomicUsize,
}

impl TableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CurveParams, Arc<PwmTable>>> {
        // Entries are inserted only once fully built, so a poisoned map is
        // still consistent.
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Get the table for validated parameters, building it on first use.
    ///
    /// Repeated calls return the same `Arc` until [`clear`](Self::clear).
    pub fn get(&self, params: CurveParams) -> Arc<PwmTable> {
        let mut tables = self.lock();
        if let Some(table) = tables.get(&params) {
            tracing::trace!(
                max_output = params.max_output(),
                max_input = params.max_input(),
                "lightness table cache hit"
            );
            return Arc::clone(table);
        }

        let table = Arc::new(PwmTable::build(params));
        self.builds.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            max_output = params.max_output(),
            max_input = params.max_input(),
            compact = table.is_compact(),
            len = table.len(),
            "built lightness table"
        );
        tables.insert(params, Arc::clone(&table));
        table
    }

    /// Get the table mapping `0..=max_input` to `0..=max_output`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// either value is zero. The cache is left untouched.
    pub fn get_table(&self, max_output: u32, max_input: u32) -> Result<Arc<PwmTable>> {
        let params = CurveParams::new(max_output, max_input)?;
        Ok(self.get(params))
    }

    /// Get the table for an 8-bit input range (`max_input` = 255).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `max_output` is zero.
    pub fn get_table_default(&self, max_output: u32) -> Result<Arc<PwmTable>> {
        self.get_table(max_output, DEFAULT_MAX_INPUT)
    }

    /// Drop every cached table.
    ///
    /// Tables already handed out stay valid; later requests build new ones.
    pub fn clear(&self) {
        let mut tables = self.lock();
        let dropped = tables.len();
        tables.clear();
        tracing::debug!(dropped, "cleared lightness table cache");
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` if no table is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of tables built since the cache was created, across clears.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// `true` if a table for `params` is cached.
    pub fn contains(&self, params: CurveParams) -> bool {
        self.lock().contains_key(&params)
    }
}

/// The process-wide cache behind [`get_table`] and [`clear_cache`].
pub fn global() -> &'static TableCache {
    GLOBAL_CACHE.get_or_init(TableCache::new)
}

/// Get a table from the process-wide cache.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
/// either value is zero.
///
/// # Examples
///
/// ```
/// let table = pwm_lightness::get_table(100, 100).unwrap();
/// assert_eq!(table.get(50), Some(18));
/// ```
pub fn get_table(max_output: u32, max_input: u32) -> Result<Arc<PwmTable>> {
    global().get_table(max_output, max_input)
}

/// Get a table with an 8-bit input range from the process-wide cache.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
/// `max_output` is zero.
pub fn get_table_default(max_output: u32) -> Result<Arc<PwmTable>> {
    global().get_table_default(max_output)
}

/// Empty the process-wide cache.
pub fn clear_cache() {
    global().clear();
}
