// Collector hooks shared by every table of a runtime
//
// Lua 3 keeps two process-wide pieces of state for tables:
// - nblocks: a block counter, charged gcsize(size) per slot array
// - roottable: the list of live tables the collector walks
//
// Here the counter lives in GlobalState, which every table holds through an
// Rc so that setnodevector / rehash / free can charge and release it without
// a runtime argument. The root list stays in Runtime.

mod string_interner;

use std::cell::Cell;

use crate::runtime::{
    Redimension, RuntimeOption, TableError, TableResult, lua_limits::GC_SLOTS_PER_BLOCK,
};
pub use string_interner::StringInterner;

/// Blocks charged for a slot array of `size` slots
#[inline(always)]
pub const fn gcsize(size: usize) -> usize {
    1 + size / GC_SLOTS_PER_BLOCK
}

pub struct GlobalState {
    nblocks: Cell<usize>,
    dimension: Box<dyn Redimension>,
    max_table_size: usize,
    check_invariants: bool,
}

impl GlobalState {
    pub fn new(option: &RuntimeOption) -> Self {
        Self {
            nblocks: Cell::new(0),
            dimension: option.dimension.build(),
            max_table_size: option.max_table_size,
            check_invariants: option.check_invariants,
        }
    }

    #[inline]
    pub fn nblocks(&self) -> usize {
        self.nblocks.get()
    }

    /// Charge a freshly created slot array
    #[inline]
    pub(crate) fn charge(&self, size: usize) {
        self.nblocks.set(self.nblocks.get() + gcsize(size));
    }

    /// Release a slot array that is being dropped
    #[inline]
    pub(crate) fn release(&self, size: usize) {
        debug_assert!(
            self.nblocks.get() >= gcsize(size),
            "releasing {} slots that were never charged",
            size
        );
        self.nblocks.set(self.nblocks.get().saturating_sub(gcsize(size)));
    }

    /// Dimension a slot count, honoring the configured cap
    pub(crate) fn redimension(&self, n: usize) -> TableResult<usize> {
        let size = self.dimension.redimension(n)?;
        if size == 0 || size > self.max_table_size {
            return Err(TableError::AllocationFailure);
        }
        Ok(size)
    }

    #[inline(always)]
    pub(crate) fn check_invariants(&self) -> bool {
        self.check_invariants
    }
}
