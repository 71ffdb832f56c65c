// Runtime context
//
// The table itself is agnostic of any interpreter. Runtime bundles the
// collaborators a host provides around it: the shared GlobalState (block
// counter + dimensioning), the root table list and the string interner.
mod lua_error;
pub mod lua_limits;
mod redimension;
mod runtime_option;

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::gc::{GlobalState, StringInterner};
use crate::lua_value::{LuaTable, LuaUserdata, LuaValue, TableRef};
pub use lua_error::{TableError, TableResult};
pub use redimension::{PowerOfTwoDimension, PrimeDimension, Redimension};
pub use runtime_option::{DimensionPolicy, RuntimeOption};

pub struct Runtime {
    option: RuntimeOption,
    global: Rc<GlobalState>,
    /// Registered tables, oldest first; traversal runs newest first
    roottable: Vec<Weak<RefCell<LuaTable>>>,
    strings: StringInterner,
    udata_seq: u64,
}

impl Runtime {
    pub fn new(option: RuntimeOption) -> Self {
        let global = Rc::new(GlobalState::new(&option));
        Self {
            option,
            global,
            roottable: Vec::new(),
            strings: StringInterner::new(),
            udata_seq: 0,
        }
    }

    #[inline]
    pub fn option(&self) -> &RuntimeOption {
        &self.option
    }

    #[inline]
    pub(crate) fn global(&self) -> &Rc<GlobalState> {
        &self.global
    }

    /// Current value of the block counter
    #[inline]
    pub fn nblocks(&self) -> usize {
        self.global.nblocks()
    }

    // ==================== Tables ====================

    /// Create a table and link it into the root list
    pub fn new_table(&mut self, size: usize) -> TableResult<TableRef> {
        let table = Rc::new(RefCell::new(LuaTable::new(self, size)?));
        self.roottable.push(Rc::downgrade(&table));
        Ok(table)
    }

    /// Give up a table reference. Returns true if this was the last one and
    /// the slot array was released.
    pub fn free_table(&mut self, table: TableRef) -> bool {
        let released = Rc::strong_count(&table) == 1;
        drop(table);
        if released {
            self.sweep_roots();
        }
        released
    }

    /// Registered tables that are still alive, newest first
    pub fn live_tables(&self) -> Vec<TableRef> {
        self.roottable
            .iter()
            .rev()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Unlink dead tables from the root list; returns how many were removed
    pub fn sweep_roots(&mut self) -> usize {
        let before = self.roottable.len();
        self.roottable.retain(|weak| weak.strong_count() > 0);
        before - self.roottable.len()
    }

    // ==================== Strings / Userdata ====================

    pub fn new_string(&mut self, s: &str) -> LuaValue {
        LuaValue::String(self.strings.intern(s))
    }

    pub fn new_userdata(&mut self, payload: Box<dyn Any>, tag: i32) -> LuaValue {
        self.udata_seq += 1;
        let hash = self.strings.hash_word(self.udata_seq);
        LuaValue::Userdata(Rc::new(LuaUserdata::new(payload, tag, hash)))
    }

    #[inline]
    pub fn strings(&self) -> &StringInterner {
        &self.strings
    }

    #[inline]
    pub fn strings_mut(&mut self) -> &mut StringInterner {
        &mut self.strings
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeOption::default())
    }
}
