// LuaTable - Lua 3 hash table
mod hash_table;
mod invariant;
mod rehash;

use std::rc::Rc;

use crate::gc::GlobalState;
use crate::lua_value::{LUA_T_ARRAY, LuaValue};
use crate::runtime::{Runtime, TableResult};
use hash_table::{Node, node_vector};

/// Default tag of a fresh table
const TAG_DEFAULT: i32 = LUA_T_ARRAY;

/// Fixed-capacity chained scatter table with Brent's variation.
///
/// Every occupied slot is either at its main position or in the chain that
/// starts at its main position, and that chain's head occupies its own main
/// position. Collisions therefore only ever happen between keys that share
/// a main position, and the table only grows when a new key needs its last
/// free slot.
pub struct LuaTable {
    node: Vec<Node>,

    /// Free-slot hint, only ever moves downwards between rehashes.
    /// Every slot above it is occupied.
    firstfree: usize,
    /// Empty slots left
    nfree: usize,

    htag: i32,
    marked: bool,

    global: Rc<GlobalState>,
}

/// Read-only view of one slot, for debugging and tests
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    pub key: &'a LuaValue,
    pub val: &'a LuaValue,
    pub next: Option<usize>,
}

impl LuaTable {
    /// Create a table able to hold `size` entries without rehashing.
    /// The table is not linked into the runtime's root list; use
    /// `Runtime::new_table` for that.
    pub fn new(runtime: &Runtime, size: usize) -> TableResult<Self> {
        Self::with_global(runtime.global().clone(), size)
    }

    pub(crate) fn with_global(global: Rc<GlobalState>, size: usize) -> TableResult<Self> {
        let dim = global.redimension(size.saturating_add(1))?;
        let node = node_vector(dim)?;
        global.charge(dim);
        log::trace!("table created: {} slots, nblocks={}", dim, global.nblocks());
        Ok(Self {
            node,
            firstfree: dim - 1,
            nfree: dim,
            htag: TAG_DEFAULT,
            marked: false,
            global,
        })
    }

    // ==================== Access ====================

    /// Value stored under `key`, `nil` if absent.
    /// `nil` and NaN cannot index a table and fail with `UnexpectedKeyType`.
    #[inline]
    pub fn get(&self, key: &LuaValue) -> TableResult<LuaValue> {
        let mp = self.key_position(key)?;
        Ok(self.value_at(self.find_in_chain(mp, key)))
    }

    /// Integer keys always hash, so this lookup cannot fail
    #[inline]
    pub fn get_int(&self, key: i64) -> LuaValue {
        self.value_at(self.find_node(&LuaValue::integer(key)))
    }

    #[inline]
    fn value_at(&self, idx: Option<usize>) -> LuaValue {
        match idx {
            Some(idx) => self.node[idx].val.clone(),
            None => LuaValue::Nil,
        }
    }

    /// Insert or update. Setting a value to `nil` keeps the key in its chain
    /// until the next rehash drops it.
    pub fn set(&mut self, key: LuaValue, val: LuaValue) -> TableResult<()> {
        let mp = self.key_position(&key)?;
        if let Some(idx) = self.find_in_chain(mp, &key) {
            self.node[idx].val = val;
            return Ok(());
        }
        self.insert_new_key(mp, key, val)
    }

    #[inline]
    pub fn set_int(&mut self, key: i64, val: LuaValue) -> TableResult<()> {
        self.set(LuaValue::integer(key), val)
    }

    /// Slot index holding `key`, or -1 if absent
    pub fn pos(&self, key: &LuaValue) -> TableResult<isize> {
        let mp = self.key_position(key)?;
        Ok(match self.find_in_chain(mp, key) {
            Some(idx) => idx as isize,
            None => -1,
        })
    }

    /// Next live entry after `key` in slot order; `nil` starts the traversal.
    /// A key that is not in the table ends it.
    pub fn next(&self, key: &LuaValue) -> TableResult<Option<(LuaValue, LuaValue)>> {
        let start = if key.is_nil() {
            0
        } else {
            match self.find_in_chain(self.key_position(key)?, key) {
                Some(idx) => idx + 1,
                None => return Ok(None),
            }
        };
        Ok(self.node[start..]
            .iter()
            .find(|n| !n.val.is_nil())
            .map(|n| (n.key.clone(), n.val.clone())))
    }

    /// Live entries (value not `nil`) in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&LuaValue, &LuaValue)> + '_ {
        self.node
            .iter()
            .filter(|n| !n.val.is_nil())
            .map(|n| (&n.key, &n.val))
    }

    // ==================== Introspection ====================

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Slot count
    #[inline]
    pub fn size(&self) -> usize {
        self.node.len()
    }

    #[inline]
    pub fn first_free(&self) -> usize {
        self.firstfree
    }

    pub fn node_at(&self, idx: usize) -> Option<NodeView<'_>> {
        self.node.get(idx).map(|n| NodeView {
            key: &n.key,
            val: &n.val,
            next: n.next,
        })
    }

    // ==================== Collector hooks ====================

    #[inline]
    pub fn tag(&self) -> i32 {
        self.htag
    }

    #[inline]
    pub fn set_tag(&mut self, tag: i32) {
        self.htag = tag;
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    #[inline]
    pub fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }
}

impl Drop for LuaTable {
    fn drop(&mut self) {
        self.global.release(self.node.len());
        log::trace!(
            "table freed: {} slots, nblocks={}",
            self.node.len(),
            self.global.nblocks()
        );
    }
}

impl std::fmt::Debug for LuaTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
