use crate::lua_value::{LuaTable, LuaValue};
use crate::runtime::{TableError, TableResult};

/// One slot. Empty iff `key` is nil.
/// `next` is the index of the following slot in the same chain.
#[derive(Clone, Default)]
pub(super) struct Node {
    pub(super) key: LuaValue,
    pub(super) val: LuaValue,
    pub(super) next: Option<usize>,
}

/// Fresh slot array of `size` empty nodes
pub(super) fn node_vector(size: usize) -> TableResult<Vec<Node>> {
    let mut node = Vec::new();
    node.try_reserve_exact(size)
        .map_err(|_| TableError::AllocationFailure)?;
    node.resize_with(size, Node::default);
    Ok(node)
}

impl LuaTable {
    /// Main position of `key`: its hash modulo the slot count.
    /// `None` for keys that cannot index a table.
    #[inline(always)]
    pub fn main_position(&self, key: &LuaValue) -> Option<usize> {
        let hash = key.key_hash()?;
        Some((hash % self.node.len() as u64) as usize)
    }

    #[inline(always)]
    pub(super) fn key_position(&self, key: &LuaValue) -> TableResult<usize> {
        self.main_position(key)
            .ok_or(TableError::UnexpectedKeyType)
    }

    /// Main position of whatever key sits in slot `idx` (an empty slot is
    /// its own main position)
    #[inline]
    pub(super) fn slot_main_position(&self, idx: usize) -> usize {
        self.main_position(&self.node[idx].key).unwrap_or(idx)
    }

    #[inline]
    pub(super) fn find_node(&self, key: &LuaValue) -> Option<usize> {
        let mp = self.main_position(key)?;
        self.find_in_chain(mp, key)
    }

    /// Walk the chain starting at `mp` looking for `key`
    #[inline]
    pub(super) fn find_in_chain(&self, mp: usize, key: &LuaValue) -> Option<usize> {
        let mut cursor = Some(mp);
        while let Some(idx) = cursor {
            let node = &self.node[idx];
            if node.key == *key {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    /// Move the free cursor down to an empty slot.
    /// Returns false if it reached slot 0 without finding one.
    pub(super) fn seek_free(&mut self) -> bool {
        loop {
            if self.node[self.firstfree].key.is_nil() {
                return true;
            }
            if self.firstfree == 0 {
                return false;
            }
            self.firstfree -= 1;
        }
    }

    /// Place a key known to be absent. `mp` is its main position.
    ///
    /// If the main position is taken by a key that does not belong there,
    /// that key moves to the free slot and the new key takes its main
    /// position; otherwise the new key goes to the free slot, chained right
    /// after the main position.
    ///
    /// A key that would take the last free slot grows the table first. If
    /// that growth fails the table is left as it was.
    pub(super) fn insert_new_key(
        &mut self,
        mut mp: usize,
        key: LuaValue,
        val: LuaValue,
    ) -> TableResult<()> {
        if self.nfree <= 1 {
            self.rehash(usize::from(!val.is_nil()))?;
            mp = self.key_position(&key)?;
        }

        if !self.node[mp].key.is_nil() {
            let n = self.firstfree;
            // a displaced key can only sit above the cursor
            let othern = if mp > n {
                self.slot_main_position(mp)
            } else {
                mp
            };
            if othern != mp {
                let mut prev = othern;
                while let Some(next) = self.node[prev].next {
                    if next == mp {
                        break;
                    }
                    prev = next;
                }
                debug_assert_eq!(self.node[prev].next, Some(mp), "colliding node not in its chain");
                self.node[prev].next = Some(n);
                // the moved node keeps its own `next`
                self.node[n] = std::mem::take(&mut self.node[mp]);
                log::trace!("brent move: slot {} -> {} (chain head {})", mp, n, othern);
            } else {
                self.node[n].next = self.node[mp].next;
                self.node[mp].next = Some(n);
                mp = n;
            }
        }

        let slot = &mut self.node[mp];
        slot.key = key;
        slot.val = val;
        self.nfree -= 1;

        let found = self.seek_free();
        debug_assert!(found, "insert took the last free slot");
        self.debug_check(false);
        Ok(())
    }
}
