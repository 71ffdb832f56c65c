use crate::lua_value::LuaTable;

impl LuaTable {
    /// Is slot `n` reachable from `m` through `next` links?
    /// Bounded by the slot count, so a cyclic chain reports false.
    fn listfind(&self, m: usize, n: usize) -> bool {
        let mut cursor = Some(m);
        for _ in 0..self.node.len() {
            match cursor {
                Some(idx) if idx == n => return true,
                Some(idx) => cursor = self.node[idx].next,
                None => return false,
            }
        }
        false
    }

    /// Does the chain starting at `m` end within `size` steps?
    fn chain_terminates(&self, m: usize) -> bool {
        let mut cursor = Some(m);
        for _ in 0..=self.node.len() {
            match cursor {
                Some(idx) => cursor = self.node[idx].next,
                None => return true,
            }
        }
        false
    }

    /// Check the table invariant.
    ///
    /// `filled` is a table with every slot occupied and the cursor at slot 0.
    /// Insertion grows the table before that happens, so a live table is
    /// checked with `filled == false`: the cursor slot must be empty.
    pub fn check_invariant(&self, filled: bool) -> Result<(), &'static str> {
        let size = self.node.len();
        if self.firstfree >= size {
            return Err("firstfree out of range");
        }

        let mut n = 0;
        while n < self.firstfree {
            let key = &self.node[n].key;
            if !(key.is_nil() || self.main_position(key) == Some(n)) {
                return Err("all elements before firstfree are empty or in their main positions");
            }
            n += 1;
        }

        if !filled {
            if !self.node[n].key.is_nil() {
                return Err("firstfree must be empty");
            }
            n += 1;
        } else if n != 0 {
            return Err("table cannot have empty places");
        }

        while n < size {
            let key = &self.node[n].key;
            if key.is_nil() {
                return Err("cannot exist empty elements after firstfree");
            }
            let Some(mp) = self.main_position(key) else {
                return Err("invalid key stored in table");
            };
            if n != mp && self.slot_main_position(mp) != mp {
                return Err("either an element or its colliding element is in its main position");
            }
            if !self.listfind(mp, n) {
                return Err("element is in its main position list");
            }
            n += 1;
        }

        if self.node.iter().filter(|n| n.key.is_nil()).count() != self.nfree {
            return Err("free slot count is out of sync");
        }

        for m in 0..size {
            if !self.chain_terminates(m) {
                return Err("chain is cyclic");
            }
            if self.node[m].key.is_nil() && !self.node[m].val.is_nil() {
                return Err("empty slot holds a value");
            }
        }
        Ok(())
    }

    /// Run `check_invariant` in debug builds, or when the runtime asked for it
    #[inline(always)]
    pub(super) fn debug_check(&self, filled: bool) {
        if cfg!(debug_assertions) || self.global.check_invariants() {
            if let Err(msg) = self.check_invariant(filled) {
                panic!("invalid table: {}", msg);
            }
        }
    }
}
