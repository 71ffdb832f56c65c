use super::hash_table::node_vector;
use crate::lua_value::LuaTable;
use crate::runtime::TableResult;

impl LuaTable {
    /// Slots with a live value
    fn realuse(&self) -> usize {
        self.node.iter().filter(|n| !n.val.is_nil()).count()
    }

    /// Size of the next slot array: room for twice the live entries,
    /// counting `pending` live entries about to be inserted.
    /// A pending key occupies a slot even with a nil value, so the array
    /// always keeps a free slot after it goes in.
    pub(super) fn newsize(&self, pending: usize) -> TableResult<usize> {
        let realuse = self.realuse();
        self.global
            .redimension((2 * (realuse + pending)).max(realuse + 2))
    }

    /// Rebuild into a fresh slot array sized by `newsize`.
    ///
    /// Two passes over the old slots: first every entry whose new main
    /// position is free goes there, so no chain is built needlessly; then the
    /// rest take free slots from the cursor and are spliced in right after
    /// their main position. Entries with a nil value are dropped.
    ///
    /// On error nothing has been touched.
    pub(super) fn rehash(&mut self, pending: usize) -> TableResult<()> {
        self.debug_check(false);
        let oldsize = self.node.len();
        let newsize = self.newsize(pending)?;
        let fresh = node_vector(newsize)?;

        let mut nold = std::mem::replace(&mut self.node, fresh);
        self.global.release(oldsize);
        self.global.charge(newsize);
        self.firstfree = newsize - 1;

        // first pass: only entries whose main position is free.
        // `next` of an old slot is reused to remember the deferred main position
        let mut placed = 0usize;
        let mut deferred = 0usize;
        for old in nold.iter_mut() {
            old.next = None;
            if old.val.is_nil() {
                continue;
            }
            let Some(mp) = self.main_position(&old.key) else {
                continue;
            };
            if self.node[mp].key.is_nil() {
                let slot = &mut self.node[mp];
                slot.key = std::mem::take(&mut old.key);
                slot.val = std::mem::take(&mut old.val);
                placed += 1;
            } else {
                old.next = Some(mp);
                deferred += 1;
            }
        }

        self.seek_free();

        // second pass: colliding entries
        for old in nold.iter_mut() {
            let Some(mp) = old.next else {
                continue;
            };
            let e = self.firstfree;
            let next = self.node[mp].next;
            let slot = &mut self.node[e];
            slot.key = std::mem::take(&mut old.key);
            slot.val = std::mem::take(&mut old.val);
            slot.next = next;
            self.node[mp].next = Some(e);
            self.seek_free();
        }
        self.nfree = newsize - placed - deferred;

        log::debug!(
            "rehash: {} -> {} slots ({} deferred), nblocks={}",
            oldsize,
            newsize,
            deferred,
            self.global.nblocks()
        );
        self.debug_check(false);
        Ok(())
    }
}
