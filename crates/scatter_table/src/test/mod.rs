pub mod test_runtime;

use crate::*;

/// Table in its normal (not full) state must satisfy the invariant
pub(crate) fn assert_valid(table: &LuaTable) {
    if let Err(msg) = table.check_invariant(false) {
        panic!("invariant violated: {}", msg);
    }
}

pub(crate) fn int(i: i64) -> LuaValue {
    LuaValue::integer(i)
}
