// Lua 3 table runtime
// Chained scatter hash table with Brent's variation, plus the value model
// and runtime hooks it needs

#[cfg(test)]
mod test;

pub mod gc;
pub mod lua_value;
pub mod runtime;

pub use gc::{GlobalState, StringInterner, gcsize};
pub use lua_value::{
    CFunction, LuaCProto, LuaClosure, LuaProto, LuaString, LuaTable, LuaUserdata, LuaValue,
    LuaValueKind, NodeView, TableRef,
};
pub use runtime::{
    DimensionPolicy, PowerOfTwoDimension, PrimeDimension, Redimension, Runtime, RuntimeOption,
    TableError, TableResult,
};
