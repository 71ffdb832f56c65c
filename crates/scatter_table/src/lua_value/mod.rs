// Lua 3 value model
// Numbers by value, everything else shared by identity through Rc
mod lua_table;
mod lua_value;

use smol_str::SmolStr;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use lua_table::{LuaTable, NodeView};
pub use lua_value::{
    LUA_T_ARRAY, LUA_T_CLOSURE, LUA_T_CPROTO, LUA_T_NIL, LUA_T_NUMBER, LUA_T_PROTO,
    LUA_T_STRING, LUA_T_USERDATA, LuaValue, LuaValueKind,
};

/// Shared handle to a table; `LuaValue::Array` holds one of these
pub type TableRef = Rc<RefCell<LuaTable>>;

/// Host function signature behind a `CProto`
pub type CFunction = fn(&[LuaValue]) -> LuaValue;

/// Interned string with its hash computed once at creation
pub struct LuaString {
    hash: u64, // Keep hash first for alignment
    data: SmolStr,
}

impl LuaString {
    /// Create LuaString with pre-computed hash
    #[inline]
    pub fn with_hash(data: SmolStr, hash: u64) -> Self {
        LuaString { hash, data }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    #[inline]
    pub fn cached_hash(&self) -> u64 {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for LuaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.data.as_str())
    }
}

/// Opaque host object with a user tag
pub struct LuaUserdata {
    hash: u64,
    tag: i32,
    payload: Box<dyn Any>,
}

impl LuaUserdata {
    pub fn new(payload: Box<dyn Any>, tag: i32, hash: u64) -> Self {
        Self { hash, tag, payload }
    }

    #[inline]
    pub fn cached_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn tag(&self) -> i32 {
        self.tag
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

/// Compiled Lua function prototype. Only identity matters to tables.
#[derive(Debug, Default)]
pub struct LuaProto {
    pub source: SmolStr,
    pub line_defined: u32,
}

/// Host function registered with the runtime
pub struct LuaCProto {
    pub name: SmolStr,
    pub func: CFunction,
}

impl LuaCProto {
    pub fn new(name: &str, func: CFunction) -> Self {
        Self {
            name: SmolStr::new(name),
            func,
        }
    }

    #[inline]
    pub fn call(&self, args: &[LuaValue]) -> LuaValue {
        (self.func)(args)
    }
}

/// Function plus captured upvalues
pub struct LuaClosure {
    pub function: LuaValue,
    pub upvalues: Vec<LuaValue>,
}

impl LuaClosure {
    pub fn new(function: LuaValue, upvalues: Vec<LuaValue>) -> Self {
        Self { function, upvalues }
    }
}
