// LuaValue - Lua 3 TObject in Rust
//
// Lua 3 TObject:
// ```c
// typedef struct TObject {
//   lua_Type ttype;
//   Value value;
// } TObject;
// ```
//
// The tag set is closed: nil, number, string, userdata, array (table),
// proto, cproto, closure. Equality is numeric for numbers and by identity
// for everything else; identity kinds hash by address, strings and userdata
// by the hash cached at creation.
use std::fmt;
use std::rc::Rc;

use crate::lua_value::{LuaCProto, LuaClosure, LuaProto, LuaString, LuaUserdata, TableRef};

// ============ Type tags (lobject.h) ============
pub const LUA_T_USERDATA: i32 = 0;
pub const LUA_T_NUMBER: i32 = -1;
pub const LUA_T_STRING: i32 = -2;
pub const LUA_T_ARRAY: i32 = -3;
pub const LUA_T_PROTO: i32 = -4;
pub const LUA_T_CPROTO: i32 = -5;
pub const LUA_T_NIL: i32 = -6;
pub const LUA_T_CLOSURE: i32 = -7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuaValueKind {
    Nil,
    Number,
    String,
    Userdata,
    Array,
    Proto,
    CProto,
    Closure,
}

impl LuaValueKind {
    /// Numeric tag as the Lua 3 runtime numbers it
    pub const fn tag(self) -> i32 {
        match self {
            LuaValueKind::Nil => LUA_T_NIL,
            LuaValueKind::Number => LUA_T_NUMBER,
            LuaValueKind::String => LUA_T_STRING,
            LuaValueKind::Userdata => LUA_T_USERDATA,
            LuaValueKind::Array => LUA_T_ARRAY,
            LuaValueKind::Proto => LUA_T_PROTO,
            LuaValueKind::CProto => LUA_T_CPROTO,
            LuaValueKind::Closure => LUA_T_CLOSURE,
        }
    }
}

#[derive(Clone, Default)]
pub enum LuaValue {
    #[default]
    Nil,
    Number(f64),
    String(Rc<LuaString>),
    Userdata(Rc<LuaUserdata>),
    Array(TableRef),
    Proto(Rc<LuaProto>),
    CProto(Rc<LuaCProto>),
    Closure(Rc<LuaClosure>),
}

impl LuaValue {
    // ============ Constructors ============

    #[inline(always)]
    pub const fn nil() -> Self {
        LuaValue::Nil
    }

    #[inline(always)]
    pub const fn number(n: f64) -> Self {
        LuaValue::Number(n)
    }

    #[inline(always)]
    pub fn integer(i: i64) -> Self {
        LuaValue::Number(i as f64)
    }

    #[inline]
    pub fn table(t: &TableRef) -> Self {
        LuaValue::Array(t.clone())
    }

    // ============ Type checks ============

    #[inline(always)]
    pub fn kind(&self) -> LuaValueKind {
        match self {
            LuaValue::Nil => LuaValueKind::Nil,
            LuaValue::Number(_) => LuaValueKind::Number,
            LuaValue::String(_) => LuaValueKind::String,
            LuaValue::Userdata(_) => LuaValueKind::Userdata,
            LuaValue::Array(_) => LuaValueKind::Array,
            LuaValue::Proto(_) => LuaValueKind::Proto,
            LuaValue::CProto(_) => LuaValueKind::CProto,
            LuaValue::Closure(_) => LuaValueKind::Closure,
        }
    }

    #[inline(always)]
    pub fn ttype(&self) -> i32 {
        self.kind().tag()
    }

    #[inline(always)]
    pub fn is_nil(&self) -> bool {
        matches!(self, LuaValue::Nil)
    }

    // ============ Accessors ============

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            LuaValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral numbers only
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            LuaValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.2e18 => Some(*n as i64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LuaValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            LuaValue::Array(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_userdata(&self) -> Option<&Rc<LuaUserdata>> {
        match self {
            LuaValue::Userdata(u) => Some(u),
            _ => None,
        }
    }

    /// Address of the referenced entity, 0 for nil and numbers
    #[inline]
    pub fn raw_ptr_repr(&self) -> usize {
        match self {
            LuaValue::Nil | LuaValue::Number(_) => 0,
            LuaValue::String(s) => Rc::as_ptr(s) as usize,
            LuaValue::Userdata(u) => Rc::as_ptr(u) as usize,
            LuaValue::Array(t) => Rc::as_ptr(t) as usize,
            LuaValue::Proto(p) => Rc::as_ptr(p) as usize,
            LuaValue::CProto(c) => Rc::as_ptr(c) as usize,
            LuaValue::Closure(c) => Rc::as_ptr(c) as usize,
        }
    }

    // ============ Hashing ============

    /// Hash used to pick a key's main position.
    /// `None` for values that cannot index a table (nil, NaN).
    #[inline]
    pub fn key_hash(&self) -> Option<u64> {
        match self {
            LuaValue::Nil => None,
            LuaValue::Number(n) if n.is_nan() => None,
            // truncate, then reinterpret as an unsigned word
            LuaValue::Number(n) => Some(*n as i64 as u64),
            LuaValue::String(s) => Some(s.cached_hash()),
            LuaValue::Userdata(u) => Some(u.cached_hash()),
            _ => Some(self.raw_ptr_repr() as u64),
        }
    }
}

/// Raw equality (`luaO_equalObj`)
impl PartialEq for LuaValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LuaValue::Nil, LuaValue::Nil) => true,
            (LuaValue::Number(a), LuaValue::Number(b)) => a == b,
            (LuaValue::String(a), LuaValue::String(b)) => Rc::ptr_eq(a, b),
            (LuaValue::Userdata(a), LuaValue::Userdata(b)) => Rc::ptr_eq(a, b),
            (LuaValue::Array(a), LuaValue::Array(b)) => Rc::ptr_eq(a, b),
            (LuaValue::Proto(a), LuaValue::Proto(b)) => Rc::ptr_eq(a, b),
            (LuaValue::CProto(a), LuaValue::CProto(b)) => Rc::ptr_eq(a, b),
            (LuaValue::Closure(a), LuaValue::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for LuaValue {
    fn from(n: f64) -> Self {
        LuaValue::Number(n)
    }
}

impl From<i64> for LuaValue {
    fn from(i: i64) -> Self {
        LuaValue::integer(i)
    }
}

impl From<&TableRef> for LuaValue {
    fn from(t: &TableRef) -> Self {
        LuaValue::table(t)
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut buffer = itoa::Buffer::new();
        f.write_str(buffer.format(n as i64))
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Debug for LuaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuaValue::Nil => write!(f, "nil"),
            LuaValue::Number(n) => fmt_number(*n, f),
            LuaValue::String(s) => write!(f, "{:?}", s),
            LuaValue::Userdata(u) => {
                write!(f, "userdata<{}>(0x{:x})", u.tag(), self.raw_ptr_repr())
            }
            LuaValue::Array(_) => write!(f, "table(0x{:x})", self.raw_ptr_repr()),
            LuaValue::Proto(_) => write!(f, "function(0x{:x})", self.raw_ptr_repr()),
            LuaValue::CProto(c) => write!(f, "cfunction {}(0x{:x})", c.name, self.raw_ptr_repr()),
            LuaValue::Closure(_) => write!(f, "closure(0x{:x})", self.raw_ptr_repr()),
        }
    }
}

impl fmt::Display for LuaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LuaValue::Nil => write!(f, "nil"),
            LuaValue::Number(n) => fmt_number(*n, f),
            LuaValue::String(s) => f.write_str(s.as_str()),
            LuaValue::Userdata(_) => write!(f, "userdata: 0x{:x}", self.raw_ptr_repr()),
            LuaValue::Array(_) => write!(f, "table: 0x{:x}", self.raw_ptr_repr()),
            LuaValue::Proto(_) | LuaValue::CProto(_) | LuaValue::Closure(_) => {
                write!(f, "function: 0x{:x}", self.raw_ptr_repr())
            }
        }
    }
}
