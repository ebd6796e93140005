//! Generic value representation for proxied calls
//!
//! Every argument and result of a proxied call crosses the handler boundary
//! as a [`Value`] — the equivalent of boxing in a reflective runtime.
//! Primitives are stored inline; strings and object references are
//! reference-counted and shared.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::TypeTag;

/// Generic argument/result value.
///
/// # Thread safety
///
/// `Value` is `Send + Sync`; heap variants hold `Arc`s, so cloning is cheap
/// and never deep-copies.
#[derive(Clone)]
pub enum Value {
    /// Absent value; also what dispatch yields for void methods
    Null,
    /// Boolean
    Bool(bool),
    /// 16-bit signed integer
    I16(i16),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit signed integer
    I32(i32),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer
    U64(u64),
    /// IEEE single-precision float
    F32(f32),
    /// IEEE double-precision float
    F64(f64),
    /// Enumerated value, carried as its underlying integral representation
    Enum(i64),
    /// Immutable shared string
    Str(Arc<str>),
    /// Opaque shared object reference
    Ref(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a 16-bit signed integer value
    pub fn i16(i: i16) -> Self {
        Value::I16(i)
    }

    /// Create a 16-bit unsigned integer value
    pub fn u16(i: u16) -> Self {
        Value::U16(i)
    }

    /// Create a 32-bit signed integer value
    pub fn i32(i: i32) -> Self {
        Value::I32(i)
    }

    /// Create a 32-bit unsigned integer value
    pub fn u32(i: u32) -> Self {
        Value::U32(i)
    }

    /// Create a 64-bit signed integer value
    pub fn i64(i: i64) -> Self {
        Value::I64(i)
    }

    /// Create a 64-bit unsigned integer value
    pub fn u64(i: u64) -> Self {
        Value::U64(i)
    }

    /// Create a single-precision float value
    pub fn f32(f: f32) -> Self {
        Value::F32(f)
    }

    /// Create a double-precision float value
    pub fn f64(f: f64) -> Self {
        Value::F64(f)
    }

    /// Create an enum value from its underlying integral representation
    pub fn enum_repr(repr: i64) -> Self {
        Value::Enum(repr)
    }

    /// Create a string value
    pub fn str(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Create an object reference value
    pub fn object(obj: Arc<dyn Any + Send + Sync>) -> Self {
        Value::Ref(obj)
    }

    /// Whether this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool, if this value carries one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i16, if this value carries one
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Value::I16(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as u16, if this value carries one
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Value::U16(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as i32, if this value carries one
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as u32, if this value carries one
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as i64, if this value carries one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as u64, if this value carries one
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f32, if this value carries one
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::F32(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as f64, if this value carries one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the underlying integral representation of an enum value
    pub fn as_enum_repr(&self) -> Option<i64> {
        match self {
            Value::Enum(repr) => Some(*repr),
            _ => None,
        }
    }

    /// Get as a string slice, if this value carries a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the object reference, if this value carries one
    pub fn as_object(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        match self {
            Value::Ref(obj) => Some(obj),
            _ => None,
        }
    }

    /// The semantic type tag this value carries
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Ref,
            Value::Bool(_) => TypeTag::Bool,
            Value::I16(_) => TypeTag::I16,
            Value::U16(_) => TypeTag::U16,
            Value::I32(_) => TypeTag::I32,
            Value::U32(_) => TypeTag::U32,
            Value::I64(_) => TypeTag::I64,
            Value::U64(_) => TypeTag::U64,
            Value::F32(_) => TypeTag::F32,
            Value::F64(_) => TypeTag::F64,
            Value::Enum(_) => TypeTag::Enum,
            Value::Str(_) => TypeTag::Str,
            Value::Ref(_) => TypeTag::Ref,
        }
    }

    /// Static name of the carried type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            other => other.tag().name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Reference identity, not structural equality
            (Value::Ref(a), Value::Ref(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::I16(i) => write!(f, "I16({})", i),
            Value::U16(i) => write!(f, "U16({})", i),
            Value::I32(i) => write!(f, "I32({})", i),
            Value::U32(i) => write!(f, "U32({})", i),
            Value::I64(i) => write!(f, "I64({})", i),
            Value::U64(i) => write!(f, "U64({})", i),
            Value::F32(v) => write!(f, "F32({})", v),
            Value::F64(v) => write!(f, "F64({})", v),
            Value::Enum(repr) => write!(f, "Enum({})", repr),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Ref(_) => write!(f, "Ref(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i16> for Value {
    fn from(i: i16) -> Self {
        Value::I16(i)
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::U16(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::I32(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::U32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::U64(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::F32(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}
