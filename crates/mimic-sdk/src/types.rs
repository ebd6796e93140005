//! Semantic type tags and reflected member descriptors
//!
//! A [`TypeTag`] names the semantic type of a parameter or return value as
//! declared on an interface; [`MethodDescriptor`] and [`PropertyDescriptor`]
//! are the reflected member shapes the engine caches per interface and hands
//! to handlers at dispatch time.

use std::fmt;

/// Semantic type of a parameter or return value.
///
/// Value-semantics tags (`Bool` through `Enum`) round-trip through the
/// generic [`Value`](crate::Value) representation with exact-representation
/// conversion; `Str` and `Ref` have reference semantics and pass through
/// dispatch unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// No return value; the handler's result is discarded
    Void,
    /// Boolean
    Bool,
    /// 16-bit signed integer
    I16,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit signed integer
    I32,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit signed integer
    I64,
    /// 64-bit unsigned integer
    U64,
    /// IEEE single-precision float
    F32,
    /// IEEE double-precision float
    F64,
    /// Enumerated type, carried as its underlying 64-bit integral value
    Enum,
    /// Immutable string (reference semantics)
    Str,
    /// Opaque object reference (reference semantics)
    Ref,
}

impl TypeTag {
    /// Whether a value of this type is passed by reference through dispatch
    pub fn is_reference(self) -> bool {
        matches!(self, TypeTag::Str | TypeTag::Ref)
    }

    /// Whether this tag is an integral value type (including `Enum`)
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            TypeTag::I16
                | TypeTag::U16
                | TypeTag::I32
                | TypeTag::U32
                | TypeTag::I64
                | TypeTag::U64
                | TypeTag::Enum
        )
    }

    /// Static name of the tag, used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Void => "void",
            TypeTag::Bool => "bool",
            TypeTag::I16 => "i16",
            TypeTag::U16 => "u16",
            TypeTag::I32 => "i32",
            TypeTag::U32 => "u32",
            TypeTag::I64 => "i64",
            TypeTag::U64 => "u64",
            TypeTag::F32 => "f32",
            TypeTag::F64 => "f64",
            TypeTag::Enum => "enum",
            TypeTag::Str => "string",
            TypeTag::Ref => "ref",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reflected shape of one interface method.
///
/// Descriptors are created once when an interface is registered and never
/// mutated afterwards. The `index` is the method's position within its
/// declaring interface's own declaration order and is the key every
/// forwarding routine uses to resolve the descriptor at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Qualified name of the declaring interface
    pub interface: String,
    /// Method name
    pub name: String,
    /// Parameter semantic types, in declaration order
    pub params: Vec<TypeTag>,
    /// Return semantic type
    pub returns: TypeTag,
    /// Positional index within the declaring interface
    pub index: usize,
}

impl MethodDescriptor {
    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}[{}]", self.interface, self.name, self.index)
    }
}

/// Reflected shape of one interface property.
///
/// Kept as vestigial metadata: property accessors are reflected as ordinary
/// `get_*`/`set_*` methods and proxied through the method path, so nothing in
/// the dispatch protocol reads these descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Qualified name of the declaring interface
    pub interface: String,
    /// Property name
    pub name: String,
    /// Property semantic type
    pub ty: TypeTag,
    /// Positional index within the declaring interface's properties
    pub index: usize,
}
