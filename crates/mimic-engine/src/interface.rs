//! Interface declarations
//!
//! Interfaces are declared up front through a builder API and reflected into
//! immutable descriptors at blueprint-build time. There is no host reflection
//! facility: a declaration is the single source of truth for an interface's
//! shape, and declaration order is significant — it fixes the positional
//! index of every method for the lifetime of the process.

use mimic_sdk::TypeTag;

/// Declared signature of one interface method.
#[derive(Debug, Clone)]
pub struct MethodSig {
    /// Method name
    pub name: String,
    /// Parameter semantic types, in declaration order
    pub params: Vec<TypeTag>,
    /// Return semantic type
    pub returns: TypeTag,
}

impl MethodSig {
    /// Declare a method with no parameters and a void return
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: TypeTag::Void,
        }
    }

    /// Append a parameter
    pub fn param(mut self, ty: TypeTag) -> Self {
        self.params.push(ty);
        self
    }

    /// Set the return type
    pub fn returns(mut self, ty: TypeTag) -> Self {
        self.returns = ty;
        self
    }
}

/// Declared signature of one interface property.
///
/// Reflection lowers a property into an ordinary `get_*` accessor method
/// (and a `set_*` method unless readonly), so proxied property access runs
/// through the same method dispatch path as everything else.
#[derive(Debug, Clone)]
pub struct PropertySig {
    /// Property name
    pub name: String,
    /// Property semantic type
    pub ty: TypeTag,
    /// Whether the property has no setter
    pub readonly: bool,
}

impl PropertySig {
    /// Declare a read-write property
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty,
            readonly: false,
        }
    }

    /// Mark the property readonly (getter only)
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// A declared interface: a qualified name, ordered members, and the
/// interfaces it extends.
///
/// The qualified name is the interface's identity everywhere in the engine;
/// two declarations with the same name are treated as the same interface and
/// the first one registered wins.
#[derive(Debug, Clone)]
pub struct Interface {
    qualified_name: String,
    methods: Vec<MethodSig>,
    properties: Vec<PropertySig>,
    extends: Vec<Interface>,
}

impl Interface {
    /// Declare a new interface with the given qualified name
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            methods: Vec::new(),
            properties: Vec::new(),
            extends: Vec::new(),
        }
    }

    /// Append a method declaration
    pub fn method(mut self, sig: MethodSig) -> Self {
        self.methods.push(sig);
        self
    }

    /// Append a property declaration
    pub fn property(mut self, sig: PropertySig) -> Self {
        self.properties.push(sig);
        self
    }

    /// Declare that this interface extends another
    pub fn extends(mut self, parent: &Interface) -> Self {
        self.extends.push(parent.clone());
        self
    }

    /// The interface's qualified name (its identity)
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Declared methods, in declaration order
    pub fn methods(&self) -> &[MethodSig] {
        &self.methods
    }

    /// Declared properties, in declaration order
    pub fn properties(&self) -> &[PropertySig] {
        &self.properties
    }

    /// Directly extended interfaces
    pub fn parents(&self) -> &[Interface] {
        &self.extends
    }
}
