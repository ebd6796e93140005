//! Reflected interface descriptors
//!
//! An [`InterfaceDescriptor`] is the immutable, reflected shape of one
//! declared interface: its own methods in declaration order, each stamped
//! with the positional index that forwarding routines use to resolve it at
//! call time. Descriptors are created once, on first registration, and never
//! mutated or removed afterwards.

use std::sync::Arc;

use mimic_sdk::{MethodDescriptor, PropertyDescriptor, TypeTag};

use crate::interface::Interface;

/// Immutable reflected shape of one interface.
#[derive(Debug)]
pub struct InterfaceDescriptor {
    qualified_name: String,
    extends: Vec<String>,
    methods: Vec<Arc<MethodDescriptor>>,
    properties: Vec<PropertyDescriptor>,
}

impl InterfaceDescriptor {
    /// Reflect a declared interface into its descriptor.
    ///
    /// Declared methods take indices `0..n` in declaration order; property
    /// accessors are lowered to ordinary `get_*`/`set_*` methods appended
    /// after the declared methods, continuing the same index sequence.
    pub fn reflect(iface: &Interface) -> Self {
        let name = iface.qualified_name().to_string();
        let mut methods = Vec::with_capacity(iface.methods().len());

        for sig in iface.methods() {
            methods.push(Arc::new(MethodDescriptor {
                interface: name.clone(),
                name: sig.name.clone(),
                params: sig.params.clone(),
                returns: sig.returns,
                index: methods.len(),
            }));
        }

        let mut properties = Vec::with_capacity(iface.properties().len());
        for sig in iface.properties() {
            properties.push(PropertyDescriptor {
                interface: name.clone(),
                name: sig.name.clone(),
                ty: sig.ty,
                index: properties.len(),
            });

            methods.push(Arc::new(MethodDescriptor {
                interface: name.clone(),
                name: format!("get_{}", sig.name),
                params: Vec::new(),
                returns: sig.ty,
                index: methods.len(),
            }));
            if !sig.readonly {
                methods.push(Arc::new(MethodDescriptor {
                    interface: name.clone(),
                    name: format!("set_{}", sig.name),
                    params: vec![sig.ty],
                    returns: TypeTag::Void,
                    index: methods.len(),
                }));
            }
        }

        Self {
            qualified_name: name,
            extends: iface
                .parents()
                .iter()
                .map(|p| p.qualified_name().to_string())
                .collect(),
            methods,
            properties,
        }
    }

    /// The interface's qualified name (its identity)
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Qualified names of the directly extended interfaces
    pub fn extends(&self) -> &[String] {
        &self.extends
    }

    /// Reflected methods, in declaration order
    pub fn methods(&self) -> &[Arc<MethodDescriptor>] {
        &self.methods
    }

    /// Method descriptor at the given positional index
    pub fn method_at(&self, index: usize) -> Option<&Arc<MethodDescriptor>> {
        self.methods.get(index)
    }

    /// Reflected properties, in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Property descriptor at the given positional index
    pub fn property_at(&self, index: usize) -> Option<&PropertyDescriptor> {
        self.properties.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{MethodSig, PropertySig};

    #[test]
    fn test_reflect_stamps_stable_indices() {
        let iface = Interface::new("demo.Calc")
            .method(MethodSig::new("add").param(TypeTag::I32).param(TypeTag::I32).returns(TypeTag::I32))
            .method(MethodSig::new("negate").param(TypeTag::I32).returns(TypeTag::I32));

        let desc = InterfaceDescriptor::reflect(&iface);
        assert_eq!(desc.qualified_name(), "demo.Calc");
        assert_eq!(desc.methods().len(), 2);
        assert_eq!(desc.methods()[0].name, "add");
        assert_eq!(desc.methods()[0].index, 0);
        assert_eq!(desc.methods()[1].name, "negate");
        assert_eq!(desc.methods()[1].index, 1);
        assert_eq!(desc.method_at(1).unwrap().name, "negate");
        assert!(desc.method_at(2).is_none());
    }

    #[test]
    fn test_reflect_records_parent_names() {
        let base = Interface::new("demo.Base").method(MethodSig::new("ping"));
        let derived = Interface::new("demo.Derived").extends(&base);

        let desc = InterfaceDescriptor::reflect(&derived);
        assert_eq!(desc.extends(), &["demo.Base".to_string()]);
    }

    #[test]
    fn test_properties_lower_to_accessor_methods() {
        let iface = Interface::new("demo.Counter")
            .method(MethodSig::new("reset"))
            .property(PropertySig::new("count", TypeTag::I32))
            .property(PropertySig::new("label", TypeTag::Str).readonly());

        let desc = InterfaceDescriptor::reflect(&iface);

        // reset, get_count, set_count, get_label
        assert_eq!(desc.methods().len(), 4);
        assert_eq!(desc.methods()[1].name, "get_count");
        assert_eq!(desc.methods()[1].returns, TypeTag::I32);
        assert_eq!(desc.methods()[2].name, "set_count");
        assert_eq!(desc.methods()[2].params, vec![TypeTag::I32]);
        assert_eq!(desc.methods()[2].returns, TypeTag::Void);
        assert_eq!(desc.methods()[3].name, "get_label");

        // Property descriptors keep their own index sequence
        assert_eq!(desc.properties().len(), 2);
        assert_eq!(desc.properties()[0].name, "count");
        assert_eq!(desc.properties()[0].index, 0);
        assert_eq!(desc.properties()[1].index, 1);
        assert_eq!(desc.property_at(1).unwrap().name, "label");
    }
}
