//! Proxy blueprint synthesis
//!
//! A [`ProxyBlueprint`] is the reusable, cached stand-in definition for one
//! interface closure: the flattened set of interfaces it satisfies and one
//! [`ForwardingRoutine`] per method across the closure. Blueprints are built
//! at most once per identity and shared by every proxy instance created for
//! that closure; no executable code is generated — a routine is plain data
//! that the dispatch protocol interprets on every call.

use rustc_hash::{FxHashMap, FxHashSet};

use mimic_sdk::{ProxyError, ProxyResult, TypeTag};

use crate::cache::DescriptorCache;
use crate::interface::Interface;

/// Generated per-method forwarding record.
///
/// Holds exactly what dispatch needs at call time: the declaring interface's
/// qualified name and the method's positional index (the descriptor-cache
/// key), plus the signature used for argument packaging and return
/// conversion.
#[derive(Debug, Clone)]
pub struct ForwardingRoutine {
    /// Method name, unique across the blueprint's closure
    pub name: String,
    /// Qualified name of the declaring interface
    pub interface: String,
    /// Positional index within the declaring interface
    pub index: usize,
    /// Parameter semantic types, in declaration order
    pub params: Vec<TypeTag>,
    /// Return semantic type
    pub returns: TypeTag,
}

/// Synthesized stand-in definition for one interface closure.
#[derive(Debug)]
pub struct ProxyBlueprint {
    name: String,
    interfaces: Vec<String>,
    routines: Vec<ForwardingRoutine>,
    slots: FxHashMap<String, usize>,
}

impl ProxyBlueprint {
    /// Blueprint identity: target type name plus the fixed suffix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified names of every interface in the closure, in generation order
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Whether the closure contains the named interface
    pub fn implements(&self, qualified_name: &str) -> bool {
        self.interfaces.iter().any(|i| i == qualified_name)
    }

    /// All forwarding routines, in generation order
    pub fn routines(&self) -> &[ForwardingRoutine] {
        &self.routines
    }

    /// Look up a forwarding routine by method name
    pub fn routine(&self, method: &str) -> Option<&ForwardingRoutine> {
        self.slots.get(method).map(|&slot| &self.routines[slot])
    }

    /// Number of dispatchable methods across the closure
    pub fn method_count(&self) -> usize {
        self.routines.len()
    }
}

/// One-time builder of proxy blueprints.
///
/// Walks the supplied interfaces recursively, registering each interface of
/// the closure in the descriptor cache the moment its routines are first
/// generated. An ancestor reachable through two inheritance paths (diamond
/// shape) is visited once: traversal de-duplicates by interface identity.
pub struct BlueprintBuilder<'a> {
    descriptors: &'a DescriptorCache,
}

impl<'a> BlueprintBuilder<'a> {
    /// Create a builder that registers descriptors into the given cache
    pub fn new(descriptors: &'a DescriptorCache) -> Self {
        Self { descriptors }
    }

    /// Synthesize a blueprint for the closure of the supplied interfaces.
    ///
    /// Fails with `InvalidArgument` on an empty interface list, and with
    /// `Synthesis` if two distinct interfaces in the closure declare the
    /// same method name (the dispatch slot would be ambiguous) or a method
    /// declares a void parameter.
    pub fn build(
        &self,
        blueprint_name: &str,
        interfaces: &[Interface],
    ) -> ProxyResult<ProxyBlueprint> {
        if interfaces.is_empty() {
            return Err(ProxyError::InvalidArgument(
                "cannot build a blueprint from an empty interface list".to_string(),
            ));
        }

        let mut blueprint = ProxyBlueprint {
            name: blueprint_name.to_string(),
            interfaces: Vec::new(),
            routines: Vec::new(),
            slots: FxHashMap::default(),
        };
        let mut seen = FxHashSet::default();

        for iface in interfaces {
            self.generate(iface, &mut seen, &mut blueprint)?;
        }
        Ok(blueprint)
    }

    fn generate(
        &self,
        iface: &Interface,
        seen: &mut FxHashSet<String>,
        blueprint: &mut ProxyBlueprint,
    ) -> ProxyResult<()> {
        // Diamond closure: each interface contributes its methods once
        if !seen.insert(iface.qualified_name().to_string()) {
            return Ok(());
        }

        let descriptor = self.descriptors.register(iface);
        blueprint
            .interfaces
            .push(descriptor.qualified_name().to_string());

        for method in descriptor.methods() {
            if method.params.contains(&TypeTag::Void) {
                return Err(ProxyError::Synthesis(format!(
                    "method `{}` on `{}` declares a void parameter",
                    method.name, method.interface
                )));
            }
            if blueprint.slots.contains_key(&method.name) {
                return Err(ProxyError::Synthesis(format!(
                    "duplicate method `{}`: declared by `{}` and already generated for `{}`",
                    method.name,
                    method.interface,
                    blueprint.routines[blueprint.slots[&method.name]].interface
                )));
            }

            blueprint
                .slots
                .insert(method.name.clone(), blueprint.routines.len());
            blueprint.routines.push(ForwardingRoutine {
                name: method.name.clone(),
                interface: method.interface.clone(),
                index: method.index,
                params: method.params.clone(),
                returns: method.returns,
            });
        }

        for parent in iface.parents() {
            self.generate(parent, seen, blueprint)?;
        }
        Ok(())
    }
}
