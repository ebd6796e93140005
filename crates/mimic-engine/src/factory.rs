//! Blueprint cache and proxy factory
//!
//! The factory memoizes blueprints by identity — target type name plus the
//! fixed [`BLUEPRINT_SUFFIX`] — so repeated requests for the same closure
//! reuse the synthesized definition, and mints a fresh [`ProxyInstance`]
//! bound to the supplied handler on every call. The check-then-build-then-
//! insert sequence runs under one lock: concurrent first-time requests for
//! the same identity yield exactly one blueprint.

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use mimic_sdk::{InvocationHandler, ProxyError, ProxyResult};

use crate::blueprint::{BlueprintBuilder, ProxyBlueprint};
use crate::cache::DescriptorCache;
use crate::instance::ProxyInstance;
use crate::interface::Interface;

/// Fixed suffix appended to a target type's qualified name to form the
/// blueprint identity
pub const BLUEPRINT_SUFFIX: &str = "Proxy";

static GLOBAL: LazyLock<ProxyFactory> =
    LazyLock::new(|| ProxyFactory::with_descriptors(DescriptorCache::global().clone()));

/// A named concrete target type together with the interfaces it implements.
///
/// Used by [`ProxyFactory::create_for_class`] when the proxied target is not
/// itself an interface: the proxy satisfies the class's implemented
/// interfaces, not the class's own members.
#[derive(Debug, Clone)]
pub struct ClassShape {
    qualified_name: String,
    interfaces: Vec<Interface>,
}

impl ClassShape {
    /// Describe a concrete type by qualified name
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            interfaces: Vec::new(),
        }
    }

    /// Declare an interface the type implements
    pub fn implements(mut self, iface: &Interface) -> Self {
        self.interfaces.push(iface.clone());
        self
    }

    /// The type's qualified name
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The declared implemented interfaces
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }
}

/// Memoizing proxy factory.
///
/// Owns the blueprint cache and the descriptor cache its blueprints resolve
/// against. [`ProxyFactory::global`] is the process-wide instance; separate
/// factories (with isolated caches) can be created for tests or sandboxing.
pub struct ProxyFactory {
    descriptors: Arc<DescriptorCache>,
    blueprints: Mutex<FxHashMap<String, Arc<ProxyBlueprint>>>,
}

impl ProxyFactory {
    /// Create a factory with its own isolated caches
    pub fn new() -> Self {
        Self::with_descriptors(Arc::new(DescriptorCache::new()))
    }

    /// Create a factory resolving against an existing descriptor cache
    pub fn with_descriptors(descriptors: Arc<DescriptorCache>) -> Self {
        Self {
            descriptors,
            blueprints: Mutex::new(FxHashMap::default()),
        }
    }

    /// The process-wide factory singleton
    pub fn global() -> &'static ProxyFactory {
        &GLOBAL
    }

    /// Create a proxy for an interface, bound to `handler`.
    ///
    /// The blueprint for the interface's closure is synthesized on first
    /// request and reused afterwards; the returned instance is always fresh.
    pub fn create(
        &self,
        handler: Arc<dyn InvocationHandler>,
        iface: &Interface,
    ) -> ProxyResult<ProxyInstance> {
        let blueprint =
            self.blueprint_for(iface.qualified_name(), std::slice::from_ref(iface))?;
        Ok(ProxyInstance::new(
            blueprint,
            self.descriptors.clone(),
            handler,
        ))
    }

    /// Create a proxy for a concrete type's implemented interfaces.
    ///
    /// Fails with `InvalidArgument` if the type declares no interfaces —
    /// synthesis would return no blueprint, so construction surfaces the
    /// failure instead of continuing silently.
    pub fn create_for_class(
        &self,
        handler: Arc<dyn InvocationHandler>,
        class: &ClassShape,
    ) -> ProxyResult<ProxyInstance> {
        if class.interfaces().is_empty() {
            return Err(ProxyError::InvalidArgument(format!(
                "`{}` implements no interfaces; nothing to proxy",
                class.qualified_name()
            )));
        }
        let blueprint = self.blueprint_for(class.qualified_name(), class.interfaces())?;
        Ok(ProxyInstance::new(
            blueprint,
            self.descriptors.clone(),
            handler,
        ))
    }

    /// The descriptor cache this factory's blueprints resolve against
    pub fn descriptors(&self) -> &Arc<DescriptorCache> {
        &self.descriptors
    }

    /// Number of cached blueprints
    pub fn blueprint_count(&self) -> usize {
        self.blueprints.lock().len()
    }

    /// Whether a blueprint with the given identity has been synthesized
    pub fn contains_blueprint(&self, identity: &str) -> bool {
        self.blueprints.lock().contains_key(identity)
    }

    fn blueprint_for(
        &self,
        target_name: &str,
        interfaces: &[Interface],
    ) -> ProxyResult<Arc<ProxyBlueprint>> {
        let identity = format!("{}{}", target_name, BLUEPRINT_SUFFIX);

        // Get-or-create is one atomic region: synthesis runs under the lock
        // so two first-comers cannot insert diverging blueprints.
        let mut blueprints = self.blueprints.lock();
        if let Some(blueprint) = blueprints.get(&identity) {
            return Ok(blueprint.clone());
        }

        let blueprint = Arc::new(
            BlueprintBuilder::new(&self.descriptors).build(&identity, interfaces)?,
        );
        blueprints.insert(identity, blueprint.clone());
        Ok(blueprint)
    }
}

impl Default for ProxyFactory {
    fn default() -> Self {
        Self::new()
    }
}
