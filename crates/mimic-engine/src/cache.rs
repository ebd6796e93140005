//! Interface descriptor cache
//!
//! Process-wide, append-only store of reflected interface shapes, keyed by
//! qualified name. Registration happens at blueprint-build time; after that,
//! generated forwarding routines resolve descriptors by
//! `(interface, positional index)` on every call, so lookups are concurrent
//! reads against a `DashMap` with no further synchronization.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use mimic_sdk::{MethodDescriptor, PropertyDescriptor, ProxyError, ProxyResult};

use crate::descriptor::InterfaceDescriptor;
use crate::interface::Interface;

static GLOBAL: LazyLock<Arc<DescriptorCache>> = LazyLock::new(|| Arc::new(DescriptorCache::new()));

/// Append-only cache of reflected interface descriptors.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    interfaces: DashMap<String, Arc<InterfaceDescriptor>>,
}

impl DescriptorCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            interfaces: DashMap::new(),
        }
    }

    /// The process-wide cache; the global factory resolves against this
    /// same instance, so registrations made through it are visible here
    pub fn global() -> &'static Arc<DescriptorCache> {
        &GLOBAL
    }

    /// Reflect and store an interface under its qualified name.
    ///
    /// Idempotent: re-registering an already-known interface is a no-op and
    /// returns the descriptor created on first registration.
    pub fn register(&self, iface: &Interface) -> Arc<InterfaceDescriptor> {
        self.interfaces
            .entry(iface.qualified_name().to_string())
            .or_insert_with(|| Arc::new(InterfaceDescriptor::reflect(iface)))
            .clone()
    }

    /// Look up a registered descriptor by qualified name
    pub fn get(&self, qualified_name: &str) -> Option<Arc<InterfaceDescriptor>> {
        self.interfaces.get(qualified_name).map(|e| e.clone())
    }

    /// Resolve the method descriptor at `index` for the named interface.
    ///
    /// A miss signals a consistency bug in the blueprint that produced the
    /// lookup, not a recoverable runtime condition.
    pub fn resolve_method(
        &self,
        qualified_name: &str,
        index: usize,
    ) -> ProxyResult<Arc<MethodDescriptor>> {
        self.interfaces
            .get(qualified_name)
            .and_then(|desc| desc.method_at(index).cloned())
            .ok_or_else(|| ProxyError::NotFound {
                interface: qualified_name.to_string(),
                index,
            })
    }

    /// Resolve the property descriptor at `index` for the named interface.
    ///
    /// Vestigial counterpart of [`resolve_method`](Self::resolve_method):
    /// property accessors are lowered to ordinary methods and dispatched
    /// through the method path, so nothing in dispatch calls this.
    pub fn resolve_property(
        &self,
        qualified_name: &str,
        index: usize,
    ) -> ProxyResult<PropertyDescriptor> {
        self.interfaces
            .get(qualified_name)
            .and_then(|desc| desc.property_at(index).cloned())
            .ok_or_else(|| ProxyError::NotFound {
                interface: qualified_name.to_string(),
                index,
            })
    }

    /// Whether the named interface has been registered
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.interfaces.contains_key(qualified_name)
    }

    /// Number of registered interfaces
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
