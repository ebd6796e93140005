//! Proxy instances
//!
//! A [`ProxyInstance`] is created from exactly one blueprint and owns a
//! reference to exactly one handler for its entire lifetime. Instances are
//! never cached — the factory mints a fresh one per call — but all instances
//! of the same blueprint share identical forwarding behavior.

use std::fmt;
use std::sync::Arc;

use mimic_sdk::{InvocationHandler, ProxyError, ProxyRef, ProxyResult, Value};

use crate::blueprint::ProxyBlueprint;
use crate::cache::DescriptorCache;
use crate::dispatch;

/// A stand-in object satisfying every interface in its blueprint's closure.
pub struct ProxyInstance {
    blueprint: Arc<ProxyBlueprint>,
    descriptors: Arc<DescriptorCache>,
    handler: Arc<dyn InvocationHandler>,
}

impl ProxyInstance {
    pub(crate) fn new(
        blueprint: Arc<ProxyBlueprint>,
        descriptors: Arc<DescriptorCache>,
        handler: Arc<dyn InvocationHandler>,
    ) -> Self {
        Self {
            blueprint,
            descriptors,
            handler,
        }
    }

    /// Invoke a method on the proxy.
    ///
    /// Runs the generated forwarding routine for `method`: the descriptor is
    /// resolved from the cache, `args` are packaged into the generic
    /// representation, the bound handler is invoked, and its result is
    /// converted to the method's declared return type (or discarded for void
    /// methods, in which case `Value::Null` is returned). Handler errors
    /// propagate unchanged.
    pub fn call(&self, method: &str, args: &[Value]) -> ProxyResult<Value> {
        let routine = self
            .blueprint
            .routine(method)
            .ok_or_else(|| ProxyError::UnknownMethod {
                blueprint: self.blueprint.name().to_string(),
                method: method.to_string(),
            })?;
        dispatch::forward(routine, self, &self.descriptors, &*self.handler, args)
    }

    /// The blueprint this instance was created from
    pub fn blueprint(&self) -> &Arc<ProxyBlueprint> {
        &self.blueprint
    }

    /// The handler bound at construction (read-only; the binding is
    /// immutable for the instance's lifetime)
    pub fn handler(&self) -> &Arc<dyn InvocationHandler> {
        &self.handler
    }
}

impl ProxyRef for ProxyInstance {
    fn blueprint_name(&self) -> &str {
        self.blueprint.name()
    }

    fn implements(&self, qualified_name: &str) -> bool {
        self.blueprint.implements(qualified_name)
    }
}

impl fmt::Debug for ProxyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyInstance")
            .field("blueprint", &self.blueprint.name())
            .field("methods", &self.blueprint.method_count())
            .finish()
    }
}
