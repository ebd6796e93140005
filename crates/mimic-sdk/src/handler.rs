//! InvocationHandler trait — proxy dispatch interface
//!
//! Lives in mimic-sdk so handler implementations can compile against the SDK
//! alone. The engine calls into [`InvocationHandler::invoke`] from every
//! generated forwarding routine; [`ProxyRef`] is the narrow view of the
//! calling proxy a handler receives, keeping the SDK independent of engine
//! internals.

use std::sync::Arc;

use crate::{MethodDescriptor, ProxyResult, Value};

/// Narrow view of a proxy instance, as seen by its handler.
///
/// Exposes just enough identity for a handler to tell proxies apart without
/// the SDK depending on the engine's instance type.
pub trait ProxyRef: Send + Sync {
    /// Identity of the blueprint this proxy was instantiated from
    fn blueprint_name(&self) -> &str;

    /// Whether the proxy's closure contains the named interface
    fn implements(&self, qualified_name: &str) -> bool;
}

/// Caller-supplied logic invoked for every call made on a proxy.
///
/// The engine packages the call's arguments into generic [`Value`]s, resolves
/// the [`MethodDescriptor`] identifying exactly which member was invoked, and
/// calls `invoke`. The returned value is converted back to the method's
/// declared return type by the dispatch protocol; for void methods it is
/// discarded without inspection.
///
/// Handlers may be shared by multiple proxy instances and must therefore be
/// `Send + Sync`. Errors returned from `invoke` propagate unchanged to the
/// proxy's caller.
pub trait InvocationHandler: Send + Sync {
    /// Handle one proxied call
    ///
    /// - `proxy`: the instance the call was made on
    /// - `method`: descriptor of the invoked method (name, declaring
    ///   interface, positional index, signature)
    /// - `args`: the call's arguments in declaration order
    fn invoke(
        &self,
        proxy: &dyn ProxyRef,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> ProxyResult<Value>;
}

/// Adapter implementing [`InvocationHandler`] for a closure.
///
/// The common way to supply a handler in tests and small embeddings:
///
/// ```ignore
/// let handler = FnHandler::new(|_proxy, method, _args| {
///     Ok(Value::str(method.name.clone()))
/// });
/// ```
pub struct FnHandler<F>(F);

impl<F> FnHandler<F>
where
    F: Fn(&dyn ProxyRef, &MethodDescriptor, &[Value]) -> ProxyResult<Value> + Send + Sync,
{
    /// Wrap a closure as an invocation handler
    pub fn new(f: F) -> Self {
        FnHandler(f)
    }

    /// Wrap a closure and return it ready to hand to a factory
    pub fn shared(f: F) -> Arc<Self>
    where
        F: 'static,
    {
        Arc::new(FnHandler(f))
    }
}

impl<F> InvocationHandler for FnHandler<F>
where
    F: Fn(&dyn ProxyRef, &MethodDescriptor, &[Value]) -> ProxyResult<Value> + Send + Sync,
{
    fn invoke(
        &self,
        proxy: &dyn ProxyRef,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> ProxyResult<Value> {
        (self.0)(proxy, method, args)
    }
}
