//! Error types for the Mimic proxy engine

/// Result type for proxy creation and dispatch
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Proxy engine error taxonomy.
///
/// All engine-originated variants are non-recoverable at the point of
/// detection: they abort the proxy creation or the single dispatched call
/// that triggered them, leaving no partially built blueprint in the caches.
/// `Handler` wraps failures raised inside a handler's `invoke` and is passed
/// through to the proxy's caller untranslated.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProxyError {
    /// Empty interface set, or a concrete target with no interfaces
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Descriptor cache lookup failed; indicates an inconsistency between a
    /// blueprint and the cache that produced it
    #[error("no method descriptor for {interface}[{index}]")]
    NotFound {
        /// Qualified name of the interface the routine asked for
        interface: String,
        /// Positional index that missed
        index: usize,
    },

    /// The proxy's closure has no method with the requested name
    #[error("method `{method}` not found on {blueprint}")]
    UnknownMethod {
        /// Blueprint identity of the proxy
        blueprint: String,
        /// Requested method name
        method: String,
    },

    /// The interface closure contains a shape the builder cannot represent
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// A generic value could not be narrowed to the declared representation
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Declared semantic type
        expected: &'static str,
        /// Type the generic value actually carried
        got: &'static str,
    },

    /// Failure raised inside a handler, propagated unchanged
    #[error("{0}")]
    Handler(String),
}

impl ProxyError {
    /// Create a handler-level failure
    pub fn handler(msg: impl Into<String>) -> Self {
        ProxyError::Handler(msg.into())
    }
}
