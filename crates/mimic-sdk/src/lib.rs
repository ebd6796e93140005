//! Mimic SDK - Handler contract for Mimic dynamic proxies
//!
//! This crate provides the minimal types needed to write invocation handlers
//! without depending on the full mimic-engine: the generic [`Value`]
//! representation every proxied call is packaged into, the semantic type tags
//! ([`TypeTag`]) that describe method signatures, the reflected
//! [`MethodDescriptor`] handed to handlers, and the [`InvocationHandler`]
//! capability itself.
//!
//! # Example
//!
//! ```ignore
//! use mimic_sdk::{FnHandler, Value};
//!
//! // A handler that answers every call with the sum of its i32 arguments.
//! let adder = FnHandler::new(|_proxy, _method, args| {
//!     let mut sum = 0;
//!     for arg in args {
//!         sum += arg.as_i32().unwrap_or(0);
//!     }
//!     Ok(Value::i32(sum))
//! });
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod error;
mod handler;
mod types;
mod value;

pub use error::{ProxyError, ProxyResult};
pub use handler::{FnHandler, InvocationHandler, ProxyRef};
pub use types::{MethodDescriptor, PropertyDescriptor, TypeTag};
pub use value::Value;
