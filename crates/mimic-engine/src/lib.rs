//! Mimic Proxy Engine
//!
//! Builds, at run time, stand-in objects that implement one or more declared
//! interfaces and route every call made on them to a single caller-supplied
//! handler, together with the metadata the handler needs to identify exactly
//! which member was invoked.
//!
//! - **Interface declarations** (`interface` module): builder-declared
//!   interface shapes, reflected once into immutable descriptors
//! - **Descriptor cache** (`cache` module): process-wide, append-only store
//!   of reflected interface shapes, resolved by generated dispatch at call time
//! - **Blueprint builder** (`blueprint` module): one-time synthesis of a
//!   reusable forwarding table per distinct interface closure
//! - **Factory** (`factory` module): memoizes blueprints by identity and
//!   instantiates proxies bound to handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use mimic_engine::{Interface, MethodSig, ProxyFactory, TypeTag};
//! use mimic_sdk::{FnHandler, Value};
//!
//! let calc = Interface::new("demo.Calc").method(
//!     MethodSig::new("add")
//!         .param(TypeTag::I32)
//!         .param(TypeTag::I32)
//!         .returns(TypeTag::I32),
//! );
//!
//! let handler = FnHandler::shared(|_proxy, _method, args| {
//!     Ok(Value::i32(args[0].as_i32().unwrap() + args[1].as_i32().unwrap()))
//! });
//!
//! let proxy = ProxyFactory::global().create(handler, &calc)?;
//! assert_eq!(proxy.call("add", &[Value::i32(2), Value::i32(3)])?, Value::i32(5));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod blueprint;
mod cache;
mod descriptor;
mod dispatch;
mod factory;
mod instance;
mod interface;

pub use blueprint::{BlueprintBuilder, ForwardingRoutine, ProxyBlueprint};
pub use cache::DescriptorCache;
pub use descriptor::InterfaceDescriptor;
pub use factory::{ClassShape, ProxyFactory, BLUEPRINT_SUFFIX};
pub use instance::ProxyInstance;
pub use interface::{Interface, MethodSig, PropertySig};

// Handler contract and value model, re-exported from the SDK
pub use mimic_sdk::{
    FnHandler, InvocationHandler, MethodDescriptor, PropertyDescriptor, ProxyError, ProxyRef,
    ProxyResult, TypeTag, Value,
};
