//! End-to-end proxy engine tests: factory, blueprint reuse, transitive
//! closures, and the full dispatch protocol against real handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mimic_engine::{
    ClassShape, FnHandler, Interface, InvocationHandler, MethodDescriptor, MethodSig,
    PropertySig, ProxyError, ProxyFactory, ProxyRef, ProxyResult, TypeTag, Value,
};

fn calc() -> Interface {
    Interface::new("demo.Calc").method(
        MethodSig::new("add")
            .param(TypeTag::I32)
            .param(TypeTag::I32)
            .returns(TypeTag::I32),
    )
}

fn logger() -> Interface {
    Interface::new("demo.Logger")
        .extends(&calc())
        .method(MethodSig::new("log").param(TypeTag::Str))
}

fn adder() -> Arc<dyn InvocationHandler> {
    FnHandler::shared(|_proxy, _method, args| {
        Ok(Value::i32(
            args[0].as_i32().unwrap() + args[1].as_i32().unwrap(),
        ))
    })
}

#[test]
fn calc_scenario() {
    let factory = ProxyFactory::new();
    let proxy = factory.create(adder(), &calc()).unwrap();

    let result = proxy.call("add", &[Value::i32(2), Value::i32(3)]).unwrap();
    assert_eq!(result, Value::i32(5));
}

#[test]
fn logger_extends_calc_scenario() {
    // Records every (method name, declaring interface, index) it sees
    struct Recording {
        calls: Mutex<Vec<(String, String, usize)>>,
    }

    impl InvocationHandler for Recording {
        fn invoke(
            &self,
            _proxy: &dyn ProxyRef,
            method: &MethodDescriptor,
            args: &[Value],
        ) -> ProxyResult<Value> {
            self.calls.lock().unwrap().push((
                method.name.clone(),
                method.interface.clone(),
                method.index,
            ));
            match method.name.as_str() {
                "add" => Ok(Value::i32(
                    args[0].as_i32().unwrap() + args[1].as_i32().unwrap(),
                )),
                // Return garbage for log; void dispatch must discard it
                _ => Ok(Value::str("ignored")),
            }
        }
    }

    let handler = Arc::new(Recording {
        calls: Mutex::new(Vec::new()),
    });
    let factory = ProxyFactory::new();
    let proxy = factory.create(handler.clone(), &logger()).unwrap();

    // Both own and inherited methods are dispatchable
    assert_eq!(
        proxy.call("add", &[Value::i32(4), Value::i32(6)]).unwrap(),
        Value::i32(10)
    );
    let logged = proxy.call("log", &[Value::str("x")]).unwrap();
    assert!(logged.is_null());

    let calls = handler.calls.lock().unwrap();
    // `add` belongs to demo.Calc at index 0, `log` to demo.Logger at its own
    // declaration-order index 0
    assert_eq!(calls[0], ("add".to_string(), "demo.Calc".to_string(), 0));
    assert_eq!(calls[1], ("log".to_string(), "demo.Logger".to_string(), 0));
}

#[test]
fn handler_binding_is_per_instance() {
    let h1 = FnHandler::shared(|_proxy, _method, _args| Ok(Value::i32(1000)));
    let h2 = FnHandler::shared(|_proxy, _method, _args| Ok(Value::i32(2000)));

    let factory = ProxyFactory::new();
    let p1 = factory.create(h1, &calc()).unwrap();
    let p2 = factory.create(h2, &calc()).unwrap();

    // Same cached blueprint, different bound handlers
    assert!(Arc::ptr_eq(p1.blueprint(), p2.blueprint()));
    assert_eq!(
        p1.call("add", &[Value::i32(0), Value::i32(0)]).unwrap(),
        Value::i32(1000)
    );
    assert_eq!(
        p2.call("add", &[Value::i32(0), Value::i32(0)]).unwrap(),
        Value::i32(2000)
    );
}

#[test]
fn primitive_round_trips_through_dispatch() {
    // Echo handler: returns its single argument untouched
    let echo = FnHandler::shared(|_proxy, _method, args| Ok(args[0].clone()));

    let cases = [
        (TypeTag::Bool, Value::Bool(true)),
        (TypeTag::I16, Value::I16(-12345)),
        (TypeTag::U16, Value::U16(54321)),
        (TypeTag::I32, Value::I32(i32::MIN)),
        (TypeTag::U32, Value::U32(u32::MAX)),
        (TypeTag::I64, Value::I64(i64::MAX)),
        (TypeTag::U64, Value::U64(u64::MAX)),
        (TypeTag::F32, Value::F32(2.5)),
        (TypeTag::F64, Value::F64(-1.0e100)),
        (TypeTag::Enum, Value::Enum(42)),
        (TypeTag::Str, Value::str("round trip")),
    ];

    for (tag, value) in cases {
        let iface = Interface::new(format!("demo.Echo_{}", tag.name()))
            .method(MethodSig::new("echo").param(tag).returns(tag));
        let factory = ProxyFactory::new();
        let proxy = factory.create(echo.clone(), &iface).unwrap();

        let result = proxy.call("echo", std::slice::from_ref(&value)).unwrap();
        assert_eq!(result, value, "round trip failed for {}", tag);
    }
}

#[test]
fn diamond_closure_dispatches_shared_ancestor_once() {
    let root = Interface::new("demo.Root").method(MethodSig::new("ping").returns(TypeTag::I32));
    let left = Interface::new("demo.Left").extends(&root);
    let right = Interface::new("demo.Right").extends(&root);
    let bottom = Interface::new("demo.Bottom").extends(&left).extends(&right);

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = {
        let hits = hits.clone();
        FnHandler::shared(move |_proxy, _method, _args| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(Value::i32(7))
        })
    };

    let factory = ProxyFactory::new();
    let proxy = factory.create(counter, &bottom).unwrap();

    assert_eq!(proxy.blueprint().method_count(), 1);
    assert_eq!(proxy.call("ping", &[]).unwrap(), Value::i32(7));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // The whole closure is visible on the instance
    for name in ["demo.Bottom", "demo.Left", "demo.Right", "demo.Root"] {
        assert!(proxy.implements(name), "missing {}", name);
    }
}

#[test]
fn properties_dispatch_through_accessor_methods() {
    let counter = Interface::new("demo.Counter")
        .property(PropertySig::new("count", TypeTag::I32));

    let handler = FnHandler::shared(|_proxy, method, args| match method.name.as_str() {
        "get_count" => Ok(Value::i32(11)),
        "set_count" => {
            assert_eq!(args[0], Value::i32(44));
            Ok(Value::Null)
        }
        other => Err(ProxyError::handler(format!("unexpected {}", other))),
    });

    let factory = ProxyFactory::new();
    let proxy = factory.create(handler, &counter).unwrap();

    assert_eq!(proxy.call("get_count", &[]).unwrap(), Value::i32(11));
    assert!(proxy.call("set_count", &[Value::i32(44)]).unwrap().is_null());

    // The vestigial property descriptor is still resolvable
    let prop = factory
        .descriptors()
        .resolve_property("demo.Counter", 0)
        .unwrap();
    assert_eq!(prop.name, "count");
}

#[test]
fn invalid_targets_fail_construction() {
    let factory = ProxyFactory::new();

    let err = factory
        .create_for_class(adder(), &ClassShape::new("demo.NoInterfaces"))
        .unwrap_err();
    assert!(matches!(err, ProxyError::InvalidArgument(_)));
    assert_eq!(factory.blueprint_count(), 0);
}

#[test]
fn concurrent_first_use_synthesizes_once() {
    let factory = Arc::new(ProxyFactory::new());
    let iface = logger();

    std::thread::scope(|scope| {
        for worker in 0..32 {
            let factory = factory.clone();
            let iface = iface.clone();
            scope.spawn(move || {
                let proxy = factory.create(adder(), &iface).unwrap();
                let sum = proxy
                    .call("add", &[Value::i32(worker), Value::i32(1)])
                    .unwrap();
                assert_eq!(sum, Value::i32(worker + 1));
            });
        }
    });

    // Exactly one blueprint identity, both closure interfaces registered once
    assert_eq!(factory.blueprint_count(), 1);
    assert!(factory.contains_blueprint("demo.LoggerProxy"));
    assert_eq!(factory.descriptors().len(), 2);
}
