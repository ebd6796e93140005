//! Forwarding dispatch protocol
//!
//! The per-call behavior executed for every generated routine: resolve the
//! method descriptor from the cache, package the arguments into the generic
//! representation, invoke the handler, and convert the generic result back
//! to the declared return type. The conversion table is an explicit,
//! exhaustive mapping from semantic type to conversion — value types unbox
//! to their exact declared representation, enums reinterpret as their
//! underlying integral, reference types pass through unchanged.

use mimic_sdk::{InvocationHandler, ProxyError, ProxyResult, TypeTag, Value};

use crate::blueprint::ForwardingRoutine;
use crate::cache::DescriptorCache;
use crate::instance::ProxyInstance;

/// Execute one forwarding routine against the bound handler.
pub(crate) fn forward(
    routine: &ForwardingRoutine,
    proxy: &ProxyInstance,
    descriptors: &DescriptorCache,
    handler: &dyn InvocationHandler,
    args: &[Value],
) -> ProxyResult<Value> {
    let method = descriptors.resolve_method(&routine.interface, routine.index)?;

    if args.len() != routine.params.len() {
        return Err(ProxyError::InvalidArgument(format!(
            "`{}` takes {} argument(s), got {}",
            routine.name,
            routine.params.len(),
            args.len()
        )));
    }

    let mut packaged = Vec::with_capacity(args.len());
    for (arg, &declared) in args.iter().zip(&routine.params) {
        packaged.push(convert_value(arg.clone(), declared)?);
    }

    let result = handler.invoke(proxy, &method, &packaged)?;

    // Void discards the handler's result without inspecting it
    if routine.returns == TypeTag::Void {
        return Ok(Value::Null);
    }
    convert_value(result, routine.returns)
}

/// Convert a generic value to the exact declared representation.
///
/// One arm per semantic type; `Void` never reaches here (synthesis rejects
/// void parameters and dispatch short-circuits void returns).
fn convert_value(value: Value, declared: TypeTag) -> ProxyResult<Value> {
    match declared {
        TypeTag::Void => Ok(Value::Null),

        TypeTag::Bool => match value {
            Value::Bool(_) => Ok(value),
            other => Err(mismatch(declared, &other)),
        },

        TypeTag::I16 => match value {
            Value::I16(_) => Ok(value),
            Value::Enum(repr) => narrow(declared, repr, |v| Value::I16(v as i16)),
            other => Err(mismatch(declared, &other)),
        },
        TypeTag::U16 => match value {
            Value::U16(_) => Ok(value),
            Value::Enum(repr) => narrow(declared, repr, |v| Value::U16(v as u16)),
            other => Err(mismatch(declared, &other)),
        },
        TypeTag::I32 => match value {
            Value::I32(_) => Ok(value),
            Value::Enum(repr) => narrow(declared, repr, |v| Value::I32(v as i32)),
            other => Err(mismatch(declared, &other)),
        },
        TypeTag::U32 => match value {
            Value::U32(_) => Ok(value),
            Value::Enum(repr) => narrow(declared, repr, |v| Value::U32(v as u32)),
            other => Err(mismatch(declared, &other)),
        },
        TypeTag::I64 => match value {
            Value::I64(_) => Ok(value),
            Value::Enum(repr) => Ok(Value::I64(repr)),
            other => Err(mismatch(declared, &other)),
        },
        TypeTag::U64 => match value {
            Value::U64(_) => Ok(value),
            Value::Enum(repr) => u64::try_from(repr)
                .map(Value::U64)
                .map_err(|_| range_mismatch(declared)),
            other => Err(mismatch(declared, &other)),
        },

        TypeTag::F32 => match value {
            Value::F32(_) => Ok(value),
            other => Err(mismatch(declared, &other)),
        },
        TypeTag::F64 => match value {
            Value::F64(_) => Ok(value),
            other => Err(mismatch(declared, &other)),
        },

        // Enumerated types reinterpret as the underlying integral
        TypeTag::Enum => match value {
            Value::Enum(_) => Ok(value),
            Value::I16(v) => Ok(Value::Enum(v as i64)),
            Value::U16(v) => Ok(Value::Enum(v as i64)),
            Value::I32(v) => Ok(Value::Enum(v as i64)),
            Value::U32(v) => Ok(Value::Enum(v as i64)),
            Value::I64(v) => Ok(Value::Enum(v)),
            Value::U64(v) => i64::try_from(v)
                .map(Value::Enum)
                .map_err(|_| range_mismatch(declared)),
            other => Err(mismatch(declared, &other)),
        },

        // Reference semantics: pass through unchanged
        TypeTag::Str | TypeTag::Ref => Ok(value),
    }
}

fn mismatch(declared: TypeTag, got: &Value) -> ProxyError {
    ProxyError::TypeMismatch {
        expected: declared.name(),
        got: got.type_name(),
    }
}

fn range_mismatch(declared: TypeTag) -> ProxyError {
    ProxyError::TypeMismatch {
        expected: declared.name(),
        got: "enum",
    }
}

fn narrow(
    declared: TypeTag,
    repr: i64,
    make: impl FnOnce(i64) -> Value,
) -> ProxyResult<Value> {
    let fits = match declared {
        TypeTag::I16 => i16::try_from(repr).is_ok(),
        TypeTag::U16 => u16::try_from(repr).is_ok(),
        TypeTag::I32 => i32::try_from(repr).is_ok(),
        TypeTag::U32 => u32::try_from(repr).is_ok(),
        _ => false,
    };
    if fits {
        Ok(make(repr))
    } else {
        Err(range_mismatch(declared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_value_round_trips() {
        let cases = [
            (Value::Bool(true), TypeTag::Bool),
            (Value::I16(-123), TypeTag::I16),
            (Value::U16(123), TypeTag::U16),
            (Value::I32(i32::MIN), TypeTag::I32),
            (Value::U32(u32::MAX), TypeTag::U32),
            (Value::I64(i64::MAX), TypeTag::I64),
            (Value::U64(u64::MAX), TypeTag::U64),
            (Value::F32(1.25), TypeTag::F32),
            (Value::F64(-0.5), TypeTag::F64),
            (Value::Enum(7), TypeTag::Enum),
        ];
        for (value, tag) in cases {
            assert_eq!(convert_value(value.clone(), tag).unwrap(), value);
        }
    }

    #[test]
    fn test_enum_reinterprets_integrals() {
        assert_eq!(
            convert_value(Value::I32(3), TypeTag::Enum).unwrap(),
            Value::Enum(3)
        );
        assert_eq!(
            convert_value(Value::U16(9), TypeTag::Enum).unwrap(),
            Value::Enum(9)
        );
        assert_eq!(
            convert_value(Value::Enum(5), TypeTag::I32).unwrap(),
            Value::I32(5)
        );
    }

    #[test]
    fn test_enum_narrowing_checks_range() {
        assert!(convert_value(Value::Enum(70_000), TypeTag::I16).is_err());
        assert!(convert_value(Value::Enum(-1), TypeTag::U64).is_err());
        assert!(convert_value(Value::U64(u64::MAX), TypeTag::Enum).is_err());
    }

    #[test]
    fn test_wrong_representation_is_rejected() {
        assert!(convert_value(Value::I64(1), TypeTag::I32).is_err());
        assert!(convert_value(Value::F64(1.0), TypeTag::F32).is_err());
        assert!(convert_value(Value::str("x"), TypeTag::Bool).is_err());

        let err = convert_value(Value::str("x"), TypeTag::I32).unwrap_err();
        assert_eq!(err.to_string(), "type mismatch: expected i32, got string");
    }

    #[test]
    fn test_reference_types_pass_through() {
        let s = Value::str("hello");
        assert_eq!(convert_value(s.clone(), TypeTag::Str).unwrap(), s);
        // Null passes through reference positions unchanged
        assert_eq!(convert_value(Value::Null, TypeTag::Ref).unwrap(), Value::Null);
        assert_eq!(convert_value(Value::Null, TypeTag::Str).unwrap(), Value::Null);
    }
}
