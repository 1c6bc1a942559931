//! Typed conversion of intercepted results, used by proxy shells.

use super::Object;
use super::Value;
use crate::Error;
use crate::Mock;
use crate::NullInteractionOnSmartNull;
use crate::Result;

pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(
    expected: &'static str,
    value: Value,
) -> Result<T> {
    match value {
        Value::SmartNull(smart_null) => Err(NullInteractionOnSmartNull {
            origin: smart_null.origin().to_string(),
            method: format!("conversion to {expected}"),
        }
        .into()),
        other => Err(Error::TypeMismatch {
            expected,
            found: format!("{other:?}"),
        }),
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Unit | Value::Null => Ok(()),
            other => mismatch("()", other),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => mismatch("bool", other),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => mismatch("i64", other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(i) => i32::try_from(i).map_err(|_| Error::TypeMismatch {
                expected: "i32",
                found: i.to_string(),
            }),
            other => mismatch("i32", other),
        }
    }
}

impl FromValue for usize {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(i) => usize::try_from(i).map_err(|_| Error::TypeMismatch {
                expected: "usize",
                found: i.to_string(),
            }),
            other => mismatch("usize", other),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(x),
            other => mismatch("f64", other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => mismatch("String", other),
        }
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => Ok(items),
            other => mismatch("list", other),
        }
    }
}

impl FromValue for Object {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(object),
            other => mismatch("object", other),
        }
    }
}

impl FromValue for Mock {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mock(mock) => Ok(mock),
            other => mismatch("mock", other),
        }
    }
}

/// `Null` converts to `None`; anything else must convert to `T`.
impl<T> FromValue for Option<T>
where
    T: FromValue,
{
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
