//! Dynamic values flowing through the engine.
//!
//! Every argument captured by an interception and every answer produced for it is
//! a [`Value`]. Primitive-like values compare by value; [`Object`] values compare
//! by identity and [`Value::Mock`] values by mock id.

mod convert;
mod kind;
mod object;

pub use convert::*;
pub use kind::*;
pub use object::*;


use std::fmt;
use std::sync::Arc;

use crate::Mock;

#[derive(Clone, Default)]
pub enum Value {
    /// Null-like result of an unstubbed call
    #[default]
    Null,
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Reference value compared by identity
    Object(Object),
    Mock(Mock),
    SmartNull(SmartNull),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value shape, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(object) => object.type_name(),
            Value::Mock(_) => "mock",
            Value::SmartNull(_) => "smart null",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mock(&self) -> Option<&Mock> {
        match self {
            Value::Mock(mock) => Some(mock),
            _ => None,
        }
    }

    /// Borrows the wrapped object as `T` when this is an [`Value::Object`] of that type.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: 'static,
    {
        match self {
            Value::Object(object) => object.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.same_instance(b),
            (Value::Mock(a), Value::Mock(b)) => a.id() == b.id(),
            (Value::SmartNull(a), Value::SmartNull(b)) => a == b,
            _ => false,
        }
    }
}

/// Rendering used in invocation listings: strings are quoted.
impl fmt::Debug for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Object(object) => write!(f, "{object:?}"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(object) => write!(f, "{object:?}"),
            Value::Mock(mock) => write!(f, "{}", mock.name()),
            Value::SmartNull(smart_null) => write!(f, "{smart_null}"),
        }
    }
}

/// Zero value returned by a smart-null default answer for `Any` and `Object`
/// kinds. It remembers the unstubbed invocation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartNull {
    origin: Arc<str>,
}

impl SmartNull {
    pub(crate) fn new(origin: impl Into<Arc<str>>) -> Self {
        Self { origin: origin.into() }
    }

    /// Rendered invocation that returned this smart null
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl fmt::Display for SmartNull {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "SmartNull returned by unstubbed {} method on mock", self.origin)
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_primitive!(
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<Mock> for Value {
    fn from(v: Mock) -> Self {
        Value::Mock(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Builds a [`Value::List`] from anything convertible element by element.
pub fn list<I, T>(items: I) -> Value
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Value::List(items.into_iter().map(Into::into).collect())
}
