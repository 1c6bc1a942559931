use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::TypeSpec;

/// Declared kind of a parameter or a return value.
#[derive(Clone)]
pub enum Kind {
    Unit,
    Bool,
    Int,
    Float,
    Str,
    List,
    /// Untyped reference, like a raw `Object` slot
    Any,
    /// Concrete reference type carried by [`Value::Object`]
    Object(ObjectType),
    /// Another mockable type
    Interface(Arc<TypeSpec>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectType {
    id: TypeId,
    name: &'static str,
}

impl ObjectType {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(std::any::type_name::<T>()),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Kind {
    pub fn object<T: 'static>() -> Self {
        Kind::Object(ObjectType::of::<T>())
    }

    pub fn interface(spec: &Arc<TypeSpec>) -> Self {
        Kind::Interface(spec.clone())
    }

    /// Null-like value returned for an unstubbed call.
    pub fn zero_value(&self) -> Value {
        match self {
            Kind::Unit => Value::Unit,
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::Float => Value::Float(0.0),
            Kind::List => Value::List(Vec::new()),
            Kind::Str | Kind::Any | Kind::Object(_) | Kind::Interface(_) => Value::Null,
        }
    }

    /// Whether values of this kind are references rather than primitives.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Kind::Str | Kind::List | Kind::Any | Kind::Object(_) | Kind::Interface(_)
        )
    }

    /// Whether `value` may flow through a slot of this kind. `Null` fits every
    /// composite kind.
    pub fn accepts(
        &self,
        value: &Value,
    ) -> bool {
        match (self, value) {
            (Kind::Any, Value::Unit) => false,
            (Kind::Any, _) => true,
            (kind, Value::Null) => kind.is_composite(),
            (kind, Value::SmartNull(_)) => kind.is_composite(),
            (Kind::Unit, Value::Unit) => true,
            (Kind::Bool, Value::Bool(_)) => true,
            (Kind::Int, Value::Int(_)) => true,
            (Kind::Float, Value::Float(_)) => true,
            (Kind::Str, Value::Str(_)) => true,
            (Kind::List, Value::List(_)) => true,
            (Kind::Object(object_type), Value::Object(object)) => object.is(object_type),
            (Kind::Interface(spec), Value::Mock(mock)) => mock.type_spec().name() == spec.name(),
            _ => false,
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Kind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Kind::Unit => write!(f, "unit"),
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::Float => write!(f, "float"),
            Kind::Str => write!(f, "string"),
            Kind::List => write!(f, "list"),
            Kind::Any => write!(f, "any"),
            Kind::Object(object_type) => write!(f, "{}", object_type.name()),
            Kind::Interface(spec) => write!(f, "{}", spec.name()),
        }
    }
}

/// `my_crate::model::Person` -> `Person`
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
