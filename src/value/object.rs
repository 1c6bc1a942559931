use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::kind::short_type_name;
use super::ObjectType;

trait ObjectValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T> ObjectValue for T
where
    T: Any + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reference value. Two objects are equal only when they are the same instance.
#[derive(Clone)]
pub struct Object {
    inner: Arc<dyn ObjectValue>,
    type_name: &'static str,
}

impl Object {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
    {
        Self {
            inner: Arc::new(value),
            type_name: short_type_name(std::any::type_name::<T>()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }

    pub fn same_instance(
        &self,
        other: &Object,
    ) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }

    pub(crate) fn is(
        &self,
        object_type: &ObjectType,
    ) -> bool {
        (*self.inner).as_any().type_id() == object_type.type_id()
    }
}

impl fmt::Debug for Object {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}
