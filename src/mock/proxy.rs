use std::sync::Arc;

use crate::Error;
use crate::Mock;
use crate::MockSettings;
use crate::NullInteractionOnSmartNull;
use crate::RealObject;
use crate::Result;
use crate::TypeSpec;
use crate::Value;

/// Anything backed by a [`Mock`]: the mock handle itself or a proxy shell.
pub trait AsMock {
    fn as_mock(&self) -> &Mock;
}

impl AsMock for Mock {
    fn as_mock(&self) -> &Mock {
        self
    }
}

/// Typed stand-in for a mockable trait.
///
/// A proxy shell owns a [`Mock`] and implements the user's trait by forwarding
/// each method to [`Mock::invoke`]:
///
/// ```ignore
/// struct ListMock(Mock);
///
/// impl Proxy for ListMock {
///     fn type_spec() -> Arc<TypeSpec> { list_spec() }
///     fn from_mock(mock: Mock) -> Self { ListMock(mock) }
/// }
///
/// impl List for ListMock {
///     fn get(&self, index: i64) -> Result<Value> {
///         self.0.invoke("get", vec![index.into()])
///     }
/// }
/// ```
pub trait Proxy: AsMock + Sized {
    fn type_spec() -> Arc<TypeSpec>;

    fn from_mock(mock: Mock) -> Self;
}

/// Creates a mock of `P` with default settings.
pub fn mock<P>() -> P
where
    P: Proxy,
{
    mock_with(MockSettings::default())
}

pub fn mock_with<P>(settings: MockSettings) -> P
where
    P: Proxy,
{
    P::from_mock(Mock::new(P::type_spec(), settings))
}

/// Wraps `real`: unstubbed calls run the real object.
pub fn spy<P, R>(real: R) -> P
where
    P: Proxy,
    R: RealObject + 'static,
{
    spy_with(real, MockSettings::default())
}

pub fn spy_with<P, R>(
    real: R,
    settings: MockSettings,
) -> P
where
    P: Proxy,
    R: RealObject + 'static,
{
    P::from_mock(Mock::spy(P::type_spec(), real, settings))
}

impl Value {
    /// Wraps a returned mock (deep stub, smart null) into its proxy shell.
    /// `Null` yields `None`.
    pub fn into_proxy<P>(self) -> Result<Option<P>>
    where
        P: Proxy,
    {
        match self {
            Value::Null => Ok(None),
            Value::Mock(mock) if mock.type_spec().name() == P::type_spec().name() => Ok(Some(P::from_mock(mock))),
            Value::SmartNull(smart_null) => Err(NullInteractionOnSmartNull {
                origin: smart_null.origin().to_string(),
                method: format!("conversion to {}", P::type_spec().name()),
            }
            .into()),
            other => Err(Error::TypeMismatch {
                expected: P::type_spec().name(),
                found: format!("{other:?}"),
            }),
        }
    }
}
