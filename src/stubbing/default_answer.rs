use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::AnswerFn;
use super::InvocationOnMock;
use crate::DefaultAnswerKind;
use crate::Invocation;
use crate::Kind;
use crate::MethodSpec;
use crate::Mock;
use crate::Result;
use crate::SmartNull;
use crate::Value;

/// Answer of a mock for calls no stub matched.
#[derive(Clone, Default)]
pub enum DefaultAnswer {
    /// Null-like zero value of the declared return kind
    #[default]
    ReturnsDefaults,
    /// Like `ReturnsDefaults`, but strings come back empty and references come
    /// back as stand-ins that fail loudly when used
    SmartNulls,
    /// Interface results are child mocks, themselves deep stubbed
    DeepStubs,
    /// Delegate, else default body, else zero value
    CallsRealMethods,
    Custom(AnswerFn),
}

impl DefaultAnswer {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&InvocationOnMock<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        DefaultAnswer::Custom(Arc::new(f))
    }

    pub(crate) fn answer(
        &self,
        mock: &Mock,
        method: &MethodSpec,
        invocation: &Invocation,
    ) -> Result<Value> {
        let returns = method.returns();
        match self {
            DefaultAnswer::ReturnsDefaults => Ok(returns.zero_value()),
            DefaultAnswer::SmartNulls => Ok(match returns {
                Kind::Str => Value::Str(String::new()),
                Kind::Interface(spec) => {
                    trace!("smart null {} for {}", spec.name(), invocation);
                    Value::Mock(Mock::smart_null(spec.clone(), invocation, mock.config().clone()))
                }
                Kind::Any | Kind::Object(_) => Value::SmartNull(SmartNull::new(invocation.to_string())),
                other => other.zero_value(),
            }),
            DefaultAnswer::DeepStubs => Ok(match returns {
                Kind::Interface(spec) => Value::Mock(mock.deep_stub(invocation, spec)),
                other => other.zero_value(),
            }),
            DefaultAnswer::CallsRealMethods => {
                if mock.has_real_method(method) {
                    mock.call_real(method, invocation.args())
                } else {
                    Ok(returns.zero_value())
                }
            }
            DefaultAnswer::Custom(f) => f(&InvocationOnMock::new(mock, method, invocation)),
        }
    }
}

impl From<DefaultAnswerKind> for DefaultAnswer {
    fn from(kind: DefaultAnswerKind) -> Self {
        match kind {
            DefaultAnswerKind::ReturnsDefaults => DefaultAnswer::ReturnsDefaults,
            DefaultAnswerKind::SmartNulls => DefaultAnswer::SmartNulls,
            DefaultAnswerKind::DeepStubs => DefaultAnswer::DeepStubs,
            DefaultAnswerKind::CallsRealMethods => DefaultAnswer::CallsRealMethods,
        }
    }
}

impl fmt::Debug for DefaultAnswer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            DefaultAnswer::ReturnsDefaults => write!(f, "ReturnsDefaults"),
            DefaultAnswer::SmartNulls => write!(f, "SmartNulls"),
            DefaultAnswer::DeepStubs => write!(f, "DeepStubs"),
            DefaultAnswer::CallsRealMethods => write!(f, "CallsRealMethods"),
            DefaultAnswer::Custom(_) => write!(f, "Custom"),
        }
    }
}
