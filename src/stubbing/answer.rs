use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::Invocation;
use crate::Kind;
use crate::MethodSpec;
use crate::Mock;
use crate::Result;
use crate::StubMisuse;
use crate::Thrown;
use crate::Value;

/// User supplied answer callback.
pub type AnswerFn = Arc<dyn Fn(&InvocationOnMock<'_>) -> Result<Value> + Send + Sync>;

/// What a stubbed call produces.
#[derive(Clone)]
pub enum Answer {
    Return(Value),
    Throw(Thrown),
    Custom(AnswerFn),
    CallRealMethod,
    /// Unit methods only
    Nothing,
}

impl Answer {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&InvocationOnMock<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Answer::Custom(Arc::new(f))
    }

    pub(crate) fn apply(
        &self,
        mock: &Mock,
        method: &MethodSpec,
        invocation: &Invocation,
    ) -> Result<Value> {
        match self {
            Answer::Return(value) => Ok(value.clone()),
            Answer::Throw(thrown) => Err(Error::Thrown(thrown.clone())),
            Answer::Custom(f) => f(&InvocationOnMock::new(mock, method, invocation)),
            Answer::CallRealMethod => mock.call_real(method, invocation.args()),
            Answer::Nothing => Ok(Value::Unit),
        }
    }

    /// Registration time checks against the stubbed method.
    pub(crate) fn validate(
        &self,
        mock: &Mock,
        method: &MethodSpec,
    ) -> Result<()> {
        match self {
            Answer::Return(value) => {
                let returns = method.returns();
                let unit = matches!(returns, Kind::Unit);
                if unit || (mock.config().stubbing.check_return_kinds && !returns.accepts(value)) {
                    return Err(Error::Misuse(StubMisuse::WrongReturnType {
                        method: method.id().to_string(),
                        value: format!("{value:?}"),
                        returns: returns.to_string(),
                    }));
                }
            }
            Answer::Nothing => {
                if !matches!(method.returns(), Kind::Unit) {
                    return Err(Error::Misuse(StubMisuse::NothingOnNonUnit {
                        method: method.id().to_string(),
                        returns: method.returns().to_string(),
                    }));
                }
            }
            Answer::CallRealMethod => {
                if !mock.has_real_method(method) {
                    return Err(Error::Misuse(StubMisuse::NoRealMethod {
                        mock: mock.name().to_string(),
                        method: method.name().to_string(),
                    }));
                }
            }
            Answer::Throw(_) | Answer::Custom(_) => {}
        }
        Ok(())
    }
}

impl fmt::Debug for Answer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Answer::Return(value) => write!(f, "Return({value:?})"),
            Answer::Throw(thrown) => write!(f, "Throw({thrown})"),
            Answer::Custom(_) => write!(f, "Custom"),
            Answer::CallRealMethod => write!(f, "CallRealMethod"),
            Answer::Nothing => write!(f, "Nothing"),
        }
    }
}

/// The intercepted call as seen by a user answer.
pub struct InvocationOnMock<'a> {
    mock: &'a Mock,
    method: &'a MethodSpec,
    invocation: &'a Invocation,
}

impl<'a> InvocationOnMock<'a> {
    pub(crate) fn new(
        mock: &'a Mock,
        method: &'a MethodSpec,
        invocation: &'a Invocation,
    ) -> Self {
        Self {
            mock,
            method,
            invocation,
        }
    }

    pub fn arguments(&self) -> &[Value] {
        self.invocation.args()
    }

    /// Argument at `index`, or `Null` past the end.
    pub fn argument(
        &self,
        index: usize,
    ) -> Value {
        self.invocation.arg(index).cloned().unwrap_or_default()
    }

    pub fn method(&self) -> &MethodSpec {
        self.method
    }

    pub fn mock(&self) -> &Mock {
        self.mock
    }

    pub fn invocation(&self) -> &Invocation {
        self.invocation
    }

    /// Runs the real method with the intercepted arguments.
    pub fn call_real_method(&self) -> Result<Value> {
        self.mock.call_real(self.method, self.invocation.args())
    }
}
