use tracing::debug;

use super::Answer;
use super::InvocationOnMock;
use crate::into_matchers;
use crate::Arg;
use crate::AsMock;
use crate::Error;
use crate::Matcher;
use crate::MethodSpec;
use crate::Mock;
use crate::Result;
use crate::StubMisuse;
use crate::Thrown;
use crate::Value;

/// Starts stubbing `method` of `mock` for the given argument slots.
///
/// Nothing is registered until the first `then_*` call. On a spy the real
/// method is run once with the literal arguments (zero values stand in for
/// matcher slots); use [`crate::do_return`] and friends when that call must
/// not happen.
///
/// ```ignore
/// when(&list, "get", args![0])?.then_return("first")?.then_throw(Failure)?;
/// ```
pub fn when<M>(
    mock: &M,
    method: &str,
    args: Vec<Arg>,
) -> Result<OngoingStubbing>
where
    M: AsMock + ?Sized,
{
    let mock = mock.as_mock();
    let spec = mock.resolve_interceptable(method, args.len())?;

    let pseudo_args: Vec<Value> = args
        .iter()
        .zip(spec.params())
        .map(|(arg, kind)| match arg {
            Arg::Value(value) => value.clone(),
            Arg::Matcher(_) => kind.zero_value(),
        })
        .collect();
    let matchers = into_matchers(method, args)?;

    if mock.is_spy() {
        debug!("pseudo-call of {}.{} while stubbing a spy", mock.name(), method);
        mock.call_real(&spec, &pseudo_args).map_err(|e| {
            Error::Misuse(StubMisuse::RealMethodFailedWhileStubbing {
                mock: mock.name().to_string(),
                method: method.to_string(),
                reason: e.to_string(),
            })
        })?;
    }

    Ok(OngoingStubbing {
        mock: mock.clone(),
        method: spec,
        matchers,
        stub_id: None,
    })
}

/// Answer sequence under construction for one `(method, matchers)` pair.
#[derive(Debug)]
pub struct OngoingStubbing {
    mock: Mock,
    method: MethodSpec,
    matchers: Vec<Matcher>,
    stub_id: Option<u64>,
}

impl OngoingStubbing {
    pub fn then_return(
        self,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.then(Answer::Return(value.into()))
    }

    /// Consecutive return values, in order.
    pub fn then_return_values<I>(
        self,
        values: I,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        values
            .into_iter()
            .try_fold(self, |stubbing, value| stubbing.then_return(value))
    }

    pub fn then_throw<E>(
        self,
        error: E,
    ) -> Result<Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.then(Answer::Throw(Thrown::new(error)))
    }

    pub fn then_answer<F>(
        self,
        f: F,
    ) -> Result<Self>
    where
        F: Fn(&InvocationOnMock<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.then(Answer::custom(f))
    }

    pub fn then_call_real_method(self) -> Result<Self> {
        self.then(Answer::CallRealMethod)
    }

    /// Appends any [`Answer`] to the sequence.
    pub fn then(
        mut self,
        answer: Answer,
    ) -> Result<Self> {
        answer.validate(&self.mock, &self.method)?;
        debug!("stub {} on {}: {:?}", self.method.id(), self.mock.name(), answer);

        let mut state = self.mock.state();
        let appended = match self.stub_id {
            Some(id) => state.stubs.append_answer(id, answer.clone()),
            None => false,
        };
        if !appended {
            let id = state
                .stubs
                .register(*self.method.id(), self.matchers.clone(), vec![answer]);
            self.stub_id = Some(id);
        }
        drop(state);

        Ok(self)
    }
}
