use tracing::debug;

use super::Answer;
use super::InvocationOnMock;
use crate::into_matchers;
use crate::Arg;
use crate::AsMock;
use crate::Mock;
use crate::Result;
use crate::Thrown;
use crate::Value;

/// Answer sequence built before the target call is named. Registering it
/// never runs the mocked method.
///
/// ```ignore
/// do_return("foo").when(&spy).method("get", args![0])?;
/// do_throw(Failure).do_nothing().when(&stream).method("close", args![])?;
/// ```
///
/// A stubber is only built by the `do_*` functions, so it always holds at
/// least one answer.
#[derive(Debug)]
pub struct Stubber {
    answers: Vec<Answer>,
}

pub fn do_return(value: impl Into<Value>) -> Stubber {
    Stubber::starting_with(Answer::Return(value.into()))
}

pub fn do_throw<E>(error: E) -> Stubber
where
    E: std::error::Error + Send + Sync + 'static,
{
    Stubber::starting_with(Answer::Throw(Thrown::new(error)))
}

pub fn do_answer<F>(f: F) -> Stubber
where
    F: Fn(&InvocationOnMock<'_>) -> Result<Value> + Send + Sync + 'static,
{
    Stubber::starting_with(Answer::custom(f))
}

pub fn do_nothing() -> Stubber {
    Stubber::starting_with(Answer::Nothing)
}

pub fn do_call_real_method() -> Stubber {
    Stubber::starting_with(Answer::CallRealMethod)
}

impl Stubber {
    fn starting_with(answer: Answer) -> Self {
        Self { answers: vec![answer] }
    }

    pub fn do_return(
        mut self,
        value: impl Into<Value>,
    ) -> Self {
        self.answers.push(Answer::Return(value.into()));
        self
    }

    pub fn do_throw<E>(
        mut self,
        error: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.answers.push(Answer::Throw(Thrown::new(error)));
        self
    }

    pub fn do_answer<F>(
        mut self,
        f: F,
    ) -> Self
    where
        F: Fn(&InvocationOnMock<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.answers.push(Answer::custom(f));
        self
    }

    pub fn do_nothing(mut self) -> Self {
        self.answers.push(Answer::Nothing);
        self
    }

    pub fn do_call_real_method(mut self) -> Self {
        self.answers.push(Answer::CallRealMethod);
        self
    }

    pub fn when<M>(
        self,
        mock: &M,
    ) -> StubberTarget
    where
        M: AsMock + ?Sized,
    {
        StubberTarget {
            answers: self.answers,
            mock: mock.as_mock().clone(),
        }
    }
}

/// A [`Stubber`] bound to its mock, waiting for the method.
#[derive(Debug)]
pub struct StubberTarget {
    answers: Vec<Answer>,
    mock: Mock,
}

impl StubberTarget {
    pub fn method(
        self,
        method: &str,
        args: Vec<Arg>,
    ) -> Result<()> {
        let spec = self.mock.resolve_interceptable(method, args.len())?;
        let matchers = into_matchers(method, args)?;
        for answer in &self.answers {
            answer.validate(&self.mock, &spec)?;
        }

        debug!("stub {} on {}: {:?}", spec.id(), self.mock.name(), self.answers);
        self.mock
            .state()
            .stubs
            .register(*spec.id(), matchers, self.answers);
        Ok(())
    }
}
