//! Mock Engine Error Hierarchy
//!
//! Defines the error types raised by the engine, categorized by the phase that
//! raises them:
//! - configuration misuse is raised eagerly while stubbing or verifying
//! - verification failures are raised from the verification call
//! - answer failures propagate from the intercepted call as if the real code had
//!   raised them

use std::sync::Arc;

use config::ConfigError;

use crate::utils::render::render_lines;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error accepted by [`Thrown`] and [`UserAnswerFailure`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid use of the stubbing or verification API
    #[error(transparent)]
    Misuse(#[from] StubMisuse),

    /// Recorded interactions do not satisfy a verification
    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    /// A smart-null stand-in was used without stubbing
    #[error(transparent)]
    SmartNull(#[from] NullInteractionOnSmartNull),

    /// A user supplied answer raised
    #[error(transparent)]
    Answer(#[from] UserAnswerFailure),

    /// Failure configured through `then_throw` or `do_throw`
    #[error(transparent)]
    Thrown(#[from] Thrown),

    /// A returned value could not be converted into the type the caller asked for
    #[error("Expected a value of type {expected} but got {found}")]
    TypeMismatch { expected: &'static str, found: String },

    /// Engine configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Builds the failure a user supplied answer raises.
    pub fn answer(error: impl Into<BoxError>) -> Self {
        Error::Answer(UserAnswerFailure::new(error))
    }

    pub fn is_misuse(&self) -> bool {
        matches!(self, Error::Misuse(_))
    }

    pub fn is_verification(&self) -> bool {
        matches!(self, Error::Verification(_))
    }

    /// Returns the stubbed failure downcast to its original type, if this error
    /// was configured with `then_throw` or `do_throw`.
    pub fn thrown<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::Thrown(thrown) => thrown.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StubMisuse {
    /// Some argument slots used matchers and some used raw values
    #[error(
        "Invalid use of argument matchers on {method}: {arity} matchers expected, {matchers} recorded. \
         When matchers are used, every argument must be a matcher, e.g. eq(\"value\") instead of \"value\""
    )]
    MixedMatchers {
        method: String,
        arity: usize,
        matchers: usize,
    },

    /// No method with this name and arity is declared on the mocked type
    #[error("{mock} has no method {method} taking {arity} argument(s)")]
    UnknownMethod {
        mock: String,
        method: String,
        arity: usize,
    },

    /// Final methods are never intercepted
    #[error("{mock}.{method} is final: it cannot be stubbed or verified")]
    FinalMethod { mock: String, method: String },

    /// `when` on a spy runs the real method, which failed
    #[error(
        "Real method {mock}.{method} failed while stubbing with when(): {reason}. \
         Use the do_return()/do_throw() family to stub spies"
    )]
    RealMethodFailedWhileStubbing {
        mock: String,
        method: String,
        reason: String,
    },

    /// Neither a delegate nor a default body is available
    #[error("Cannot call real method {mock}.{method}: the mock has no delegate and the method is abstract")]
    NoRealMethod { mock: String, method: String },

    #[error("Only methods returning unit can do_nothing(), but {method} returns {returns}")]
    NothingOnNonUnit { method: String, returns: String },

    #[error("{value} cannot be returned by {method}, which returns {returns}")]
    WrongReturnType {
        method: String,
        value: String,
        returns: String,
    },

    /// Stub-only mocks do not record invocations
    #[error("{mock} was created with stub_only() and does not record invocations: it cannot be verified")]
    StubOnlyVerification { mock: String },

    #[error("{mock} was not passed to in_order() and cannot be verified in this session")]
    NotInOrderSession { mock: String },

    #[error("{operation} requires at least one mock")]
    EmptyMockList { operation: &'static str },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerificationFailure {
    /// Number of matching invocations does not satisfy the cardinality
    #[error("{wanted}\nWanted {expected} but was {actual}.\nRecorded invocations on {mock}:{}", render_lines(.invocations))]
    CountMismatch {
        mock: String,
        wanted: String,
        expected: String,
        actual: usize,
        invocations: Vec<String>,
    },

    /// Ordered verification cursor could not be advanced
    #[error(
        "Verification in order failure: {wanted}\nWanted {expected} after invocation #{cursor} but was {actual}.\nRecorded invocations on {mock}:{}",
        render_lines(.invocations)
    )]
    InOrder {
        mock: String,
        wanted: String,
        expected: String,
        actual: usize,
        cursor: u64,
        invocations: Vec<String>,
    },

    /// Invocations left unverified
    #[error("No interactions wanted here, but found unverified invocations on {mock}:{}", render_lines(.unverified))]
    NoMoreInteractionsWanted { mock: String, unverified: Vec<String> },

    /// Any invocation at all
    #[error("No interactions wanted on {mock}, but found:{}", render_lines(.invocations))]
    ZeroInteractionsWanted { mock: String, invocations: Vec<String> },
}

#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "SmartNull returned by this unstubbed method call on a mock:\n    {origin}\nwas used to call {method}"
)]
pub struct NullInteractionOnSmartNull {
    pub origin: String,
    pub method: String,
}

/// Error raised by a user supplied answer, displayed verbatim.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct UserAnswerFailure {
    error: Arc<dyn std::error::Error + Send + Sync>,
}

impl UserAnswerFailure {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self {
            error: Arc::from(error.into()),
        }
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        (*self.error).downcast_ref::<E>()
    }
}

/// Stubbed failure. Shared so that a repeated answer raises the same error again.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct Thrown {
    error: Arc<dyn std::error::Error + Send + Sync>,
}

impl Thrown {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self { error: Arc::new(error) }
    }

    pub fn from_boxed(error: BoxError) -> Self {
        Self {
            error: Arc::from(error),
        }
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        (*self.error).downcast_ref::<E>()
    }
}
