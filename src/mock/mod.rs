//! Mock proxy factory and invocation interception.
//!
//! A [`Mock`] is the engine-side state of one stand-in: its declared
//! [`TypeSpec`], stub table, invocation recorder and optional real delegate.
//! The stand-in itself is a proxy shell (see [`Proxy`]) that implements the
//! user's trait by forwarding every method to [`Mock::invoke`].
//!
//! Interception of one call:
//! 1. Resolve the method; final methods run their real body and are not recorded
//! 2. Capture `{mock, method, args, next sequence number}`
//! 3. Append to the recorder (unless stub-only)
//! 4. Match the stub entries newest first, outside the lock
//! 5. Consume one answer of the matching stub, or apply the default answer
//! 6. Notify listeners and hand the outcome to the caller
//!
//! The state lock is never held while matchers, answers, delegates or
//! listeners run.

mod delegate;
mod listener;
mod proxy;
mod settings;
mod type_spec;

pub use delegate::*;
pub use listener::*;
pub use proxy::*;
pub use settings::*;
pub use type_spec::*;


use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use parking_lot::MutexGuard;
use tracing::debug;
use tracing::info;
use tracing::trace;

use crate::global_config;
use crate::invocation::next_sequence_no;
use crate::invocation::Recorder;
use crate::stubbing::StubTable;
use crate::DefaultAnswer;
use crate::EngineConfig;
use crate::Error;
use crate::FromValue;
use crate::Invocation;
use crate::MethodId;
use crate::MockId;
use crate::NullInteractionOnSmartNull;
use crate::Result;
use crate::StubMisuse;
use crate::Value;

#[derive(Clone)]
pub struct Mock {
    inner: Arc<MockInner>,
}

struct MockInner {
    id: MockId,
    name: Arc<str>,
    spec: Arc<TypeSpec>,
    default_answer: DefaultAnswer,
    delegate: Option<Arc<dyn RealObject>>,
    /// Set on smart-null stand-ins: the invocation that produced them
    smart_null_origin: Option<Arc<str>>,
    stub_only: bool,
    verbose_logging: bool,
    listeners: Vec<Arc<dyn InvocationListener>>,
    config: Arc<EngineConfig>,
    state: Mutex<MockState>,
}

#[derive(Default)]
pub(crate) struct MockState {
    pub(crate) stubs: StubTable,
    pub(crate) recorder: Recorder,
    deep_stubs: Vec<DeepStub>,
}

/// Child mock memoized per `(method, args)` by the deep-stub default answer
struct DeepStub {
    method: MethodId,
    args: Vec<Value>,
    child: Mock,
}

impl Debug for Mock {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Mock")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("type", &self.inner.spec.name())
            .finish()
    }
}

impl Mock {
    /// Creates a mock of `spec`. Unset settings fall back to the global
    /// [`EngineConfig`].
    pub fn new(
        spec: Arc<TypeSpec>,
        settings: MockSettings,
    ) -> Mock {
        Self::build(spec, settings, global_config(), None)
    }

    /// Creates a spy: unstubbed calls are delegated to `real`.
    pub fn spy<R>(
        spec: Arc<TypeSpec>,
        real: R,
        settings: MockSettings,
    ) -> Mock
    where
        R: RealObject + 'static,
    {
        let mut settings = settings.spied_instance(real);
        if settings.default_answer.is_none() {
            settings.default_answer = Some(DefaultAnswer::CallsRealMethods);
        }
        Self::new(spec, settings)
    }

    #[cfg(test)]
    pub(crate) fn with_config(
        spec: Arc<TypeSpec>,
        settings: MockSettings,
        config: Arc<EngineConfig>,
    ) -> Mock {
        Self::build(spec, settings, config, None)
    }

    fn build(
        spec: Arc<TypeSpec>,
        settings: MockSettings,
        config: Arc<EngineConfig>,
        smart_null_origin: Option<Arc<str>>,
    ) -> Mock {
        let id = MockId::next();
        let name: Arc<str> = match settings.name {
            Some(name) => Arc::from(name),
            None => Arc::from(default_mock_name(spec.name())),
        };
        let default_answer = settings
            .default_answer
            .unwrap_or_else(|| DefaultAnswer::from(config.stubbing.default_answer));

        debug!(
            "create mock {} ({}) of {}, default answer: {:?}",
            name,
            id,
            spec.name(),
            default_answer
        );

        Mock {
            inner: Arc::new(MockInner {
                id,
                name,
                spec,
                default_answer,
                delegate: settings.delegate,
                smart_null_origin,
                stub_only: settings.stub_only,
                verbose_logging: settings.verbose_logging,
                listeners: settings.listeners,
                config,
                state: Mutex::new(MockState::default()),
            }),
        }
    }

    /// Stand-in returned by the smart-null default answer for interface kinds.
    pub(crate) fn smart_null(
        spec: Arc<TypeSpec>,
        origin: &Invocation,
        config: Arc<EngineConfig>,
    ) -> Mock {
        let settings = MockSettings::new().name(format!("smartNull({})", spec.name()));
        Self::build(spec, settings, config, Some(Arc::from(origin.to_string())))
    }

    pub fn id(&self) -> MockId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn type_spec(&self) -> &Arc<TypeSpec> {
        &self.inner.spec
    }

    pub fn default_answer(&self) -> &DefaultAnswer {
        &self.inner.default_answer
    }

    pub fn is_spy(&self) -> bool {
        self.inner.delegate.is_some()
    }

    pub fn is_stub_only(&self) -> bool {
        self.inner.stub_only
    }

    pub fn is_smart_null(&self) -> bool {
        self.inner.smart_null_origin.is_some()
    }

    pub(crate) fn config(&self) -> &Arc<EngineConfig> {
        &self.inner.config
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.state.lock()
    }

    /// Intercepts one call of `method` with `args`.
    pub fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        let method = self.lookup(method, args.len())?.clone();

        if method.is_final() {
            trace!("{}.{} is final, running the real body", self.name(), method.name());
            return self.call_real(&method, &args);
        }

        let (invocation, candidates) = {
            let mut state = self.state();
            let invocation = Invocation::new(
                self.id(),
                self.inner.name.clone(),
                *method.id(),
                args,
                next_sequence_no(),
            );
            let candidates = state.stubs.candidates(method.id());
            if !self.inner.stub_only {
                state.recorder.record(invocation.clone());
            }
            (invocation, candidates)
        };

        let answer = candidates
            .iter()
            .find(|candidate| candidate.matches(invocation.args()))
            .and_then(|candidate| {
                let answer = self.state().stubs.consume(candidate.id())?;
                candidate.capture(invocation.args());
                Some(answer)
            });

        trace!(
            "intercept #{} {} (stubbed: {})",
            invocation.sequence_no(),
            invocation,
            answer.is_some()
        );

        let outcome = match answer {
            Some(answer) => answer.apply(self, &method, &invocation),
            None => self.answer_unstubbed(&method, &invocation),
        };

        if self.inner.verbose_logging {
            match &outcome {
                Ok(value) => info!("#{} {} returned {:?}", invocation.sequence_no(), invocation, value),
                Err(e) => info!("#{} {} raised: {}", invocation.sequence_no(), invocation, e),
            }
        }
        for listener in &self.inner.listeners {
            listener.report_invocation(&invocation, &outcome);
        }

        outcome
    }

    /// Intercepts one call and converts its result to `T`.
    pub fn call<T>(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<T>
    where
        T: FromValue,
    {
        self.invoke(method, args).and_then(T::from_value)
    }

    /// Snapshot of the recorded invocations, oldest first.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state().recorder.snapshot()
    }

    pub fn invocation_count(&self) -> usize {
        self.state().recorder.len()
    }

    /// Clears stubs, recorded invocations and deep-stub children. Sequence
    /// numbers keep increasing.
    pub fn reset(&self) {
        let mut state = self.state();
        state.stubs.clear();
        state.recorder.clear();
        state.deep_stubs.clear();
        debug!("reset mock {}", self.name());
    }

    /// Clears recorded invocations only.
    pub fn clear_invocations(&self) {
        self.state().recorder.clear();
        debug!("clear invocations of mock {}", self.name());
    }

    fn lookup(
        &self,
        method: &str,
        arity: usize,
    ) -> Result<&MethodSpec> {
        self.inner.spec.method(method, arity).ok_or_else(|| {
            Error::Misuse(StubMisuse::UnknownMethod {
                mock: self.name().to_string(),
                method: method.to_string(),
                arity,
            })
        })
    }

    /// Method targeted by stubbing or verification. Final methods are rejected.
    pub(crate) fn resolve_interceptable(
        &self,
        method: &str,
        arity: usize,
    ) -> Result<MethodSpec> {
        let spec = self.lookup(method, arity)?;
        if spec.is_final() {
            return Err(Error::Misuse(StubMisuse::FinalMethod {
                mock: self.name().to_string(),
                method: method.to_string(),
            }));
        }
        Ok(spec.clone())
    }

    pub(crate) fn has_real_method(
        &self,
        method: &MethodSpec,
    ) -> bool {
        self.inner.delegate.is_some() || method.has_body()
    }

    /// Runs the real method: the delegate if there is one, else the declared body.
    pub(crate) fn call_real(
        &self,
        method: &MethodSpec,
        args: &[Value],
    ) -> Result<Value> {
        if let Some(delegate) = &self.inner.delegate {
            return delegate.invoke_real(method.id(), args);
        }
        match method.body() {
            Some(body) => body(args),
            None => Err(Error::Misuse(StubMisuse::NoRealMethod {
                mock: self.name().to_string(),
                method: method.name().to_string(),
            })),
        }
    }

    fn answer_unstubbed(
        &self,
        method: &MethodSpec,
        invocation: &Invocation,
    ) -> Result<Value> {
        if let Some(origin) = &self.inner.smart_null_origin {
            return Err(NullInteractionOnSmartNull {
                origin: origin.to_string(),
                method: invocation.to_string(),
            }
            .into());
        }
        self.inner.default_answer.answer(self, method, invocation)
    }

    /// Child mock for an unstubbed call under the deep-stub default answer.
    /// Equal argument tuples get the same child.
    pub(crate) fn deep_stub(
        &self,
        invocation: &Invocation,
        spec: &Arc<TypeSpec>,
    ) -> Mock {
        let mut state = self.state();
        if let Some(existing) = state
            .deep_stubs
            .iter()
            .find(|deep| &deep.method == invocation.method() && deep.args.as_slice() == invocation.args())
        {
            return existing.child.clone();
        }

        let child = Self::build(
            spec.clone(),
            MockSettings::new().default_answer(DefaultAnswer::DeepStubs),
            self.inner.config.clone(),
            None,
        );
        trace!("deep stub {} for {}", child.name(), invocation);
        state.deep_stubs.push(DeepStub {
            method: *invocation.method(),
            args: invocation.args().to_vec(),
            child: child.clone(),
        });
        child
    }
}

/// `LinkedList` -> `linkedList`
fn default_mock_name(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Clears stubs, invocations and deep-stub children of every listed mock.
pub fn reset(mocks: &[&dyn AsMock]) {
    for mock in mocks {
        mock.as_mock().reset();
    }
}

/// Clears recorded invocations of every listed mock, keeping stubs.
pub fn clear_invocations(mocks: &[&dyn AsMock]) {
    for mock in mocks {
        mock.as_mock().clear_invocations();
    }
}
