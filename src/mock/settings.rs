use std::fmt::Debug;
use std::sync::Arc;

use crate::DefaultAnswer;
use crate::InvocationListener;
use crate::RealObject;

/// Per-mock options.
///
/// ```ignore
/// let list: ListMock = mock_with(
///     MockSettings::new()
///         .name("orders")
///         .default_answer(DefaultAnswer::SmartNulls),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockSettings {
    pub(crate) name: Option<String>,
    pub(crate) default_answer: Option<DefaultAnswer>,
    pub(crate) delegate: Option<Arc<dyn RealObject>>,
    pub(crate) stub_only: bool,
    pub(crate) verbose_logging: bool,
    pub(crate) listeners: Vec<Arc<dyn InvocationListener>>,
}

impl Debug for MockSettings {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("MockSettings")
            .field("name", &self.name)
            .field("default_answer", &self.default_answer)
            .field("spy", &self.delegate.is_some())
            .field("stub_only", &self.stub_only)
            .field("verbose_logging", &self.verbose_logging)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MockSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label used in diagnostics instead of the type name
    pub fn name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Answer for unstubbed calls. Falls back to the global configuration.
    pub fn default_answer(
        mut self,
        answer: DefaultAnswer,
    ) -> Self {
        self.default_answer = Some(answer);
        self
    }

    /// Real object receiving real-method calls.
    pub fn spied_instance<R>(
        mut self,
        real: R,
    ) -> Self
    where
        R: RealObject + 'static,
    {
        self.delegate = Some(Arc::new(real));
        self
    }

    /// Skip recording: the mock only answers and cannot be verified.
    pub fn stub_only(mut self) -> Self {
        self.stub_only = true;
        self
    }

    /// Log every invocation and its outcome at info level.
    pub fn verbose_logging(mut self) -> Self {
        self.verbose_logging = true;
        self
    }

    pub fn invocation_listener<L>(
        mut self,
        listener: L,
    ) -> Self
    where
        L: InvocationListener + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }
}
