//! Invocation records and their identities.
//!
//! An [`Invocation`] is created for every intercepted call. Its `sequence_no`
//! comes from a process-wide counter, which gives the total ordering used by
//! in-order verification. The counter is never rewound, not even by `reset`.

mod recorder;

pub(crate) use recorder::*;


use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::utils::render::render_args;
use crate::Value;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);
static NEXT_MOCK_ID: AtomicU64 = AtomicU64::new(0);

/// Allocates the next global sequence number. The first one handed out is 1.
pub(crate) fn next_sequence_no() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::SeqCst) + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MockId(u64);

impl MockId {
    pub(crate) fn next() -> Self {
        MockId(NEXT_MOCK_ID.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MockId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "mock#{}", self.0)
    }
}

/// Stable key of a mocked operation: declaring type, method name and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    declaring: &'static str,
    name: &'static str,
    arity: usize,
}

impl MethodId {
    pub fn new(
        declaring: &'static str,
        name: &'static str,
        arity: usize,
    ) -> Self {
        Self {
            declaring,
            name,
            arity,
        }
    }

    pub fn declaring(&self) -> &'static str {
        self.declaring
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for MethodId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}.{}/{}", self.declaring, self.name, self.arity)
    }
}

/// Immutable record of one intercepted call. Only the `verified` marker changes
/// after creation, and only inside the recorder.
#[derive(Debug, Clone)]
pub struct Invocation {
    mock_id: MockId,
    mock_name: Arc<str>,
    method: MethodId,
    args: Vec<Value>,
    sequence_no: u64,
    verified: bool,
}

impl Invocation {
    pub(crate) fn new(
        mock_id: MockId,
        mock_name: Arc<str>,
        method: MethodId,
        args: Vec<Value>,
        sequence_no: u64,
    ) -> Self {
        Self {
            mock_id,
            mock_name,
            method,
            args,
            sequence_no,
            verified: false,
        }
    }

    pub fn mock_id(&self) -> MockId {
        self.mock_id
    }

    pub fn mock_name(&self) -> &str {
        &self.mock_name
    }

    pub fn method(&self) -> &MethodId {
        &self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn arg(
        &self,
        index: usize,
    ) -> Option<&Value> {
        self.args.get(index)
    }

    pub fn sequence_no(&self) -> u64 {
        self.sequence_no
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub(crate) fn mark_verified(&mut self) {
        self.verified = true;
    }
}

/// `list.add(1)`
impl fmt::Display for Invocation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.mock_name,
            self.method.name(),
            render_args(&self.args)
        )
    }
}
