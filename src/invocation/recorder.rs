use crate::Invocation;
use crate::Matcher;
use crate::MethodId;

/// Append-only log of the invocations made on one mock.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    invocations: Vec<Invocation>,
}

impl Recorder {
    pub(crate) fn record(
        &mut self,
        invocation: Invocation,
    ) {
        self.invocations.push(invocation);
    }

    pub(crate) fn len(&self) -> usize {
        self.invocations.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Invocation> {
        self.invocations.iter()
    }

    /// Flags the invocations with the given sequence numbers as verified.
    pub(crate) fn mark_verified(
        &mut self,
        sequence_nos: &[u64],
    ) {
        for invocation in &mut self.invocations {
            if sequence_nos.contains(&invocation.sequence_no()) {
                invocation.mark_verified();
            }
        }
    }

    pub(crate) fn unverified(&self) -> impl Iterator<Item = &Invocation> {
        self.invocations.iter().filter(|invocation| !invocation.is_verified())
    }

    pub(crate) fn snapshot(&self) -> Vec<Invocation> {
        self.invocations.clone()
    }

    pub(crate) fn clear(&mut self) {
        self.invocations.clear();
    }
}

/// Invocations of `method` whose arguments satisfy `matchers`, in recording
/// order. Runs on a snapshot so that user matchers never see the mock locked.
pub(crate) fn find_matching<'a>(
    invocations: &'a [Invocation],
    method: &MethodId,
    matchers: &[Matcher],
) -> Vec<&'a Invocation> {
    invocations
        .iter()
        .filter(|invocation| invocation.method() == method && Matcher::all_match(matchers, invocation.args()))
        .collect()
}
