use tracing::debug;
use tracing::warn;

use super::ensure_recording;
use super::times;
use super::VerificationMode;
use crate::into_matchers;
use crate::invocation::find_matching;
use crate::utils::render::render_invocations;
use crate::utils::render::render_wanted;
use crate::Arg;
use crate::AsMock;
use crate::Error;
use crate::Invocation;
use crate::Matcher;
use crate::Mock;
use crate::Result;
use crate::StubMisuse;
use crate::VerificationFailure;

/// Starts an ordered verification session over `mocks`.
///
/// ```ignore
/// let mut in_order = in_order(&[&first, &second])?;
/// in_order.verify(&first).method("add", args!["was called first"])?;
/// in_order.verify(&second).method("add", args!["was called second"])?;
/// ```
pub fn in_order(mocks: &[&dyn AsMock]) -> Result<InOrder> {
    if mocks.is_empty() {
        return Err(Error::Misuse(StubMisuse::EmptyMockList { operation: "in_order" }));
    }
    Ok(InOrder {
        mocks: mocks.iter().map(|mock| mock.as_mock().clone()).collect(),
        last_verified: 0,
    })
}

/// Ordered verification session. Each successful verification consumes the
/// earliest matching invocations after the cursor and moves the cursor past
/// the last one consumed.
#[derive(Debug)]
pub struct InOrder {
    mocks: Vec<Mock>,
    /// Sequence number of the last consumed invocation, 0 before any
    last_verified: u64,
}

impl InOrder {
    pub fn verify<M>(
        &mut self,
        mock: &M,
    ) -> InOrderVerifier<'_>
    where
        M: AsMock + ?Sized,
    {
        self.verify_with(mock, times(1))
    }

    pub fn verify_with<M>(
        &mut self,
        mock: &M,
        mode: VerificationMode,
    ) -> InOrderVerifier<'_>
    where
        M: AsMock + ?Sized,
    {
        InOrderVerifier {
            session: self,
            mock: mock.as_mock().clone(),
            mode,
        }
    }

    /// Fails on any unverified invocation of the session's mocks after the
    /// cursor.
    pub fn verify_no_more_interactions(&self) -> Result<()> {
        for mock in &self.mocks {
            ensure_recording(mock)?;
            let state = mock.state();
            let left: Vec<_> = state
                .recorder
                .unverified()
                .filter(|invocation| invocation.sequence_no() > self.last_verified)
                .collect();
            if left.is_empty() {
                continue;
            }

            let failure = VerificationFailure::NoMoreInteractionsWanted {
                mock: mock.name().to_string(),
                unverified: render_invocations(left, &mock.config().diagnostics),
            };
            drop(state);
            warn!("{}", failure);
            return Err(Error::Verification(failure));
        }
        Ok(())
    }

    pub fn cursor(&self) -> u64 {
        self.last_verified
    }

    fn contains(
        &self,
        mock: &Mock,
    ) -> bool {
        self.mocks.iter().any(|m| m.id() == mock.id())
    }
}

pub struct InOrderVerifier<'a> {
    session: &'a mut InOrder,
    mock: Mock,
    mode: VerificationMode,
}

impl InOrderVerifier<'_> {
    pub fn method(
        mut self,
        method: &str,
        args: Vec<Arg>,
    ) -> Result<()> {
        let mock = &self.mock;
        if !self.session.contains(mock) {
            return Err(Error::Misuse(StubMisuse::NotInOrderSession {
                mock: mock.name().to_string(),
            }));
        }
        ensure_recording(mock)?;
        let spec = mock.resolve_interceptable(method, args.len())?;
        let matchers = into_matchers(method, args)?;
        let cursor = self.session.last_verified;

        let invocations = mock.state().recorder.snapshot();
        let candidates: Vec<&Invocation> = find_matching(&invocations, spec.id(), &matchers)
            .into_iter()
            .filter(|invocation| invocation.sequence_no() > cursor)
            .collect();
        let actual = candidates.len();

        let taken: Option<&[&Invocation]> = match self.mode {
            VerificationMode::Times(n) if actual >= n && (n > 0 || actual == 0) => Some(&candidates[..n]),
            VerificationMode::AtLeast(n) if actual >= n => Some(&candidates[..]),
            VerificationMode::AtMost(n) if actual <= n => Some(&candidates[..]),
            VerificationMode::Only if actual == 1 => {
                let others = invocations
                    .iter()
                    .filter(|invocation| invocation.sequence_no() > cursor)
                    .count();
                (others == 1).then_some(&candidates[..])
            }
            _ => None,
        };

        match taken {
            Some(taken) => {
                for invocation in taken {
                    Matcher::capture_all(&matchers, invocation.args());
                }
                let verified: Vec<u64> = taken.iter().map(|invocation| invocation.sequence_no()).collect();
                mock.state().recorder.mark_verified(&verified);

                if let Some(&last) = verified.last() {
                    self.session.last_verified = last;
                }
                debug!(
                    "verified in order {} {}, cursor at #{}",
                    render_wanted(mock.name(), method, &matchers),
                    self.mode,
                    self.session.last_verified
                );
                Ok(())
            }
            None => {
                let invocations = render_invocations(&invocations, &mock.config().diagnostics);

                let failure = VerificationFailure::InOrder {
                    mock: mock.name().to_string(),
                    wanted: render_wanted(mock.name(), method, &matchers),
                    expected: self.mode.to_string(),
                    actual,
                    cursor,
                    invocations,
                };
                warn!("{}", failure);
                Err(Error::Verification(failure))
            }
        }
    }
}
