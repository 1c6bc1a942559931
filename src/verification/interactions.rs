use tracing::warn;

use super::ensure_recording;
use crate::utils::render::render_invocations;
use crate::AsMock;
use crate::Error;
use crate::Result;
use crate::StubMisuse;
use crate::VerificationFailure;

/// Fails if any listed mock has an invocation no verification has flagged.
pub fn verify_no_more_interactions(mocks: &[&dyn AsMock]) -> Result<()> {
    if mocks.is_empty() {
        return Err(Error::Misuse(StubMisuse::EmptyMockList {
            operation: "verify_no_more_interactions",
        }));
    }

    for mock in mocks {
        let mock = mock.as_mock();
        ensure_recording(mock)?;
        let unverified = {
            let state = mock.state();
            render_invocations(state.recorder.unverified(), &mock.config().diagnostics)
        };
        if !unverified.is_empty() {
            let failure = VerificationFailure::NoMoreInteractionsWanted {
                mock: mock.name().to_string(),
                unverified,
            };
            warn!("{}", failure);
            return Err(Error::Verification(failure));
        }
    }
    Ok(())
}

/// Fails if any listed mock was invoked at all, verified or not.
pub fn verify_zero_interactions(mocks: &[&dyn AsMock]) -> Result<()> {
    if mocks.is_empty() {
        return Err(Error::Misuse(StubMisuse::EmptyMockList {
            operation: "verify_zero_interactions",
        }));
    }

    for mock in mocks {
        let mock = mock.as_mock();
        ensure_recording(mock)?;
        let invocations = {
            let state = mock.state();
            render_invocations(state.recorder.iter(), &mock.config().diagnostics)
        };
        if !invocations.is_empty() {
            let failure = VerificationFailure::ZeroInteractionsWanted {
                mock: mock.name().to_string(),
                invocations,
            };
            warn!("{}", failure);
            return Err(Error::Verification(failure));
        }
    }
    Ok(())
}
