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
use crate::Matcher;
use crate::Mock;
use crate::Result;
use crate::VerificationFailure;

/// Verifies that a method was called exactly once.
///
/// ```ignore
/// verify(&list).method("add", args!["one"])?;
/// ```
pub fn verify<M>(mock: &M) -> Verifier
where
    M: AsMock + ?Sized,
{
    verify_with(mock, times(1))
}

/// Verifies a method call count against `mode`.
///
/// ```ignore
/// verify_with(&list, at_least(2)).method("add", args![any_string()])?;
/// ```
pub fn verify_with<M>(
    mock: &M,
    mode: VerificationMode,
) -> Verifier
where
    M: AsMock + ?Sized,
{
    Verifier {
        mock: mock.as_mock().clone(),
        mode,
    }
}

#[derive(Debug)]
pub struct Verifier {
    mock: Mock,
    mode: VerificationMode,
}

impl Verifier {
    pub fn method(
        self,
        method: &str,
        args: Vec<Arg>,
    ) -> Result<()> {
        let mock = &self.mock;
        ensure_recording(mock)?;
        let spec = mock.resolve_interceptable(method, args.len())?;
        let matchers = into_matchers(method, args)?;

        let invocations = mock.state().recorder.snapshot();
        let matching = find_matching(&invocations, spec.id(), &matchers);
        let actual = matching.len();
        let satisfied = match self.mode {
            VerificationMode::Only => actual == 1 && invocations.len() == 1,
            mode => mode.accepts(actual),
        };

        if satisfied {
            for invocation in &matching {
                Matcher::capture_all(&matchers, invocation.args());
            }
            let verified: Vec<u64> = matching.iter().map(|invocation| invocation.sequence_no()).collect();
            mock.state().recorder.mark_verified(&verified);
            debug!(
                "verified {} {}",
                render_wanted(mock.name(), method, &matchers),
                self.mode
            );
            return Ok(());
        }

        let invocations = render_invocations(&invocations, &mock.config().diagnostics);

        let failure = VerificationFailure::CountMismatch {
            mock: mock.name().to_string(),
            wanted: render_wanted(mock.name(), method, &matchers),
            expected: self.mode.to_string(),
            actual,
            invocations,
        };
        warn!("{}", failure);
        Err(Error::Verification(failure))
    }
}
