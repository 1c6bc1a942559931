//! Verification of recorded interactions.
//!
//! - [`verify`] / [`verify_with`] count the invocations matching a pattern
//! - [`in_order`] checks that invocations happened in a given order, across
//!   one or more mocks, by walking the global sequence numbers
//! - [`verify_no_more_interactions`] / [`verify_zero_interactions`] look at
//!   what is left
//!
//! Successful verifications flag the matched invocations as verified.

mod in_order;
mod interactions;
mod mode;
mod verifier;

pub use in_order::*;
pub use interactions::*;
pub use mode::*;
pub use verifier::*;


use crate::Error;
use crate::Mock;
use crate::Result;
use crate::StubMisuse;

/// Stub-only mocks keep no history to verify.
fn ensure_recording(mock: &Mock) -> Result<()> {
    if mock.is_stub_only() {
        return Err(Error::Misuse(StubMisuse::StubOnlyVerification {
            mock: mock.name().to_string(),
        }));
    }
    Ok(())
}
