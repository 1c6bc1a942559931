#[cfg(test)]
use mockall::automock;

use crate::Invocation;
use crate::Result;
use crate::Value;

/// Notified after each intercepted call with the outcome handed to the caller.
#[cfg_attr(test, automock)]
pub trait InvocationListener: Send + Sync {
    fn report_invocation(
        &self,
        invocation: &Invocation,
        outcome: &Result<Value>,
    );
}
