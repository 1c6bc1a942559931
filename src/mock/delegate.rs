#[cfg(test)]
use mockall::automock;

use crate::MethodId;
use crate::Result;
use crate::Value;

/// Dispatches calls to a real instance. Spies forward unstubbed calls here.
#[cfg_attr(test, automock)]
pub trait RealObject: Send + Sync {
    fn invoke_real(
        &self,
        method: &MethodId,
        args: &[Value],
    ) -> Result<Value>;
}
