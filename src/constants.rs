// -
// Diagnostics

/// Invocations listed in a verification failure by default
pub(crate) const DEFAULT_MAX_LISTED_INVOCATIONS: usize = 20;
