use std::fmt;

/// Cardinality a verification expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationMode {
    Times(usize),
    AtLeast(usize),
    AtMost(usize),
    /// Exactly one matching invocation and nothing else on the mock
    Only,
}

pub fn times(n: usize) -> VerificationMode {
    VerificationMode::Times(n)
}

pub fn never() -> VerificationMode {
    VerificationMode::Times(0)
}

pub fn at_least(n: usize) -> VerificationMode {
    VerificationMode::AtLeast(n)
}

pub fn at_least_once() -> VerificationMode {
    VerificationMode::AtLeast(1)
}

pub fn at_most(n: usize) -> VerificationMode {
    VerificationMode::AtMost(n)
}

pub fn only() -> VerificationMode {
    VerificationMode::Only
}

impl VerificationMode {
    /// Whether `actual` matching invocations satisfy the cardinality. `Only`
    /// also needs the mock to have no other invocation, checked by the caller.
    pub fn accepts(
        &self,
        actual: usize,
    ) -> bool {
        match *self {
            VerificationMode::Times(n) => actual == n,
            VerificationMode::AtLeast(n) => actual >= n,
            VerificationMode::AtMost(n) => actual <= n,
            VerificationMode::Only => actual == 1,
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        "time"
    } else {
        "times"
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match *self {
            VerificationMode::Times(0) => write!(f, "never"),
            VerificationMode::Times(n) => write!(f, "{} {}", n, plural(n)),
            VerificationMode::AtLeast(n) => write!(f, "at least {} {}", n, plural(n)),
            VerificationMode::AtMost(n) => write!(f, "at most {} {}", n, plural(n)),
            VerificationMode::Only => write!(f, "only this invocation, once"),
        }
    }
}
