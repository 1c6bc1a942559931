//! Argument matchers.
//!
//! A matcher is a described predicate over one argument value. Stubbing and
//! verification take one argument slot per formal parameter; a slot is either a
//! literal [`Value`] or a [`Matcher`]. Literal-only tuples are wrapped into
//! equality matchers. Mixing both kinds in one tuple is rejected with
//! [`StubMisuse::MixedMatchers`].

mod captor;
mod matchers;

pub use captor::*;
pub use matchers::*;


use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::Mock;
use crate::Object;
use crate::Result;
use crate::StubMisuse;
use crate::Value;

pub trait ArgumentMatcher: Send + Sync {
    fn matches(
        &self,
        value: &Value,
    ) -> bool;

    /// Rendering of the expected argument in diagnostics
    fn describe(&self) -> String;

    /// Called with the argument once the whole argument tuple matched.
    fn capture(
        &self,
        _value: &Value,
    ) {
    }

    /// The wrapped value of an equality matcher
    fn literal(&self) -> Option<&Value> {
        None
    }
}

#[derive(Clone)]
pub struct Matcher {
    inner: Arc<dyn ArgumentMatcher>,
}

impl Matcher {
    pub fn new<M>(matcher: M) -> Self
    where
        M: ArgumentMatcher + 'static,
    {
        Self {
            inner: Arc::new(matcher),
        }
    }

    pub fn matches(
        &self,
        value: &Value,
    ) -> bool {
        self.inner.matches(value)
    }

    pub fn description(&self) -> String {
        self.inner.describe()
    }

    pub(crate) fn capture(
        &self,
        value: &Value,
    ) {
        self.inner.capture(value)
    }

    /// Both matchers must accept the argument.
    pub fn and(
        self,
        other: Matcher,
    ) -> Matcher {
        Matcher::new(And(self, other))
    }

    /// Either matcher must accept the argument.
    pub fn or(
        self,
        other: Matcher,
    ) -> Matcher {
        Matcher::new(Or(self, other))
    }

    /// Two matchers describe the same pattern: equal literals, or the same
    /// matcher instance. Used to replace a previous stub.
    pub(crate) fn same_pattern(
        &self,
        other: &Matcher,
    ) -> bool {
        match (self.inner.literal(), other.inner.literal()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => Arc::ptr_eq(&self.inner, &other.inner),
            _ => false,
        }
    }

    pub(crate) fn all_match(
        matchers: &[Matcher],
        args: &[Value],
    ) -> bool {
        matchers.len() == args.len()
            && matchers
                .iter()
                .zip(args)
                .all(|(matcher, arg)| matcher.matches(arg))
    }

    pub(crate) fn capture_all(
        matchers: &[Matcher],
        args: &[Value],
    ) {
        for (matcher, arg) in matchers.iter().zip(args) {
            matcher.capture(arg);
        }
    }

    pub(crate) fn same_patterns(
        a: &[Matcher],
        b: &[Matcher],
    ) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_pattern(y))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

struct And(Matcher, Matcher);

impl ArgumentMatcher for And {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        self.0.matches(value) && self.1.matches(value)
    }

    fn describe(&self) -> String {
        format!("and({}, {})", self.0.description(), self.1.description())
    }

    fn capture(
        &self,
        value: &Value,
    ) {
        self.0.capture(value);
        self.1.capture(value);
    }
}

struct Or(Matcher, Matcher);

impl ArgumentMatcher for Or {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        self.0.matches(value) || self.1.matches(value)
    }

    fn describe(&self) -> String {
        format!("or({}, {})", self.0.description(), self.1.description())
    }

    fn capture(
        &self,
        value: &Value,
    ) {
        if self.0.matches(value) {
            self.0.capture(value);
        }
        if self.1.matches(value) {
            self.1.capture(value);
        }
    }
}

/// One argument slot of a stubbing or verification call.
#[derive(Debug, Clone)]
pub enum Arg {
    Value(Value),
    Matcher(Matcher),
}

impl From<Matcher> for Arg {
    fn from(matcher: Matcher) -> Self {
        Arg::Matcher(matcher)
    }
}

macro_rules! impl_arg_from_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_arg_from_value!(
    Value,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    usize,
    f32,
    f64,
    (),
    &str,
    String,
    Vec<Value>,
    Object,
    Mock,
);

/// Builds the argument slots of a stubbing or verification call.
///
/// ```ignore
/// when(&list, "get", args![any_int()])?.then_return(1)?;
/// verify(&comparator).method("compare", args![any_string(), eq("hello")])?;
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Applies the all-or-none rule and turns the slots into matchers.
pub(crate) fn into_matchers(
    method: &str,
    args: Vec<Arg>,
) -> Result<Vec<Matcher>> {
    let arity = args.len();
    let matchers = args.iter().filter(|arg| matches!(arg, Arg::Matcher(_))).count();

    if matchers != 0 && matchers != arity {
        return Err(Error::Misuse(StubMisuse::MixedMatchers {
            method: method.to_string(),
            arity,
            matchers,
        }));
    }

    Ok(args
        .into_iter()
        .map(|arg| match arg {
            Arg::Value(value) => eq(value),
            Arg::Matcher(matcher) => matcher,
        })
        .collect())
}
