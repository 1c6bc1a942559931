use super::ArgumentMatcher;
use super::Matcher;
use crate::Kind;
use crate::Value;

struct Anything;

impl ArgumentMatcher for Anything {
    fn matches(
        &self,
        _value: &Value,
    ) -> bool {
        true
    }

    fn describe(&self) -> String {
        "<any>".to_string()
    }
}

struct OfKind(Kind);

impl ArgumentMatcher for OfKind {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        !value.is_null() && self.0.accepts(value)
    }

    fn describe(&self) -> String {
        format!("<any {}>", self.0)
    }
}

struct Equals(Value);

impl ArgumentMatcher for Equals {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        &self.0 == value
    }

    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }

    fn literal(&self) -> Option<&Value> {
        Some(&self.0)
    }
}

struct Predicate<F> {
    description: String,
    predicate: F,
}

impl<F> ArgumentMatcher for Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        (self.predicate)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

struct Not(Matcher);

impl ArgumentMatcher for Not {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        !self.0.matches(value)
    }

    fn describe(&self) -> String {
        format!("not({})", self.0.description())
    }
}

/// Matches anything, including null.
pub fn any() -> Matcher {
    Matcher::new(Anything)
}

/// Matches any non-null value accepted by `kind`.
pub fn any_of_type(kind: Kind) -> Matcher {
    Matcher::new(OfKind(kind))
}

pub fn any_int() -> Matcher {
    any_of_type(Kind::Int)
}

pub fn any_string() -> Matcher {
    any_of_type(Kind::Str)
}

pub fn any_bool() -> Matcher {
    any_of_type(Kind::Bool)
}

pub fn any_list() -> Matcher {
    any_of_type(Kind::List)
}

/// Matches arguments equal to `value`. Objects are equal only to themselves.
pub fn eq(value: impl Into<Value>) -> Matcher {
    Matcher::new(Equals(value.into()))
}

/// Custom matcher built from a predicate. `description` is shown in
/// verification failures.
pub fn arg_that<F>(
    description: impl Into<String>,
    predicate: F,
) -> Matcher
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Matcher::new(Predicate {
        description: description.into(),
        predicate,
    })
}

pub fn is_null() -> Matcher {
    arg_that("isNull()", Value::is_null)
}

pub fn not_null() -> Matcher {
    arg_that("notNull()", |value: &Value| !value.is_null())
}

pub fn not(matcher: Matcher) -> Matcher {
    Matcher::new(Not(matcher))
}
