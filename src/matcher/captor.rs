use std::sync::Arc;

use parking_lot::Mutex;

use super::ArgumentMatcher;
use super::Matcher;
use crate::Kind;
use crate::Value;

/// Collects the arguments accepted by its [`capture`](ArgumentCaptor::capture)
/// matchers, in the order they were matched.
#[derive(Clone)]
pub struct ArgumentCaptor {
    kind: Kind,
    values: Arc<Mutex<Vec<Value>>>,
}

impl Default for ArgumentCaptor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentCaptor {
    /// Captor accepting any argument
    pub fn new() -> Self {
        Self::for_kind(Kind::Any)
    }

    /// Captor accepting only non-null arguments of `kind`
    pub fn for_kind(kind: Kind) -> Self {
        Self {
            kind,
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Matcher to place in an argument slot.
    pub fn capture(&self) -> Matcher {
        Matcher::new(Capturing {
            kind: self.kind.clone(),
            values: self.values.clone(),
        })
    }

    /// Last captured argument
    pub fn value(&self) -> Option<Value> {
        self.values.lock().last().cloned()
    }

    pub fn values(&self) -> Vec<Value> {
        self.values.lock().clone()
    }
}

struct Capturing {
    kind: Kind,
    values: Arc<Mutex<Vec<Value>>>,
}

impl ArgumentMatcher for Capturing {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        match self.kind {
            Kind::Any => true,
            ref kind => !value.is_null() && kind.accepts(value),
        }
    }

    fn describe(&self) -> String {
        "<Capturing argument>".to_string()
    }

    fn capture(
        &self,
        value: &Value,
    ) {
        self.values.lock().push(value.clone());
    }
}
