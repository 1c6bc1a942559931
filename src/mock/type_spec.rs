use std::fmt;
use std::sync::Arc;

use crate::Kind;
use crate::MethodId;
use crate::Result;
use crate::Value;

/// Concrete body of a method, run for final methods and for real-method answers
/// on mocks without a delegate.
pub type RealMethod = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
pub struct MethodSpec {
    id: MethodId,
    params: Vec<Kind>,
    returns: Kind,
    is_final: bool,
    body: Option<RealMethod>,
}

impl MethodSpec {
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn params(&self) -> &[Kind] {
        &self.params
    }

    pub fn returns(&self) -> &Kind {
        &self.returns
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub(crate) fn body(&self) -> Option<&RealMethod> {
        self.body.as_ref()
    }
}

impl fmt::Debug for MethodSpec {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("id", &self.id)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .field("is_final", &self.is_final)
            .field("has_body", &self.has_body())
            .finish()
    }
}

/// Declared capability set of a mockable type. Methods are told apart by name
/// and arity, so overloads with different parameter counts coexist.
pub struct TypeSpec {
    name: &'static str,
    methods: Vec<MethodSpec>,
}

impl TypeSpec {
    pub fn builder(name: &'static str) -> TypeSpecBuilder {
        TypeSpecBuilder {
            name,
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn method(
        &self,
        name: &str,
        arity: usize,
    ) -> Option<&MethodSpec> {
        self.methods
            .iter()
            .find(|method| method.name() == name && method.id.arity() == arity)
    }
}

impl fmt::Debug for TypeSpec {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TypeSpec")
            .field("name", &self.name)
            .field("methods", &self.methods.len())
            .finish()
    }
}

pub struct TypeSpecBuilder {
    name: &'static str,
    methods: Vec<MethodSpec>,
}

impl TypeSpecBuilder {
    /// Declares an abstract method.
    pub fn method<P>(
        self,
        name: &'static str,
        params: P,
        returns: Kind,
    ) -> Self
    where
        P: IntoIterator<Item = Kind>,
    {
        self.push(name, params, returns, false, None)
    }

    /// Declares a method with a concrete body, reachable through
    /// `then_call_real_method` and the `CallsRealMethods` default answer.
    pub fn default_method<P, F>(
        self,
        name: &'static str,
        params: P,
        returns: Kind,
        body: F,
    ) -> Self
    where
        P: IntoIterator<Item = Kind>,
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.push(name, params, returns, false, Some(Arc::new(body)))
    }

    /// Declares a final method: it is never intercepted and always runs `body`.
    pub fn final_method<P, F>(
        self,
        name: &'static str,
        params: P,
        returns: Kind,
        body: F,
    ) -> Self
    where
        P: IntoIterator<Item = Kind>,
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.push(name, params, returns, true, Some(Arc::new(body)))
    }

    pub fn build(self) -> Arc<TypeSpec> {
        Arc::new(TypeSpec {
            name: self.name,
            methods: self.methods,
        })
    }

    fn push<P>(
        mut self,
        name: &'static str,
        params: P,
        returns: Kind,
        is_final: bool,
        body: Option<RealMethod>,
    ) -> Self
    where
        P: IntoIterator<Item = Kind>,
    {
        let params: Vec<Kind> = params.into_iter().collect();
        let id = MethodId::new(self.name, name, params.len());

        // A redeclared signature replaces the earlier one
        self.methods.retain(|method| method.id != id);
        self.methods.push(MethodSpec {
            id,
            params,
            returns,
            is_final,
            body,
        });
        self
    }
}
