//! Fixtures shared by the integration tests: declared type specs, the proxy
//! shells implementing the mocked traits, and real objects for spies.

use std::sync::Arc;

use mockwright::AsMock;
use mockwright::Error;
use mockwright::FromValue;
use mockwright::Kind;
use mockwright::MethodId;
use mockwright::Mock;
use mockwright::Proxy;
use mockwright::RealObject;
use mockwright::Result;
use mockwright::TypeSpec;
use mockwright::Value;
use parking_lot::Mutex;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    env_logger::init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

macro_rules! proxy_shell {
    ($shell:ident, $spec:ident) => {
        #[derive(Debug, Clone)]
        pub struct $shell(Mock);

        impl AsMock for $shell {
            fn as_mock(&self) -> &Mock {
                &self.0
            }
        }

        impl Proxy for $shell {
            fn type_spec() -> Arc<TypeSpec> {
                $spec()
            }

            fn from_mock(mock: Mock) -> Self {
                $shell(mock)
            }
        }
    };
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Index: {index}, Size: {size}")]
    IndexOutOfBounds { index: i64, size: usize },

    #[error("io error: {0}")]
    Io(&'static str),

    #[error("runtime failure: {0}")]
    Runtime(&'static str),
}

//-----------------------------------------------------------
// List

pub trait List {
    fn add(
        &self,
        item: impl Into<Value>,
    ) -> Result<bool>;

    fn get(
        &self,
        index: i64,
    ) -> Result<Value>;

    fn size(&self) -> Result<i64>;

    fn clear(&self) -> Result<()>;

    fn contains(
        &self,
        item: impl Into<Value>,
    ) -> Result<bool>;

    fn add_all(
        &self,
        items: Vec<Value>,
    ) -> Result<bool>;

    fn to_array(&self) -> Result<Vec<Value>>;
}

pub fn list_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("List")
        .method("add", [Kind::Any], Kind::Bool)
        .method("get", [Kind::Int], Kind::Any)
        .method("size", [], Kind::Int)
        .method("clear", [], Kind::Unit)
        .method("contains", [Kind::Any], Kind::Bool)
        .method("add_all", [Kind::List], Kind::Bool)
        .method("to_array", [], Kind::List)
        .build()
}

proxy_shell!(ListMock, list_spec);

impl List for ListMock {
    fn add(
        &self,
        item: impl Into<Value>,
    ) -> Result<bool> {
        self.0.call("add", vec![item.into()])
    }

    fn get(
        &self,
        index: i64,
    ) -> Result<Value> {
        self.0.invoke("get", vec![index.into()])
    }

    fn size(&self) -> Result<i64> {
        self.0.call("size", vec![])
    }

    fn clear(&self) -> Result<()> {
        self.0.call("clear", vec![])
    }

    fn contains(
        &self,
        item: impl Into<Value>,
    ) -> Result<bool> {
        self.0.call("contains", vec![item.into()])
    }

    fn add_all(
        &self,
        items: Vec<Value>,
    ) -> Result<bool> {
        self.0.call("add_all", vec![items.into()])
    }

    fn to_array(&self) -> Result<Vec<Value>> {
        self.0.call("to_array", vec![])
    }
}

/// Growable list used as the real object behind spies.
#[derive(Debug, Default)]
pub struct RealList {
    items: Mutex<Vec<Value>>,
}

impl RealObject for RealList {
    fn invoke_real(
        &self,
        method: &MethodId,
        args: &[Value],
    ) -> Result<Value> {
        let mut items = self.items.lock();
        let arg = |i: usize| args.get(i).cloned().unwrap_or_default();
        match method.name() {
            "add" => {
                items.push(arg(0));
                Ok(Value::Bool(true))
            }
            "get" => {
                let index = i64::from_value(arg(0))?;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i).cloned())
                    .ok_or_else(|| {
                        Error::answer(FixtureError::IndexOutOfBounds {
                            index,
                            size: items.len(),
                        })
                    })
            }
            "size" => Ok(Value::from(items.len())),
            "clear" => {
                items.clear();
                Ok(Value::Unit)
            }
            "contains" => Ok(Value::Bool(items.contains(&arg(0)))),
            "add_all" => {
                let added = Vec::<Value>::from_value(arg(0))?;
                let changed = !added.is_empty();
                items.extend(added);
                Ok(Value::Bool(changed))
            }
            "to_array" => Ok(Value::List(items.clone())),
            _ => Err(Error::answer(FixtureError::Runtime("unsupported method"))),
        }
    }
}

//-----------------------------------------------------------
// Iterator, Comparable, Comparator

pub trait ValueIterator {
    fn next(&self) -> Result<Value>;

    fn has_next(&self) -> Result<bool>;
}

pub fn iterator_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("Iterator")
        .method("next", [], Kind::Any)
        .method("has_next", [], Kind::Bool)
        .build()
}

proxy_shell!(IteratorMock, iterator_spec);

impl ValueIterator for IteratorMock {
    fn next(&self) -> Result<Value> {
        self.0.invoke("next", vec![])
    }

    fn has_next(&self) -> Result<bool> {
        self.0.call("has_next", vec![])
    }
}

pub trait Comparable {
    fn compare_to(
        &self,
        other: impl Into<Value>,
    ) -> Result<i64>;
}

pub fn comparable_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("Comparable")
        .method("compare_to", [Kind::Any], Kind::Int)
        .build()
}

proxy_shell!(ComparableMock, comparable_spec);

impl Comparable for ComparableMock {
    fn compare_to(
        &self,
        other: impl Into<Value>,
    ) -> Result<i64> {
        self.0.call("compare_to", vec![other.into()])
    }
}

pub trait Comparator {
    fn compare(
        &self,
        a: impl Into<Value>,
        b: impl Into<Value>,
    ) -> Result<i64>;
}

pub fn comparator_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("Comparator")
        .method("compare", [Kind::Any, Kind::Any], Kind::Int)
        .build()
}

proxy_shell!(ComparatorMock, comparator_spec);

impl Comparator for ComparatorMock {
    fn compare(
        &self,
        a: impl Into<Value>,
        b: impl Into<Value>,
    ) -> Result<i64> {
        self.0.call("compare", vec![a.into(), b.into()])
    }
}

//-----------------------------------------------------------
// OutputStream and a writer using it

pub trait OutputStream {
    fn write(
        &self,
        byte: i64,
    ) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn close(&self) -> Result<()>;
}

pub fn output_stream_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("OutputStream")
        .method("write", [Kind::Int], Kind::Unit)
        .method("flush", [], Kind::Unit)
        .method("close", [], Kind::Unit)
        .build()
}

proxy_shell!(OutputStreamMock, output_stream_spec);

impl OutputStream for OutputStreamMock {
    fn write(
        &self,
        byte: i64,
    ) -> Result<()> {
        self.0.call("write", vec![byte.into()])
    }

    fn flush(&self) -> Result<()> {
        self.0.call("flush", vec![])
    }

    fn close(&self) -> Result<()> {
        self.0.call("close", vec![])
    }
}

pub struct OutputStreamWriter<'a> {
    out: &'a dyn OutputStream,
}

impl<'a> OutputStreamWriter<'a> {
    pub fn new(out: &'a dyn OutputStream) -> Self {
        Self { out }
    }

    pub fn write_str(
        &self,
        s: &str,
    ) -> Result<()> {
        for byte in s.bytes() {
            self.out.write(i64::from(byte))?;
        }
        Ok(())
    }

    pub fn close(self) -> Result<()> {
        self.out.flush()?;
        self.out.close()
    }
}

//-----------------------------------------------------------
// Account and RailwayTicket

pub trait RailwayTicket {
    fn get_destination(&self) -> Result<Option<String>>;

    fn set_destination(
        &self,
        destination: &str,
    ) -> Result<()>;
}

pub fn railway_ticket_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("RailwayTicket")
        .method("get_destination", [], Kind::Str)
        .method("set_destination", [Kind::Str], Kind::Unit)
        .build()
}

proxy_shell!(RailwayTicketMock, railway_ticket_spec);

impl RailwayTicket for RailwayTicketMock {
    fn get_destination(&self) -> Result<Option<String>> {
        self.0.call("get_destination", vec![])
    }

    fn set_destination(
        &self,
        destination: &str,
    ) -> Result<()> {
        self.0.call("set_destination", vec![destination.into()])
    }
}

pub trait Account {
    type Ticket: RailwayTicket;

    fn get_railway_ticket(&self) -> Result<Option<Self::Ticket>>;
}

pub fn account_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("Account")
        .method("get_railway_ticket", [], Kind::interface(&railway_ticket_spec()))
        .build()
}

proxy_shell!(AccountMock, account_spec);

impl Account for AccountMock {
    type Ticket = RailwayTicketMock;

    fn get_railway_ticket(&self) -> Result<Option<RailwayTicketMock>> {
        self.0.invoke("get_railway_ticket", vec![])?.into_proxy()
    }
}

//-----------------------------------------------------------
// PersonDao and the service using it

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
}

pub trait PersonDao {
    fn update(
        &self,
        person: Person,
    ) -> Result<()>;
}

pub fn person_dao_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("PersonDao")
        .method("update", [Kind::object::<Person>()], Kind::Unit)
        .build()
}

proxy_shell!(PersonDaoMock, person_dao_spec);

impl PersonDao for PersonDaoMock {
    fn update(
        &self,
        person: Person,
    ) -> Result<()> {
        self.0
            .call("update", vec![mockwright::Object::new(person).into()])
    }
}

pub struct PersonService<'a> {
    dao: &'a dyn PersonDao,
}

impl<'a> PersonService<'a> {
    pub fn new(dao: &'a dyn PersonDao) -> Self {
        Self { dao }
    }

    pub fn update(
        &self,
        id: i64,
        name: &str,
    ) -> Result<()> {
        self.dao.update(Person {
            id,
            name: name.to_string(),
        })
    }
}

//-----------------------------------------------------------
// A: a partially abstract type

pub trait A {
    fn do_something(
        &self,
        i: i64,
    ) -> Result<i64>;

    fn label(&self) -> Result<String>;
}

pub fn a_spec() -> Arc<TypeSpec> {
    TypeSpec::builder("A")
        .default_method("do_something", [Kind::Int], Kind::Int, |args| {
            Ok(args.first().cloned().unwrap_or(Value::Int(0)))
        })
        .final_method("label", [], Kind::Str, |_| Ok(Value::from("A")))
        .build()
}

proxy_shell!(AMock, a_spec);

impl A for AMock {
    fn do_something(
        &self,
        i: i64,
    ) -> Result<i64> {
        self.0.call("do_something", vec![i.into()])
    }

    fn label(&self) -> Result<String> {
        self.0.call("label", vec![])
    }
}
