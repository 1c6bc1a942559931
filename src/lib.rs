//! A mock object engine for unit tests.
//!
//! Mocks are created from an explicitly declared [`TypeSpec`]. Every call on a
//! mock is intercepted, recorded and answered from a programmable stub table;
//! tests then verify the recorded interactions.
//!
//! ```ignore
//! let list: ListMock = mock();
//! when(&list, "get", args![any_int()])?.then_return("element")?;
//!
//! assert_eq!(list.get(7)?, Value::from("element"));
//!
//! verify(&list).method("get", args![7])?;
//! verify_no_more_interactions(&[&list])?;
//! ```

mod config;
mod constants;
mod errors;
mod invocation;
mod matcher;
mod mock;
mod stubbing;
mod value;
mod verification;

pub(crate) mod utils;

pub use config::*;
pub use errors::*;
pub use invocation::*;
pub use matcher::*;
pub use mock::*;
pub use stubbing::*;
pub use value::*;
pub use verification::*;

//-----------------------------------------------------------
// Test utils
