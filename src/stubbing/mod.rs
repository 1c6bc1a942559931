//! Stub configuration and answers.
//!
//! Two builder paths register the same kind of [`StubTable`] entry:
//! - `when(&mock, "method", args![..])?.then_return(..)?` for ordinary mocks
//! - `do_return(..).when(&mock).method("method", args![..])?` which never
//!   calls anything, and is the way to stub spies and unit methods

mod answer;
mod default_answer;
mod ongoing;
mod stub_table;
mod stubber;

pub use answer::*;
pub use default_answer::*;
pub use ongoing::*;
pub(crate) use stub_table::*;
pub use stubber::*;
