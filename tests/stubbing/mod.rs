use mockwright::any;
use mockwright::any_int;
use mockwright::arg_that;
use mockwright::args;
use mockwright::do_throw;
use mockwright::mock;
use mockwright::reset;
use mockwright::verify;
use mockwright::when;
use mockwright::Error;
use mockwright::Result;
use mockwright::StubMisuse;
use mockwright::Value;
use serial_test::parallel;

use crate::common::enable_logger;
use crate::common::AMock;
use crate::common::ComparableMock;
use crate::common::ComparatorMock;
use crate::common::FixtureError;
use crate::common::IteratorMock;
use crate::common::List;
use crate::common::ListMock;
use crate::common::OutputStreamMock;
use crate::common::OutputStreamWriter;
use crate::common::ValueIterator;
use crate::common::Comparable;
use crate::common::A;

#[test]
#[parallel]
fn mock_result() -> Result<()> {
    enable_logger();
    let iterator: IteratorMock = mock();
    when(&iterator, "next", args![])?
        .then_return("hello")?
        .then_return("world")?;

    let result = format!("{} {} {}", iterator.next()?, iterator.next()?, iterator.next()?);

    assert_eq!(result, "hello world world");
    Ok(())
}

#[test]
#[parallel]
fn sequence_answers_repeat_the_last_one() -> Result<()> {
    let iterator: IteratorMock = mock();
    when(&iterator, "next", args![])?.then_return_values(["a", "b", "c"])?;

    let seen = (0..4).map(|_| iterator.next()).collect::<Result<Vec<Value>>>()?;
    assert_eq!(seen, vec![Value::from("a"), "b".into(), "c".into(), "c".into()]);
    Ok(())
}

#[test]
#[parallel]
fn mock_exception_on_close() -> Result<()> {
    let stream: OutputStreamMock = mock();
    do_throw(FixtureError::Io("stream closed"))
        .when(&stream)
        .method("close", args![])?;

    let writer = OutputStreamWriter::new(&stream);
    writer.write_str("hi")?;
    let e = writer.close().unwrap_err();

    assert!(matches!(e.thrown::<FixtureError>(), Some(FixtureError::Io(_))));
    verify(&stream).method("flush", args![])?;
    Ok(())
}

#[test]
#[parallel]
fn mock_exception_on_add() -> Result<()> {
    let list: ListMock = mock();
    do_throw(FixtureError::Runtime("add failed"))
        .when(&list)
        .method("add", args![1])?;

    let e = list.add(1).unwrap_err();
    assert!(matches!(e.thrown::<FixtureError>(), Some(FixtureError::Runtime("add failed"))));
    assert!(list.add(2).is_ok());
    Ok(())
}

#[test]
#[parallel]
fn param_match() -> Result<()> {
    let comparable: ComparableMock = mock();
    when(&comparable, "compare_to", args!["Test"])?.then_return(1)?;
    when(&comparable, "compare_to", args!["Omg"])?.then_return(2)?;

    assert_eq!(comparable.compare_to("Test")?, 1);
    assert_eq!(comparable.compare_to("Omg")?, 2);
    assert_eq!(comparable.compare_to("Not stub")?, 0);
    Ok(())
}

#[test]
#[parallel]
fn fuzzy_param_match() -> Result<()> {
    let list: ListMock = mock();
    let is_valid = || {
        arg_that("isValid", |value: &Value| {
            matches!(value.as_int(), Some(1) | Some(2))
        })
    };
    when(&list, "get", args![any_int()])?.then_return(1)?;
    when(&list, "contains", args![is_valid()])?.then_return(true)?;

    assert_eq!(list.get(1)?, Value::Int(1));
    assert_eq!(list.get(99)?, Value::Int(1));
    assert!(list.contains(1)?);
    assert!(!list.contains(3)?);
    Ok(())
}

#[test]
#[parallel]
fn custom_argument_matcher() -> Result<()> {
    let list: ListMock = mock();
    let of_two_elements = || {
        arg_that("listOfTwoElements", |value: &Value| {
            value.as_list().is_some_and(|items| items.len() == 2)
        })
    };
    when(&list, "add_all", args![of_two_elements()])?.then_return(true)?;

    assert!(list.add_all(vec!["one".into(), "two".into()])?);
    assert!(!list.add_all(vec!["one".into()])?);

    verify(&list).method("add_all", args![of_two_elements()])?;
    verify(&list).method("add_all", args![mockwright::list(["one"])])?;
    Ok(())
}

#[test]
#[parallel]
fn answer_with_callback() -> Result<()> {
    let list: ListMock = mock();
    when(&list, "get", args![any_int()])?
        .then_answer(|invocation| Ok(Value::from(format!("hello world:{}", invocation.argument(0)))))?;

    assert_eq!(list.get(0)?, Value::from("hello world:0"));
    assert_eq!(list.get(99)?, Value::from("hello world:99"));
    Ok(())
}

#[test]
#[parallel]
fn consecutive_call() -> Result<()> {
    let list: ListMock = mock();
    when(&list, "get", args![0])?.then_return(0)?;
    when(&list, "get", args![0])?.then_return(1)?;
    when(&list, "get", args![0])?.then_return(2)?;
    when(&list, "get", args![1])?
        .then_return(0)?
        .then_return(1)?
        .then_throw(FixtureError::Runtime("no more"))?;

    assert_eq!(list.get(0)?, Value::Int(2));
    assert_eq!(list.get(0)?, Value::Int(2));
    assert_eq!(list.get(1)?, Value::Int(0));
    assert_eq!(list.get(1)?, Value::Int(1));
    for _ in 0..2 {
        let e = list.get(1).unwrap_err();
        assert!(matches!(e, Error::Thrown(_)));
    }
    Ok(())
}

#[test]
#[parallel]
fn stubbing_round_trip_until_superseded() -> Result<()> {
    let list: ListMock = mock();
    when(&list, "contains", args![any()])?.then_return(true)?;
    assert!(list.contains("x")?);
    assert!(list.contains(Value::Null)?);

    when(&list, "contains", args!["x"])?.then_return(false)?;
    assert!(!list.contains("x")?);
    assert!(list.contains("y")?);
    Ok(())
}

#[test]
#[parallel]
fn reset_mock() -> Result<()> {
    let list: ListMock = mock();
    when(&list, "size", args![])?.then_return(10)?;
    list.add(1)?;
    assert_eq!(list.size()?, 10);

    reset(&[&list]);

    assert_eq!(list.size()?, 0);
    assert_eq!(mockwright::AsMock::as_mock(&list).invocation_count(), 1);
    Ok(())
}

#[test]
#[parallel]
fn mixed_matchers_are_misuse() {
    let comparator: ComparatorMock = mock();

    let e = when(&comparator, "compare", args![any(), "hello"]).unwrap_err();
    assert!(matches!(e, Error::Misuse(StubMisuse::MixedMatchers { .. })));

    let e = verify(&comparator)
        .method("compare", args!["nihao", any()])
        .unwrap_err();
    assert!(e.is_misuse());
}

#[test]
#[parallel]
fn final_method_is_never_intercepted() -> Result<()> {
    let a: AMock = mock();
    assert_eq!(a.label()?, "A");
    assert_eq!(a.do_something(5)?, 0);

    let e = when(&a, "label", args![]).unwrap_err();
    assert!(matches!(e, Error::Misuse(StubMisuse::FinalMethod { .. })));
    assert_eq!(mockwright::AsMock::as_mock(&a).invocation_count(), 1);
    Ok(())
}

#[test]
#[parallel]
fn predicate_stubs_with_equal_descriptions_coexist() -> Result<()> {
    let list: ListMock = mock();
    when(&list, "get", args![arg_that("index", |v: &Value| v == &Value::Int(1))])?.then_return("one")?;
    when(&list, "get", args![arg_that("index", |v: &Value| v == &Value::Int(2))])?.then_return("two")?;

    assert_eq!(list.get(1)?, Value::from("one"));
    assert_eq!(list.get(2)?, Value::from("two"));
    assert_eq!(list.get(3)?, Value::Null);
    Ok(())
}
