use mockwright::any_int;
use mockwright::args;
use mockwright::do_return;
use mockwright::mock;
use mockwright::spy;
use mockwright::verify;
use mockwright::when;
use mockwright::AsMock;
use mockwright::Error;
use mockwright::Result;
use mockwright::StubMisuse;
use mockwright::Value;
use serial_test::parallel;

use crate::common::AMock;
use crate::common::FixtureError;
use crate::common::List;
use crate::common::ListMock;
use crate::common::RealList;
use crate::common::A;

#[test]
#[parallel]
fn spy_on_real_objects() -> Result<()> {
    let spy: ListMock = spy(RealList::default());
    assert!(spy.as_mock().is_spy());

    do_return(999).when(&spy).method("get", args![999])?;
    when(&spy, "size", args![])?.then_return(100)?;

    spy.add(1)?;
    spy.add(2)?;

    assert_eq!(spy.size()?, 100);
    assert_eq!(spy.get(0)?, Value::Int(1));
    assert_eq!(spy.get(1)?, Value::Int(2));
    verify(&spy).method("add", args![1])?;
    verify(&spy).method("add", args![2])?;
    assert_eq!(spy.get(999)?, Value::Int(999));

    let e = spy.get(2).unwrap_err();
    match e {
        Error::Answer(failure) => {
            assert!(matches!(
                failure.downcast_ref::<FixtureError>(),
                Some(FixtureError::IndexOutOfBounds { index: 2, size: 2 })
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
#[parallel]
fn when_on_spy_runs_the_real_method() -> Result<()> {
    let spy: ListMock = spy(RealList::default());

    let e = when(&spy, "get", args![0]).unwrap_err();
    assert!(matches!(
        e,
        Error::Misuse(StubMisuse::RealMethodFailedWhileStubbing { .. })
    ));
    assert_eq!(spy.as_mock().invocation_count(), 0);

    // The pseudo-call itself is never recorded
    when(&spy, "size", args![])?.then_return(7)?;
    assert_eq!(spy.as_mock().invocation_count(), 0);
    assert_eq!(spy.size()?, 7);
    Ok(())
}

#[test]
#[parallel]
fn spy_starts_from_real_state() -> Result<()> {
    let list: ListMock = spy(RealList::default());
    assert_eq!(list.size()?, 0);
    assert!(list.add("a")?);
    assert!(list.contains("a")?);
    assert_eq!(list.to_array()?, vec![Value::from("a")]);
    Ok(())
}

#[test]
#[parallel]
fn real_partial_mock() -> Result<()> {
    let a: AMock = mock();
    when(&a, "do_something", args![any_int()])?.then_call_real_method()?;

    assert_eq!(a.do_something(999)?, 999);
    Ok(())
}

#[test]
#[parallel]
fn partial_mock_keeps_stubs_for_other_arguments() -> Result<()> {
    let a: AMock = mock();
    when(&a, "do_something", args![any_int()])?.then_call_real_method()?;
    when(&a, "do_something", args![0])?.then_return(-1)?;

    assert_eq!(a.do_something(0)?, -1);
    assert_eq!(a.do_something(5)?, 5);
    Ok(())
}
