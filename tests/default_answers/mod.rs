use mockwright::args;
use mockwright::mock;
use mockwright::mock_with;
use mockwright::reset_global_config;
use mockwright::set_global_config;
use mockwright::verify;
use mockwright::when;
use mockwright::AsMock;
use mockwright::DefaultAnswer;
use mockwright::DefaultAnswerKind;
use mockwright::EngineConfig;
use mockwright::Error;
use mockwright::MockSettings;
use mockwright::Result;
use mockwright::Value;
use serial_test::serial;

use crate::common::Account;
use crate::common::AccountMock;
use crate::common::List;
use crate::common::ListMock;
use crate::common::RailwayTicket;
use crate::common::RailwayTicketMock;

#[test]
#[serial]
fn return_smart_nulls() -> Result<()> {
    let list: ListMock = mock_with(MockSettings::new().default_answer(DefaultAnswer::SmartNulls));

    let element = list.get(0)?;
    println!("{element}");
    assert!(element
        .to_string()
        .starts_with("SmartNull returned by unstubbed list.get(0)"));
    assert_eq!(list.to_array()?.len(), 0);
    Ok(())
}

#[test]
#[serial]
fn smart_null_interface_names_its_origin() -> Result<()> {
    let account: AccountMock = mock_with(MockSettings::new().default_answer(DefaultAnswer::SmartNulls));

    let ticket = account.get_railway_ticket()?.expect("smart nulls are never None");
    let e = ticket.set_destination("Beijing").unwrap_err();
    match e {
        Error::SmartNull(failure) => {
            assert_eq!(failure.origin, "account.get_railway_ticket()");
            assert!(failure.to_string().contains("set_destination"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
#[serial]
fn deep_stubs() -> Result<()> {
    let account: AccountMock = mock_with(MockSettings::new().default_answer(DefaultAnswer::DeepStubs));
    let ticket = account.get_railway_ticket()?.expect("deep stubs create children");
    when(&ticket, "get_destination", args![])?.then_return("Beijing")?;

    account
        .get_railway_ticket()?
        .expect("same child")
        .get_destination()?;

    let again = account.get_railway_ticket()?.expect("same child");
    verify(&again).method("get_destination", args![])?;
    assert_eq!(again.get_destination()?.as_deref(), Some("Beijing"));
    Ok(())
}

#[test]
#[serial]
fn deep_stubs_wired_by_hand() -> Result<()> {
    let account: AccountMock = mock();
    let railway_ticket: RailwayTicketMock = mock();
    when(&account, "get_railway_ticket", args![])?.then_return(railway_ticket.as_mock().clone())?;
    when(&railway_ticket, "get_destination", args![])?.then_return("Beijing")?;

    account
        .get_railway_ticket()?
        .expect("stubbed ticket")
        .get_destination()?;

    let ticket = account.get_railway_ticket()?.expect("stubbed ticket");
    verify(&ticket).method("get_destination", args![])?;
    assert_eq!(ticket.get_destination()?.as_deref(), Some("Beijing"));
    Ok(())
}

#[test]
#[serial]
fn returns_defaults_gives_no_ticket() -> Result<()> {
    let account: AccountMock = mock();
    assert!(account.get_railway_ticket()?.is_none());
    Ok(())
}

#[test]
#[serial]
fn unstubbed_invocations_use_custom_default_answer() -> Result<()> {
    let list: ListMock = mock_with(
        MockSettings::new().default_answer(DefaultAnswer::custom(|_| Ok(Value::Int(999)))),
    );

    assert_eq!(list.get(1)?, Value::Int(999));
    assert_eq!(list.size()?, 999);
    Ok(())
}

#[test]
#[serial]
fn global_default_answer_applies_to_new_mocks() -> Result<()> {
    let config = EngineConfig::new()?
        .with_override_str("[stubbing]\ndefault_answer = \"smart_nulls\"")?
        .validate()?;
    assert_eq!(config.stubbing.default_answer, DefaultAnswerKind::SmartNulls);
    set_global_config(config)?;

    let list: ListMock = mock();
    let explicit: ListMock = mock_with(MockSettings::new().default_answer(DefaultAnswer::ReturnsDefaults));
    reset_global_config();

    assert!(matches!(list.get(0)?, Value::SmartNull(_)));
    assert_eq!(explicit.get(0)?, Value::Null);

    let after_reset: ListMock = mock();
    assert_eq!(after_reset.get(0)?, Value::Null);
    Ok(())
}

#[test]
#[serial]
fn verbose_logging_and_listeners_do_not_change_answers() -> Result<()> {
    crate::common::enable_logger();
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let list: ListMock = mock_with(
        MockSettings::new()
            .verbose_logging()
            .invocation_listener(Recording(seen.clone())),
    );
    when(&list, "size", args![])?.then_return(3)?;

    assert_eq!(list.size()?, 3);
    assert!(!list.add(1)?);
    assert_eq!(*seen.lock(), vec!["list.size() -> 3", "list.add(1) -> false"]);
    Ok(())
}

struct Recording(std::sync::Arc<parking_lot::Mutex<Vec<String>>>);

impl mockwright::InvocationListener for Recording {
    fn report_invocation(
        &self,
        invocation: &mockwright::Invocation,
        outcome: &Result<Value>,
    ) {
        let outcome = match outcome {
            Ok(value) => value.to_string(),
            Err(e) => e.to_string(),
        };
        self.0.lock().push(format!("{invocation} -> {outcome}"));
    }
}
