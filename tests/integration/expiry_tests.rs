use std::time::Duration;

use super::{build_integration_test, rejected, welcome};
use account_form::Phase;

#[test]
fn given_a_success_banner_should_clear_after_five_seconds() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![welcome("bob")])
        .build();
    test.fill_valid("bob");
    test.submit();

    test.advance(Duration::from_millis(4_999));
    test.latest(|props| assert_eq!(props.success.as_deref(), Some("Welcome, bob!")));

    test.advance(Duration::from_millis(1));
    test.latest(|props| {
        assert_eq!(props.success, None);
        assert!(!props.submit_enabled);
    });
    assert_eq!(test.driver.model().phase(), Phase::Editing);
    assert_eq!(test.timer.pending(), 0);
}

#[test]
fn given_a_second_success_within_the_window_should_outlive_the_first_timer() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![welcome("bob"), welcome("alice")])
        .build();
    test.fill_valid("bob");
    test.submit();

    test.advance(Duration::from_secs(3));
    test.fill_valid("alice");
    test.submit();
    test.latest(|props| assert_eq!(props.success.as_deref(), Some("Welcome, alice!")));

    // First submission's timer fires here.
    test.advance(Duration::from_secs(2));
    test.latest(|props| assert_eq!(props.success.as_deref(), Some("Welcome, alice!")));

    test.advance(Duration::from_secs(3));
    test.latest(|props| assert_eq!(props.success, None));
}

#[test]
fn given_a_configured_lifetime_should_expire_on_it() {
    let mut test = build_integration_test()
        .given_success_message_ttl(Duration::from_millis(1_500))
        .given_registration_replies(vec![welcome("bob")])
        .build();
    test.fill_valid("bob");
    test.submit();

    test.advance(Duration::from_millis(1_499));
    test.latest(|props| assert!(props.success.is_some()));

    test.advance(Duration::from_millis(1));
    test.latest(|props| assert_eq!(props.success, None));
}

#[test]
fn given_a_failure_banner_should_persist() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![rejected("username taken")])
        .build();
    test.fill_valid("bob");
    test.submit();

    test.advance(Duration::from_secs(60));

    test.latest(|props| assert_eq!(props.failure.as_deref(), Some("username taken")));
    assert_eq!(test.timer.pending(), 0);
}

#[test]
fn given_a_success_then_edits_should_keep_values_when_banner_expires() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![welcome("bob")])
        .build();
    test.fill_valid("bob");
    test.submit();

    test.change(account_form::ChangeEvent::text("username", "carol"));
    test.advance(Duration::from_secs(5));

    test.latest(|props| {
        assert_eq!(props.success, None);
        assert_eq!(props.values.username, "carol");
    });
}
