use super::{build_integration_test, filled_state, rejected, welcome};
use account_form::{
    ChangeEvent, FormState, Phase, SubmissionError, SubmissionOutcome, GENERIC_FAILURE_MESSAGE,
};

#[test]
fn given_a_valid_form_when_submitted_should_send_the_values() {
    let mut test = build_integration_test()
        .given_registration_expects(filled_state("bob"), "Welcome, bob!")
        .build();
    test.fill_valid("bob");

    test.submit();

    test.latest(|props| assert_eq!(props.success.as_deref(), Some("Welcome, bob!")));
}

#[test]
fn given_a_successful_registration_should_reset_and_show_the_message() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![welcome("bob")])
        .build();
    test.fill_valid("bob");

    test.submit();

    test.latest(|props| {
        assert_eq!(props.values, FormState::default());
        assert!(props.errors.is_empty());
        assert_eq!(props.success.as_deref(), Some("Welcome, bob!"));
        assert_eq!(props.failure, None);
        assert!(!props.submit_enabled);
        assert!(!props.submitting);
    });
    assert_eq!(test.driver.model().phase(), Phase::Succeeded);
}

#[test]
fn given_a_rejected_registration_should_keep_values_and_stay_enabled() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![rejected("username taken")])
        .build();
    test.fill_valid("bob");

    test.submit();

    test.latest(|props| {
        assert_eq!(props.failure.as_deref(), Some("username taken"));
        assert_eq!(props.success, None);
        assert_eq!(props.values, super::filled_state("bob"));
        assert!(props.submit_enabled);
    });
    assert_eq!(test.driver.model().phase(), Phase::Failed);
}

#[test]
fn given_a_rejection_when_corrected_and_resubmitted_should_succeed() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![rejected("username taken"), welcome("bobby")])
        .build();
    test.fill_valid("bob");
    test.submit();

    test.change(ChangeEvent::text("username", "bobby"));
    test.latest(|props| {
        assert_eq!(props.failure.as_deref(), Some("username taken"));
        assert!(props.submit_enabled);
    });

    test.submit();

    test.latest(|props| {
        assert_eq!(props.failure, None);
        assert_eq!(props.success.as_deref(), Some("Welcome, bobby!"));
    });
}

#[test]
fn given_a_reply_without_message_should_show_the_generic_failure() {
    let mut test = build_integration_test()
        .given_registration_replies(vec![Err(SubmissionError::MissingMessage { status: 500 })])
        .build();
    test.fill_valid("bob");

    test.submit();

    test.latest(|props| {
        assert_eq!(props.failure.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(props.submit_enabled);
    });
}

#[test]
fn given_a_pending_registration_should_disable_submit_and_ignore_resubmits() {
    let (builder, answer) = build_integration_test().given_registration_deferred();
    let mut test = builder.build();
    test.fill_valid("bob");

    test.submit();
    test.latest(|props| {
        assert!(!props.submit_enabled);
        assert!(props.submitting);
    });

    test.submit();
    test.change(ChangeEvent::text("username", "robert"));
    test.latest(|props| {
        assert!(!props.submit_enabled);
        assert!(props.submitting);
    });

    answer.send(welcome("bob")).unwrap();
    test.driver.process_events();

    test.latest(|props| {
        assert!(!props.submitting);
        assert_eq!(props.values, FormState::default());
        assert_eq!(props.success.as_deref(), Some("Welcome, bob!"));
    });
}

#[test]
fn given_a_pending_failure_should_clear_it_on_the_next_submit() {
    let (builder, answer) = build_integration_test()
        .given_registration_replies(vec![rejected("try again later")])
        .given_registration_deferred();
    let mut test = builder.build();
    test.fill_valid("bob");
    test.submit();
    test.latest(|props| assert_eq!(props.failure.as_deref(), Some("try again later")));

    test.submit();

    test.latest(|props| {
        assert_eq!(props.failure, None);
        assert!(props.submitting);
    });
    assert!(matches!(test.driver.model().outcome(), SubmissionOutcome::None));

    answer.send(rejected("still down")).unwrap();
    test.driver.process_events();
    test.latest(|props| assert_eq!(props.failure.as_deref(), Some("still down")));
}
