use super::build_integration_test;
use account_form::{
    ChangeEvent, Field, AGREEMENT_REQUIRED, FAV_FOOD_REQUIRED, USERNAME_MAX, USERNAME_MIN,
    USERNAME_REQUIRED,
};

#[test]
fn given_a_fresh_form_should_render_disabled_without_errors() {
    let test = build_integration_test()
        .given_registration_never_called()
        .build();

    assert_eq!(test.renders.count(), 1);
    test.latest(|props| {
        assert!(!props.submit_enabled);
        assert!(!props.submitting);
        assert!(props.errors.is_empty());
        assert!(!props.values.agreement);
        assert_eq!(props.success, None);
        assert_eq!(props.failure, None);
    });
}

#[test]
fn given_all_fields_valid_should_enable_submit_without_errors() {
    let mut test = build_integration_test()
        .given_registration_never_called()
        .build();

    test.fill_valid("bob");

    test.latest(|props| {
        assert!(props.submit_enabled);
        assert!(props.errors.is_empty());
        assert_eq!(props.values.username, "bob");
        assert_eq!(props.values.fav_food, "pizza");
        assert_eq!(props.values.fav_language, "rust");
        assert!(props.values.agreement);
    });
}

#[test]
fn given_one_touched_field_should_only_show_its_error() {
    let mut test = build_integration_test()
        .given_registration_never_called()
        .build();

    test.change(ChangeEvent::text("username", "bo"));

    test.latest(|props| {
        assert_eq!(props.errors.get(Field::Username), USERNAME_MIN);
        assert_eq!(props.errors.get(Field::FavFood), "");
        assert_eq!(props.errors.get(Field::FavLanguage), "");
        assert_eq!(props.errors.get(Field::Agreement), "");
        assert!(!props.submit_enabled);
    });
}

#[test]
fn given_username_edits_should_report_the_first_failing_rule() {
    let mut test = build_integration_test()
        .given_registration_never_called()
        .build();

    test.change(ChangeEvent::text("username", ""));
    test.latest(|props| assert_eq!(props.errors.get(Field::Username), USERNAME_REQUIRED));

    test.change(ChangeEvent::text("username", "a".repeat(21)));
    test.latest(|props| assert_eq!(props.errors.get(Field::Username), USERNAME_MAX));

    test.change(ChangeEvent::text("username", "alice"));
    test.latest(|props| assert_eq!(props.errors.get(Field::Username), ""));
}

#[test]
fn given_a_valid_form_when_a_field_breaks_should_disable_submit() {
    let mut test = build_integration_test()
        .given_registration_never_called()
        .build();
    test.fill_valid("bob");

    test.change(ChangeEvent::select("favFood", ""));

    test.latest(|props| {
        assert!(!props.submit_enabled);
        assert_eq!(props.errors.get(Field::FavFood), FAV_FOOD_REQUIRED);
    });

    test.change(ChangeEvent::select("favFood", "broccoli"));

    test.latest(|props| {
        assert!(props.submit_enabled);
        assert!(props.errors.is_empty());
    });
}

#[test]
fn given_the_same_change_twice_should_match_a_single_change() {
    let mut test = build_integration_test()
        .given_registration_never_called()
        .build();

    test.change(ChangeEvent::checkbox("agreement", false));
    let once = test.latest(|props| (props.errors.clone(), props.submit_enabled));

    test.change(ChangeEvent::checkbox("agreement", false));
    let twice = test.latest(|props| (props.errors.clone(), props.submit_enabled));

    assert_eq!(once, twice);
    assert_eq!(once.0.get(Field::Agreement), AGREEMENT_REQUIRED);
}

#[test]
fn given_an_unknown_field_should_leave_the_form_untouched() {
    let mut test = build_integration_test()
        .given_registration_never_called()
        .build();
    let before = test.driver.model().clone();

    test.change(ChangeEvent::text("email", "bob@example.com"));

    assert_eq!(test.driver.model(), &before);
}
