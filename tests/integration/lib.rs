mod expiry_tests;
mod submission_tests;
mod validation_flow_tests;

use std::sync::Arc;
use std::time::Duration;

use account_form::{
    ChangeEvent, FormConfig, FormController, FormEvent, FormModel, FormProps, FormState,
    ManualTimer, MockTransport, RegistrationFuture, RegistrationReply, SubmissionError,
    TestMvuDriver, TestMvuRuntime, TestRenderer,
};
use futures::channel::oneshot;

pub(crate) type Driver =
    TestMvuDriver<FormEvent, FormModel, FormProps, FormController, TestRenderer<FormProps>>;

pub(crate) type Reply = Result<RegistrationReply, SubmissionError>;

pub(crate) struct IntegrationTest {
    pub(crate) driver: Driver,
    pub(crate) renders: TestRenderer<FormProps>,
    pub(crate) timer: ManualTimer,
}

impl IntegrationTest {
    /// Fire `on_change` from the latest render and settle.
    pub(crate) fn change(&mut self, change: ChangeEvent) {
        self.renders.with_latest(|props| (props.on_change)(change));
        self.driver.process_events();
    }

    /// Fill every field with a valid value.
    pub(crate) fn fill_valid(&mut self, username: &str) {
        self.change(ChangeEvent::text("username", username));
        self.change(ChangeEvent::select("favFood", "pizza"));
        self.change(ChangeEvent::radio("favLanguage", "rust"));
        self.change(ChangeEvent::checkbox("agreement", true));
    }

    /// Fire `on_submit` from the latest render and settle.
    pub(crate) fn submit(&mut self) {
        self.renders.with_latest(|props| (props.on_submit)());
        self.driver.process_events();
    }

    pub(crate) fn advance(&mut self, by: Duration) {
        self.timer.advance(by);
        self.driver.process_events();
    }

    pub(crate) fn latest<R>(&self, f: impl FnOnce(&FormProps) -> R) -> R {
        self.renders.with_latest(f)
    }
}

pub(crate) fn build_integration_test() -> IntegrationTestBuilder {
    IntegrationTestBuilder {
        transport: MockTransport::new(),
        config: FormConfig::default(),
    }
}

pub(crate) struct IntegrationTestBuilder {
    transport: MockTransport,
    config: FormConfig,
}

impl IntegrationTestBuilder {
    pub(crate) fn given_registration_never_called(mut self) -> Self {
        self.transport.expect_register().never();
        self
    }

    /// Each submission gets the next reply, in order.
    pub(crate) fn given_registration_replies(mut self, replies: Vec<Reply>) -> Self {
        let mut sequence = mockall::Sequence::new();
        for reply in replies {
            self.transport
                .expect_register()
                .times(1)
                .in_sequence(&mut sequence)
                .return_once(move |_| ready(reply));
        }
        self
    }

    /// The first submission must carry `expected` and succeeds with `message`.
    pub(crate) fn given_registration_expects(mut self, expected: FormState, message: &str) -> Self {
        let message = message.to_owned();
        self.transport
            .expect_register()
            .withf(move |form| *form == expected)
            .times(1)
            .return_once(move |_| ready(Ok(RegistrationReply::new(message))));
        self
    }

    /// The first submission stays pending until the returned sender answers.
    pub(crate) fn given_registration_deferred(mut self) -> (Self, oneshot::Sender<Reply>) {
        let (answer, pending) = oneshot::channel::<Reply>();
        self.transport
            .expect_register()
            .times(1)
            .return_once(move |_| -> RegistrationFuture {
                Box::pin(async move {
                    pending
                        .await
                        .unwrap_or_else(|_| Err(SubmissionError::Transport("dropped".to_owned())))
                })
            });
        (self, answer)
    }

    pub(crate) fn given_success_message_ttl(mut self, ttl: Duration) -> Self {
        self.config.success_message_ttl_ms = ttl.as_millis() as u64;
        self
    }

    pub(crate) fn build(self) -> IntegrationTest {
        let renders = TestRenderer::new();
        let timer = ManualTimer::new();
        let controller =
            FormController::new(&self.config, Arc::new(self.transport), Arc::new(timer.clone()));

        let mut driver =
            TestMvuRuntime::new(FormModel::default(), controller, renders.clone()).run();
        driver.process_events();

        IntegrationTest {
            driver,
            renders,
            timer,
        }
    }
}

pub(crate) fn ready(reply: Reply) -> RegistrationFuture {
    Box::pin(async move { reply })
}

pub(crate) fn welcome(name: &str) -> Reply {
    Ok(RegistrationReply::new(format!("Welcome, {name}!")))
}

pub(crate) fn rejected(message: &str) -> Reply {
    Err(SubmissionError::Rejected {
        status: 422,
        message: message.to_owned(),
    })
}

pub(crate) fn filled_state(username: &str) -> FormState {
    FormState {
        username: username.to_owned(),
        fav_food: "pizza".to_owned(),
        fav_language: "rust".to_owned(),
        agreement: true,
    }
}
