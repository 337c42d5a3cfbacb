//! Account-creation form: field validation, whole-form gating of the submit
//! control, and the submission lifecycle, expressed as a Model-View-Update
//! state machine.
//!
//! The crate has two layers:
//!
//! - a small MVU runtime ([`MvuRuntime`], [`MvuLogic`], [`Effect`],
//!   [`Emitter`], [`Renderer`]) that processes one event at a time and runs
//!   side effects as futures on a caller-supplied [`Spawner`];
//! - the form itself: [`ValidationSchema`] declares the rules and
//!   [`FormController`] is the logic that owns values, inline errors, the
//!   enabled flag and the submission outcome.
//!
//! ## Example
//!
//! ```rust,no_run
//! use account_form::{
//!     ChangeEvent, FormConfig, FormController, FormEvent, FormModel, FormProps, MvuRuntime,
//!     Renderer,
//! };
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! struct Banner;
//!
//! impl Renderer<FormProps> for Banner {
//!     fn render(&mut self, props: FormProps) {
//!         if let Some(message) = props.success.or(props.failure) {
//!             println!("{message}");
//!         }
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), account_form::ConfigError> {
//!     let config = FormConfig::default();
//!     let controller = FormController::from_config(&config)?;
//!
//!     // Effects (validation, the registration call, banner timers) run as
//!     // tasks on the ambient tokio runtime.
//!     let spawner = |fut: Pin<Box<dyn Future<Output = ()> + Send>>| {
//!         tokio::spawn(fut);
//!     };
//!
//!     let mut runtime = MvuRuntime::new(FormModel::default(), controller, Banner, spawner);
//!
//!     // Events can also come from outside the rendered Props
//!     runtime
//!         .emitter()
//!         .emit(FormEvent::FieldChanged(ChangeEvent::radio("favLanguage", "rust")));
//!
//!     runtime.run().await;
//!     Ok(())
//! }
//! ```

mod config;
mod controller;
mod effect;
mod emitter;
mod error;
mod field;
mod logic;
mod renderer;
mod runtime;
mod schema;
mod state;
mod timer;
mod transport;

pub use config::{FormConfig, DEFAULT_ENDPOINT};
pub use controller::{
    FormController, FormEvent, FormModel, FormProps, Phase, SubmissionId, SubmissionOutcome,
    ValidationTicket,
};
pub use effect::{Effect, EffectFuture};
pub use emitter::Emitter;
pub use error::{ConfigError, FieldError, SubmissionError, ValidationError, GENERIC_FAILURE_MESSAGE};
pub use field::{ChangeEvent, Field, FieldValue, InputKind, ValueKind};
pub use logic::MvuLogic;
pub use renderer::Renderer;
pub use runtime::{MvuRuntime, Spawner};
pub use schema::{
    Rule, ValidationSchema, AGREEMENT_REQUIRED, FAV_FOOD_REQUIRED, FAV_LANGUAGE_REQUIRED,
    FOOD_OPTIONS, LANGUAGE_OPTIONS, USERNAME_MAX, USERNAME_MIN, USERNAME_REQUIRED,
};
pub use state::{ErrorState, FormState};
pub use timer::{FuturesTimer, SleepFuture, Timer};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use transport::{RegistrationFuture, RegistrationReply, Transport};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{TestMvuDriver, TestMvuRuntime, TestSpawner};
#[cfg(any(test, feature = "testing"))]
pub use timer::ManualTimer;
#[cfg(any(test, feature = "testing"))]
pub use transport::MockTransport;
