//! Application logic trait defining the MVU contract.

use crate::{Effect, Emitter};

/// Application logic trait defining the MVU contract.
///
/// Implementations must provide three pure functions:
/// - [`init`](Self::init): Initialize the model and produce initial effects
/// - [`update`](Self::update): Transform (Event, Model) → (Model, Effect)
/// - [`view`](Self::view): Derive Props from Model with event emitter capability
///
/// [`FormController`](crate::FormController) is the implementation this crate
/// ships; it is also a worked example of the contract.
pub trait MvuLogic<Event: Send, Model, Props> {
    /// Initialize the runtime from an initial model.
    ///
    /// Called once when the runtime starts, before the first render.
    fn init(&self, model: Model) -> (Model, Effect<Event>);

    /// Reduce an event to an updated model and side effects.
    ///
    /// All state changes must happen through this function. Returning the
    /// model unchanged with [`Effect::none`] is how an event is ignored.
    fn update(&self, event: Event, model: &Model) -> (Model, Effect<Event>);

    /// Reduce to Props from the current model.
    ///
    /// The provided [`Emitter`] allows Props to contain callbacks that can
    /// trigger new events.
    fn view(&self, model: &Model, emitter: &Emitter<Event>) -> Props;
}
