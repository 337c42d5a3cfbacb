//! Declarative effect system for describing deferred event processing.

use core::future::Future;
use core::pin::Pin;

use futures::future::join_all;

use crate::Emitter;

/// A boxed, sendable future produced by executing an [`Effect`].
pub type EffectFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Declarative description of work that produces events.
///
/// Effects are returned from [`MvuLogic::init`](crate::MvuLogic::init) and
/// [`MvuLogic::update`](crate::MvuLogic::update) alongside the new model. The
/// runtime executes them after the model has been committed and rendered, and
/// hands the resulting future to its [`Spawner`](crate::Spawner). The only way
/// an effect can influence state is by emitting an event back into the queue.
///
/// # Example
///
/// ```rust
/// use account_form::Effect;
///
/// enum Event {
///     Validate,
///     Validated(bool),
/// }
///
/// // Queue a follow-up event
/// let effect = Effect::just(Event::Validate);
///
/// // Await some work and emit its result
/// let effect = Effect::future(async { Event::Validated(true) });
///
/// // Combine multiple effects
/// let effect = Effect::batch(vec![
///     Effect::just(Event::Validate),
///     Effect::future(async { Event::Validated(false) }),
/// ]);
///
/// // No side effects
/// let effect: Effect<Event> = Effect::none();
/// ```
#[allow(clippy::type_complexity)]
pub struct Effect<Event>(Box<dyn FnOnce(Emitter<Event>) -> EffectFuture + Send + 'static>)
where
    Event: Send;

impl<Event: Send + 'static> Effect<Event> {
    /// Create an effect that does nothing.
    pub fn none() -> Self {
        Self(Box::new(|_: Emitter<Event>| -> EffectFuture { Box::pin(async {}) }))
    }

    /// Create an effect that emits a single event.
    pub fn just(event: Event) -> Self {
        Self(Box::new(move |emitter: Emitter<Event>| -> EffectFuture {
            Box::pin(async move {
                emitter.emit(event);
            })
        }))
    }

    /// Create an effect that awaits `future` and emits the event it resolves to.
    ///
    /// This is how asynchronous collaborators (network calls, timers, async
    /// validators) report back to the update loop.
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Event> + Send + 'static,
    {
        Self(Box::new(move |emitter: Emitter<Event>| -> EffectFuture {
            Box::pin(async move {
                emitter.emit(future.await);
            })
        }))
    }

    /// Combine multiple effects into a single effect.
    ///
    /// All effects are driven concurrently; each emits its own events as soon
    /// as it completes.
    pub fn batch(effects: Vec<Effect<Event>>) -> Self {
        Self(Box::new(move |emitter: Emitter<Event>| -> EffectFuture {
            let futures: Vec<EffectFuture> = effects
                .into_iter()
                .map(|effect| effect.execute(&emitter))
                .collect();
            Box::pin(async move {
                join_all(futures).await;
            })
        }))
    }

    /// Turn the effect into a future bound to `emitter`.
    pub fn execute(self, emitter: &Emitter<Event>) -> EffectFuture {
        (self.0)(emitter.clone())
    }
}
