//! The MVU runtime that orchestrates the event loop.

use core::future::Future;
use core::pin::Pin;

use flume::Receiver;

use crate::{Emitter, MvuLogic, Renderer};

#[cfg(any(test, feature = "testing"))]
use futures::executor::{LocalPool, LocalSpawner};
#[cfg(any(test, feature = "testing"))]
use futures::task::LocalSpawnExt;

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want
/// (tokio, async-std, wasm-bindgen-futures, ...).
///
/// Function pointers and closures automatically implement this trait via the
/// blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// The MVU runtime that orchestrates the event loop.
///
/// It:
/// 1. Initializes the Model and initial Effects via [`MvuLogic::init`]
/// 2. Processes events through [`MvuLogic::update`]
/// 3. Reduces the Model to Props via [`MvuLogic::view`]
/// 4. Delivers Props to the [`Renderer`] for rendering
///
/// The runtime owns a single [`Emitter`] that can send events from any
/// thread. Events are queued on a `flume` channel and processed strictly one
/// at a time by [`MvuRuntime::run`], so no two transitions ever interleave.
///
/// For tests with manual control, use [`TestMvuRuntime`].
pub struct MvuRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send,
    Model: Clone,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    logic: Logic,
    renderer: Render,
    event_receiver: Receiver<Event>,
    model: Model,
    emitter: Emitter<Event>,
    spawner: Spawn,
    _props: core::marker::PhantomData<Props>,
}

impl<Event, Model, Props, Logic, Render, Spawn>
    MvuRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Create a new runtime.
    ///
    /// The runtime will not be started until [`MvuRuntime::run`] is called.
    ///
    /// # Arguments
    ///
    /// * `init_model` - The initial state
    /// * `logic` - Application logic implementing MvuLogic
    /// * `renderer` - Platform rendering implementation for rendering Props
    /// * `spawner` - Spawner to execute effects on your chosen runtime
    pub fn new(init_model: Model, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();

        MvuRuntime {
            logic,
            renderer,
            event_receiver,
            model: init_model,
            emitter: Emitter::new(event_sender),
            spawner,
            _props: core::marker::PhantomData,
        }
    }

    /// A handle for emitting events from outside the rendered Props.
    pub fn emitter(&self) -> Emitter<Event> {
        self.emitter.clone()
    }

    /// The current model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Initialize the runtime and run the event processing loop.
    ///
    /// - Uses [`MvuLogic::init`] to settle the initial model and effect.
    /// - Renders the initial Props.
    /// - Processes events from the channel until it closes.
    pub async fn run(&mut self) {
        self.start();

        while let Ok(event) = self.event_receiver.recv_async().await {
            self.step(event);
        }
    }

    fn start(&mut self) {
        let (init_model, init_effect) = self.logic.init(self.model.clone());

        let initial_props = self.logic.view(&init_model, &self.emitter);
        self.renderer.render(initial_props);
        self.model = init_model;

        self.spawner.spawn(init_effect.execute(&self.emitter));
    }

    fn step(&mut self, event: Event) {
        let (new_model, effect) = self.logic.update(event, &self.model);

        let props = self.logic.view(&new_model, &self.emitter);
        self.renderer.render(props);

        self.model = new_model;

        self.spawner.spawn(effect.execute(&self.emitter));
    }
}

#[cfg(any(test, feature = "testing"))]
/// Spawner backed by a [`LocalPool`] owned by a [`TestMvuRuntime`].
///
/// Spawned futures only make progress when the driver processes events, which
/// keeps timers and transport calls under the test's control.
#[derive(Clone)]
pub struct TestSpawner(LocalSpawner);

#[cfg(any(test, feature = "testing"))]
impl Spawner for TestSpawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        if let Err(err) = self.0.spawn_local(future) {
            tracing::warn!(error = %err, "test executor refused an effect");
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime for MVU with manual event processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`MvuRuntime`], nothing happens until the test asks for it: effects
/// are spawned on an internal single-threaded pool, and
/// [`process_events`](TestMvuDriver::process_events) polls that pool and
/// drains the event queue until both are idle.
///
/// ```rust
/// use account_form::{
///     FormConfig, FormController, FormModel, ManualTimer, MockTransport, TestMvuRuntime,
///     TestRenderer,
/// };
/// use std::sync::Arc;
///
/// let renderer = TestRenderer::new();
/// let controller = FormController::new(
///     &FormConfig::default(),
///     Arc::new(MockTransport::new()),
///     Arc::new(ManualTimer::new()),
/// );
///
/// let mut driver = TestMvuRuntime::new(FormModel::default(), controller, renderer.clone()).run();
/// driver.process_events();
///
/// renderer.with_latest(|props| assert!(!props.submit_enabled));
/// ```
pub struct TestMvuRuntime<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    runtime: MvuRuntime<Event, Model, Props, Logic, Render, TestSpawner>,
    pool: LocalPool,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render> TestMvuRuntime<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    /// Create a new test runtime.
    pub fn new(init_model: Model, logic: Logic, renderer: Render) -> Self {
        let pool = LocalPool::new();
        let spawner = TestSpawner(pool.spawner());

        TestMvuRuntime {
            runtime: MvuRuntime::new(init_model, logic, renderer, spawner),
            pool,
        }
    }

    /// Initializes the runtime and returns a driver for manual event processing.
    ///
    /// The initial Props are rendered immediately; the initial effect is
    /// spawned but not polled until the first
    /// [`process_events`](TestMvuDriver::process_events).
    pub fn run(mut self) -> TestMvuDriver<Event, Model, Props, Logic, Render> {
        self.runtime.start();

        TestMvuDriver {
            runtime: self.runtime,
            pool: self.pool,
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual event processing control.
///
/// Returned by [`TestMvuRuntime::run`].
pub struct TestMvuDriver<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    runtime: MvuRuntime<Event, Model, Props, Logic, Render, TestSpawner>,
    pool: LocalPool,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render> TestMvuDriver<Event, Model, Props, Logic, Render>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
{
    /// Run effects and process queued events until nothing is left to do.
    ///
    /// Effects still waiting on something outside the runtime (a
    /// [`ManualTimer`](crate::ManualTimer) that has not been advanced, for
    /// instance) stay pending. Returns the number of events processed.
    pub fn process_events(&mut self) -> usize {
        let mut processed = 0;
        loop {
            self.pool.run_until_stalled();

            let mut progressed = false;
            while let Ok(event) = self.runtime.event_receiver.try_recv() {
                self.runtime.step(event);
                processed += 1;
                progressed = true;
            }

            if !progressed {
                return processed;
            }
        }
    }

    /// Queue an event as if it came from a rendered callback.
    pub fn emit(&self, event: Event) {
        self.runtime.emitter.emit(event);
    }

    /// The current model.
    pub fn model(&self) -> &Model {
        self.runtime.model()
    }
}
