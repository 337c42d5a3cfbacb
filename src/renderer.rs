//! Renderer abstraction for rendering Props.

#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Renderer abstraction for rendering Props.
///
/// Implement this trait to put the form on a screen: a DOM binding, a
/// terminal UI, or anything else able to show inputs, inline errors, a submit
/// control and banners.
///
/// The [`render`](Self::render) method is called after every processed event,
/// receiving fresh Props derived from the current state via
/// [`MvuLogic::view`](crate::MvuLogic::view).
///
/// # Example
///
/// ```rust
/// use account_form::{FormProps, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer<FormProps> for ConsoleRenderer {
///     fn render(&mut self, props: FormProps) {
///         if let Some(message) = &props.success {
///             println!("{message}");
///         }
///         println!("submit enabled: {}", props.submit_enabled);
///     }
/// }
/// ```
pub trait Renderer<Props> {
    /// Render the given props.
    ///
    /// Props may contain callbacks (via [`Emitter`](crate::Emitter)) that can
    /// trigger new events.
    fn render(&mut self, props: Props);
}

#[cfg(any(test, feature = "testing"))]
/// Test renderer that captures all rendered Props for assertions.
///
/// Only available with the `testing` feature. Clones share the same capture
/// storage, so hand one clone to the runtime and keep another for assertions.
pub struct TestRenderer<Props> {
    renders: Arc<Mutex<Vec<Props>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Clone for TestRenderer<Props> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Renderer<Props> for TestRenderer<Props> {
    fn render(&mut self, props: Props) {
        self.renders.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Default for TestRenderer<Props> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> TestRenderer<Props> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of renders that have occurred.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured renders with a closure.
    ///
    /// The closure receives every captured Props in render order. Use it to
    /// assert on history or to invoke callbacks of an older render.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Props>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }

    /// Access the most recent render.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been rendered yet.
    pub fn with_latest<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Props) -> R,
    {
        let renders = self.renders.lock();
        let latest = renders.last().expect("nothing has been rendered yet");
        f(latest)
    }
}
