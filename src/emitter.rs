//! Event emitter for embedding callbacks in Props.

use flume::Sender;

/// Event emitter that can be embedded in Props and captured by effects.
///
/// Clone this handle to build callbacks (e.g. a form's `on_change` and
/// `on_submit`) that queue events when invoked. `Emitter` wraps a `flume`
/// sender, so clones are cheap and can be moved across threads.
///
/// Emitting after the runtime has been dropped is a no-op.
pub struct Emitter<Event: Send>(pub(crate) Sender<Event>);

impl<Event: Send> Clone for Emitter<Event> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Event: Send> Emitter<Event> {
    /// Create a new emitter from a channel sender.
    pub(crate) fn new(sender: Sender<Event>) -> Self {
        Self(sender)
    }

    /// Queue an event for processing by the runtime.
    pub fn emit(&self, event: Event) {
        if self.0.send(event).is_err() {
            tracing::debug!("event dropped, runtime is gone");
        }
    }
}
