//! One-shot delays used by effects.

use core::future::Future;
use core::pin::Pin;
use std::time::Duration;

#[cfg(any(test, feature = "testing"))]
use futures::channel::oneshot;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;
#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

pub type SleepFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Source of delays.
///
/// The returned future must not borrow the timer; it is moved into an effect
/// and may outlive the call.
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> SleepFuture;
}

/// Wall-clock timer backed by [`futures_timer::Delay`].
///
/// Works on any executor; no reactor is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuturesTimer;

impl Timer for FuturesTimer {
    fn sleep(&self, duration: Duration) -> SleepFuture {
        Box::pin(futures_timer::Delay::new(duration))
    }
}

#[cfg(any(test, feature = "testing"))]
/// Timer whose clock only moves when [`advance`](Self::advance) is called.
///
/// Only available with the `testing` feature. Clones share one clock.
#[derive(Clone)]
pub struct ManualTimer {
    clock: Arc<Mutex<ManualClock>>,
}

#[cfg(any(test, feature = "testing"))]
#[derive(Default)]
struct ManualClock {
    now: Duration,
    sleepers: Vec<(Duration, oneshot::Sender<()>)>,
}

#[cfg(any(test, feature = "testing"))]
impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl ManualTimer {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(Mutex::new(ManualClock::default())),
        }
    }

    /// Move the clock forward and wake every sleeper whose deadline passed.
    ///
    /// Woken futures still need their executor to poll them; with a
    /// [`TestMvuDriver`](crate::TestMvuDriver) that happens on the next
    /// `process_events`.
    pub fn advance(&self, by: Duration) {
        let mut clock = self.clock.lock();
        clock.now += by;
        let now = clock.now;

        let (due, waiting): (Vec<_>, Vec<_>) = clock
            .sleepers
            .drain(..)
            .partition(|(deadline, _)| *deadline <= now);
        clock.sleepers = waiting;
        drop(clock);

        for (_, waker) in due {
            let _ = waker.send(());
        }
    }

    /// Time elapsed since the timer was created.
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of sleeps that have not fired yet.
    pub fn pending(&self) -> usize {
        self.clock.lock().sleepers.len()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Timer for ManualTimer {
    fn sleep(&self, duration: Duration) -> SleepFuture {
        let (waker, fired) = oneshot::channel();
        let mut clock = self.clock.lock();
        let deadline = clock.now + duration;
        clock.sleepers.push((deadline, waker));

        Box::pin(async move {
            let _ = fired.await;
        })
    }
}
