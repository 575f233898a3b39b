//! Timers for time-based operators.
//!
//! Operators never reach for a global timer: they are handed a [`Scheduler`]
//! and ask it to run a task after a delay. The returned [`TaskHandle`] is a
//! [`Disposable`]; disposing it guarantees the task never runs.
//!
//! | Scheduler | Backing | Feature |
//! |---|---|---|
//! | [`TestScheduler`] | virtual time, advanced by hand | always |
//! | [`LocalScheduler`] | `futures` `LocalSpawner` + `futures-time` sleep | `futures-scheduler` |
//! | [`TokioLocalScheduler`] | `tokio::task::spawn_local` + `tokio::time` | `tokio-scheduler` |

use crate::subscription::Disposable;
use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::Rc,
};

pub use std::time::{Duration, Instant};

mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(feature = "futures-scheduler")]
mod local_scheduler;
#[cfg(feature = "futures-scheduler")]
pub use local_scheduler::LocalScheduler;

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioLocalScheduler;

/// A source of the current time.
pub trait Clock {
  fn now(&self) -> Instant;
}

/// The wall clock, `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  #[inline]
  fn now(&self) -> Instant { Instant::now() }
}

/// A Scheduler runs tasks on the event loop after an optional delay.
///
/// A scheduler's clock is the one its delays are measured against, so every
/// scheduler is also a [`Clock`].
pub trait Scheduler: Clock + Clone {
  fn schedule<F>(&self, task: F, delay: Option<Duration>) -> TaskHandle
  where
    F: FnOnce() + 'static;
}

/// Handle to one scheduled task.
///
/// Cloning shares the handle. Disposing it cancels the task if it has not run
/// yet; a scheduler checks [`TaskHandle::is_cancelled`] right before running.
#[derive(Clone, Default)]
pub struct TaskHandle(Rc<TaskHandleInner>);

#[derive(Default)]
struct TaskHandleInner {
  cancelled: Cell<bool>,
  finished: Cell<bool>,
  canceller: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// Registers the scheduler-specific way to abort the task, run on dispose.
  pub fn set_canceller(&self, canceller: impl FnOnce() + 'static) {
    if self.is_disposed() {
      return;
    }
    *self.0.canceller.borrow_mut() = Some(Box::new(canceller));
  }

  /// Called by the scheduler once the task has run.
  pub fn mark_finished(&self) {
    self.0.finished.set(true);
    self.0.canceller.borrow_mut().take();
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool { self.0.cancelled.get() }

  #[inline]
  pub fn is_finished(&self) -> bool { self.0.finished.get() }
}

impl Disposable for TaskHandle {
  fn dispose(&mut self) {
    if self.is_disposed() {
      return;
    }
    self.0.cancelled.set(true);
    let canceller = self.0.canceller.borrow_mut().take();
    if let Some(canceller) = canceller {
      canceller();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.is_cancelled() || self.is_finished() }
}

impl Debug for TaskHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TaskHandle")
      .field("cancelled", &self.is_cancelled())
      .field("finished", &self.is_finished())
      .finish()
  }
}
