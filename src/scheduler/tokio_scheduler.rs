use super::{Clock, Duration, Instant, Scheduler, TaskHandle};

/// Runs tasks with `tokio::task::spawn_local`, so it must be used from inside
/// a [`tokio::task::LocalSet`]. Delays use `tokio::time`, which makes the
/// scheduler follow a paused test clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLocalScheduler;

impl Clock for TokioLocalScheduler {
  #[inline]
  fn now(&self) -> Instant { tokio::time::Instant::now().into_std() }
}

impl Scheduler for TokioLocalScheduler {
  fn schedule<F>(&self, task: F, delay: Option<Duration>) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    let guard = handle.clone();
    let join = tokio::task::spawn_local(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
      }
      if !guard.is_cancelled() {
        task();
      }
      guard.mark_finished();
    });
    handle.set_canceller(move || join.abort());
    handle
  }
}
