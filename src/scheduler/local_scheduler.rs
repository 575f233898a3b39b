use super::{Clock, Duration, Instant, Scheduler, TaskHandle};
use crate::subscription::Disposable;
use futures::{
  executor::LocalSpawner,
  future::{self, FutureExt},
  task::LocalSpawnExt,
};

/// Runs tasks on a `futures` local executor, sleeping with `futures-time`.
///
/// ```rust,no_run
/// use futures::executor::LocalPool;
/// use rxtame::prelude::*;
///
/// let mut pool = LocalPool::new();
/// let scheduler = LocalScheduler::new(pool.spawner());
/// let mut keys = Subject::new();
/// keys
///   .clone()
///   .throttle(Duration::from_millis(300), scheduler)
///   .subscribe(|v: char| println!("{v}"));
/// keys.next('a');
/// pool.run();
/// ```
#[derive(Clone)]
pub struct LocalScheduler {
  spawner: LocalSpawner,
}

impl LocalScheduler {
  pub fn new(spawner: LocalSpawner) -> Self { LocalScheduler { spawner } }
}

impl From<LocalSpawner> for LocalScheduler {
  fn from(spawner: LocalSpawner) -> Self { Self::new(spawner) }
}

impl Clock for LocalScheduler {
  #[inline]
  fn now(&self) -> Instant { Instant::now() }
}

impl Scheduler for LocalScheduler {
  fn schedule<F>(&self, task: F, delay: Option<Duration>) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let mut handle = TaskHandle::new();
    let guard = handle.clone();
    let (delayed, abort) = future::abortable(async move {
      if let Some(delay) = delay {
        futures_time::task::sleep(delay.into()).await;
      }
      if !guard.is_cancelled() {
        task();
      }
      guard.mark_finished();
    });
    handle.set_canceller(move || abort.abort());

    if let Err(err) = self.spawner.spawn_local(delayed.map(|_| ())) {
      log::warn!("failed to spawn scheduled task: {err}");
      handle.dispose();
    }
    handle
  }
}
