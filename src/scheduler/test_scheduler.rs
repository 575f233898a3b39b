//! Test Scheduler for deterministic testing of time-based operators.
//!
//! Provides virtual time that only advances when explicitly instructed,
//! enabling deterministic testing of `throttle`, `timestamp`, etc.
//!
//! # Usage
//!
//! ```rust
//! use rxtame::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! let mut keys = Subject::new();
//! keys
//!   .clone()
//!   .throttle(Duration::from_millis(100), scheduler.clone())
//!   .subscribe(|v: char| println!("{v}"));
//!
//! keys.next('a');
//! // Advance virtual time to trigger the delayed emission
//! scheduler.advance_by(Duration::from_millis(100));
//! ```
//!
//! Each instance owns its own clock and queue; clones share them.

use std::{cmp::Ordering, collections::BinaryHeap};

use super::{Clock, Duration, Instant, Scheduler, TaskHandle};
use crate::{
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::Disposable,
};

struct TestSchedulerState {
  epoch: Instant,
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
  // Queue length at which cancelled tasks are swept out.
  prune_at: usize,
}

const MIN_PRUNE_AT: usize = 64;

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: Box<dyn FnOnce()>,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

/// A virtual time scheduler for deterministic testing.
#[derive(Clone)]
pub struct TestScheduler(MutRc<TestSchedulerState>);

impl Default for TestScheduler {
  fn default() -> Self {
    TestScheduler(MutRc::own(TestSchedulerState {
      epoch: Instant::now(),
      virtual_time: Duration::ZERO,
      task_queue: BinaryHeap::new(),
      next_task_id: 0,
      prune_at: MIN_PRUNE_AT,
    }))
  }
}

impl TestScheduler {
  /// A scheduler whose virtual clock starts at zero.
  pub fn new() -> Self { Self::default() }

  /// Virtual time elapsed since creation.
  pub fn elapsed(&self) -> Duration { self.0.rc_deref().virtual_time }

  /// Number of tasks that are queued and not cancelled.
  pub fn pending_count(&self) -> usize {
    self
      .0
      .rc_deref()
      .task_queue
      .iter()
      .filter(|t| !t.handle.is_disposed())
      .count()
  }

  /// Check if there are no pending tasks.
  pub fn is_empty(&self) -> bool { self.pending_count() == 0 }

  /// Advance virtual time by the specified duration and execute due tasks.
  ///
  /// Tasks are executed in order of their scheduled time, with FIFO ordering
  /// for tasks scheduled at the same time. A task scheduled exactly at the
  /// target time runs. Tasks scheduled by a running task run in the same call
  /// if they fall due.
  pub fn advance_by(&self, duration: Duration) {
    let target_time = self.elapsed() + duration;
    self.execute_tasks_until(Some(target_time));
    let mut state = self.0.rc_deref_mut();
    state.virtual_time = state.virtual_time.max(target_time);
  }

  /// Execute all pending tasks by advancing time to each task's scheduled
  /// time.
  pub fn flush(&self) { self.execute_tasks_until(None); }

  fn execute_tasks_until(&self, target_time: Option<Duration>) {
    while let Some(ScheduledTask { scheduled_time, task, handle, .. }) = self.pop_due(target_time) {
      if handle.is_disposed() {
        continue;
      }
      {
        let mut state = self.0.rc_deref_mut();
        state.virtual_time = state.virtual_time.max(scheduled_time);
      }
      task();
      handle.mark_finished();
    }
  }

  fn pop_due(&self, target_time: Option<Duration>) -> Option<ScheduledTask> {
    let mut state = self.0.rc_deref_mut();
    let due = state
      .task_queue
      .peek()
      .is_some_and(|t| target_time.is_none_or(|limit| t.scheduled_time <= limit));
    if due { state.task_queue.pop() } else { None }
  }
}

impl Clock for TestScheduler {
  fn now(&self) -> Instant {
    let state = self.0.rc_deref();
    state.epoch + state.virtual_time
  }
}

impl Scheduler for TestScheduler {
  fn schedule<F>(&self, task: F, delay: Option<Duration>) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let mut state = self.0.rc_deref_mut();
    if state.task_queue.len() >= state.prune_at {
      state.task_queue.retain(|t| !t.handle.is_disposed());
      state.prune_at = (state.task_queue.len() * 2).max(MIN_PRUNE_AT);
    }
    let scheduled_time = state.virtual_time + delay.unwrap_or(Duration::ZERO);
    let task_id = state.next_task_id;
    state.next_task_id += 1;
    let handle = TaskHandle::new();
    state.task_queue.push(ScheduledTask {
      scheduled_time,
      task_id,
      task: Box::new(task),
      handle: handle.clone(),
    });
    handle
  }
}
