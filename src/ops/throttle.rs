//! Trailing-edge rate limiting.
//!
//! Every value restarts a timer and replaces the pending value. When the timer
//! fires with no newer value in between, the pending value is emitted.
//!
//! Terminal events:
//! - `complete` cancels the timer, emits the pending value, then completes;
//! - `error` cancels the timer, drops the pending value and forwards the error;
//! - disposing the subscription cancels the timer, so nothing is emitted late.

use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
  subscription::{CompositeDisposable, Disposable, SerialDisposable},
};

#[derive(Clone)]
pub struct ThrottleOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
  pub(crate) duration: Duration,
}

impl<S, SD> Observable for ThrottleOp<S, SD>
where
  S: Observable,
  S::Item: 'static,
  SD: Scheduler + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let Self { source, scheduler, duration } = self;
    let Subscriber { observer, subscription } = subscriber;
    let timer = SerialDisposable::default();
    subscription.add(timer.clone());

    let observer = ThrottleObserver {
      observer: MutRc::own(Some(observer)),
      trailing_value: MutRc::own(None),
      scheduler,
      delay: duration,
      timer,
      subscription: subscription.clone(),
    };
    source.actual_subscribe(Subscriber { observer, subscription })
  }
}

pub struct ThrottleObserver<O, SD, Item> {
  observer: MutRc<Option<O>>,
  trailing_value: MutRc<Option<Item>>,
  scheduler: SD,
  delay: Duration,
  timer: SerialDisposable,
  subscription: CompositeDisposable,
}

impl<Item, O, SD> Observer<Item> for ThrottleObserver<O, SD, Item>
where
  O: Observer<Item> + 'static,
  SD: Scheduler,
  Item: 'static,
{
  fn next(&mut self, value: Item) {
    *self.trailing_value.rc_deref_mut() = Some(value);

    let mut observer = self.observer.clone();
    let trailing_value = self.trailing_value.clone();
    let subscription = self.subscription.clone();
    let task = move || {
      if subscription.is_disposed() {
        return;
      }
      let value = trailing_value.rc_deref_mut().take();
      if let Some(value) = value {
        log::trace!("throttle window elapsed, emitting");
        observer.next(value);
      }
    };
    // Replacing the slot cancels the timer of the previous value.
    self
      .timer
      .replace(self.scheduler.schedule(task, Some(self.delay)));
  }

  fn error(&mut self, err: RxError) {
    self.timer.clear();
    self.trailing_value.rc_deref_mut().take();
    Observer::<Item>::error(&mut self.observer, err);
  }

  fn complete(&mut self) {
    self.timer.clear();
    let value = self.trailing_value.rc_deref_mut().take();
    if let Some(value) = value {
      log::trace!("flushing pending value on completion");
      self.observer.next(value);
    }
    Observer::<Item>::complete(&mut self.observer);
  }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Item>::is_finished(&self.observer) }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use crate::rc::{MutRc, RcDeref, RcDerefMut};

  fn throttled(
    scheduler: &TestScheduler, window: u64,
  ) -> (Subject<&'static str>, MutRc<Vec<(&'static str, Duration)>>, SubscriptionWrapper<CompositeDisposable>)
  {
    let subject = Subject::new();
    let emitted = MutRc::own(vec![]);
    let c_emitted = emitted.clone();
    let clock = scheduler.clone();
    let subscription = subject
      .clone()
      .throttle(Duration::from_millis(window), scheduler.clone())
      .subscribe(move |v| c_emitted.rc_deref_mut().push((v, clock.elapsed())));
    (subject, emitted, subscription)
  }

  #[test]
  fn burst_collapses_to_last_value() {
    let scheduler = TestScheduler::new();
    let (mut keys, emitted, _) = throttled(&scheduler, 300);

    keys.next("r");
    scheduler.advance_by(Duration::from_millis(100));
    keys.next("ru");
    scheduler.advance_by(Duration::from_millis(100));
    keys.next("rus");
    scheduler.advance_by(Duration::from_millis(299));
    assert!(emitted.rc_deref().is_empty());

    scheduler.advance_by(Duration::from_millis(1));
    assert_eq!(*emitted.rc_deref(), vec![("rus", Duration::from_millis(500))]);
  }

  #[test]
  fn quiet_gaps_emit_every_value() {
    let scheduler = TestScheduler::new();
    let (mut keys, emitted, _) = throttled(&scheduler, 50);

    keys.next("a");
    scheduler.advance_by(Duration::from_millis(80));
    keys.next("b");
    scheduler.advance_by(Duration::from_millis(80));

    assert_eq!(
      *emitted.rc_deref(),
      vec![("a", Duration::from_millis(50)), ("b", Duration::from_millis(130))]
    );
    assert!(scheduler.is_empty());
  }

  #[test]
  fn completion_flushes_pending_value() {
    let scheduler = TestScheduler::new();
    let completed = MutRc::own(false);
    let values = MutRc::own(vec![]);
    let (c_completed, c_values) = (completed.clone(), values.clone());
    let mut keys = Subject::new();

    keys
      .clone()
      .throttle(Duration::from_millis(300), scheduler.clone())
      .subscribe_all(
        move |v| c_values.rc_deref_mut().push(v),
        |_| {},
        move || *c_completed.rc_deref_mut() = true,
      );
    keys.next(1);
    keys.next(2);
    keys.complete();

    assert_eq!(*values.rc_deref(), vec![2]);
    assert!(*completed.rc_deref());
    assert!(scheduler.is_empty());

    scheduler.advance_by(Duration::from_secs(1));
    assert_eq!(*values.rc_deref(), vec![2]);
  }

  #[test]
  fn error_drops_pending_value() {
    let scheduler = TestScheduler::new();
    let values = MutRc::own(vec![]);
    let errors = MutRc::own(vec![]);
    let (c_values, c_errors) = (values.clone(), errors.clone());
    let mut keys = Subject::new();

    keys
      .clone()
      .throttle(Duration::from_millis(300), scheduler.clone())
      .subscribe_err(
        move |v| c_values.rc_deref_mut().push(v),
        move |e| c_errors.rc_deref_mut().push(e.kind()),
      );
    keys.next(1);
    keys.error(RxError::upstream("input closed"));
    scheduler.advance_by(Duration::from_secs(1));

    assert!(values.rc_deref().is_empty());
    assert_eq!(*errors.rc_deref(), vec![ErrorKind::UpstreamFailure]);
  }

  #[test]
  fn dispose_cancels_pending_timer() {
    let scheduler = TestScheduler::new();
    let (mut keys, emitted, mut subscription) = throttled(&scheduler, 300);

    keys.next("r");
    keys.next("ru");
    assert_eq!(scheduler.pending_count(), 1);
    subscription.dispose();
    assert!(scheduler.is_empty());

    scheduler.advance_by(Duration::from_secs(1));
    keys.next("rus");
    scheduler.advance_by(Duration::from_secs(1));
    assert!(emitted.rc_deref().is_empty());
    assert_eq!(keys.observer_count(), 0);
  }

  #[test]
  fn window_restarts_after_emission() {
    let scheduler = TestScheduler::new();
    let (mut keys, emitted, _) = throttled(&scheduler, 100);

    keys.next("a");
    scheduler.advance_by(Duration::from_millis(100));
    scheduler.advance_by(Duration::from_millis(500));
    assert_eq!(emitted.rc_deref().len(), 1);

    keys.next("b");
    scheduler.advance_by(Duration::from_millis(99));
    assert_eq!(emitted.rc_deref().len(), 1);
    scheduler.advance_by(Duration::from_millis(1));
    assert_eq!(
      *emitted.rc_deref(),
      vec![("a", Duration::from_millis(100)), ("b", Duration::from_millis(700))]
    );
  }
}
