use super::map::MapOp;
use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  scheduler::{Clock, Instant},
  subscriber::Subscriber,
  subscription::CompositeDisposable,
};

/// A value tagged with the instant it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamped<T> {
  pub value: T,
  pub timestamp: Instant,
}

impl<T> Timestamped<T> {
  pub fn new(value: T, timestamp: Instant) -> Self { Timestamped { value, timestamp } }

  #[inline]
  pub fn value(&self) -> &T { &self.value }

  #[inline]
  pub fn timestamp(&self) -> Instant { self.timestamp }

  #[inline]
  pub fn into_value(self) -> T { self.value }

  pub fn into_parts(self) -> (T, Instant) { (self.value, self.timestamp) }
}

#[derive(Clone)]
pub struct TimestampOp<S, C> {
  pub(crate) source: S,
  pub(crate) clock: C,
}

impl<S, C> Observable for TimestampOp<S, C>
where
  S: Observable,
  S::Item: 'static,
  C: Clock + 'static,
{
  type Item = Timestamped<S::Item>;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let Subscriber { observer, subscription } = subscriber;
    self.source.actual_subscribe(Subscriber {
      observer: TimestampObserver { observer, clock: self.clock },
      subscription,
    })
  }
}

pub struct TimestampObserver<O, C> {
  observer: O,
  clock: C,
}

impl<Item, O, C> Observer<Item> for TimestampObserver<O, C>
where
  O: Observer<Timestamped<Item>>,
  C: Clock,
{
  fn next(&mut self, value: Item) {
    let timestamp = self.clock.now();
    self.observer.next(Timestamped { value, timestamp })
  }

  #[inline]
  fn error(&mut self, err: RxError) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

// Unwrapping is a plain projection, so `remove_timestamp` is a typedef over
// `map` rather than its own operator.
pub type RemoveTimestampOp<S, T> = MapOp<S, fn(Timestamped<T>) -> T>;

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use crate::rc::{MutRc, RcDeref, RcDerefMut};

  #[test]
  fn tags_with_the_clock_time() {
    let scheduler = TestScheduler::new();
    let start = scheduler.now();
    let mut subject = Subject::new();
    let stamped = MutRc::own(vec![]);
    let c_stamped = stamped.clone();

    subject
      .clone()
      .timestamp_on(scheduler.clone())
      .subscribe(move |t: Timestamped<char>| {
        c_stamped.rc_deref_mut().push((t.value, t.timestamp - start))
      });

    subject.next('a');
    scheduler.advance_by(Duration::from_millis(250));
    subject.next('b');

    assert_eq!(
      *stamped.rc_deref(),
      vec![('a', Duration::ZERO), ('b', Duration::from_millis(250))]
    );
  }

  #[test]
  fn timestamps_never_decrease() {
    let stamps = MutRc::own(vec![]);
    let c_stamps = stamps.clone();
    observable::from_iter(0..50)
      .timestamp()
      .subscribe(move |t| c_stamps.rc_deref_mut().push(t.timestamp()));
    let stamps = stamps.rc_deref();
    assert_eq!(stamps.len(), 50);
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
  }

  #[test]
  fn remove_timestamp_round_trips() {
    let values = MutRc::own(vec![]);
    let c_values = values.clone();
    observable::from_iter(vec!["x".to_owned(), "y".to_owned()])
      .timestamp()
      .remove_timestamp()
      .subscribe(move |v| c_values.rc_deref_mut().push(v));
    assert_eq!(*values.rc_deref(), vec!["x", "y"]);
  }

  #[test]
  fn remove_timestamp_on_hand_built_values() {
    let clock = TestScheduler::new();
    let now = clock.now();
    let values = MutRc::own(vec![]);
    let c_values = values.clone();
    observable::from_iter([Timestamped::new(1, now), Timestamped::new(2, now)])
      .remove_timestamp()
      .subscribe(move |v| c_values.rc_deref_mut().push(v));
    assert_eq!(*values.rc_deref(), vec![1, 2]);
  }
}
