use crate::{
  error::{BoxError, RxError},
  observer::Observer,
  ops::{
    distinct_until_changed::DistinctUntilChangedOp,
    log_timestamped::LogTimestampedValuesOp,
    map::{MapOp, TryMapOp},
    tap::{TapOp, TryTapOp},
    throttle::ThrottleOp,
    timestamp::{RemoveTimestampOp, TimestampOp, Timestamped},
  },
  scheduler::{Clock, Duration, Scheduler, SystemClock},
  subscribable::{ObserverAll, ObserverErr, ObserverN},
  subscriber::Subscriber,
  subscription::{CompositeDisposable, SubscriptionWrapper},
};

mod from_event;
pub use from_event::*;
mod from_iter;
pub use from_iter::*;
mod trivial;
pub use trivial::*;

/// A representation of any set of values over any amount of time. This is the
/// most basic building block of rxtame.
///
/// Observables are cold: building one has no side effect, and each call to
/// `actual_subscribe` starts an independent execution with its own operator
/// state. Operators are `Clone` when their parts are, so subscribing a clone
/// gives a second, isolated delivery.
pub trait Observable: Sized {
  type Item;

  /// Starts an execution that pushes into `subscriber`. Every resource the
  /// execution acquires is registered on `subscriber.subscription`, which is
  /// returned.
  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static;
}

pub trait ObservableExt: Observable {
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  fn map<B, F>(self, f: F) -> MapOp<Self, F>
  where
    F: FnMut(Self::Item) -> B,
  {
    MapOp { source: self, func: f }
  }

  /// Like `map`, but the projector may fail. The first `Err` is delivered as
  /// [`RxError::ProjectionFailure`] and ends the subscription.
  fn try_map<B, E, F>(self, f: F) -> TryMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> Result<B, E>,
    E: Into<BoxError>,
  {
    TryMapOp { source: self, func: f }
  }

  /// Invokes `f` with every value before passing the value on unchanged.
  fn tap<F>(self, f: F) -> TapOp<Self, F>
  where
    F: FnMut(&Self::Item),
  {
    TapOp { source: self, func: f }
  }

  /// Like `tap`, but the side effect may fail. A failing side effect is
  /// delivered as [`RxError::SideEffectFailure`] and the value is not
  /// forwarded.
  fn try_tap<E, F>(self, f: F) -> TryTapOp<Self, F>
  where
    F: FnMut(&Self::Item) -> Result<(), E>,
    E: Into<BoxError>,
  {
    TryTapOp { source: self, func: f }
  }

  /// Only emit a value if it differs from the last value emitted.
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self, fn(&Self::Item, &Self::Item) -> bool>
  where
    Self::Item: PartialEq + Clone,
  {
    DistinctUntilChangedOp {
      source: self,
      eq: <Self::Item as PartialEq>::eq as fn(&Self::Item, &Self::Item) -> bool,
    }
  }

  /// Like `distinct_until_changed`, comparing with `eq(last, current)`.
  fn distinct_until_changed_by<F>(self, eq: F) -> DistinctUntilChangedOp<Self, F>
  where
    Self::Item: Clone,
    F: FnMut(&Self::Item, &Self::Item) -> bool,
  {
    DistinctUntilChangedOp { source: self, eq }
  }

  /// Emits the latest value once `duration` passes without another value
  /// arriving. Known as `debounce` in several Rx flavours.
  ///
  /// Completion flushes a pending value before completing; an error drops it.
  fn throttle<SD>(self, duration: Duration, scheduler: SD) -> ThrottleOp<Self, SD>
  where
    SD: Scheduler,
  {
    ThrottleOp { source: self, scheduler, duration }
  }

  /// Tags every value with the instant this operator observed it.
  fn timestamp(self) -> TimestampOp<Self, SystemClock> { self.timestamp_on(SystemClock) }

  /// Like `timestamp`, reading the time from `clock`.
  fn timestamp_on<C: Clock>(self, clock: C) -> TimestampOp<Self, C> {
    TimestampOp { source: self, clock }
  }

  /// Unwraps values tagged by `timestamp`.
  fn remove_timestamp<T>(self) -> RemoveTimestampOp<Self, T>
  where
    Self: Observable<Item = Timestamped<T>>,
  {
    MapOp {
      source: self,
      func: Timestamped::into_value as fn(Timestamped<T>) -> T,
    }
  }

  /// Hands every value, tagged with its observation time, to `logger`, then
  /// forwards the plain value. Shorthand for
  /// `timestamp().tap(logger).remove_timestamp()`.
  fn log_timestamped_values<F>(self, logger: F) -> LogTimestampedValuesOp<Self, F, SystemClock, Self::Item>
  where
    Self::Item: 'static,
    F: FnMut(&Timestamped<Self::Item>) + 'static,
  {
    self.log_timestamped_values_on(SystemClock, logger)
  }

  fn log_timestamped_values_on<C, F>(
    self, clock: C, logger: F,
  ) -> LogTimestampedValuesOp<Self, F, C, Self::Item>
  where
    Self::Item: 'static,
    C: Clock + 'static,
    F: FnMut(&Timestamped<Self::Item>) + 'static,
  {
    self.timestamp_on(clock).tap(logger).remove_timestamp()
  }

  /// Subscribes with a `next` handler. Errors are logged, completion ignored.
  fn subscribe<N>(self, next: N) -> SubscriptionWrapper<CompositeDisposable>
  where
    N: FnMut(Self::Item) + 'static,
  {
    self.subscribe_with(ObserverN::new(next))
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> SubscriptionWrapper<CompositeDisposable>
  where
    N: FnMut(Self::Item) + 'static,
    E: FnMut(RxError) + 'static,
  {
    self.subscribe_with(ObserverErr::new(next, error))
  }

  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> SubscriptionWrapper<CompositeDisposable>
  where
    N: FnMut(Self::Item) + 'static,
    E: FnMut(RxError) + 'static,
    C: FnMut() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }

  /// Makes the chain live, delivering into `observer` until the returned
  /// subscription is disposed or the stream terminates.
  fn subscribe_with<O>(self, observer: O) -> SubscriptionWrapper<CompositeDisposable>
  where
    O: Observer<Self::Item> + 'static,
  {
    // Operators unwrap the outer subscriber; the inner one disposes the
    // subscription when an operator itself raises the terminal event.
    let terminal = Subscriber::new(observer);
    let subscription = terminal.subscription.clone();
    log::trace!("subscription established");
    let subscription = self.actual_subscribe(Subscriber::with_subscription(terminal, subscription));
    SubscriptionWrapper(subscription)
  }
}

impl<T: Observable> ObservableExt for T {}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use crate::rc::{MutRc, RcDeref, RcDerefMut};

  #[test]
  fn construction_is_lazy() {
    let touched = MutRc::own(0);
    let c_touched = touched.clone();
    let chain = observable::from_iter(0..3).tap(move |_| *c_touched.rc_deref_mut() += 1);
    assert_eq!(*touched.rc_deref(), 0);

    chain.subscribe(|_| {});
    assert_eq!(*touched.rc_deref(), 3);
  }

  #[test]
  fn clones_subscribe_independently() {
    let mut subject = Subject::new();
    let chain = subject.clone().distinct_until_changed();

    let first = MutRc::own(vec![]);
    let c_first = first.clone();
    chain.clone().subscribe(move |v| c_first.rc_deref_mut().push(v));
    subject.next(1);
    subject.next(1);

    let second = MutRc::own(vec![]);
    let c_second = second.clone();
    chain.subscribe(move |v| c_second.rc_deref_mut().push(v));
    subject.next(1);
    subject.next(2);

    assert_eq!(*first.rc_deref(), vec![1, 2]);
    assert_eq!(*second.rc_deref(), vec![1, 2]);
  }

  #[test]
  fn subscribe_all_receives_completion() {
    let completed = MutRc::own(false);
    let c_completed = completed.clone();
    let sum = MutRc::own(0);
    let c_sum = sum.clone();
    observable::from_iter(1..=4).subscribe_all(
      move |v| *c_sum.rc_deref_mut() += v,
      |_| {},
      move || *c_completed.rc_deref_mut() = true,
    );
    assert_eq!(*sum.rc_deref(), 10);
    assert!(*completed.rc_deref());
  }

  #[test]
  fn subscription_closes_after_completion() {
    let subscription = observable::of(1).subscribe(|_| {});
    assert!(subscription.is_disposed());
  }

  #[test]
  fn operator_raised_error_tears_down_the_subscription() {
    let mut keys = Subject::new();
    let errors = MutRc::own(vec![]);
    let c_errors = errors.clone();

    let subscription = keys
      .clone()
      .try_map(|v: i32| if v < 0 { Err("negative") } else { Ok(v) })
      .map(|v| v * 2)
      .subscribe_err(|_| {}, move |e| c_errors.rc_deref_mut().push(e.kind()));
    keys.next(1);
    keys.next(-1);

    assert!(subscription.is_disposed());
    assert_eq!(keys.observer_count(), 0);
    assert_eq!(*errors.rc_deref(), vec![ErrorKind::ProjectionFailure]);
  }
}
