//! Observer trait
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three channels: next (for values), error (for errors), and
//! complete (for stream completion).

use crate::error::RxError;

/// An Observer is a consumer of values delivered by an Observable. One for
/// each type of notification delivered by the Observable: `next`, `error`,
/// and `complete`.
///
/// A well-behaved source delivers nothing after `error` or `complete`.
pub trait Observer<Item> {
  fn next(&mut self, value: Item);

  fn error(&mut self, err: RxError);

  fn complete(&mut self);

  /// Returns `true` once the observer no longer accepts events. Sources use
  /// this to stop emitting early.
  fn is_finished(&self) -> bool;
}

impl<Item, O> Observer<Item> for Box<O>
where
  O: Observer<Item> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }

  #[inline]
  fn is_finished(&self) -> bool { (**self).is_finished() }
}

/// Boxed observer, the form multicast sources keep their subscribers in.
pub type BoxedObserver<Item> = Box<dyn Observer<Item>>;

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct TestObserver {
    values: Vec<i32>,
    errors: usize,
    completed: bool,
  }

  impl Observer<i32> for TestObserver {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(&mut self, _: RxError) { self.errors += 1; }

    fn complete(&mut self) { self.completed = true; }

    fn is_finished(&self) -> bool { self.completed || self.errors > 0 }
  }

  #[test]
  fn observer_trait() {
    let mut obs = TestObserver::default();
    obs.next(1);
    obs.next(2);
    assert_eq!(obs.values, vec![1, 2]);
    assert!(!obs.is_finished());
    obs.complete();
    assert!(obs.is_finished());
  }

  #[test]
  fn boxed_observer_delegates() {
    let mut obs: BoxedObserver<i32> = Box::new(TestObserver::default());
    obs.next(1);
    obs.error(RxError::upstream("closed"));
    assert!(obs.is_finished());
  }
}
