//! Suppresses consecutive duplicates.
//!
//! Each subscription keeps its own copy of the last forwarded value. The first
//! value always passes; the comparator is only called from the second value on.

use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscriber::Subscriber,
  subscription::CompositeDisposable,
};

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S, F> {
  pub(crate) source: S,
  pub(crate) eq: F,
}

impl<S, F> Observable for DistinctUntilChangedOp<S, F>
where
  S: Observable,
  S::Item: Clone + 'static,
  F: FnMut(&S::Item, &S::Item) -> bool + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let Subscriber { observer, subscription } = subscriber;
    self.source.actual_subscribe(Subscriber {
      observer: DistinctUntilChangedObserver { observer, eq: self.eq, last: None },
      subscription,
    })
  }
}

pub struct DistinctUntilChangedObserver<O, F, Item> {
  observer: O,
  eq: F,
  last: Option<Item>,
}

impl<Item, O, F> Observer<Item> for DistinctUntilChangedObserver<O, F, Item>
where
  O: Observer<Item>,
  F: FnMut(&Item, &Item) -> bool,
  Item: Clone,
{
  fn next(&mut self, value: Item) {
    let changed = match &self.last {
      Some(last) => !(self.eq)(last, &value),
      None => true,
    };
    if changed {
      self.last = Some(value.clone());
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: RxError) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use crate::rc::{MutRc, RcDeref, RcDerefMut};

  #[test]
  fn suppresses_consecutive_duplicates() {
    let values = MutRc::own(vec![]);
    let c_values = values.clone();
    observable::from_iter(["a", "a", "b", "b", "b", "a"])
      .distinct_until_changed()
      .subscribe(move |v| c_values.rc_deref_mut().push(v));
    assert_eq!(*values.rc_deref(), vec!["a", "b", "a"]);
  }

  #[test]
  fn first_value_skips_the_comparator() {
    let calls = MutRc::own(0);
    let c_calls = calls.clone();
    observable::from_iter([1, 1, 2, 3, 3])
      .distinct_until_changed_by(move |a, b| {
        *c_calls.rc_deref_mut() += 1;
        a == b
      })
      .subscribe(|_| {});
    assert_eq!(*calls.rc_deref(), 4);
  }

  #[test]
  fn custom_comparator() {
    let values = MutRc::own(vec![]);
    let c_values = values.clone();
    observable::from_iter(["Rust", "rust", "RUST", "rx"])
      .distinct_until_changed_by(|a: &&str, b: &&str| a.eq_ignore_ascii_case(b))
      .subscribe(move |v| c_values.rc_deref_mut().push(v));
    assert_eq!(*values.rc_deref(), vec!["Rust", "rx"]);
  }

  #[test]
  fn each_subscription_tracks_its_own_last_value() {
    let mut subject = Subject::new();
    let chain = subject.clone().distinct_until_changed();
    let first = MutRc::own(vec![]);
    let second = MutRc::own(vec![]);
    let (c_first, c_second) = (first.clone(), second.clone());

    chain.clone().subscribe(move |v| c_first.rc_deref_mut().push(v));
    subject.next(7);
    chain.subscribe(move |v| c_second.rc_deref_mut().push(v));
    subject.next(7);

    assert_eq!(*first.rc_deref(), vec![7]);
    assert_eq!(*second.rc_deref(), vec![7]);
  }

  #[test]
  fn completion_passes_through() {
    let completed = MutRc::own(false);
    let c_completed = completed.clone();
    observable::empty::<i32>()
      .distinct_until_changed()
      .subscribe_all(|_| {}, |_| {}, move || *c_completed.rc_deref_mut() = true);
    assert!(*completed.rc_deref());
  }
}
