use crate::{
  observable::Observable, observer::Observer, subscriber::Subscriber,
  subscription::CompositeDisposable,
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Stops early if the
/// subscription is disposed while emitting. Never emits an error.
///
/// # Examples
///
/// ```
/// use rxtame::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> FromIter<Iter>
where
  Iter: IntoIterator,
{
  FromIter(iter)
}

#[derive(Clone)]
pub struct FromIter<Iter>(Iter);

impl<Iter> Observable for FromIter<Iter>
where
  Iter: IntoIterator,
{
  type Item = Iter::Item;

  fn actual_subscribe<O>(self, mut subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let mut iter = self.0.into_iter();
    while !Observer::<Self::Item>::is_finished(&subscriber) {
      let Some(v) = iter.next() else { break };
      subscriber.next(v);
    }
    Observer::<Self::Item>::complete(&mut subscriber);
    subscriber.subscription
  }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use crate::rc::{MutRc, RcDeref, RcDerefMut};

  #[test]
  fn from_range() {
    let hit_count = MutRc::own(0);
    let completed = MutRc::own(false);
    let (c_hit, c_completed) = (hit_count.clone(), completed.clone());
    observable::from_iter(0..100).subscribe_all(
      move |_| *c_hit.rc_deref_mut() += 1,
      |_| {},
      move || *c_completed.rc_deref_mut() = true,
    );

    assert_eq!(*hit_count.rc_deref(), 100);
    assert!(*completed.rc_deref());
  }

  #[test]
  fn from_vec() {
    let values = MutRc::own(vec![]);
    let c_values = values.clone();
    observable::from_iter(vec!['a', 'b', 'c']).subscribe(move |v| c_values.rc_deref_mut().push(v));
    assert_eq!(*values.rc_deref(), vec!['a', 'b', 'c']);
  }

  #[test]
  fn stops_once_the_chain_fails() {
    let pulled = MutRc::own(0);
    let c_pulled = pulled.clone();
    observable::from_iter((0..100).inspect(move |_| *c_pulled.rc_deref_mut() += 1))
      .try_map(|v| if v < 2 { Ok(v) } else { Err("stop") })
      .subscribe_err(|_| {}, |_| {});
    assert_eq!(*pulled.rc_deref(), 3);
  }
}
