//! Closure-backed terminal observers used by the `subscribe*` family.

use crate::{error::RxError, observer::Observer};

/// Observer built from a `next` closure only. An error reaching it has
/// nowhere to go, so it is logged.
#[derive(Clone)]
pub struct ObserverN<N>(N);

impl<N> ObserverN<N> {
  pub fn new(next: N) -> Self { Self(next) }
}

impl<Item, N> Observer<Item> for ObserverN<N>
where
  N: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(value) }

  fn error(&mut self, err: RxError) {
    log::warn!("unhandled stream error: {err}");
  }

  #[inline]
  fn complete(&mut self) {}

  #[inline]
  fn is_finished(&self) -> bool { false }
}

#[derive(Clone)]
pub struct ObserverErr<N, E> {
  next: N,
  error: E,
}

impl<N, E> ObserverErr<N, E> {
  pub fn new(next: N, error: E) -> Self { Self { next, error } }
}

impl<Item, N, E> Observer<Item> for ObserverErr<N, E>
where
  N: FnMut(Item),
  E: FnMut(RxError),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) {}

  #[inline]
  fn is_finished(&self) -> bool { false }
}

#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { Self { next, error, complete } }
}

impl<Item, N, E, C> Observer<Item> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(RxError),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) { (self.complete)() }

  #[inline]
  fn is_finished(&self) -> bool { false }
}
