//! Shared mutable cells for the single-threaded event loop.
//!
//! Operators that hand state to a scheduled task (throttle's trailing value,
//! the downstream observer) keep it behind a [`MutRc`].

use crate::{error::RxError, observer::Observer};
use std::{
  cell::{Ref, RefCell, RefMut},
  rc::Rc,
};

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  /// Returns true if both handles point at the same cell.
  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl<T> RcDeref for MutRc<T> {
  type Target<'a>
    = Ref<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> { self.0.borrow() }
}

impl<T> RcDerefMut for MutRc<T> {
  type Target<'a>
    = RefMut<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> { self.0.borrow_mut() }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

/// A shared observer slot. Terminal events take the observer out of the slot,
/// so a late task holding a clone sees an empty slot and does nothing.
impl<Item, O> Observer<Item> for MutRc<Option<O>>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    let mut inner = self.rc_deref_mut();
    if let Some(observer) = inner.as_mut() {
      observer.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    let inner = self.rc_deref_mut().take();
    if let Some(mut observer) = inner {
      observer.error(err);
    }
  }

  fn complete(&mut self) {
    let inner = self.rc_deref_mut().take();
    if let Some(mut observer) = inner {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .rc_deref()
      .as_ref()
      .is_none_or(<O as Observer<Item>>::is_finished)
  }
}
