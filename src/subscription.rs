use crate::rc::{MutRc, RcDeref, RcDerefMut};
use smallvec::SmallVec;
use std::{
  any::Any,
  fmt::{Debug, Formatter},
  mem,
};

/// A handle to one acquired resource: a subscription, a timer, or a group of
/// other handles.
///
/// `dispose` must be idempotent: calling it a second time has no effect.
pub trait Disposable {
  /// Release the resource. Events racing with the release are dropped.
  fn dispose(&mut self);

  fn is_disposed(&self) -> bool;
}

impl Debug for Box<dyn Disposable> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Box<dyn Disposable>")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

impl<T: ?Sized> Disposable for Box<T>
where
  T: Disposable,
{
  #[inline]
  fn dispose(&mut self) {
    let d = &mut **self;
    d.dispose()
  }

  #[inline]
  fn is_disposed(&self) -> bool {
    let d = &**self;
    d.is_disposed()
  }
}

// ============================================================================
// CompositeDisposable
// ============================================================================

/// Owns a set of disposables and releases all of them in one call.
///
/// Clones share the same set. Every stage of a pipeline registers its
/// resources on the composite of the subscription it belongs to, so disposing
/// the composite tears the whole chain down.
#[derive(Clone, Default)]
pub struct CompositeDisposable(MutRc<Inner<Box<dyn Disposable>>>);

impl CompositeDisposable {
  /// Adds `disposable` to the group. If the group is already disposed the new
  /// member is disposed on the spot.
  pub fn add<D: Disposable + 'static>(&self, mut disposable: D) {
    if self.is_same(&disposable) {
      return;
    }
    let mut inner = self.0.rc_deref_mut();
    if inner.disposed {
      drop(inner);
      disposable.dispose();
    } else {
      inner.teardown.retain(|d| !d.is_disposed());
      inner.teardown.push(Box::new(disposable));
    }
  }

  /// Number of live members.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }

  fn is_same(&self, other: &dyn Any) -> bool {
    other
      .downcast_ref::<Self>()
      .is_some_and(|other| self.0.ptr_eq(&other.0))
  }
}

impl Disposable for CompositeDisposable {
  fn dispose(&mut self) {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      mem::take(&mut inner.teardown)
    };
    log::trace!("disposing composite with {} member(s)", teardown.len());
    for mut d in teardown {
      d.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.rc_deref().disposed }
}

impl Debug for CompositeDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.rc_deref();
    f.debug_struct("CompositeDisposable")
      .field("disposed", &inner.disposed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

struct Inner<T> {
  disposed: bool,
  teardown: SmallVec<[T; 1]>,
}

impl<T> Default for Inner<T> {
  fn default() -> Self { Inner { disposed: false, teardown: SmallVec::new() } }
}

// ============================================================================
// SerialDisposable
// ============================================================================

/// Holds at most one disposable. Replacing it disposes the previous one.
#[derive(Clone, Default)]
pub struct SerialDisposable(MutRc<SerialInner>);

#[derive(Default)]
struct SerialInner {
  disposed: bool,
  current: Option<Box<dyn Disposable>>,
}

impl SerialDisposable {
  pub fn replace<D: Disposable + 'static>(&self, mut next: D) {
    let mut inner = self.0.rc_deref_mut();
    if inner.disposed {
      drop(inner);
      next.dispose();
      return;
    }
    let previous = inner.current.replace(Box::new(next));
    drop(inner);
    if let Some(mut previous) = previous {
      previous.dispose();
    }
  }

  /// Disposes the current member without closing the slot.
  pub fn clear(&self) {
    let current = self.0.rc_deref_mut().current.take();
    if let Some(mut current) = current {
      current.dispose();
    }
  }
}

impl Disposable for SerialDisposable {
  fn dispose(&mut self) {
    let current = {
      let mut inner = self.0.rc_deref_mut();
      inner.disposed = true;
      inner.current.take()
    };
    if let Some(mut current) = current {
      current.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.rc_deref().disposed }
}

// ============================================================================
// ActionDisposable
// ============================================================================

/// Runs a teardown closure once, on the first `dispose`.
pub struct ActionDisposable(Option<Box<dyn FnOnce()>>);

impl ActionDisposable {
  pub fn new(action: impl FnOnce() + 'static) -> Self { Self(Some(Box::new(action))) }
}

impl Disposable for ActionDisposable {
  fn dispose(&mut self) {
    if let Some(action) = self.0.take() {
      action();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_none() }
}

// ============================================================================
// Wrapper & Guard
// ============================================================================

/// Wrapper around a subscription which provides the
/// `dispose_when_dropped()` method.
#[derive(Debug, Clone)]
pub struct SubscriptionWrapper<T: Disposable>(pub(crate) T);

impl<T: Disposable> SubscriptionWrapper<T> {
  /// Activates "RAII" behavior for this subscription. That means
  /// `dispose()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `dispose()` is called immediately, which is probably not what you
  /// want!
  pub fn dispose_when_dropped(self) -> SubscriptionGuard<T> { SubscriptionGuard(self.0) }

  /// Consumes this wrapper and returns the underlying subscription.
  pub fn into_inner(self) -> T { self.0 }
}

impl<T: Disposable> Disposable for SubscriptionWrapper<T> {
  #[inline]
  fn dispose(&mut self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be disposed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Disposable>(pub(crate) T);

impl<T: Disposable> SubscriptionGuard<T> {
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: Disposable> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}
