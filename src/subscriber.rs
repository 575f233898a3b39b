use crate::{
  error::RxError,
  observer::Observer,
  subscription::{CompositeDisposable, Disposable},
};

/// An observer paired with the subscription it belongs to.
///
/// Sources push into a `Subscriber`, which drops every event once the
/// subscription is disposed. A terminal event disposes the subscription after
/// it is delivered, which unregisters the source and cancels pending timers.
pub struct Subscriber<O> {
  pub(crate) observer: O,
  pub(crate) subscription: CompositeDisposable,
}

impl<O> Subscriber<O> {
  /// Creates a subscriber with a fresh subscription.
  pub fn new(observer: O) -> Self {
    Subscriber { observer, subscription: CompositeDisposable::default() }
  }

  pub fn with_subscription(observer: O, subscription: CompositeDisposable) -> Self {
    Subscriber { observer, subscription }
  }

  #[inline]
  pub fn subscription(&self) -> &CompositeDisposable { &self.subscription }

  pub fn into_parts(self) -> (O, CompositeDisposable) { (self.observer, self.subscription) }
}

impl<Item, O> Observer<Item> for Subscriber<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if !self.is_finished() {
      self.observer.next(value)
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.is_finished() {
      log::debug!("stream terminated with error: {err}");
      self.observer.error(err);
      self.subscription.dispose();
    }
  }

  fn complete(&mut self) {
    if !self.is_finished() {
      self.observer.complete();
      self.subscription.dispose();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool {
    self.subscription.is_disposed() || self.observer.is_finished()
  }
}
