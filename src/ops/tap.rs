use crate::{
  error::{BoxError, RxError},
  observable::Observable,
  observer::Observer,
  subscriber::Subscriber,
  subscription::CompositeDisposable,
};

#[derive(Clone)]
pub struct TapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F> Observable for TapOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let Subscriber { observer, subscription } = subscriber;
    self.source.actual_subscribe(Subscriber {
      observer: TapObserver { observer, func: self.func },
      subscription,
    })
  }
}

pub struct TapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, O, F> Observer<Item> for TapObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item),
{
  fn next(&mut self, value: Item) {
    (self.func)(&value);
    self.observer.next(value)
  }

  #[inline]
  fn error(&mut self, err: RxError) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// `tap` with a fallible side effect.
#[derive(Clone)]
pub struct TryTapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, E, F> Observable for TryTapOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) -> Result<(), E> + 'static,
  E: Into<BoxError>,
{
  type Item = S::Item;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let Subscriber { observer, subscription } = subscriber;
    self.source.actual_subscribe(Subscriber {
      observer: TryTapObserver { observer, func: self.func, failed: false },
      subscription,
    })
  }
}

pub struct TryTapObserver<O, F> {
  observer: O,
  func: F,
  failed: bool,
}

impl<Item, E, O, F> Observer<Item> for TryTapObserver<O, F>
where
  O: Observer<Item>,
  F: FnMut(&Item) -> Result<(), E>,
  E: Into<BoxError>,
{
  fn next(&mut self, value: Item) {
    if self.failed {
      return;
    }
    // A value whose side effect failed is not forwarded.
    if let Err(e) = (self.func)(&value) {
      self.failed = true;
      let err = RxError::side_effect(e);
      log::debug!("try_tap dropped the stream: {err}");
      self.observer.error(err);
    } else {
      self.observer.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.failed {
      self.observer.error(err)
    }
  }

  fn complete(&mut self) {
    if !self.failed {
      self.observer.complete()
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.failed || self.observer.is_finished() }
}
