use crate::{
  error::{BoxError, RxError},
  observable::Observable,
  observer::Observer,
  subscriber::Subscriber,
  subscription::CompositeDisposable,
};

#[derive(Clone)]
pub struct MapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, B, F> Observable for MapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> B + 'static,
{
  type Item = B;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<B> + 'static,
  {
    let Subscriber { observer, subscription } = subscriber;
    self.source.actual_subscribe(Subscriber {
      observer: MapObserver { observer, func: self.func },
      subscription,
    })
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, B, O, F> Observer<Item> for MapObserver<O, F>
where
  O: Observer<B>,
  F: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  #[inline]
  fn error(&mut self, err: RxError) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// `map` with a fallible projector.
#[derive(Clone)]
pub struct TryMapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, B, E, F> Observable for TryMapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> Result<B, E> + 'static,
  E: Into<BoxError>,
{
  type Item = B;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<B> + 'static,
  {
    let Subscriber { observer, subscription } = subscriber;
    self.source.actual_subscribe(Subscriber {
      observer: TryMapObserver { observer, func: self.func, failed: false },
      subscription,
    })
  }
}

pub struct TryMapObserver<O, F> {
  observer: O,
  func: F,
  failed: bool,
}

impl<Item, B, E, O, F> Observer<Item> for TryMapObserver<O, F>
where
  O: Observer<B>,
  F: FnMut(Item) -> Result<B, E>,
  E: Into<BoxError>,
{
  fn next(&mut self, value: Item) {
    if self.failed {
      return;
    }
    match (self.func)(value) {
      Ok(v) => self.observer.next(v),
      Err(e) => {
        self.failed = true;
        let err = RxError::projection(e);
        log::debug!("try_map dropped the stream: {err}");
        self.observer.error(err);
      }
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
