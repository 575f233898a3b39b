use crate::{
  error::RxError,
  observable::{from_iter, FromIter, Observable},
  observer::Observer,
  subscriber::Subscriber,
  subscription::CompositeDisposable,
};
use std::marker::PhantomData;

/// Creates an observable that emits `value` once and completes.
pub fn of<Item>(value: Item) -> FromIter<Option<Item>> { from_iter(Some(value)) }

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Empty(PhantomData) }
}

impl<Item> Observable for Empty<Item> {
  type Item = Item;

  fn actual_subscribe<O>(self, mut subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Item> + 'static,
  {
    Observer::<Item>::complete(&mut subscriber);
    subscriber.subscription
  }
}

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `err` - An error to emit and terminate with
pub fn throw_err<Item>(err: RxError) -> ThrowErr<Item> { ThrowErr(err, PhantomData) }

pub struct ThrowErr<Item>(RxError, PhantomData<fn() -> Item>);

impl<Item> Clone for ThrowErr<Item> {
  fn clone(&self) -> Self { ThrowErr(self.0.clone(), PhantomData) }
}

impl<Item> Observable for ThrowErr<Item> {
  type Item = Item;

  fn actual_subscribe<O>(self, mut subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Item> + 'static,
  {
    Observer::<Item>::error(&mut subscriber, self.0);
    subscriber.subscription
  }
}
