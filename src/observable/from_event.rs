//! Adapting callback-style event producers.
//!
//! A window toolkit, a terminal input reader or a sensor driver usually
//! exposes "register a callback / unregister it". [`EventSource`] captures that
//! contract and [`from_event`] turns any implementation into an
//! [`Observable`] that listens on subscribe and unlistens on dispose.

use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::{ActionDisposable, CompositeDisposable},
};
use smallvec::SmallVec;
use std::{collections::VecDeque, mem};

/// A push source of raw events.
pub trait EventSource {
  type Event;
  /// Identifies one registration.
  type Token;

  fn listen(&self, callback: Box<dyn FnMut(Self::Event)>) -> Self::Token;

  fn unlisten(&self, token: Self::Token);
}

/// Wraps an [`EventSource`] as an observable of its events. The stream never
/// completes on its own; it ends when the subscription is disposed.
pub fn from_event<E: EventSource>(source: E) -> FromEvent<E> { FromEvent(source) }

#[derive(Clone)]
pub struct FromEvent<E>(E);

impl<E> Observable for FromEvent<E>
where
  E: EventSource + 'static,
  E::Event: 'static,
  E::Token: 'static,
{
  type Item = E::Event;

  fn actual_subscribe<O>(self, subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<Self::Item> + 'static,
  {
    let subscription = subscriber.subscription.clone();
    let mut subscriber = subscriber;
    let source = self.0;
    let token = source.listen(Box::new(move |event: E::Event| subscriber.next(event)));
    subscription.add(ActionDisposable::new(move || source.unlisten(token)));
    subscription
  }
}

/// Identifies a callback registered on an [`EventEmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// An in-process [`EventSource`]: `emit` calls every registered listener.
///
/// Listeners may register or unregister from inside a callback; the change
/// takes effect once the current event has been delivered. An `emit` from
/// inside a callback is queued and delivered after the current event.
pub struct EventEmitter<T>(MutRc<EmitterState<T>>);

struct EmitterState<T> {
  listeners: Vec<(ListenerId, Box<dyn FnMut(T)>)>,
  next_id: usize,
  emitting: bool,
  removed: SmallVec<[ListenerId; 2]>,
  pending: VecDeque<T>,
}

impl<T> Default for EventEmitter<T> {
  fn default() -> Self {
    EventEmitter(MutRc::own(EmitterState {
      listeners: vec![],
      next_id: 0,
      emitting: false,
      removed: SmallVec::new(),
      pending: VecDeque::new(),
    }))
  }
}

impl<T> Clone for EventEmitter<T> {
  fn clone(&self) -> Self { EventEmitter(self.0.clone()) }
}

impl<T: Clone> EventEmitter<T> {
  pub fn new() -> Self { Self::default() }

  pub fn emit(&self, event: T) {
    {
      let mut state = self.0.rc_deref_mut();
      if state.emitting {
        state.pending.push_back(event);
        return;
      }
      state.emitting = true;
    }

    let mut event = Some(event);
    while let Some(current) = event.take() {
      self.dispatch(current);
      let mut state = self.0.rc_deref_mut();
      event = state.pending.pop_front();
      if event.is_none() {
        state.emitting = false;
      }
    }
  }

  fn dispatch(&self, event: T) {
    let mut listeners = mem::take(&mut self.0.rc_deref_mut().listeners);

    for (id, callback) in listeners.iter_mut() {
      let removed = self.0.rc_deref().removed.contains(id);
      if !removed {
        callback(event.clone());
      }
    }

    let mut state = self.0.rc_deref_mut();
    let removed = mem::take(&mut state.removed);
    listeners.retain(|(id, _)| !removed.contains(id));
    listeners.append(&mut state.listeners);
    state.listeners = listeners;
  }

  pub fn listener_count(&self) -> usize { self.0.rc_deref().listeners.len() }
}

impl<T: Clone> EventSource for EventEmitter<T> {
  type Event = T;
  type Token = ListenerId;

  fn listen(&self, callback: Box<dyn FnMut(T)>) -> ListenerId {
    let mut state = self.0.rc_deref_mut();
    let id = ListenerId(state.next_id);
    state.next_id += 1;
    state.listeners.push((id, callback));
    id
  }

  fn unlisten(&self, token: ListenerId) {
    let mut state = self.0.rc_deref_mut();
    if state.emitting {
      state.removed.push(token);
    }
    state.listeners.retain(|(id, _)| *id != token);
  }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use crate::rc::{MutRc, RcDeref, RcDerefMut};

  #[test]
  fn listens_on_subscribe_and_unlistens_on_dispose() {
    let text_changed = EventEmitter::new();
    let values = MutRc::own(vec![]);
    let c_values = values.clone();

    let chain = observable::from_event(text_changed.clone()).map(|s: String| s.len());
    assert_eq!(text_changed.listener_count(), 0);

    let mut subscription = chain.subscribe(move |v| c_values.rc_deref_mut().push(v));
    assert_eq!(text_changed.listener_count(), 1);

    text_changed.emit("h".to_owned());
    text_changed.emit("he".to_owned());
    subscription.dispose();
    text_changed.emit("hel".to_owned());

    assert_eq!(text_changed.listener_count(), 0);
    assert_eq!(*values.rc_deref(), vec![1, 2]);
  }

  #[test]
  fn failure_while_emitting_unlistens() {
    let pointer_moved = EventEmitter::new();
    let values = MutRc::own(vec![]);
    let c_values = values.clone();

    observable::from_event(pointer_moved.clone())
      .try_map(|(x, y): (i32, i32)| if x >= 0 && y >= 0 { Ok(x + y) } else { Err("off screen") })
      .subscribe_err(move |v| c_values.rc_deref_mut().push(v), |_| {});

    pointer_moved.emit((1, 2));
    pointer_moved.emit((-1, 0));
    pointer_moved.emit((3, 4));

    assert_eq!(*values.rc_deref(), vec![3]);
    assert_eq!(pointer_moved.listener_count(), 0);
  }

  #[test]
  fn every_listener_gets_the_event() {
    let emitter = EventEmitter::new();
    let hits = MutRc::own(0);
    let (a, b) = (hits.clone(), hits.clone());
    observable::from_event(emitter.clone()).subscribe(move |_: u8| *a.rc_deref_mut() += 1);
    observable::from_event(emitter.clone()).subscribe(move |_: u8| *b.rc_deref_mut() += 1);
    emitter.emit(0);
    assert_eq!(*hits.rc_deref(), 2);
  }

  #[test]
  fn emit_from_a_listener_is_queued_behind_the_current_event() {
    let emitter = EventEmitter::new();
    let events = MutRc::own(vec![]);

    let (inner, c_events) = (emitter.clone(), events.clone());
    observable::from_event(emitter.clone()).subscribe(move |v: i32| {
      c_events.rc_deref_mut().push(format!("a {v}"));
      if v == 1 {
        inner.emit(9);
      }
    });

    let slot: MutRc<Option<SubscriptionWrapper<CompositeDisposable>>> = MutRc::own(None);
    let (c_slot, c_events) = (slot.clone(), events.clone());
    let subscription = observable::from_event(emitter.clone()).subscribe(move |v: i32| {
      c_events.rc_deref_mut().push(format!("b {v}"));
      if let Some(subscription) = c_slot.rc_deref_mut().as_mut() {
        subscription.dispose();
      }
    });
    *slot.rc_deref_mut() = Some(subscription);

    emitter.emit(1);

    assert_eq!(*events.rc_deref(), vec!["a 1", "b 1", "a 9"]);
    assert_eq!(emitter.listener_count(), 1);
  }
}
