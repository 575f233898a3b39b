//! A hot, multicast source that is also an observer.
//!
//! Values pushed into a [`Subject`] are delivered to every live subscriber.
//! Tests and adapters use it to drive pipelines by hand.

use crate::{
  error::RxError,
  observable::Observable,
  observer::{BoxedObserver, Observer},
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::{ActionDisposable, CompositeDisposable},
};
use std::{collections::VecDeque, mem};

/// Events pushed while the subject is already delivering are queued and
/// delivered, in order, to every subscriber once the current event is done.
pub struct Subject<T>(MutRc<SubjectState<T>>);

struct SubjectState<T> {
  observers: Vec<(usize, BoxedObserver<T>)>,
  next_id: usize,
  terminal: Option<Terminal>,
  emitting: bool,
  pending: VecDeque<Event<T>>,
}

#[derive(Clone)]
enum Terminal {
  Error(RxError),
  Completed,
}

enum Event<T> {
  Next(T),
  Error(RxError),
  Complete,
}

impl<T> Default for Subject<T> {
  fn default() -> Self {
    Subject(MutRc::own(SubjectState {
      observers: vec![],
      next_id: 0,
      terminal: None,
      emitting: false,
      pending: VecDeque::new(),
    }))
  }
}

impl<T> Clone for Subject<T> {
  fn clone(&self) -> Self { Subject(self.0.clone()) }
}

impl<T> Subject<T> {
  pub fn new() -> Self { Self::default() }

  /// Number of subscribers currently attached.
  pub fn observer_count(&self) -> usize { self.0.rc_deref().observers.len() }
}

impl<T: Clone> Subject<T> {
  fn emit(&self, event: Event<T>) {
    {
      let mut state = self.0.rc_deref_mut();
      if state.terminal.is_some() {
        return;
      }
      match &event {
        Event::Next(_) => {}
        Event::Error(err) => state.terminal = Some(Terminal::Error(err.clone())),
        Event::Complete => state.terminal = Some(Terminal::Completed),
      }
      if state.emitting {
        state.pending.push_back(event);
        return;
      }
      state.emitting = true;
    }

    let mut event = Some(event);
    while let Some(current) = event.take() {
      self.deliver(current);
      let mut state = self.0.rc_deref_mut();
      event = state.pending.pop_front();
      if event.is_none() {
        state.emitting = false;
      }
    }
  }

  fn deliver(&self, event: Event<T>) {
    let mut observers = mem::take(&mut self.0.rc_deref_mut().observers);
    match event {
      Event::Next(value) => {
        for (_, observer) in observers.iter_mut() {
          observer.next(value.clone());
        }
        observers.retain(|(_, o)| !o.is_finished());
        let mut state = self.0.rc_deref_mut();
        observers.append(&mut state.observers);
        state.observers = observers;
      }
      Event::Error(err) => {
        for (_, mut observer) in observers {
          observer.error(err.clone());
        }
      }
      Event::Complete => {
        for (_, mut observer) in observers {
          observer.complete();
        }
      }
    }
  }
}

impl<T: Clone + 'static> Observable for Subject<T> {
  type Item = T;

  fn actual_subscribe<O>(self, mut subscriber: Subscriber<O>) -> CompositeDisposable
  where
    O: Observer<T> + 'static,
  {
    let terminal = self.0.rc_deref().terminal.clone();
    match terminal {
      Some(Terminal::Error(err)) => Observer::<T>::error(&mut subscriber, err),
      Some(Terminal::Completed) => Observer::<T>::complete(&mut subscriber),
      None => {
        let subscription = subscriber.subscription.clone();
        let id = {
          let mut state = self.0.rc_deref_mut();
          let id = state.next_id;
          state.next_id += 1;
          state.observers.push((id, Box::new(subscriber)));
          id
        };
        let state = self.0;
        subscription.add(ActionDisposable::new(move || {
          state.rc_deref_mut().observers.retain(|(i, _)| *i != id)
        }));
        return subscription;
      }
    }
    subscriber.subscription
  }
}

impl<T: Clone> Observer<T> for Subject<T> {
  #[inline]
  fn next(&mut self, value: T) { self.emit(Event::Next(value)) }

  #[inline]
  fn error(&mut self, err: RxError) { self.emit(Event::Error(err)) }

  #[inline]
  fn complete(&mut self) { self.emit(Event::Complete) }

  fn is_finished(&self) -> bool { self.0.rc_deref().terminal.is_some() }
}
