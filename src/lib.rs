//! # rxtame: a micro reactive-streams engine
//!
//! Turns noisy push sources (keystrokes, pointer moves, sensor readings) into
//! calm, de-duplicated, rate-limited streams.
//!
//! ```rust
//! use rxtame::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! let mut keys = Subject::new();
//!
//! let _subscription = keys
//!   .clone()
//!   .map(|s: &str| s.trim().to_owned())
//!   .distinct_until_changed()
//!   .throttle(Duration::from_millis(300), scheduler.clone())
//!   .log_timestamped_values(|t| println!("{} at {:?}", t.value, t.timestamp))
//!   .subscribe(|query| println!("search for {query}"));
//!
//! keys.next("r");
//! keys.next("ru ");
//! keys.next("ru");
//! scheduler.advance_by(Duration::from_millis(300));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A lazy, cold description of a stream |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`CompositeDisposable`] | Handle that tears a whole subscription down |
//! | [`Scheduler`] | Runs delayed tasks for time-based operators |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): [`LocalScheduler`] on a `futures` local executor
//! - **`tokio-scheduler`**: [`TokioLocalScheduler`] on a tokio `LocalSet`
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`CompositeDisposable`]: subscription::CompositeDisposable
//! [`Scheduler`]: scheduler::Scheduler
//! [`LocalScheduler`]: scheduler::LocalScheduler
//! [`TokioLocalScheduler`]: scheduler::TokioLocalScheduler

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscribable;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;
