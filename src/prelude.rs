//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Sources, under their module name: `observable::from_iter(..)`
pub use crate::observable;
pub use crate::observable::{EventEmitter, EventSource, ListenerId, Observable, ObservableExt};
// Errors
pub use crate::error::{BoxError, ErrorKind, RxError};
// Observer trait
pub use crate::observer::{BoxedObserver, Observer};
// Operators
pub use crate::ops::{
  distinct_until_changed::DistinctUntilChangedOp,
  log_timestamped::LogTimestampedValuesOp,
  map::{MapOp, TryMapOp},
  tap::{TapOp, TryTapOp},
  throttle::ThrottleOp,
  timestamp::{RemoveTimestampOp, TimestampOp, Timestamped},
};
// Schedulers
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::LocalScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioLocalScheduler;
pub use crate::scheduler::{
  Clock, Duration, Instant, Scheduler, SystemClock, TaskHandle, TestScheduler,
};
// Subject
pub use crate::subject::Subject;
// Subscription
pub use crate::subscribable::{ObserverAll, ObserverErr, ObserverN};
pub use crate::subscriber::Subscriber;
pub use crate::subscription::*;
