//! `log_timestamped_values`: `timestamp`, `tap` and `remove_timestamp` chained
//! as one operator. Values come out unchanged; the logger sees each one
//! together with the instant it passed through.

use super::{
  tap::TapOp,
  timestamp::{RemoveTimestampOp, TimestampOp},
};

pub type LogTimestampedValuesOp<S, F, C, Item> = RemoveTimestampOp<TapOp<TimestampOp<S, C>, F>, Item>;
