pub mod distinct_until_changed;
pub mod log_timestamped;
pub mod map;
pub mod tap;
pub mod throttle;
pub mod timestamp;
