//! Classification of continuous input into page-change directions.
//!
//! Both classifiers are pure: they look at one event (wheel) or one finished
//! gesture (touch) and answer with a direction or nothing. Locking and burst
//! coalescing are the controller's job.

pub mod touch;
pub mod wheel;

pub use touch::{GestureSample, classify_swipe};
pub use wheel::{WheelRateState, classify_tick};
