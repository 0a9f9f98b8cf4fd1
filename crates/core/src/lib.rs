//! Section paging core: gesture classification, the navigation state
//! machine, and the deadline-driven controller that projects it into
//! [`section_pager_protocol::ViewCommand`]s.

pub mod config;
pub mod controller;
pub mod gesture;
pub mod model;
pub mod timers;

pub use config::{ConfigError, PagerConfig};
pub use controller::{PagerError, SectionPager};
