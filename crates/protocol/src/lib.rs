pub mod commands;
pub mod types;

pub use commands::ViewCommand;
pub use types::{Direction, InputSource, NavKey, SectionLayout};
