pub mod intent;
pub mod state;

pub use intent::NavIntent;
pub use state::{NavigationState, Phase};
