use serde::{Deserialize, Serialize};

/// A single, stateless projection instruction.
///
/// The controller emits a `Vec<ViewCommand>` for every input it accepts and
/// for every timer that fires. Hosts apply the list in order; each command
/// carries all the data it needs and never depends on reading the view back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewCommand {
    /// Mark a section as the visible one.
    ActivateSection { index: usize },

    /// Remove the visible state from a section.
    DeactivateSection { index: usize },

    /// Set or clear the active state of one progress indicator.
    SetIndicator { index: usize, active: bool },

    /// Start the entrance animation of one reveal child.
    RevealChild { section: usize, child: usize },

    /// Clear every reveal child of a section so the next visit replays them.
    ResetReveals { section: usize },

    /// Short haptic pulse. Hosts without a vibration API ignore it.
    Vibrate { duration_ms: u32 },
}
