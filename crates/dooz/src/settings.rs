//! Game mode selection.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Who plays the second seat.
///
/// Defaults to [`Mode::TwoPlayer`], two humans sharing the keyboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Two humans take turns.
    #[default]
    TwoPlayer,
    /// A human plays against the minimax opponent.
    VsComputer,
}

impl Mode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwoPlayer => "Two players",
            Self::VsComputer => "Vs computer",
        }
    }

    /// Toggles between `TwoPlayer` and `VsComputer`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::TwoPlayer => Self::VsComputer,
            Self::VsComputer => Self::TwoPlayer,
        }
    }
}
