use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::Serialize;

/// Whether a slot is worth charging the battery from the grid or discharging it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingLevel {
    /// No qualifying comparison touched the slot.
    #[default]
    Unknown,

    /// Cheap enough: some later slot recoups the price plus the round-trip loss.
    LoadFromNet,

    /// Expensive enough: some earlier slot was cheap enough to charge for it.
    UnloadBattery,
}

impl Display for LoadingLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, ""),
            Self::LoadFromNet => write!(f, "Load from net"),
            Self::UnloadBattery => write!(f, "Unload battery"),
        }
    }
}

impl LoadingLevel {
    pub const fn color(self) -> Color {
        match self {
            Self::LoadFromNet => Color::Green,
            Self::UnloadBattery => Color::Blue,
            Self::Unknown => Color::Reset,
        }
    }
}
