use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::Serialize;

#[derive(Debug, Default, Serialize, enumset::EnumSetType)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtremaType {
    #[default]
    None,

    /// Absolute minimum.
    Min,

    /// Relative minimum.
    RelMin,

    /// Relative maximum.
    RelMax,

    /// Absolute maximum.
    Max,
}

impl Display for ExtremaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, ""),
            Self::Min => write!(f, "Min"),
            Self::RelMin => write!(f, "Rel. min"),
            Self::RelMax => write!(f, "Rel. max"),
            Self::Max => write!(f, "Max"),
        }
    }
}

impl ExtremaType {
    pub const fn color(self) -> Color {
        match self {
            Self::Min => Color::Green,
            Self::RelMin => Color::DarkGreen,
            Self::RelMax => Color::DarkRed,
            Self::Max => Color::Red,
            Self::None => Color::Reset,
        }
    }
}
