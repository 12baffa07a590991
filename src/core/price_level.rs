use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use comfy_table::Color;
use serde::{Deserialize, Serialize};

/// Price level as classified by Tibber against the trailing average price.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    /// At most 60 % of the average.
    VeryCheap,

    /// Above 60 % and at most 90 % of the average.
    Cheap,

    /// Above 90 % and below 115 % of the average.
    Normal,

    /// From 115 % and below 140 % of the average.
    Expensive,

    /// At least 140 % of the average.
    VeryExpensive,
}

impl PriceLevel {
    /// Integer score used to average the levels over a period.
    pub const fn score(self) -> i8 {
        match self {
            Self::VeryCheap => -2,
            Self::Cheap => -1,
            Self::Normal => 0,
            Self::Expensive => 1,
            Self::VeryExpensive => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryCheap => "VERY_CHEAP",
            Self::Cheap => "CHEAP",
            Self::Normal => "NORMAL",
            Self::Expensive => "EXPENSIVE",
            Self::VeryExpensive => "VERY_EXPENSIVE",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::VeryCheap => Color::Green,
            Self::Cheap => Color::DarkGreen,
            Self::Normal => Color::Reset,
            Self::Expensive => Color::DarkYellow,
            Self::VeryExpensive => Color::Red,
        }
    }
}

impl Display for PriceLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("unrecognized price level `{0}`")]
pub struct UnknownPriceLevel(pub String);

impl FromStr for PriceLevel {
    type Err = UnknownPriceLevel;

    /// Labels are matched case-insensitively.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.to_ascii_uppercase().as_str() {
            "VERY_CHEAP" => Ok(Self::VeryCheap),
            "CHEAP" => Ok(Self::Cheap),
            "NORMAL" => Ok(Self::Normal),
            "EXPENSIVE" => Ok(Self::Expensive),
            "VERY_EXPENSIVE" => Ok(Self::VeryExpensive),
            _ => Err(UnknownPriceLevel(label.to_owned())),
        }
    }
}
