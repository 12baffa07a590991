use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::{
    core::{extrema_type::ExtremaType, loading_level::LoadingLevel, price_level::PriceLevel},
    quantity::price::KilowattHourPrice,
};

/// Single price slot.
///
/// The level, start time and price come from the feed and never change.
/// The annotations are written in place by the analysis passes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PricePoint {
    pub level: PriceLevel,

    /// Start of the slot, absent for the current price quote.
    pub starts_at: Option<DateTime<FixedOffset>>,

    pub price: KilowattHourPrice,

    pub loading_level: LoadingLevel,
    pub extrema_type: ExtremaType,
}

impl PricePoint {
    pub const fn new(
        level: PriceLevel,
        starts_at: Option<DateTime<FixedOffset>>,
        price: KilowattHourPrice,
    ) -> Self {
        Self {
            level,
            starts_at,
            price,
            loading_level: LoadingLevel::Unknown,
            extrema_type: ExtremaType::None,
        }
    }
}
