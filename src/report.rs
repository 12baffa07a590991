//! Host-facing snapshot of an analysis, shaped like the sensor attributes.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::core::{
    analysis::{Analysis, Period},
    extrema_type::ExtremaType,
    loading_level::LoadingLevel,
    point::PricePoint,
    price_level::PriceLevel,
    series::Series,
    statistics::Statistics,
};

#[derive(Serialize)]
pub struct Report {
    pub current: Option<SlotReport>,
    pub today: PeriodReport,
    pub tomorrow: Option<PeriodReport>,
    pub future: Option<PeriodReport>,
}

impl From<&Analysis> for Report {
    fn from(analysis: &Analysis) -> Self {
        Self {
            current: analysis.current.as_ref().map(SlotReport::from),
            today: PeriodReport::from(&analysis.today),
            tomorrow: analysis.tomorrow.as_ref().map(PeriodReport::from),
            future: analysis.future.as_ref().map(PeriodReport::from),
        }
    }
}

#[derive(Serialize)]
pub struct PeriodReport {
    pub statistics: StatisticsReport,
    pub slots: Vec<SlotReport>,
    pub extrema: Vec<SlotReport>,
    pub load_from_net: Vec<SlotReport>,
    pub unload_battery: Vec<SlotReport>,
}

impl From<&Period> for PeriodReport {
    fn from(period: &Period) -> Self {
        Self {
            statistics: StatisticsReport::from(&period.statistics),
            slots: slots(&period.series),
            extrema: slots(&period.extrema()),
            load_from_net: slots(&period.load_from_net()),
            unload_battery: slots(&period.unload_battery()),
        }
    }
}

#[derive(Serialize)]
pub struct StatisticsReport {
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub avg_price: f64,
    pub avg_level: f64,
    pub min: SlotReport,
    pub max: SlotReport,
}

impl From<&Statistics> for StatisticsReport {
    fn from(statistics: &Statistics) -> Self {
        Self {
            start_time: statistics.start_time,
            end_time: statistics.end_time,
            avg_price: statistics.avg_price.round_to_cents().0,
            avg_level: (statistics.avg_level * 100.0).round() / 100.0,
            min: SlotReport::from(&statistics.min),
            max: SlotReport::from(&statistics.max),
        }
    }
}

#[derive(Serialize)]
pub struct SlotReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<FixedOffset>>,

    /// Rounded to cents.
    pub price: f64,

    pub level: PriceLevel,
    pub loading_level: LoadingLevel,
    pub extrema_type: ExtremaType,
}

impl From<&PricePoint> for SlotReport {
    fn from(point: &PricePoint) -> Self {
        Self {
            starts_at: point.starts_at,
            price: point.price.round_to_cents().0,
            level: point.level,
            loading_level: point.loading_level,
            extrema_type: point.extrema_type,
        }
    }
}

fn slots(series: &Series) -> Vec<SlotReport> {
    series.iter().map(SlotReport::from).collect()
}
