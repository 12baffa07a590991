use average::Mean;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::{
    core::{error::AnalysisError, point::PricePoint, series::Series},
    prelude::*,
    quantity::price::KilowattHourPrice,
};

/// Summary of a non-empty series.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    /// Start of the first slot.
    pub start_time: Option<DateTime<FixedOffset>>,

    /// Start of the last slot.
    pub end_time: Option<DateTime<FixedOffset>>,

    pub avg_price: KilowattHourPrice,

    /// Mean of the [level scores][crate::core::price_level::PriceLevel::score].
    pub avg_level: f64,

    pub min: PricePoint,
    pub max: PricePoint,
}

impl Statistics {
    /// Compute the statistics and tag the absolute extrema of the series.
    ///
    /// `min` and `max` are read back after all tagging, so they match the slots of the series.
    #[instrument(skip_all, fields(n_points = series.len()))]
    pub fn try_compute(series: &mut Series) -> Result<Self, AnalysisError> {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err(AnalysisError::EmptySeries);
        };
        let (start_time, end_time) = (first.starts_at, last.starts_at);

        let avg_price: Mean = series.iter().map(|point| point.price.0).collect();
        let avg_level: Mean = series.iter().map(|point| f64::from(point.level.score())).collect();
        let (min_index, max_index) = series.mark_extrema()?;
        let (min, max) = (series[min_index], series[max_index]);

        let statistics = Self {
            start_time,
            end_time,
            avg_price: KilowattHourPrice(avg_price.mean()),
            avg_level: avg_level.mean(),
            min,
            max,
        };
        debug!(
            avg_price = %statistics.avg_price,
            avg_level = statistics.avg_level,
            min = %statistics.min.price,
            max = %statistics.max.price,
            "computed"
        );
        Ok(statistics)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{
        extrema_type::ExtremaType,
        price_level::PriceLevel,
        series::fixtures::{hour, hourly},
    };

    #[test]
    fn test_scenario_c() -> Result<(), AnalysisError> {
        let mut series = hourly(&[0.10, 0.05, 0.20, 0.08]);
        let statistics = Statistics::try_compute(&mut series)?;
        assert_abs_diff_eq!(statistics.avg_price.0, 0.1075, epsilon = 1e-12);
        assert_eq!(statistics.start_time, Some(hour(0)));
        assert_eq!(statistics.end_time, Some(hour(3)));
        assert_eq!(statistics.min.starts_at, Some(hour(1)));
        assert_eq!(statistics.max.starts_at, Some(hour(2)));
        assert_eq!(series[1].extrema_type, ExtremaType::Min);
        assert_eq!(series[2].extrema_type, ExtremaType::Max);
        Ok(())
    }

    #[test]
    fn test_avg_level() -> Result<(), AnalysisError> {
        let mut series = hourly(&[0.10, 0.05, 0.20, 0.08]);
        series[0].level = PriceLevel::VeryCheap;
        series[1].level = PriceLevel::Cheap;
        series[2].level = PriceLevel::VeryExpensive;
        series[3].level = PriceLevel::Expensive;
        let statistics = Statistics::try_compute(&mut series)?;
        assert_abs_diff_eq!(statistics.avg_level, 0.0);

        series[0].level = PriceLevel::Expensive;
        let statistics = Statistics::try_compute(&mut series)?;
        assert_abs_diff_eq!(statistics.avg_level, 0.75);
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<(), AnalysisError> {
        let mut series = hourly(&[0.21, 0.19, 0.25, 0.19, 0.30, 0.22]);
        let first = Statistics::try_compute(&mut series)?;
        let second = Statistics::try_compute(&mut series)?;
        assert_eq!(first, second);
        assert_eq!(
            series.iter().filter(|point| point.extrema_type != ExtremaType::None).count(),
            2,
        );
        Ok(())
    }

    #[test]
    fn test_single_slot() -> Result<(), AnalysisError> {
        let mut series = hourly(&[0.10]);
        let statistics = Statistics::try_compute(&mut series)?;
        assert_eq!(statistics.min, series[0]);
        assert_eq!(statistics.max, series[0]);
        assert_eq!(statistics.start_time, statistics.end_time);
        Ok(())
    }

    #[test]
    fn test_scenario_d_empty() {
        assert_eq!(
            Statistics::try_compute(&mut Series::default()),
            Err(AnalysisError::EmptySeries),
        );
    }
}
