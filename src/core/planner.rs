use crate::{
    core::{loading_level::LoadingLevel, point::PricePoint},
    prelude::*,
    quantity::percent::Percent,
};

/// Marks the slots where charging from the grid or discharging the battery pays off.
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct LoadPlanner {
    /// Round-trip loss of charging and later discharging the battery.
    loss_margin: Percent,

    #[builder(default)]
    horizon: Horizon,
}

/// How far the successor scan reaches.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Horizon {
    /// Stop one slot short of the end: the last slot is never examined.
    #[default]
    ExcludeLastSlot,

    /// Examine the last slot as a successor too.
    IncludeLastSlot,
}

impl LoadPlanner {
    /// Compare every slot against all its later neighbours.
    ///
    /// A successor priced at or above the source price plus the loss margin becomes
    /// [`LoadingLevel::UnloadBattery`], and a source with at least one such successor becomes
    /// [`LoadingLevel::LoadFromNet`]. Later sources overwrite earlier tags.
    #[instrument(skip_all, fields(n_points = series.len(), loss_margin = ?self.loss_margin))]
    pub fn determine_loading_levels(&self, series: &mut [PricePoint]) {
        let factor = 1.0 + self.loss_margin.to_proportion();
        let successor_end = match self.horizon {
            Horizon::ExcludeLastSlot => series.len().saturating_sub(1),
            Horizon::IncludeLastSlot => series.len(),
        };

        for source in 0..series.len().saturating_sub(1) {
            let threshold = series[source].price * factor;
            let mut found = false;
            for successor in series.iter_mut().take(successor_end).skip(source + 1) {
                if successor.price >= threshold {
                    successor.loading_level = LoadingLevel::UnloadBattery;
                    found = true;
                }
            }
            if found {
                series[source].loading_level = LoadingLevel::LoadFromNet;
            }
        }

        let count = |loading_level: LoadingLevel| {
            series.iter().filter(|point| point.loading_level == loading_level).count()
        };
        debug!(
            n_load = count(LoadingLevel::LoadFromNet),
            n_unload = count(LoadingLevel::UnloadBattery),
            "planned"
        );
    }
}

impl PricePoint {
    /// Copy the loading level of the first reference slot with the same price.
    ///
    /// Meant for the current price quote, which has no start time and is therefore left out
    /// of the planning.
    pub fn merge_loading_level(&mut self, reference: &[Self]) -> Option<LoadingLevel> {
        let matching = reference.iter().find(|slot| slot.price == self.price)?;
        self.loading_level = matching.loading_level;
        Some(self.loading_level)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{
        core::{price_level::PriceLevel, series::fixtures::hourly},
        quantity::price::KilowattHourPrice,
    };

    fn loading_levels(series: &[PricePoint]) -> Vec<LoadingLevel> {
        series.iter().map(|point| point.loading_level).collect_vec()
    }

    #[test]
    fn test_scenario_b_excluding_last_slot() {
        let mut series = hourly(&[0.10, 0.08, 0.15, 0.05, 0.20]);
        LoadPlanner::builder()
            .loss_margin(Percent(20.0))
            .build()
            .determine_loading_levels(&mut series);
        assert_eq!(
            loading_levels(&series),
            [
                LoadingLevel::LoadFromNet,
                LoadingLevel::LoadFromNet,
                LoadingLevel::UnloadBattery,
                LoadingLevel::Unknown,
                LoadingLevel::Unknown,
            ],
        );
    }

    #[test]
    fn test_scenario_b_including_last_slot() {
        let mut series = hourly(&[0.10, 0.08, 0.15, 0.05, 0.20]);
        LoadPlanner::builder()
            .loss_margin(Percent(20.0))
            .horizon(Horizon::IncludeLastSlot)
            .build()
            .determine_loading_levels(&mut series);
        // Slot 2 is first tagged for unloading by the sources 0 and 1,
        // and then overwritten as a source itself since the slot 4 recoups it:
        assert_eq!(
            loading_levels(&series),
            [
                LoadingLevel::LoadFromNet,
                LoadingLevel::LoadFromNet,
                LoadingLevel::LoadFromNet,
                LoadingLevel::LoadFromNet,
                LoadingLevel::UnloadBattery,
            ],
        );
    }

    #[test]
    fn test_equal_price_qualifies() {
        let planner =
            |horizon| LoadPlanner::builder().loss_margin(Percent::ZERO).horizon(horizon).build();

        let mut series = hourly(&[0.10, 0.10, 0.10]);
        planner(Horizon::ExcludeLastSlot).determine_loading_levels(&mut series);
        assert_eq!(
            loading_levels(&series),
            [LoadingLevel::LoadFromNet, LoadingLevel::UnloadBattery, LoadingLevel::Unknown],
        );

        let mut series = hourly(&[0.10, 0.10, 0.10]);
        planner(Horizon::IncludeLastSlot).determine_loading_levels(&mut series);
        assert_eq!(
            loading_levels(&series),
            [LoadingLevel::LoadFromNet, LoadingLevel::LoadFromNet, LoadingLevel::UnloadBattery],
        );
    }

    #[test]
    fn test_falling_prices_stay_unknown() {
        let mut series = hourly(&[0.40, 0.30, 0.20, 0.10]);
        LoadPlanner::builder()
            .loss_margin(Percent(20.0))
            .horizon(Horizon::IncludeLastSlot)
            .build()
            .determine_loading_levels(&mut series);
        assert!(series.iter().all(|point| point.loading_level == LoadingLevel::Unknown));
    }

    #[test]
    fn test_short_series() {
        let planner = LoadPlanner::builder().loss_margin(Percent(20.0)).build();
        let mut empty: Vec<PricePoint> = Vec::new();
        planner.determine_loading_levels(&mut empty);

        let mut single = hourly(&[0.10]);
        planner.determine_loading_levels(&mut single);
        assert_eq!(single[0].loading_level, LoadingLevel::Unknown);
    }

    #[test]
    fn test_merge_loading_level() {
        let mut reference = hourly(&[0.10, 0.08, 0.15, 0.05, 0.20]);
        LoadPlanner::builder()
            .loss_margin(Percent(20.0))
            .build()
            .determine_loading_levels(&mut reference);

        let mut current = PricePoint::new(PriceLevel::Cheap, None, KilowattHourPrice(0.15));
        assert_eq!(current.merge_loading_level(&reference), Some(LoadingLevel::UnloadBattery));
        assert_eq!(current.loading_level, LoadingLevel::UnloadBattery);

        let mut unmatched = PricePoint::new(PriceLevel::Cheap, None, KilowattHourPrice(0.42));
        assert_eq!(unmatched.merge_loading_level(&reference), None);
        assert_eq!(unmatched.loading_level, LoadingLevel::Unknown);
    }
}
