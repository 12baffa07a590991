use chrono::{DateTime, FixedOffset};

use crate::{
    core::{
        analysis::Period,
        error::AnalysisError,
        loading_level::LoadingLevel,
        series::Series,
    },
    prelude::*,
};

impl Series {
    /// Slots starting strictly after `now`, keeping their order.
    ///
    /// Slots without a start time never belong to the future.
    pub fn filter_future(&self, now: DateTime<FixedOffset>) -> Self {
        self.iter()
            .filter(|point| point.starts_at.is_some_and(|starts_at| starts_at > now))
            .copied()
            .collect()
    }

    /// Stable sub-sequence of the slots with the loading level.
    pub fn filter_by_loading_level(&self, loading_level: LoadingLevel) -> Self {
        self.iter().filter(|point| point.loading_level == loading_level).copied().collect()
    }

    /// Remaining slots of today followed by the whole tomorrow, re-analysed as one period.
    ///
    /// The extrema of the individual days do not hold for the composed period, so they get
    /// cleared and detected anew. Loading levels are carried over from the daily passes.
    #[instrument(skip_all, fields(now = %now))]
    pub fn compose_future(
        today: &Self,
        tomorrow: &Self,
        now: DateTime<FixedOffset>,
    ) -> Result<Period, AnalysisError> {
        let mut future = today.filter_future(now);
        let n_today = future.len();
        future.extend(tomorrow.iter().copied());
        future.clear_extrema();
        debug!(n_today, n_tomorrow = tomorrow.len(), "composed");
        Period::try_summarize(future)
    }
}
