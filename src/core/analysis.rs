use chrono::{DateTime, FixedOffset};
use enumset::EnumSet;

use crate::{
    core::{
        error::AnalysisError,
        extrema_type::ExtremaType,
        loading_level::LoadingLevel,
        planner::LoadPlanner,
        point::PricePoint,
        series::Series,
        statistics::Statistics,
    },
    prelude::*,
};

/// Price quotes of one feed snapshot, already converted.
#[derive(Clone, Debug, Default)]
pub struct Quotes {
    /// Current price, without a start time.
    pub current: Option<PricePoint>,

    pub today: Series,

    /// Empty until the next day prices get published.
    pub tomorrow: Series,
}

/// Analysed series together with its statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Period {
    pub series: Series,
    pub statistics: Statistics,
}

impl Period {
    /// Detect the extrema and compute the statistics.
    ///
    /// A series without interior extrema still gets its absolute extrema tagged.
    pub fn try_summarize(mut series: Series) -> Result<Self, AnalysisError> {
        match series.relative_extrema() {
            Ok(extrema) => debug!(n_extrema = extrema.len(), "found relative extrema"),
            Err(AnalysisError::NoInteriorExtrema) => debug!("no relative extrema"),
            Err(error) => return Err(error),
        }
        let statistics = Statistics::try_compute(&mut series)?;
        Ok(Self { series, statistics })
    }

    /// Slots tagged with any extrema type.
    pub fn extrema(&self) -> Series {
        self.series.filter_by_extrema(EnumSet::all() - ExtremaType::None)
    }

    pub fn load_from_net(&self) -> Series {
        self.series.filter_by_loading_level(LoadingLevel::LoadFromNet)
    }

    pub fn unload_battery(&self) -> Series {
        self.series.filter_by_loading_level(LoadingLevel::UnloadBattery)
    }
}

/// Complete analysis of a feed snapshot.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// Current price quote with the loading level of the matching slot of today.
    pub current: Option<PricePoint>,

    pub today: Period,
    pub tomorrow: Option<Period>,

    /// Remaining slots of today and the whole tomorrow, `None` when nothing is left.
    pub future: Option<Period>,
}

#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Analyzer {
    planner: LoadPlanner,

    /// Reference time for the future period.
    now: DateTime<FixedOffset>,
}

impl Analyzer {
    #[instrument(skip_all, fields(now = %self.now))]
    pub fn analyze(&self, quotes: Quotes) -> Result<Analysis, AnalysisError> {
        let today = self.analyze_day(quotes.today)?;
        let tomorrow = if quotes.tomorrow.is_empty() {
            info!("tomorrow prices are not published yet");
            None
        } else {
            Some(self.analyze_day(quotes.tomorrow)?)
        };

        let future = {
            let tomorrow_series =
                tomorrow.as_ref().map(|period| period.series.clone()).unwrap_or_default();
            match Series::compose_future(&today.series, &tomorrow_series, self.now) {
                Ok(period) => Some(period),
                Err(AnalysisError::EmptySeries) => {
                    warn!("no future slots left");
                    None
                }
                Err(error) => return Err(error),
            }
        };

        let current = quotes.current.map(|mut current| {
            if current.merge_loading_level(&today.series).is_none() {
                warn!(price = %current.price, "current price does not match any slot of today");
            }
            current
        });

        info!(
            n_today = today.series.len(),
            n_tomorrow = tomorrow.as_ref().map_or(0, |period| period.series.len()),
            n_future = future.as_ref().map_or(0, |period| period.series.len()),
            "analysed"
        );
        Ok(Analysis { current, today, tomorrow, future })
    }

    #[instrument(skip_all, fields(n_points = series.len()))]
    fn analyze_day(&self, mut series: Series) -> Result<Period, AnalysisError> {
        self.planner.determine_loading_levels(&mut series);
        Period::try_summarize(series)
    }
}
