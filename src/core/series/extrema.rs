use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    core::{
        error::AnalysisError,
        extrema_type::ExtremaType,
        point::PricePoint,
        series::Series,
    },
    prelude::*,
    quantity::price::KilowattHourPrice,
};

/// Extrema detection.
///
/// Every detector tags the winning slots in place and returns snapshots of them.
impl Series {
    /// Cheapest slot, the leftmost one on ties.
    pub fn absolute_minimum(&mut self) -> Result<PricePoint, AnalysisError> {
        let index = self
            .best_position(0..self.len(), |candidate, best| candidate < best)
            .ok_or(AnalysisError::EmptySeries)?;
        self[index].extrema_type = ExtremaType::Min;
        Ok(self[index])
    }

    /// Most expensive slot, the leftmost one on ties.
    pub fn absolute_maximum(&mut self) -> Result<PricePoint, AnalysisError> {
        let index = self
            .best_position(0..self.len(), |candidate, best| candidate > best)
            .ok_or(AnalysisError::EmptySeries)?;
        self[index].extrema_type = ExtremaType::Max;
        Ok(self[index])
    }

    /// Tag both absolute extrema and return their positions as `(minimum, maximum)`.
    ///
    /// The absolute tags take precedence: any other slot still tagged [`ExtremaType::Min`] or
    /// [`ExtremaType::Max`], like a promoted relative extremum, falls back to its relative tag.
    /// A single slot ends up as the minimum.
    pub fn mark_extrema(&mut self) -> Result<(usize, usize), AnalysisError> {
        let minimum = self
            .best_position(0..self.len(), |candidate, best| candidate < best)
            .ok_or(AnalysisError::EmptySeries)?;
        let maximum = self
            .best_position(0..self.len(), |candidate, best| candidate > best)
            .ok_or(AnalysisError::EmptySeries)?;
        for (index, point) in self.iter_mut().enumerate() {
            point.extrema_type = match point.extrema_type {
                ExtremaType::Min if index != minimum => ExtremaType::RelMin,
                ExtremaType::Max if index != maximum => ExtremaType::RelMax,
                extrema_type => extrema_type,
            };
        }
        self[maximum].extrema_type = ExtremaType::Max;
        self[minimum].extrema_type = ExtremaType::Min;
        Ok((minimum, maximum))
    }

    pub fn relative_minima(&mut self) -> Vec<PricePoint> {
        let positions = self.interior_positions(|candidate, neighbour| candidate < neighbour);
        self.tag(&positions, ExtremaType::RelMin);
        positions.into_iter().map(|index| self[index]).collect()
    }

    pub fn relative_maxima(&mut self) -> Vec<PricePoint> {
        let positions = self.interior_positions(|candidate, neighbour| candidate > neighbour);
        self.tag(&positions, ExtremaType::RelMax);
        positions.into_iter().map(|index| self[index]).collect()
    }

    /// Relative minima and maxima sorted by the start time.
    ///
    /// The cheapest relative minimum is promoted to [`ExtremaType::Min`] and the most expensive
    /// relative maximum to [`ExtremaType::Max`], regardless of the absolute extrema
    /// of the series.
    #[instrument(skip_all, fields(n_points = self.len()))]
    pub fn relative_extrema(&mut self) -> Result<Vec<PricePoint>, AnalysisError> {
        let minima = self.interior_positions(|candidate, neighbour| candidate < neighbour);
        let maxima = self.interior_positions(|candidate, neighbour| candidate > neighbour);
        let lowest = self
            .best_position(minima.iter().copied(), |candidate, best| candidate < best)
            .ok_or(AnalysisError::NoInteriorExtrema)?;
        let highest = self
            .best_position(maxima.iter().copied(), |candidate, best| candidate > best)
            .ok_or(AnalysisError::NoInteriorExtrema)?;

        self.tag(&minima, ExtremaType::RelMin);
        self[lowest].extrema_type = ExtremaType::Min;
        self.tag(&maxima, ExtremaType::RelMax);
        self[highest].extrema_type = ExtremaType::Max;
        debug!(n_minima = minima.len(), n_maxima = maxima.len(), "tagged");

        Ok(minima
            .into_iter()
            .chain(maxima)
            .map(|index| self[index])
            .sorted_by_key(|point| point.starts_at)
            .collect())
    }

    /// Reset the extrema annotations, for example after composing a new period.
    pub fn clear_extrema(&mut self) {
        for point in self.iter_mut() {
            point.extrema_type = ExtremaType::None;
        }
    }

    /// Stable sub-sequence of the slots tagged with any of the types.
    pub fn filter_by_extrema(&self, types: EnumSet<ExtremaType>) -> Self {
        self.iter().filter(|point| types.contains(point.extrema_type)).copied().collect()
    }

    /// Index of the best slot among the positions; the first one wins on ties.
    fn best_position(
        &self,
        positions: impl IntoIterator<Item = usize>,
        is_better: impl Fn(KilowattHourPrice, KilowattHourPrice) -> bool,
    ) -> Option<usize> {
        positions.into_iter().fold(None, |best, index| match best {
            Some(best) if !is_better(self[index].price, self[best].price) => Some(best),
            _ => Some(index),
        })
    }

    /// Interior slots which beat both immediate neighbours.
    fn interior_positions(
        &self,
        beats: impl Fn(KilowattHourPrice, KilowattHourPrice) -> bool,
    ) -> Vec<usize> {
        self.iter()
            .tuple_windows()
            .positions(|(left, middle, right)| {
                beats(middle.price, left.price) && beats(middle.price, right.price)
            })
            .map(|index| index + 1)
            .collect()
    }

    fn tag(&mut self, positions: &[usize], extrema_type: ExtremaType) {
        for &index in positions {
            self[index].extrema_type = extrema_type;
        }
    }
}
