/// Failures of the price series analysis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Statistics or absolute extrema were requested on a zero-length series.
    #[error("the price series is empty")]
    EmptySeries,

    /// No interior slot is strictly lower or strictly higher than both of its neighbours.
    #[error("the price series has no interior relative extrema")]
    NoInteriorExtrema,
}
