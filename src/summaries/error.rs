use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the aggregation engine.
///
/// An empty filter result is not an error: every aggregator returns an empty
/// sequence for it so downstream rendering can show "no data".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// The requested range is inverted. The engine never clamps or swaps
    /// the bounds on the caller's behalf.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A record reached the engine with an inconsistent count breakdown.
    /// Validation belongs to the loader; the engine fails fast instead of
    /// compensating.
    #[error(
        "malformed record on {date}: total {total} != casual {casual} + registered {registered}"
    )]
    MalformedRecord {
        date: NaiveDate,
        total: u32,
        casual: u32,
        registered: u32,
    },
}
