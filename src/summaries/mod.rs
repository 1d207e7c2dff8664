//! The aggregation and filtering engine.
//!
//! Every operation here is a pure function over an immutable slice of
//! [`RentalRecord`]s: it builds a fresh result and never mutates its input.
//! The date filter is the only prerequisite step; the aggregators are
//! independent of one another and of call order.

pub mod categorical;
pub mod error;
pub mod filter;
pub mod peak;
pub mod temporal;
pub mod types;

use crate::record::RentalRecord;
use error::SummaryError;

/// Fail-fast guard on the count-breakdown invariant. The loader rejects
/// malformed rows, so a hit here means unvalidated data reached the engine.
pub(crate) fn check_counts(record: &RentalRecord) -> Result<(), SummaryError> {
    if record.counts_consistent() {
        Ok(())
    } else {
        Err(SummaryError::MalformedRecord {
            date: record.date,
            total: record.total_count,
            casual: record.casual_count,
            registered: record.registered_count,
        })
    }
}
