//! Freshness window calculations.
//!
//! A persisted reply is served only while it is younger than the freshness window. These
//! helpers take `now` as an argument so the boundary can be tested without a clock.

use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDateTime};

use crate::server::error::Error;

/// Oldest `retrieved_at` that still counts as fresh.
///
/// # Arguments
/// - `now` - Current UTC timestamp
/// - `window` - Freshness window
///
/// # Returns
/// - `Ok(NaiveDateTime)` - `now - window`
/// - `Err(Error::ParseError)` - The window does not fit a chrono duration or underflows the calendar
pub fn freshness_cutoff(now: NaiveDateTime, window: StdDuration) -> Result<NaiveDateTime, Error> {
    let window = Duration::from_std(window).map_err(|e| {
        Error::ParseError(format!(
            "Freshness window {:?} is out of range: {}",
            window, e
        ))
    })?;

    now.checked_sub_signed(window).ok_or_else(|| {
        Error::ParseError(format!(
            "Failed to calculate freshness cutoff for {} minus {}",
            now, window
        ))
    })
}

/// Whether a reply retrieved at `retrieved_at` is still inside the window at `now`.
///
/// A reply retrieved exactly `window` ago is stale.
pub fn is_fresh(
    retrieved_at: NaiveDateTime,
    window: StdDuration,
    now: NaiveDateTime,
) -> Result<bool, Error> {
    Ok(retrieved_at > freshness_cutoff(now, window)?)
}

/// Time left before a reply retrieved at `retrieved_at` leaves the window, zero once stale.
pub fn remaining_freshness(
    retrieved_at: NaiveDateTime,
    window: StdDuration,
    now: NaiveDateTime,
) -> StdDuration {
    let age = (now - retrieved_at).to_std().unwrap_or(StdDuration::ZERO);

    window.saturating_sub(age)
}
