//! Scheduling primitives — time slots and booking conflict detection.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::error::{CampusHubError, ConflictError, ValidationError};
use crate::id::BookingId;

/// A half-open interval `[start, end)` on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Construct a slot, enforcing `start < end`.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when the interval is empty or
    /// inverted.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, CampusHubError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange.into());
        }
        Ok(Self { date, start, end })
    }

    /// Half-open overlap test: `[a, b)` and `[c, d)` overlap iff
    /// `a < d && c < b`. Touching intervals do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }
}

/// Scan `existing` bookings for one whose slot overlaps `candidate`.
///
/// The caller is expected to pass bookings already restricted to the same
/// facility and date with an active status (`PENDING`/`APPROVED`). `exclude`
/// skips a booking being re-validated against itself during approval.
///
/// Returns the first clashing booking for diagnostic reporting, or `None`.
#[must_use]
pub fn find_conflict<'a>(
    candidate: &TimeSlot,
    existing: &'a [Booking],
    exclude: Option<BookingId>,
) -> Option<&'a Booking> {
    existing
        .iter()
        .filter(|booking| exclude != Some(booking.id))
        .find(|booking| booking.slot.overlaps(candidate))
}

/// Build the typed conflict error for a clashing booking.
#[must_use]
pub fn conflict_error(clash: &Booking) -> ConflictError {
    ConflictError {
        booking_id: clash.id,
        date: clash.slot.date,
        start: clash.slot.start,
        end: clash.slot.end,
        status: clash.status,
    }
}
