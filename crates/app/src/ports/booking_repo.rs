//! Booking repository port — persistence for bookings.

use std::future::Future;

use campushub_domain::booking::{Booking, BookingStatus};
use campushub_domain::error::CampusHubError;
use campushub_domain::id::{BookingId, FacilityId, UserId};
use chrono::NaiveDate;

/// Repository for persisting and querying [`Booking`]s.
///
/// `create` and `update` are not required to serialize the read-validate-write
/// sequence of the callers; the conflict check in the booking workflow is
/// advisory unless an adapter adds its own transactional guard.
pub trait BookingRepository {
    /// Persist a new booking.
    fn create(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, CampusHubError>> + Send;

    /// Persist changes to an existing booking.
    fn update(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, CampusHubError>> + Send;

    /// Get a booking by its unique identifier.
    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, CampusHubError>> + Send;

    /// Delete a booking by its unique identifier.
    fn delete(&self, id: BookingId) -> impl Future<Output = Result<(), CampusHubError>> + Send;

    /// Get the bookings on a facility and date whose status is in `statuses`.
    /// This is the conflict-detection query.
    fn get_by_facility_and_date(
        &self,
        facility: FacilityId,
        date: NaiveDate,
        statuses: &[BookingStatus],
    ) -> impl Future<Output = Result<Vec<Booking>, CampusHubError>> + Send;

    /// Get a user's bookings, newest first, optionally filtered by status.
    fn get_by_user(
        &self,
        user: UserId,
        status: Option<BookingStatus>,
    ) -> impl Future<Output = Result<Vec<Booking>, CampusHubError>> + Send;

    /// Get all bookings, newest first, optionally filtered by status and
    /// facility.
    fn get_all(
        &self,
        status: Option<BookingStatus>,
        facility: Option<FacilityId>,
    ) -> impl Future<Output = Result<Vec<Booking>, CampusHubError>> + Send;
}
