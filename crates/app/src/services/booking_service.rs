//! Booking service — the reservation workflow.
//!
//! Creation runs conflict detection against same-facility/same-date bookings
//! that still hold their slot; approval re-runs it (excluding the booking's
//! own id) because another booking may have been approved since creation.
//!
//! The conflict check is advisory under concurrent creates: two racing calls
//! can each read, find no clash, and both persist as `PENDING`. The approval
//! re-check closes that window before a slot is confirmed twice; an adapter
//! that needs a hard guarantee must serialize at the store boundary.

use campushub_domain::booking::{Booking, BookingStatus};
use campushub_domain::error::{CampusHubError, NotFoundError, TransitionError, ValidationError};
use campushub_domain::id::{BookingId, FacilityId};
use campushub_domain::schedule::{self, TimeSlot};
use campushub_domain::user::Actor;
use chrono::{NaiveDate, NaiveTime};

use crate::ports::{BookingRepository, FacilityRepository, UserRepository};

/// Statuses that occupy a slot for conflict detection.
const SLOT_HOLDERS: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Approved];

/// Payload for creating a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub facility_id: FacilityId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub purpose: String,
    pub expected_attendees: Option<u32>,
}

/// Workflow service for the booking lifecycle.
pub struct BookingService<B, F, U> {
    bookings: B,
    facilities: F,
    users: U,
}

impl<B, F, U> BookingService<B, F, U>
where
    B: BookingRepository,
    F: FacilityRepository,
    U: UserRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(bookings: B, facilities: F, users: U) -> Self {
        Self {
            bookings,
            facilities,
            users,
        }
    }

    /// Create a booking request in `PENDING` status.
    ///
    /// The facility must exist and be `ACTIVE`, the slot must be well formed,
    /// and no `PENDING`/`APPROVED` booking on the same facility and date may
    /// overlap it. Requester display fields are snapshotted from the user
    /// directory at creation time.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] for a missing facility or user,
    /// [`CampusHubError::Validation`] for an inactive facility or inverted
    /// slot, [`CampusHubError::Conflict`] naming the clashing booking, or a
    /// storage error from the repositories.
    #[tracing::instrument(skip(self, request), fields(facility = %request.facility_id))]
    pub async fn create_booking(
        &self,
        actor: &Actor,
        request: NewBooking,
    ) -> Result<Booking, CampusHubError> {
        let facility = self
            .facilities
            .get_by_id(request.facility_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Facility",
                id: request.facility_id.to_string(),
            })?;
        if !facility.is_bookable() {
            return Err(ValidationError::FacilityOutOfService.into());
        }

        let slot = TimeSlot::new(request.date, request.start, request.end)?;
        self.ensure_slot_free(facility.id, &slot, None).await?;

        let requester = self
            .users
            .get_by_id(actor.id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "User",
                id: actor.id.to_string(),
            })?;

        let mut builder = Booking::builder()
            .facility(facility.id, facility.name.clone())
            .requester(requester.id, requester.name, requester.email)
            .slot(slot)
            .purpose(request.purpose);
        if let Some(count) = request.expected_attendees {
            builder = builder.expected_attendees(count);
        }
        let booking = builder.build()?;

        let saved = self.bookings.create(booking).await?;
        tracing::info!(
            booking = %saved.id,
            facility = %facility.name,
            date = %saved.slot.date,
            "booking created"
        );
        Ok(saved)
    }

    /// Look up a booking by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] when no booking with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, CampusHubError> {
        self.bookings.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Booking",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the caller's own bookings, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_user_bookings(
        &self,
        actor: &Actor,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, CampusHubError> {
        self.bookings.get_by_user(actor.id, status).await
    }

    /// List all bookings (ADMIN), optionally filtered by status and facility.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for non-administrators, or a
    /// storage error from the repository.
    pub async fn list_all_bookings(
        &self,
        actor: &Actor,
        status: Option<BookingStatus>,
        facility: Option<FacilityId>,
    ) -> Result<Vec<Booking>, CampusHubError> {
        actor.require_admin("listing all bookings")?;
        self.bookings.get_all(status, facility).await
    }

    /// Approve a pending booking (ADMIN), re-checking for conflicts first.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for non-administrators,
    /// [`CampusHubError::InvalidTransition`] unless the booking is `PENDING`,
    /// or [`CampusHubError::Conflict`] when a booking approved in the interim
    /// overlaps this one.
    #[tracing::instrument(skip(self, remarks))]
    pub async fn approve_booking(
        &self,
        actor: &Actor,
        id: BookingId,
        remarks: Option<String>,
    ) -> Result<Booking, CampusHubError> {
        actor.require_admin("approving a booking")?;
        let mut booking = self.get_booking(id).await?;

        if !booking.status.can_transition_to(BookingStatus::Approved) {
            return Err(TransitionError::Booking {
                from: booking.status,
                to: BookingStatus::Approved,
            }
            .into());
        }
        self.ensure_slot_free(booking.facility_id, &booking.slot, Some(booking.id))
            .await?;

        booking.approve(actor.id, remarks, campushub_domain::time::now())?;
        let saved = self.bookings.update(booking).await?;
        tracing::info!(booking = %id, admin = %actor.id, "booking approved");
        Ok(saved)
    }

    /// Reject a pending booking (ADMIN) with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for non-administrators,
    /// [`CampusHubError::InvalidTransition`] unless the booking is `PENDING`,
    /// or [`CampusHubError::Validation`] when the reason is blank.
    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_booking(
        &self,
        actor: &Actor,
        id: BookingId,
        reason: &str,
    ) -> Result<Booking, CampusHubError> {
        actor.require_admin("rejecting a booking")?;
        let mut booking = self.get_booking(id).await?;
        booking.reject(actor.id, reason, campushub_domain::time::now())?;
        let saved = self.bookings.update(booking).await?;
        tracing::info!(booking = %id, admin = %actor.id, "booking rejected");
        Ok(saved)
    }

    /// Cancel a booking on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] when the caller is not the
    /// requester, or [`CampusHubError::InvalidTransition`] unless the booking
    /// is `PENDING` or `APPROVED`.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(
        &self,
        actor: &Actor,
        id: BookingId,
    ) -> Result<Booking, CampusHubError> {
        let mut booking = self.get_booking(id).await?;
        booking.cancel(actor.id)?;
        let saved = self.bookings.update(booking).await?;
        tracing::info!(booking = %id, user = %actor.id, "booking cancelled");
        Ok(saved)
    }

    /// Delete a booking (ADMIN), regardless of its status.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for non-administrators or
    /// [`CampusHubError::NotFound`] when the booking does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_booking(&self, actor: &Actor, id: BookingId) -> Result<(), CampusHubError> {
        actor.require_admin("deleting a booking")?;
        let booking = self.get_booking(id).await?;
        self.bookings.delete(booking.id).await?;
        tracing::info!(booking = %id, "booking deleted");
        Ok(())
    }

    async fn ensure_slot_free(
        &self,
        facility: FacilityId,
        slot: &TimeSlot,
        exclude: Option<BookingId>,
    ) -> Result<(), CampusHubError> {
        let existing = self
            .bookings
            .get_by_facility_and_date(facility, slot.date, &SLOT_HOLDERS)
            .await?;
        if let Some(clash) = schedule::find_conflict(slot, &existing, exclude) {
            return Err(schedule::conflict_error(clash).into());
        }
        Ok(())
    }
}
