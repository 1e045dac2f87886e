//! Booking — a reservation request for a facility over a date/time slot.
//!
//! All legal status moves live in one transition table
//! ([`BookingStatus::can_transition_to`]); the workflow methods consult the
//! table instead of re-encoding it per method.

use serde::{Deserialize, Serialize};

use crate::error::{CampusHubError, ForbiddenError, TransitionError, ValidationError};
use crate::id::{BookingId, FacilityId, UserId};
use crate::schedule::TimeSlot;
use crate::time::Timestamp;

/// Workflow status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// All statuses, used for table-exhaustiveness checks.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Approved, Self::Rejected, Self::Cancelled];

    /// The transition table. `PENDING` may be approved, rejected, or
    /// cancelled; `APPROVED` may still be cancelled by its owner.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Pending, Self::Cancelled)
                | (Self::Approved, Self::Cancelled)
        )
    }

    /// `REJECTED` and `CANCELLED` admit no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Whether a booking in this status occupies its slot for conflict
    /// detection purposes.
    #[must_use]
    pub fn holds_slot(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative review metadata recorded on approval or rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub reviewed_by: UserId,
    pub remarks: Option<String>,
    pub reviewed_at: Timestamp,
}

/// A reservation request.
///
/// Requester and facility display fields are snapshots taken at creation
/// time; later profile or facility edits do not propagate to historical
/// bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub facility_id: FacilityId,
    pub facility_name: String,
    pub requester_id: UserId,
    pub requester_name: String,
    pub requester_email: String,
    pub slot: TimeSlot,
    pub purpose: String,
    pub expected_attendees: Option<u32>,
    pub status: BookingStatus,
    pub review: Option<Review>,
    pub created_at: Timestamp,
}

impl Booking {
    /// Create a builder for constructing a [`Booking`].
    #[must_use]
    pub fn builder() -> BookingBuilder {
        BookingBuilder::default()
    }

    fn ensure_transition(&self, target: BookingStatus) -> Result<(), TransitionError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(TransitionError::Booking {
                from: self.status,
                to: target,
            })
        }
    }

    /// Approve a pending booking, recording the reviewer and optional
    /// remarks.
    ///
    /// The conflict re-check against other bookings happens in the workflow
    /// service; this method only guards the status move.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::InvalidTransition`] unless the booking is
    /// `PENDING`.
    pub fn approve(
        &mut self,
        reviewer: UserId,
        remarks: Option<String>,
        at: Timestamp,
    ) -> Result<(), CampusHubError> {
        self.ensure_transition(BookingStatus::Approved)?;
        self.status = BookingStatus::Approved;
        self.review = Some(Review {
            reviewed_by: reviewer,
            remarks,
            reviewed_at: at,
        });
        Ok(())
    }

    /// Reject a pending booking with a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::InvalidTransition`] unless the booking is
    /// `PENDING`, or [`CampusHubError::Validation`] when the reason is blank.
    pub fn reject(
        &mut self,
        reviewer: UserId,
        reason: &str,
        at: Timestamp,
    ) -> Result<(), CampusHubError> {
        self.ensure_transition(BookingStatus::Rejected)?;
        if reason.trim().is_empty() {
            return Err(ValidationError::MissingReason.into());
        }
        self.status = BookingStatus::Rejected;
        self.review = Some(Review {
            reviewed_by: reviewer,
            remarks: Some(reason.to_owned()),
            reviewed_at: at,
        });
        Ok(())
    }

    /// Cancel the booking on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] when `caller` is not the
    /// requester, or [`CampusHubError::InvalidTransition`] unless the booking
    /// is `PENDING` or `APPROVED`.
    pub fn cancel(&mut self, caller: UserId) -> Result<(), CampusHubError> {
        if self.requester_id != caller {
            return Err(ForbiddenError::NotOwner {
                action: "cancelling a booking",
            }
            .into());
        }
        self.ensure_transition(BookingStatus::Cancelled)?;
        self.status = BookingStatus::Cancelled;
        Ok(())
    }
}

/// Step-by-step builder for [`Booking`].
#[derive(Debug, Default)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    facility_id: Option<FacilityId>,
    facility_name: Option<String>,
    requester_id: Option<UserId>,
    requester_name: Option<String>,
    requester_email: Option<String>,
    slot: Option<TimeSlot>,
    purpose: Option<String>,
    expected_attendees: Option<u32>,
}

impl BookingBuilder {
    #[must_use]
    pub fn id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    /// Reference the facility together with its display-name snapshot.
    #[must_use]
    pub fn facility(mut self, id: FacilityId, name: impl Into<String>) -> Self {
        self.facility_id = Some(id);
        self.facility_name = Some(name.into());
        self
    }

    /// Reference the requester together with name/email snapshots.
    #[must_use]
    pub fn requester(
        mut self,
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.requester_id = Some(id);
        self.requester_name = Some(name.into());
        self.requester_email = Some(email.into());
        self
    }

    #[must_use]
    pub fn slot(mut self, slot: TimeSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    #[must_use]
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    #[must_use]
    pub fn expected_attendees(mut self, count: u32) -> Self {
        self.expected_attendees = Some(count);
        self
    }

    /// Consume the builder and return a `PENDING` [`Booking`].
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when no slot was provided
    /// (slot ordering itself is enforced by [`TimeSlot::new`]).
    pub fn build(self) -> Result<Booking, CampusHubError> {
        let slot = self.slot.ok_or(ValidationError::InvalidTimeRange)?;
        Ok(Booking {
            id: self.id.unwrap_or_default(),
            facility_id: self.facility_id.unwrap_or_default(),
            facility_name: self.facility_name.unwrap_or_default(),
            requester_id: self.requester_id.unwrap_or_default(),
            requester_name: self.requester_name.unwrap_or_default(),
            requester_email: self.requester_email.unwrap_or_default(),
            slot,
            purpose: self.purpose.unwrap_or_default(),
            expected_attendees: self.expected_attendees,
            status: BookingStatus::Pending,
            review: None,
            created_at: crate::time::now(),
        })
    }
}
