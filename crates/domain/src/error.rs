//! Common error types used across the workspace.
//!
//! Each failure class is a typed sub-error; [`CampusHubError`] wraps them via
//! `#[from]` so domain code and services can use `?` freely. No `String`-only
//! variants: diagnostic context travels as structured fields.

use chrono::{NaiveDate, NaiveTime};

use crate::booking::BookingStatus;
use crate::id::BookingId;
use crate::ticket::TicketStatus;

/// Top-level error for all domain and workflow failures.
#[derive(Debug, thiserror::Error)]
pub enum CampusHubError {
    /// Malformed or unacceptable input (inverted interval, inactive
    /// facility, missing reason, wrong target role, …).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An overlapping booking blocks the requested slot.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The requested status transition is not permitted.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// The caller lacks the ownership or role the operation requires.
    #[error(transparent)]
    Forbidden(#[from] ForbiddenError),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Input rejected by the workflow layer.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("comment content must not be empty")]
    EmptyContent,

    #[error("start time must be before end time")]
    InvalidTimeRange,

    #[error("facility is currently out of service and cannot be booked")]
    FacilityOutOfService,

    #[error("a rejection reason is required")]
    MissingReason,

    #[error("user {name} does not hold the technician role")]
    NotATechnician { name: String },

    #[error("a ticket may carry at most {limit} evidence attachments, got {count}")]
    TooManyAttachments { limit: usize, count: usize },
}

/// A referenced entity could not be found.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// An existing active booking overlaps the requested slot.
///
/// Carries the clashing booking's identity, interval, and status so the
/// request layer can surface a useful diagnostic.
#[derive(Debug, thiserror::Error)]
#[error(
    "facility is already booked from {start} to {end} on {date} \
     (booking {booking_id}, status {status})"
)]
pub struct ConflictError {
    pub booking_id: BookingId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: BookingStatus,
}

/// The entity's current status does not allow the requested transition.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("booking cannot move from {from} to {to}")]
    Booking {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("ticket cannot move from {from} to {to}")]
    Ticket {
        from: TicketStatus,
        to: TicketStatus,
    },
}

/// The caller is not allowed to perform the operation.
#[derive(Debug, thiserror::Error)]
pub enum ForbiddenError {
    #[error("{action} is only permitted for the owner")]
    NotOwner { action: &'static str },

    #[error("{action} is only permitted for the owner or an administrator")]
    NotOwnerOrAdmin { action: &'static str },

    #[error("{action} requires the {required} role")]
    MissingRole {
        action: &'static str,
        required: &'static str,
    },
}

/// Failure reported by a storage adapter behind one of the port traits.
#[derive(Debug, thiserror::Error)]
#[error("storage backend failure: {message}")]
pub struct StorageError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Booking",
            id: "b-123".into(),
        };
        assert_eq!(err.to_string(), "Booking with id b-123 not found");
    }

    #[test]
    fn should_render_conflict_with_interval_and_status() {
        let err = ConflictError {
            booking_id: BookingId::new(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: BookingStatus::Approved,
        };
        let text = err.to_string();
        assert!(text.contains("09:00"));
        assert!(text.contains("APPROVED"));
    }

    #[test]
    fn should_convert_sub_errors_into_top_level_error() {
        let err: CampusHubError = ValidationError::MissingReason.into();
        assert!(matches!(
            err,
            CampusHubError::Validation(ValidationError::MissingReason)
        ));
    }
}
