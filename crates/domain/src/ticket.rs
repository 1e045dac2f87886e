//! Ticket — a maintenance/incident report raised against a booking.
//!
//! Status moves are governed by one transition table
//! ([`TicketStatus::can_transition_to`]); `CLOSED` and `REJECTED` are
//! terminal.

use serde::{Deserialize, Serialize};

use crate::error::{CampusHubError, TransitionError, ValidationError};
use crate::id::{BookingId, FacilityId, TicketId, UserId};
use crate::time::Timestamp;
use crate::user::{Role, User};

/// Maximum number of evidence attachment URLs per ticket.
pub const MAX_ATTACHMENTS: usize = 3;

/// Issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    Electrical,
    Plumbing,
    Hvac,
    ItEquipment,
    Furniture,
    Structural,
    Cleaning,
    Safety,
    Other,
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Workflow status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Rejected,
}

impl TicketStatus {
    /// All statuses, used for table-exhaustiveness checks.
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
        Self::Rejected,
    ];

    /// The transition table:
    /// `OPEN→IN_PROGRESS`, `IN_PROGRESS→RESOLVED`, `RESOLVED→CLOSED`,
    /// `OPEN→REJECTED`.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::InProgress)
                | (Self::InProgress, Self::Resolved)
                | (Self::Resolved, Self::Closed)
                | (Self::Open, Self::Rejected)
        )
    }

    /// `CLOSED` and `REJECTED` admit no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Rejected)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Technician assignment recorded on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub technician_id: UserId,
    pub technician_name: String,
    pub assigned_by: UserId,
}

/// A maintenance or incident report.
///
/// Facility and requester display fields are snapshots copied from the
/// booking and user at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub booking_id: BookingId,
    pub facility_id: FacilityId,
    pub facility_name: String,
    /// Physical location; falls back to the facility name.
    pub location: String,
    pub requester_id: UserId,
    pub requester_name: String,
    pub requester_email: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub description: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    /// Evidence image URLs, at most [`MAX_ATTACHMENTS`].
    pub attachments: Vec<String>,
    pub status: TicketStatus,
    pub assignment: Option<Assignment>,
    pub rejection_reason: Option<String>,
    pub resolution_notes: Option<String>,
    pub created_at: Timestamp,
}

impl Ticket {
    /// Create a builder for constructing a [`Ticket`].
    #[must_use]
    pub fn builder() -> TicketBuilder {
        TicketBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when the description is empty
    /// or more than [`MAX_ATTACHMENTS`] attachments are present.
    pub fn validate(&self) -> Result<(), CampusHubError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        if self.attachments.len() > MAX_ATTACHMENTS {
            return Err(ValidationError::TooManyAttachments {
                limit: MAX_ATTACHMENTS,
                count: self.attachments.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Assign (or re-assign) a technician and move the ticket to
    /// `IN_PROGRESS`.
    ///
    /// Permitted from any non-terminal status, so a ticket already in
    /// progress can be handed to a different technician.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::InvalidTransition`] when the ticket is
    /// `CLOSED` or `REJECTED`, or [`CampusHubError::Validation`] when the
    /// target user does not hold the technician role.
    pub fn assign(&mut self, technician: &User, assigned_by: UserId) -> Result<(), CampusHubError> {
        if self.status.is_terminal() {
            return Err(TransitionError::Ticket {
                from: self.status,
                to: TicketStatus::InProgress,
            }
            .into());
        }
        if technician.role != Role::Technician {
            return Err(ValidationError::NotATechnician {
                name: technician.name.clone(),
            }
            .into());
        }
        self.assignment = Some(Assignment {
            technician_id: technician.id,
            technician_name: technician.name.clone(),
            assigned_by,
        });
        self.status = TicketStatus::InProgress;
        Ok(())
    }

    /// Move the ticket to `target`, strictly following the transition table.
    ///
    /// Notes are attached only when entering `RESOLVED`; entering `REJECTED`
    /// requires them as a non-blank reason.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::InvalidTransition`] for any pair not in the
    /// table, or [`CampusHubError::Validation`] when rejecting without a
    /// reason.
    pub fn transition_to(
        &mut self,
        target: TicketStatus,
        notes: Option<&str>,
    ) -> Result<(), CampusHubError> {
        if !self.status.can_transition_to(target) {
            return Err(TransitionError::Ticket {
                from: self.status,
                to: target,
            }
            .into());
        }
        match target {
            TicketStatus::Resolved => {
                if let Some(notes) = notes {
                    self.resolution_notes = Some(notes.to_owned());
                }
            }
            TicketStatus::Rejected => {
                let reason = notes.unwrap_or_default();
                if reason.trim().is_empty() {
                    return Err(ValidationError::MissingReason.into());
                }
                self.rejection_reason = Some(reason.to_owned());
            }
            _ => {}
        }
        self.status = target;
        Ok(())
    }

    /// Administratively reject the ticket with a mandatory reason.
    ///
    /// Unlike [`Ticket::transition_to`], rejection through this path is
    /// allowed from any non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::InvalidTransition`] when the ticket is
    /// already `CLOSED` or `REJECTED`, or [`CampusHubError::Validation`] when
    /// the reason is blank.
    pub fn reject(&mut self, reason: &str) -> Result<(), CampusHubError> {
        if self.status.is_terminal() {
            return Err(TransitionError::Ticket {
                from: self.status,
                to: TicketStatus::Rejected,
            }
            .into());
        }
        if reason.trim().is_empty() {
            return Err(ValidationError::MissingReason.into());
        }
        self.status = TicketStatus::Rejected;
        self.rejection_reason = Some(reason.to_owned());
        Ok(())
    }
}

/// Step-by-step builder for [`Ticket`].
#[derive(Debug, Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    booking_id: Option<BookingId>,
    facility_id: Option<FacilityId>,
    facility_name: Option<String>,
    location: Option<String>,
    requester_id: Option<UserId>,
    requester_name: Option<String>,
    requester_email: Option<String>,
    category: Option<TicketCategory>,
    priority: Option<TicketPriority>,
    description: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    attachments: Vec<String>,
}

impl TicketBuilder {
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn booking(mut self, id: BookingId) -> Self {
        self.booking_id = Some(id);
        self
    }

    /// Reference the facility together with its display-name snapshot.
    #[must_use]
    pub fn facility(mut self, id: FacilityId, name: impl Into<String>) -> Self {
        self.facility_id = Some(id);
        self.facility_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
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
    pub fn category(mut self, category: TicketCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    #[must_use]
    pub fn contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn attachments(mut self, urls: Vec<String>) -> Self {
        self.attachments = urls;
        self
    }

    /// Consume the builder, validate, and return an `OPEN` [`Ticket`].
    ///
    /// The contact email falls back to the requester email snapshot when not
    /// supplied.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when the description is empty
    /// or the attachment cap is exceeded.
    pub fn build(self) -> Result<Ticket, CampusHubError> {
        let facility_name = self.facility_name.unwrap_or_default();
        let requester_email = self.requester_email.unwrap_or_default();
        let ticket = Ticket {
            id: self.id.unwrap_or_default(),
            booking_id: self.booking_id.unwrap_or_default(),
            facility_id: self.facility_id.unwrap_or_default(),
            location: self.location.unwrap_or_else(|| facility_name.clone()),
            facility_name,
            requester_id: self.requester_id.unwrap_or_default(),
            requester_name: self.requester_name.unwrap_or_default(),
            contact_email: self
                .contact_email
                .unwrap_or_else(|| requester_email.clone()),
            requester_email,
            category: self.category.unwrap_or(TicketCategory::Other),
            priority: self.priority.unwrap_or(TicketPriority::Medium),
            description: self.description.unwrap_or_default(),
            contact_phone: self.contact_phone,
            attachments: self.attachments,
            status: TicketStatus::Open,
            assignment: None,
            rejection_reason: None,
            resolution_notes: None,
            created_at: crate::time::now(),
        };
        ticket.validate()?;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_ticket() -> Ticket {
        Ticket::builder()
            .booking(BookingId::new())
            .facility(FacilityId::new(), "Lab 3")
            .requester(UserId::new(), "Alice", "alice@campus.edu")
            .category(TicketCategory::ItEquipment)
            .priority(TicketPriority::High)
            .description("projector will not power on")
            .build()
            .unwrap()
    }

    fn technician() -> User {
        User::with_role("Tariq", "tariq@campus.edu", Role::Technician)
    }

    #[test]
    fn should_start_open_with_contact_email_defaulted() {
        let ticket = open_ticket();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.contact_email, "alice@campus.edu");
        assert_eq!(ticket.location, "Lab 3");
    }

    #[test]
    fn should_reject_empty_description() {
        let result = Ticket::builder()
            .booking(BookingId::new())
            .facility(FacilityId::new(), "Lab 3")
            .requester(UserId::new(), "Alice", "alice@campus.edu")
            .build();
        assert!(matches!(
            result,
            Err(CampusHubError::Validation(
                ValidationError::EmptyDescription
            ))
        ));
    }

    #[test]
    fn should_reject_more_than_three_attachments() {
        let urls: Vec<String> = (0..4).map(|i| format!("https://img/{i}.jpg")).collect();
        let result = Ticket::builder()
            .booking(BookingId::new())
            .facility(FacilityId::new(), "Lab 3")
            .requester(UserId::new(), "Alice", "alice@campus.edu")
            .description("broken chair")
            .attachments(urls)
            .build();
        assert!(matches!(
            result,
            Err(CampusHubError::Validation(
                ValidationError::TooManyAttachments { limit: 3, count: 4 }
            ))
        ));
    }

    #[test]
    fn should_only_allow_table_listed_transitions() {
        use TicketStatus::{Closed, InProgress, Open, Rejected, Resolved};
        let allowed = [
            (Open, InProgress),
            (InProgress, Resolved),
            (Resolved, Closed),
            (Open, Rejected),
        ];
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn should_move_to_in_progress_when_assigned() {
        let mut ticket = open_ticket();
        let tech = technician();
        let manager = UserId::new();
        ticket.assign(&tech, manager).unwrap();
        assert_eq!(ticket.status, TicketStatus::InProgress);
        let assignment = ticket.assignment.unwrap();
        assert_eq!(assignment.technician_id, tech.id);
        assert_eq!(assignment.assigned_by, manager);
    }

    #[test]
    fn should_allow_reassignment_while_in_progress() {
        let mut ticket = open_ticket();
        ticket.assign(&technician(), UserId::new()).unwrap();
        let second = technician();
        ticket.assign(&second, UserId::new()).unwrap();
        assert_eq!(
            ticket.assignment.unwrap().technician_id,
            second.id
        );
    }

    #[test]
    fn should_refuse_assignment_of_non_technician() {
        let mut ticket = open_ticket();
        let user = User::new("Bob", "bob@campus.edu");
        let result = ticket.assign(&user, UserId::new());
        assert!(matches!(
            result,
            Err(CampusHubError::Validation(
                ValidationError::NotATechnician { .. }
            ))
        ));
        assert_eq!(ticket.status, TicketStatus::Open);
    }

    #[test]
    fn should_refuse_assignment_on_terminal_ticket() {
        let mut ticket = open_ticket();
        ticket.reject("not our equipment").unwrap();
        let result = ticket.assign(&technician(), UserId::new());
        assert!(matches!(
            result,
            Err(CampusHubError::InvalidTransition(_))
        ));
    }

    #[test]
    fn should_record_notes_only_when_resolving() {
        let mut ticket = open_ticket();
        ticket.assign(&technician(), UserId::new()).unwrap();
        ticket
            .transition_to(TicketStatus::Resolved, Some("replaced the bulb"))
            .unwrap();
        assert_eq!(ticket.resolution_notes.as_deref(), Some("replaced the bulb"));
        ticket.transition_to(TicketStatus::Closed, None).unwrap();
        assert_eq!(ticket.status, TicketStatus::Closed);
    }

    #[test]
    fn should_fail_any_transition_out_of_terminal_status() {
        let mut ticket = open_ticket();
        ticket.assign(&technician(), UserId::new()).unwrap();
        ticket.transition_to(TicketStatus::Resolved, None).unwrap();
        ticket.transition_to(TicketStatus::Closed, None).unwrap();
        for target in TicketStatus::ALL {
            let result = ticket.transition_to(target, None);
            assert!(matches!(
                result,
                Err(CampusHubError::InvalidTransition(_))
            ));
        }
    }

    #[test]
    fn should_require_reason_when_rejecting_through_the_table() {
        let mut ticket = open_ticket();
        let result = ticket.transition_to(TicketStatus::Rejected, None);
        assert!(matches!(
            result,
            Err(CampusHubError::Validation(ValidationError::MissingReason))
        ));
        ticket
            .transition_to(TicketStatus::Rejected, Some("duplicate report"))
            .unwrap();
        assert_eq!(ticket.rejection_reason.as_deref(), Some("duplicate report"));
    }

    #[test]
    fn should_allow_administrative_reject_from_in_progress() {
        let mut ticket = open_ticket();
        ticket.assign(&technician(), UserId::new()).unwrap();
        ticket.reject("vendor recall, no repair possible").unwrap();
        assert_eq!(ticket.status, TicketStatus::Rejected);
    }
}
