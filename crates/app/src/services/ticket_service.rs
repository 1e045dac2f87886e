//! Ticket service — the maintenance/incident workflow, including comments.
//!
//! Tickets are raised against the caller's own bookings. Assignment and
//! status updates follow the transition table on
//! [`TicketStatus`](campushub_domain::ticket::TicketStatus); deleting a
//! ticket cascades over its comments as two sequential idempotent steps (no
//! multi-entity transaction is assumed of the store).

use campushub_domain::comment::TicketComment;
use campushub_domain::error::{CampusHubError, ForbiddenError, NotFoundError};
use campushub_domain::id::{BookingId, CommentId, TicketId, UserId};
use campushub_domain::ticket::{Ticket, TicketCategory, TicketPriority, TicketStatus};
use campushub_domain::user::{Actor, Role};

use crate::ports::{BookingRepository, CommentRepository, TicketRepository, UserRepository};

/// Payload for creating a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub booking_id: BookingId,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub description: String,
    /// Defaults to the requester's email when absent.
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// Evidence image URLs, at most
    /// [`MAX_ATTACHMENTS`](campushub_domain::ticket::MAX_ATTACHMENTS).
    pub attachments: Vec<String>,
}

/// Workflow service for the ticket lifecycle and its comments.
pub struct TicketService<T, C, B, U> {
    tickets: T,
    comments: C,
    bookings: B,
    users: U,
}

impl<T, C, B, U> TicketService<T, C, B, U>
where
    T: TicketRepository,
    C: CommentRepository,
    B: BookingRepository,
    U: UserRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(tickets: T, comments: C, bookings: B, users: U) -> Self {
        Self {
            tickets,
            comments,
            bookings,
            users,
        }
    }

    /// Raise a ticket against one of the caller's own bookings.
    ///
    /// Facility and requester display data are copied from the booking and
    /// the user directory at creation time.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] for a missing booking or user,
    /// [`CampusHubError::Forbidden`] when the booking belongs to someone
    /// else, or [`CampusHubError::Validation`] for an empty description or
    /// too many attachments.
    #[tracing::instrument(skip(self, request), fields(booking = %request.booking_id))]
    pub async fn create_ticket(
        &self,
        actor: &Actor,
        request: NewTicket,
    ) -> Result<Ticket, CampusHubError> {
        let booking = self
            .bookings
            .get_by_id(request.booking_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Booking",
                id: request.booking_id.to_string(),
            })?;
        if booking.requester_id != actor.id {
            return Err(ForbiddenError::NotOwner {
                action: "raising a ticket against a booking",
            }
            .into());
        }

        let requester = self.get_user(actor.id).await?;

        let mut builder = Ticket::builder()
            .booking(booking.id)
            .facility(booking.facility_id, booking.facility_name.clone())
            .requester(requester.id, requester.name, requester.email)
            .category(request.category)
            .priority(request.priority)
            .description(request.description)
            .attachments(request.attachments);
        if let Some(email) = request.contact_email {
            builder = builder.contact_email(email);
        }
        if let Some(phone) = request.contact_phone {
            builder = builder.contact_phone(phone);
        }
        let ticket = builder.build()?;

        let saved = self.tickets.create(ticket).await?;
        tracing::info!(
            ticket = %saved.id,
            user = %actor.id,
            facility = %booking.facility_name,
            "ticket created"
        );
        Ok(saved)
    }

    /// Look up a ticket by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] when no ticket with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_ticket(&self, id: TicketId) -> Result<Ticket, CampusHubError> {
        self.tickets.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Ticket",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the caller's own tickets, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_user_tickets(&self, actor: &Actor) -> Result<Vec<Ticket>, CampusHubError> {
        self.tickets.get_by_user(actor.id).await
    }

    /// List the tickets assigned to the calling technician.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] unless the caller holds the
    /// technician role.
    pub async fn list_technician_tickets(
        &self,
        actor: &Actor,
    ) -> Result<Vec<Ticket>, CampusHubError> {
        if actor.role != Role::Technician {
            return Err(ForbiddenError::MissingRole {
                action: "listing an assignment queue",
                required: "TECHNICIAN",
            }
            .into());
        }
        self.tickets.get_by_technician(actor.id).await
    }

    /// List all tickets (ADMIN or MANAGER), optionally filtered by status
    /// and priority.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for callers without a
    /// management role.
    pub async fn list_all_tickets(
        &self,
        actor: &Actor,
        status: Option<TicketStatus>,
        priority: Option<TicketPriority>,
    ) -> Result<Vec<Ticket>, CampusHubError> {
        if !actor.role.can_manage_tickets() {
            return Err(ForbiddenError::MissingRole {
                action: "listing all tickets",
                required: "ADMIN or MANAGER",
            }
            .into());
        }
        self.tickets.get_all(status, priority).await
    }

    /// List the users eligible for assignment (ADMIN or MANAGER).
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for callers without a
    /// management role.
    pub async fn list_technicians(
        &self,
        actor: &Actor,
    ) -> Result<Vec<campushub_domain::user::User>, CampusHubError> {
        if !actor.role.can_manage_tickets() {
            return Err(ForbiddenError::MissingRole {
                action: "listing technicians",
                required: "ADMIN or MANAGER",
            }
            .into());
        }
        self.users.get_by_role(Role::Technician).await
    }

    /// Assign (or re-assign) a technician (ADMIN or MANAGER) and move the
    /// ticket to `IN_PROGRESS`.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for callers without a
    /// management role, [`CampusHubError::NotFound`] for a missing ticket or
    /// technician, [`CampusHubError::InvalidTransition`] when the ticket is
    /// terminal, or [`CampusHubError::Validation`] when the target user is
    /// not a technician.
    #[tracing::instrument(skip(self))]
    pub async fn assign_technician(
        &self,
        actor: &Actor,
        id: TicketId,
        technician_id: UserId,
    ) -> Result<Ticket, CampusHubError> {
        if !actor.role.can_manage_tickets() {
            return Err(ForbiddenError::MissingRole {
                action: "assigning a technician",
                required: "ADMIN or MANAGER",
            }
            .into());
        }
        let mut ticket = self.get_ticket(id).await?;
        let technician =
            self.users
                .get_by_id(technician_id)
                .await?
                .ok_or_else(|| NotFoundError {
                    entity: "Technician",
                    id: technician_id.to_string(),
                })?;

        ticket.assign(&technician, actor.id)?;
        let saved = self.tickets.update(ticket).await?;
        tracing::info!(
            ticket = %id,
            technician = %technician.name,
            assigner = %actor.id,
            "technician assigned"
        );
        Ok(saved)
    }

    /// Move a ticket to `target` (ADMIN or TECHNICIAN), strictly following
    /// the transition table. Notes are recorded only when entering
    /// `RESOLVED`; the `OPEN→REJECTED` row additionally requires the ADMIN
    /// role and treats the notes as a mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for callers without the needed
    /// role, [`CampusHubError::InvalidTransition`] for any pair outside the
    /// table, or [`CampusHubError::Validation`] when rejecting without a
    /// reason.
    #[tracing::instrument(skip(self, notes))]
    pub async fn update_ticket_status(
        &self,
        actor: &Actor,
        id: TicketId,
        target: TicketStatus,
        notes: Option<String>,
    ) -> Result<Ticket, CampusHubError> {
        if !actor.role.can_work_tickets() {
            return Err(ForbiddenError::MissingRole {
                action: "updating a ticket status",
                required: "ADMIN or TECHNICIAN",
            }
            .into());
        }
        if target == TicketStatus::Rejected {
            actor.require_admin("rejecting a ticket")?;
        }

        let mut ticket = self.get_ticket(id).await?;
        ticket.transition_to(target, notes.as_deref())?;
        let saved = self.tickets.update(ticket).await?;
        tracing::info!(ticket = %id, status = %target, user = %actor.id, "ticket status updated");
        Ok(saved)
    }

    /// Reject a ticket (ADMIN) from any non-terminal status, with a
    /// mandatory reason.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for non-administrators,
    /// [`CampusHubError::InvalidTransition`] when the ticket is already
    /// terminal, or [`CampusHubError::Validation`] when the reason is blank.
    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_ticket(
        &self,
        actor: &Actor,
        id: TicketId,
        reason: &str,
    ) -> Result<Ticket, CampusHubError> {
        actor.require_admin("rejecting a ticket")?;
        let mut ticket = self.get_ticket(id).await?;
        ticket.reject(reason)?;
        let saved = self.tickets.update(ticket).await?;
        tracing::info!(ticket = %id, admin = %actor.id, "ticket rejected");
        Ok(saved)
    }

    /// Delete a ticket and all of its comments (ADMIN).
    ///
    /// Comments go first, then the ticket; both steps are idempotent so the
    /// operation is safe to retry if interrupted between the two.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Forbidden`] for non-administrators or
    /// [`CampusHubError::NotFound`] when the ticket does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_ticket(&self, actor: &Actor, id: TicketId) -> Result<(), CampusHubError> {
        actor.require_admin("deleting a ticket")?;
        if !self.tickets.exists(id).await? {
            return Err(NotFoundError {
                entity: "Ticket",
                id: id.to_string(),
            }
            .into());
        }
        self.comments.delete_by_ticket(id).await?;
        self.tickets.delete(id).await?;
        tracing::info!(ticket = %id, "ticket and its comments deleted");
        Ok(())
    }

    /// Add a comment to an existing ticket; the author's role and display
    /// data are snapshotted into the comment.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] for a missing ticket or user, or
    /// [`CampusHubError::Validation`] for blank content.
    #[tracing::instrument(skip(self, content))]
    pub async fn add_comment(
        &self,
        actor: &Actor,
        ticket_id: TicketId,
        content: &str,
    ) -> Result<TicketComment, CampusHubError> {
        if !self.tickets.exists(ticket_id).await? {
            return Err(NotFoundError {
                entity: "Ticket",
                id: ticket_id.to_string(),
            }
            .into());
        }
        let author = self.get_user(actor.id).await?;
        let comment = TicketComment::new(ticket_id, &author, content)?;
        let saved = self.comments.create(comment).await?;
        tracing::info!(ticket = %ticket_id, user = %actor.id, "comment added");
        Ok(saved)
    }

    /// List a ticket's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] when the ticket does not exist.
    pub async fn list_comments(
        &self,
        ticket_id: TicketId,
    ) -> Result<Vec<TicketComment>, CampusHubError> {
        if !self.tickets.exists(ticket_id).await? {
            return Err(NotFoundError {
                entity: "Ticket",
                id: ticket_id.to_string(),
            }
            .into());
        }
        self.comments.get_by_ticket(ticket_id).await
    }

    /// Replace a comment's content (author only).
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] for a missing comment,
    /// [`CampusHubError::Forbidden`] when the caller is not the author, or
    /// [`CampusHubError::Validation`] for blank content.
    #[tracing::instrument(skip(self, content))]
    pub async fn update_comment(
        &self,
        actor: &Actor,
        id: CommentId,
        content: &str,
    ) -> Result<TicketComment, CampusHubError> {
        let mut comment = self.get_comment(id).await?;
        if !comment.can_edit(actor) {
            return Err(ForbiddenError::NotOwner {
                action: "editing a comment",
            }
            .into());
        }
        comment.replace_content(content)?;
        self.comments.update(comment).await
    }

    /// Delete a comment (author or ADMIN).
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::NotFound`] for a missing comment or
    /// [`CampusHubError::Forbidden`] when the caller is neither the author
    /// nor an administrator.
    #[tracing::instrument(skip(self))]
    pub async fn delete_comment(&self, actor: &Actor, id: CommentId) -> Result<(), CampusHubError> {
        let comment = self.get_comment(id).await?;
        if !comment.can_delete(actor) {
            return Err(ForbiddenError::NotOwnerOrAdmin {
                action: "deleting a comment",
            }
            .into());
        }
        self.comments.delete(id).await?;
        tracing::info!(comment = %id, user = %actor.id, "comment deleted");
        Ok(())
    }

    async fn get_user(
        &self,
        id: UserId,
    ) -> Result<campushub_domain::user::User, CampusHubError> {
        self.users.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn get_comment(&self, id: CommentId) -> Result<TicketComment, CampusHubError> {
        self.comments.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Comment",
                id: id.to_string(),
            }
            .into()
        })
    }
}
