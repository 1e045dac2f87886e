//! Ticket and comment repository ports — persistence for the ticketing
//! workflow.

use std::future::Future;

use campushub_domain::comment::TicketComment;
use campushub_domain::error::CampusHubError;
use campushub_domain::id::{CommentId, TicketId, UserId};
use campushub_domain::ticket::{Ticket, TicketPriority, TicketStatus};

/// Repository for persisting and querying [`Ticket`]s.
pub trait TicketRepository {
    /// Persist a new ticket.
    fn create(&self, ticket: Ticket)
    -> impl Future<Output = Result<Ticket, CampusHubError>> + Send;

    /// Persist changes to an existing ticket.
    fn update(&self, ticket: Ticket)
    -> impl Future<Output = Result<Ticket, CampusHubError>> + Send;

    /// Get a ticket by its unique identifier.
    fn get_by_id(
        &self,
        id: TicketId,
    ) -> impl Future<Output = Result<Option<Ticket>, CampusHubError>> + Send;

    /// Whether a ticket with this identifier exists.
    fn exists(&self, id: TicketId) -> impl Future<Output = Result<bool, CampusHubError>> + Send;

    /// Delete a ticket by its unique identifier. Deleting a missing ticket is
    /// not an error; the delete cascade relies on this being idempotent.
    fn delete(&self, id: TicketId) -> impl Future<Output = Result<(), CampusHubError>> + Send;

    /// Get the tickets raised by a user, newest first.
    fn get_by_user(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<Ticket>, CampusHubError>> + Send;

    /// Get the tickets assigned to a technician, newest first.
    fn get_by_technician(
        &self,
        technician: UserId,
    ) -> impl Future<Output = Result<Vec<Ticket>, CampusHubError>> + Send;

    /// Get all tickets, newest first, optionally filtered by status and
    /// priority.
    fn get_all(
        &self,
        status: Option<TicketStatus>,
        priority: Option<TicketPriority>,
    ) -> impl Future<Output = Result<Vec<Ticket>, CampusHubError>> + Send;
}

/// Repository for persisting and querying [`TicketComment`]s.
pub trait CommentRepository {
    /// Persist a new comment.
    fn create(
        &self,
        comment: TicketComment,
    ) -> impl Future<Output = Result<TicketComment, CampusHubError>> + Send;

    /// Persist changes to an existing comment.
    fn update(
        &self,
        comment: TicketComment,
    ) -> impl Future<Output = Result<TicketComment, CampusHubError>> + Send;

    /// Get a comment by its unique identifier.
    fn get_by_id(
        &self,
        id: CommentId,
    ) -> impl Future<Output = Result<Option<TicketComment>, CampusHubError>> + Send;

    /// Delete a comment by its unique identifier.
    fn delete(&self, id: CommentId) -> impl Future<Output = Result<(), CampusHubError>> + Send;

    /// Delete every comment on a ticket. Idempotent; part of the ticket
    /// delete cascade.
    fn delete_by_ticket(
        &self,
        ticket: TicketId,
    ) -> impl Future<Output = Result<(), CampusHubError>> + Send;

    /// Get a ticket's comments ordered by creation time, oldest first.
    fn get_by_ticket(
        &self,
        ticket: TicketId,
    ) -> impl Future<Output = Result<Vec<TicketComment>, CampusHubError>> + Send;

    /// Count the comments on a ticket.
    fn count_by_ticket(
        &self,
        ticket: TicketId,
    ) -> impl Future<Output = Result<usize, CampusHubError>> + Send;
}
