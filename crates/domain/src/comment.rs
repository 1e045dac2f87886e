//! Ticket comments and their ownership policy.
//!
//! The author's role and display data are snapshotted at creation; a later
//! role change does not rewrite historical comments.

use serde::{Deserialize, Serialize};

use crate::error::{CampusHubError, ValidationError};
use crate::id::{CommentId, TicketId, UserId};
use crate::time::Timestamp;
use crate::user::{Actor, Role, User};

/// A comment on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketComment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_picture: Option<String>,
    /// The author's role at the time of writing.
    pub author_role: Role,
    pub content: String,
    pub created_at: Timestamp,
}

impl TicketComment {
    /// Create a comment authored by `author` on `ticket_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when `content` is blank.
    pub fn new(
        ticket_id: TicketId,
        author: &User,
        content: impl Into<String>,
    ) -> Result<Self, CampusHubError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        Ok(Self {
            id: CommentId::new(),
            ticket_id,
            author_id: author.id,
            author_name: author.name.clone(),
            author_picture: author.profile_picture.clone(),
            author_role: author.role,
            content,
            created_at: crate::time::now(),
        })
    }

    /// Only the author may edit a comment.
    #[must_use]
    pub fn can_edit(&self, caller: &Actor) -> bool {
        self.author_id == caller.id
    }

    /// The author or an administrator may delete a comment.
    #[must_use]
    pub fn can_delete(&self, caller: &Actor) -> bool {
        self.author_id == caller.id || caller.role.is_admin()
    }

    /// Replace the content wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when the new content is blank.
    pub fn replace_content(&mut self, content: impl Into<String>) -> Result<(), CampusHubError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        self.content = content;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> User {
        User::with_role("Tariq", "tariq@campus.edu", Role::Technician)
    }

    #[test]
    fn should_snapshot_author_role_at_creation() {
        let user = author();
        let comment = TicketComment::new(TicketId::new(), &user, "checking this today").unwrap();
        assert_eq!(comment.author_role, Role::Technician);
        assert_eq!(comment.author_name, "Tariq");
    }

    #[test]
    fn should_reject_blank_content() {
        let result = TicketComment::new(TicketId::new(), &author(), "  ");
        assert!(matches!(
            result,
            Err(CampusHubError::Validation(ValidationError::EmptyContent))
        ));
    }

    #[test]
    fn should_allow_edit_only_by_author() {
        let user = author();
        let comment = TicketComment::new(TicketId::new(), &user, "first pass done").unwrap();
        assert!(comment.can_edit(&user.actor()));

        let admin = User::with_role("Root", "root@campus.edu", Role::Admin);
        assert!(!comment.can_edit(&admin.actor()));
    }

    #[test]
    fn should_allow_delete_by_author_or_admin() {
        let user = author();
        let comment = TicketComment::new(TicketId::new(), &user, "obsolete note").unwrap();

        assert!(comment.can_delete(&user.actor()));
        let admin = User::with_role("Root", "root@campus.edu", Role::Admin);
        assert!(comment.can_delete(&admin.actor()));

        let other = User::new("Bob", "bob@campus.edu");
        assert!(!comment.can_delete(&other.actor()));
        let manager = User::with_role("Dana", "dana@campus.edu", Role::Manager);
        assert!(!comment.can_delete(&manager.actor()));
    }

    #[test]
    fn should_replace_content_wholesale() {
        let user = author();
        let mut comment = TicketComment::new(TicketId::new(), &user, "draft").unwrap();
        comment.replace_content("final wording").unwrap();
        assert_eq!(comment.content, "final wording");
        assert!(comment.replace_content("").is_err());
    }
}
