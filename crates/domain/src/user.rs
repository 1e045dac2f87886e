//! User — an account known to the hub, and the caller identity passed into
//! every workflow operation.

use serde::{Deserialize, Serialize};

use crate::error::ForbiddenError;
use crate::id::UserId;

/// Access-control roles.
///
/// - `User` — default role for students and staff
/// - `Technician` — maintenance and technical staff, eligible for ticket
///   assignment
/// - `Manager` — department/facility managers
/// - `Admin` — full administrators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    Technician,
    Manager,
}

impl Role {
    /// Whether this role may approve/reject bookings, reject tickets, and
    /// delete entities.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may assign technicians and browse the full ticket
    /// queue.
    #[must_use]
    pub fn can_manage_tickets(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Whether this role may drive a ticket through its transition table.
    #[must_use]
    pub fn can_work_tickets(self) -> bool {
        matches!(self, Self::Admin | Self::Technician)
    }

    /// Stable name used in permission diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Technician => "TECHNICIAN",
            Self::Manager => "MANAGER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account in the hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub role: Role,
}

impl User {
    /// Create a user with the default `USER` role.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            name: name.into(),
            profile_picture: None,
            role: Role::User,
        }
    }

    /// Create a user holding the given role.
    #[must_use]
    pub fn with_role(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            role,
            ..Self::new(name, email)
        }
    }

    /// The caller identity derived from this account.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
        }
    }
}

/// Authenticated caller identity attached to each workflow invocation.
///
/// Authentication itself happens outside the core; the request layer resolves
/// the token into an `Actor` before calling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    /// Guard an administrative operation.
    ///
    /// # Errors
    ///
    /// Returns [`ForbiddenError::MissingRole`] unless the caller is an
    /// administrator.
    pub fn require_admin(&self, action: &'static str) -> Result<(), ForbiddenError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ForbiddenError::MissingRole {
                action,
                required: "ADMIN",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_only_admin_as_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Manager.is_admin());
        assert!(!Role::Technician.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn should_allow_admin_and_manager_to_manage_tickets() {
        assert!(Role::Admin.can_manage_tickets());
        assert!(Role::Manager.can_manage_tickets());
        assert!(!Role::Technician.can_manage_tickets());
        assert!(!Role::User.can_manage_tickets());
    }

    #[test]
    fn should_allow_admin_and_technician_to_work_tickets() {
        assert!(Role::Admin.can_work_tickets());
        assert!(Role::Technician.can_work_tickets());
        assert!(!Role::Manager.can_work_tickets());
        assert!(!Role::User.can_work_tickets());
    }

    #[test]
    fn should_serialize_role_in_screaming_snake_case() {
        let json = serde_json::to_string(&Role::Technician).unwrap();
        assert_eq!(json, "\"TECHNICIAN\"");
    }

    #[test]
    fn should_guard_admin_only_operations() {
        let admin = User::with_role("Root", "root@campus.edu", Role::Admin);
        assert!(admin.actor().require_admin("deleting a booking").is_ok());

        let manager = User::with_role("Dana", "dana@campus.edu", Role::Manager);
        let denied = manager.actor().require_admin("deleting a booking");
        assert!(matches!(
            denied,
            Err(ForbiddenError::MissingRole {
                required: "ADMIN",
                ..
            })
        ));
    }

    #[test]
    fn should_derive_actor_from_user() {
        let user = User::with_role("Dana", "dana@campus.edu", Role::Manager);
        let actor = user.actor();
        assert_eq!(actor.id, user.id);
        assert_eq!(actor.role, Role::Manager);
    }
}
