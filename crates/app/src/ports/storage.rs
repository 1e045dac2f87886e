//! Lookup ports for entities owned by other modules.
//!
//! Facility administration and account management live outside this core;
//! the workflows only need read access.

use std::future::Future;

use campushub_domain::error::CampusHubError;
use campushub_domain::facility::Facility;
use campushub_domain::id::{FacilityId, UserId};
use campushub_domain::user::{Role, User};

/// Read-side access to the facility catalogue.
pub trait FacilityRepository {
    /// Get a facility by its unique identifier.
    fn get_by_id(
        &self,
        id: FacilityId,
    ) -> impl Future<Output = Result<Option<Facility>, CampusHubError>> + Send;
}

/// Read-side access to the user directory.
pub trait UserRepository {
    /// Get a user by their unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, CampusHubError>> + Send;

    /// Get all users holding the given role.
    fn get_by_role(
        &self,
        role: Role,
    ) -> impl Future<Output = Result<Vec<User>, CampusHubError>> + Send;
}
