//! Facility — a bookable campus resource (room, lab, or piece of equipment).
//!
//! Facility administration (create/update/retire) belongs to a separate
//! module; the booking workflow only reads the operational status.

use serde::{Deserialize, Serialize};

use crate::error::{CampusHubError, ValidationError};
use crate::id::{FacilityId, UserId};

/// Category of a bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityKind {
    LectureHall,
    Lab,
    MeetingRoom,
    Projector,
    Camera,
    OtherEquipment,
}

/// Operational status of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityStatus {
    Active,
    OutOfService,
}

/// A bookable campus resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    pub kind: FacilityKind,
    pub description: Option<String>,
    /// Seating/capacity; `None` for equipment.
    pub capacity: Option<u32>,
    pub location: String,
    pub status: FacilityStatus,
    /// Admin who registered the facility.
    pub created_by: Option<UserId>,
}

impl Facility {
    /// Create a builder for constructing a [`Facility`].
    #[must_use]
    pub fn builder() -> FacilityBuilder {
        FacilityBuilder::default()
    }

    /// Whether the facility currently accepts bookings.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.status == FacilityStatus::Active
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), CampusHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Facility`].
#[derive(Debug, Default)]
pub struct FacilityBuilder {
    id: Option<FacilityId>,
    name: Option<String>,
    kind: Option<FacilityKind>,
    description: Option<String>,
    capacity: Option<u32>,
    location: Option<String>,
    status: Option<FacilityStatus>,
    created_by: Option<UserId>,
}

impl FacilityBuilder {
    #[must_use]
    pub fn id(mut self, id: FacilityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: FacilityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: FacilityStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn created_by(mut self, admin: UserId) -> Self {
        self.created_by = Some(admin);
        self
    }

    /// Consume the builder, validate, and return a [`Facility`].
    ///
    /// # Errors
    ///
    /// Returns [`CampusHubError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Facility, CampusHubError> {
        let facility = Facility {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or(FacilityKind::OtherEquipment),
            description: self.description,
            capacity: self.capacity,
            location: self.location.unwrap_or_default(),
            status: self.status.unwrap_or(FacilityStatus::Active),
            created_by: self.created_by,
        };
        facility.validate()?;
        Ok(facility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_active_facility_by_default() {
        let facility = Facility::builder()
            .name("Room A101")
            .kind(FacilityKind::MeetingRoom)
            .location("Building A, Floor 1")
            .build()
            .unwrap();
        assert_eq!(facility.status, FacilityStatus::Active);
        assert!(facility.is_bookable());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Facility::builder().kind(FacilityKind::Lab).build();
        assert!(matches!(
            result,
            Err(CampusHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_not_be_bookable_when_out_of_service() {
        let facility = Facility::builder()
            .name("Projector #3")
            .kind(FacilityKind::Projector)
            .status(FacilityStatus::OutOfService)
            .build()
            .unwrap();
        assert!(!facility.is_bookable());
    }

    #[test]
    fn should_serialize_status_in_screaming_snake_case() {
        let json = serde_json::to_string(&FacilityStatus::OutOfService).unwrap();
        assert_eq!(json, "\"OUT_OF_SERVICE\"");
    }
}
