//! # campushub-domain
//!
//! Pure domain model for the campushub resource operations system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Facilities** (bookable campus resources: rooms, labs, equipment)
//! - Define **Bookings** (reservation requests with an approval workflow)
//! - Define **Tickets** (maintenance/incident reports raised against bookings)
//! - Define **Comments** (ticket discussion with an ownership policy)
//! - Contain all invariant enforcement: interval conflict detection, status
//!   transition tables, and ownership/role predicates
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod booking;
pub mod comment;
pub mod error;
pub mod facility;
pub mod id;
pub mod schedule;
pub mod ticket;
pub mod time;
pub mod user;
