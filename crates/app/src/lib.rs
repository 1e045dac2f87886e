//! # campushub-app
//!
//! Application layer — workflow use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports): facility/user lookups and booking/ticket/comment repositories
//! - Provide **workflow services** (driving/inbound ports) called by the
//!   request layer:
//!   - `BookingService` — create, approve, reject, cancel, delete, list
//!   - `TicketService` — create, assign, update status, reject, delete,
//!     comment management
//! - Enforce role guards explicitly at the top of each operation; the request
//!   layer only resolves the token into an `Actor`
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `campushub-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
