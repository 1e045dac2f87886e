//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod booking_repo;
pub mod storage;
pub mod ticket_repo;

pub use booking_repo::BookingRepository;
pub use storage::{FacilityRepository, UserRepository};
pub use ticket_repo::{CommentRepository, TicketRepository};
