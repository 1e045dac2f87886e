//! Workflow services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic
//! parameters (constructor injection), keeping this layer decoupled from
//! concrete adapters. Role and ownership guards run at the top of every
//! operation; nothing here trusts the transport layer to have checked them.

pub mod booking_service;
pub mod ticket_service;

pub use booking_service::{BookingService, NewBooking};
pub use ticket_service::{NewTicket, TicketService};
