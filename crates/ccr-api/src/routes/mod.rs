//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are merged in [`crate::app`].

pub mod audits;
pub mod certifications;
pub mod compliance;
pub mod decrypt;
pub mod events;
pub mod roles;
pub mod transactions;
