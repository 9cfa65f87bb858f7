//! Roster Service Library
//!
//! Exposes the internal modules for integration testing.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
