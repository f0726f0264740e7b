//! Core domain types
//!
//! This module contains the structures the backend reports about a pipeline.
//! The portal never owns these entities: it observes them through queries
//! and derives display state from them.

pub mod category;
pub mod kind;
pub mod pipeline;
pub mod resource;
pub mod secret;
pub mod status;
