//! Data Transfer Objects for the GraphQL API
//!
//! This module contains the input objects sent with mutations and the
//! lightweight payloads mutations return. Field names follow the API's
//! camelCase convention.

pub mod github;
pub mod integration;
pub mod jenkins;
pub mod piper;
pub mod pipeline;
pub mod resource;
pub mod secret;
