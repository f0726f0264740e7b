//! Portal Core
//!
//! Core types and pure logic for the pipeline portal.
//!
//! This crate contains:
//! - Domain types: Pipelines and the resource references attached to them
//! - Catalog: Static kind→category and kind→display-name tables
//! - Aggregation: Per-category status reduction for the presentation layer
//! - Wizard: The setup wizard state machine and its provisioning plan
//! - DTOs: Request and response payloads of the GraphQL API

pub mod aggregation;
pub mod catalog;
pub mod domain;
pub mod dto;
pub mod wizard;
