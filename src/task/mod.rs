//! Task management: records, search, and statistics.
//!
//! This module implements the task bounded context: creating, patching, and
//! soft-deleting task records, composing filter/sort/pagination queries over
//! them, and aggregating per-status and per-priority counts. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Query composition (filtering, sorting, pagination) in [`query`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The request-validation boundary in [`validation`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
