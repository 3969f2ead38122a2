//! Taskboard: task-management backend core.
//!
//! This crate provides the query-composition and persistence core behind a
//! task-management API: CRUD over tasks plus filtered, sorted, paginated
//! search and status/priority statistics.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! The HTTP surface is deliberately absent: a controller layer is expected to
//! deserialise request payloads into the input types under
//! [`task::validation`], call [`task::services::TaskQueryService`], and
//! serialise the returned values.

pub mod task;
