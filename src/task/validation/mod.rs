//! Request-validation boundary for the task API.
//!
//! Controllers deserialise raw payloads into the input types in [`input`]
//! and validate them here into typed domain and query values. Validation
//! collects every field violation before returning, so a response can list
//! all problems at once. Everything below this boundary (filters, sorting,
//! pagination, services) assumes pre-validated input.
//!
//! Blank strings are normalised to absent values rather than rejected,
//! matching the treatment of empty query parameters.

mod error;
mod input;
mod rules;

pub use error::{FieldViolation, ValidationErrors};
pub use input::{SearchInput, StoreTaskInput, UpdateTaskInput};
pub use rules::{SearchRequest, validate_search, validate_store, validate_update};
