//! Per-field validation error reporting.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending input field.
    pub field: &'static str,
    /// Human-readable message describing the violation.
    pub message: String,
}

/// Validation failure carrying one violation per offending field check.
///
/// Maps to an HTTP 422 response body with per-field messages.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("validation failed: {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Returns every collected violation, in input order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Groups violation messages by field name.
    #[must_use]
    pub fn messages_by_field(&self) -> BTreeMap<&'static str, Vec<&str>> {
        let mut map: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
        for violation in &self.violations {
            map.entry(violation.field)
                .or_default()
                .push(violation.message.as_str());
        }
        map
    }
}

/// Accumulates violations across every field check before failing.
#[derive(Debug, Default)]
pub(crate) struct ViolationCollector {
    violations: Vec<FieldViolation>,
}

impl ViolationCollector {
    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        ValidationErrors {
            violations: self.violations,
        }
    }
}
