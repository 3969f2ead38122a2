//! Unit and behavioural tests for the task module.

mod domain_tests;
mod service_tests;
mod sort_tests;
mod support;
