//! Integration Tests
//!
//! Cross-crate tests through the umbrella crate:
//! - scenarios: the order-table walkthrough end to end
//! - persistence: snapshot + config round trips on disk
//! - concurrency: shared facades over one table

mod common;

mod concurrency;
mod persistence;
mod scenarios;
