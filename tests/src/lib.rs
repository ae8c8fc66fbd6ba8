//! Shared support for the integration test suite.

pub mod containers;
pub mod fixtures;
pub mod mocks;
pub mod setup;
