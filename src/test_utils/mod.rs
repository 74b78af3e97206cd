//! Shared test utilities for the Greenchoice portal client.
//!
//! Fixtures for portal pages and payloads, a wiremock-backed portal and mock
//! reading sources.

#![cfg(test)]

pub mod fixtures;
pub mod mocks;
