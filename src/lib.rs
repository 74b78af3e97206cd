//! Greenchoice portal client
//!
//! Logs in to the Greenchoice customer portal the way a browser does, calls
//! its internal JSON endpoint and normalizes the payloads into typed meter
//! readings and tariffs.
//!
//! Retrievals are one-shot: scheduling repeated polls is up to the caller,
//! which drives a [`model::ReadingSource`] such as
//! [`portal::RetrievalEngine`].

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod portal;

#[cfg(test)]
mod test_utils;
