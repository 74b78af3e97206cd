//! Client for the Greenchoice customer portal.
//!
//! [`AuthSession`] performs the browser-style login, [`RequestExecutor`]
//! runs API calls with re-login and retry, and [`RetrievalEngine`] ties
//! both to the payload parsers.

pub mod client;
pub mod engine;
pub mod executor;
pub mod microbus;
pub mod parsers;
pub mod session;
pub mod tokens;

pub use client::{HttpSession, RawResponse, RequestBody};
pub use engine::RetrievalEngine;
pub use executor::{
    ApiRequest, Execution, ExpiryDetector, NoDataReason, RequestExecutor, RetryPolicy,
    StatusOrRedirectExpiry,
};
pub use session::{AuthSession, Credentials, SessionState};
