//! Mapping of the portal's JSON payloads onto the reading model.
//!
//! Everything here is pure: bodies go in, typed readings or a
//! [`DecodeError`] come out.

pub mod agreements;
pub mod readings;
pub mod tariffs;

use crate::error::DecodeError;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;

pub use agreements::parse_agreements;
pub use readings::{
    parse_meter_readings, select_latest_entry, MeterReadings, MonthBucket, ReadingEntry,
};
pub use tariffs::parse_tariffs;

/// Timestamp format of meter reading dates.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Deserializes the body of `call`, keeping the raw body on failure.
pub(crate) fn decode_json<T: DeserializeOwned>(call: &str, body: &str) -> Result<T, DecodeError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!("Could not decode {} response: {}; body: {}", call, e, body);
        DecodeError::json(call, body, e)
    })
}

pub(crate) fn parse_timestamp(value: &str) -> Result<NaiveDateTime, DecodeError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| DecodeError::timestamp(value, e))
}
