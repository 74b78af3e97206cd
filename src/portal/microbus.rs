//! Requests for the portal's internal RPC endpoint.
//!
//! Every data call goes through one URL; the `name` field of the JSON body
//! selects the operation.

use crate::portal::client::RequestBody;
use crate::portal::executor::ApiRequest;
use reqwest::Method;
use serde_json::json;

pub const REQUEST_PATH: &str = "/microbus/request";
pub const INIT_PATH: &str = "/microbus/init";

pub const METER_READINGS_CALL: &str = "OpnamesOphalen";
pub const TARIFFS_CALL: &str = "GetTariefOvereenkomst";
pub const INIT_CALL: &str = "init";

fn rpc(name: &str, message: serde_json::Value) -> ApiRequest {
    ApiRequest {
        name: name.to_string(),
        method: Method::POST,
        path: REQUEST_PATH.to_string(),
        body: RequestBody::Json(json!({ "name": name, "message": message })),
    }
}

/// Meter readings of all products on the preferred agreement.
pub fn meter_readings() -> ApiRequest {
    rpc(METER_READINGS_CALL, json!({}))
}

/// Tariffs and yearly costs of one agreement.
pub fn tariffs(agreement_id: i64) -> ApiRequest {
    rpc(TARIFFS_CALL, json!({ "overeenkomstId": agreement_id }))
}

/// Profile and customer details, including every agreement's address.
pub fn init() -> ApiRequest {
    ApiRequest {
        name: INIT_CALL.to_string(),
        method: Method::GET,
        path: INIT_PATH.to_string(),
        body: RequestBody::Empty,
    }
}
