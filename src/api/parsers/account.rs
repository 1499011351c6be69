use serde_json::Value;

use crate::api::models::{AccountResponse, ApiEnvelope};

/// Extract the opaque player id from a `v1/account` response
pub fn parse_puuid(data: &Value) -> Option<String> {
    let response: ApiEnvelope<AccountResponse> = serde_json::from_value(data.clone()).ok()?;
    Some(response.data.puuid).filter(|puuid| !puuid.is_empty())
}
