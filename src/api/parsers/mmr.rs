use serde_json::Value;

use crate::api::models::{ApiEnvelope, MmrResponse};
use crate::domain::{RankState, tier_name};

/// Extract the current rank from a `v3/mmr` response
pub fn parse_current_rank(data: &Value) -> Option<RankState> {
    let response: ApiEnvelope<MmrResponse> = serde_json::from_value(data.clone()).ok()?;
    let current = response.data.current;
    Some(build_rank_state(current.tier.id, current.rr, current.tier.name))
}

fn build_rank_state(tier_index: u32, points: u32, name: Option<String>) -> RankState {
    let name = name.unwrap_or_else(|| tier_name(tier_index).to_string());
    RankState::new(tier_index, points, name)
}
