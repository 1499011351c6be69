use serde_json::Value;

use crate::api::models::{ApiEnvelope, HistoryEntry};
use crate::domain::{RankState, tier_name};

/// Match id of the newest `mmr-history` entry
pub fn parse_latest_match_id(data: &Value) -> Option<String> {
    latest_entry(data).map(|entry| entry.match_id)
}

/// Rank state recorded by the newest `mmr-history` entry, including its map
pub fn parse_latest_rank(data: &Value) -> Option<RankState> {
    let entry = latest_entry(data)?;
    let name = entry
        .current_tier_name
        .unwrap_or_else(|| tier_name(entry.current_tier).to_string());
    let map_name = entry.map.and_then(|map| map.name);

    Some(RankState::new(entry.current_tier, entry.ranking_in_tier, name).with_map(map_name))
}

fn latest_entry(data: &Value) -> Option<HistoryEntry> {
    let response: ApiEnvelope<Vec<HistoryEntry>> = serde_json::from_value(data.clone()).ok()?;
    response.data.into_iter().next()
}
