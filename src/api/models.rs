use serde::Deserialize;

// --- Stats API Response Structures ---

/// Envelope shared by every stats API response
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// `v3/mmr` payload
#[derive(Debug, Deserialize)]
pub struct MmrResponse {
    pub current: CurrentRank,
}

#[derive(Debug, Deserialize)]
pub struct CurrentRank {
    pub tier: TierInfo,
    #[serde(default)]
    pub rr: u32,
}

#[derive(Debug, Deserialize)]
pub struct TierInfo {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

/// One `mmr-history` entry, newest first
#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    pub match_id: String,
    #[serde(rename = "currenttier", default)]
    pub current_tier: u32,
    #[serde(rename = "currenttier_patched", default)]
    pub current_tier_name: Option<String>,
    #[serde(default)]
    pub ranking_in_tier: u32,
    #[serde(default)]
    pub map: Option<MapInfo>,
}

#[derive(Debug, Deserialize)]
pub struct MapInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// `v1/account` payload
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub puuid: String,
}
