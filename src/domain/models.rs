use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::IdentityParseError;

/// Tracked player, keyed by Riot display name and tag line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub display_name: String,
    pub tag_line: String,
}

impl PlayerIdentity {
    pub fn new(display_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            tag_line: tag_line.into(),
        }
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.display_name, self.tag_line)
    }
}

impl FromStr for PlayerIdentity {
    type Err = IdentityParseError;

    /// Parses `name#tag`. The tag is split on the last `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, tag) = s
            .trim()
            .rsplit_once('#')
            .ok_or_else(|| IdentityParseError::MissingTag(s.to_string()))?;

        let name = name.trim();
        let tag = tag.trim();

        if name.is_empty() || tag.is_empty() {
            return Err(IdentityParseError::EmptyPart(s.to_string()));
        }

        Ok(Self::new(name, tag))
    }
}

/// A player's rank at one observation point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankState {
    pub tier_index: u32,
    pub points_in_tier: u32,
    pub tier_name: String,
    pub map_name: Option<String>,
}

impl RankState {
    pub fn new(tier_index: u32, points_in_tier: u32, tier_name: impl Into<String>) -> Self {
        Self {
            tier_index,
            points_in_tier,
            tier_name: tier_name.into(),
            map_name: None,
        }
    }

    pub fn with_map(mut self, map_name: Option<String>) -> Self {
        self.map_name = map_name;
        self
    }
}

/// Observed state for one player, owned by that player's monitor task
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub identity: PlayerIdentity,
    pub last_match_id: Option<String>,
    pub last_rank_state: Option<RankState>,
}

impl MonitorState {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            last_match_id: None,
            last_rank_state: None,
        }
    }

    /// True when `match_id` is a match this monitor has not seen yet
    pub fn is_new_match(&self, match_id: &str) -> bool {
        self.last_match_id.as_deref() != Some(match_id)
    }

    pub fn record(&mut self, match_id: String, rank: RankState) {
        self.last_match_id = Some(match_id);
        self.last_rank_state = Some(rank);
    }
}

/// Emitted once per detected match, consumed once by the notifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankUpdateEvent {
    pub identity: PlayerIdentity,
    pub match_id: String,
    pub new_rank_state: RankState,
    pub points_delta: Option<i32>,
    pub points_to_target: Option<i32>,
    pub progress_percent: Option<u8>,
    pub target_tier: u32,
    pub observed_at: DateTime<Utc>,
}

impl RankUpdateEvent {
    pub fn target_reached(&self) -> bool {
        self.points_to_target.is_none()
    }

    /// One-line summary, used by the log notifier and the CLI
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}: {} {} RR",
            self.identity, self.new_rank_state.tier_name, self.new_rank_state.points_in_tier
        );

        if let Some(delta) = self.points_delta {
            line.push_str(&format!(" ({delta:+} RR)"));
        }

        match (self.points_to_target, self.progress_percent) {
            (Some(remaining), Some(percent)) => {
                line.push_str(&format!(", {remaining} RR to target ({percent}%)"));
            }
            _ => line.push_str(", target reached"),
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_parsing() {
        let identity: PlayerIdentity = "zawn#7627".parse().unwrap();
        assert_eq!(identity, PlayerIdentity::new("zawn", "7627"));
        assert_eq!(identity.to_string(), "zawn#7627");

        // Names may contain spaces and '#'; the tag is after the last one
        let identity: PlayerIdentity = " Big #Name#EUW ".parse().unwrap();
        assert_eq!(identity.display_name, "Big #Name");
        assert_eq!(identity.tag_line, "EUW");
    }

    #[test]
    fn test_identity_parsing_rejects_malformed() {
        assert!(matches!(
            "zawn".parse::<PlayerIdentity>(),
            Err(IdentityParseError::MissingTag(_))
        ));
        assert!(matches!(
            "#7627".parse::<PlayerIdentity>(),
            Err(IdentityParseError::EmptyPart(_))
        ));
        assert!(matches!(
            "zawn#".parse::<PlayerIdentity>(),
            Err(IdentityParseError::EmptyPart(_))
        ));
    }

    #[test]
    fn test_monitor_state_new_match() {
        let mut state = MonitorState::new(PlayerIdentity::new("a", "1"));
        assert!(state.is_new_match("m1"));

        state.record("m1".to_string(), RankState::new(20, 50, "Diamond 3"));
        assert!(!state.is_new_match("m1"));
        assert!(state.is_new_match("m2"));
    }

    #[test]
    fn test_event_summary() {
        let event = RankUpdateEvent {
            identity: PlayerIdentity::new("zawn", "7627"),
            match_id: "m2".to_string(),
            new_rank_state: RankState::new(21, 10, "Ascendant 1"),
            points_delta: Some(30),
            points_to_target: Some(290),
            progress_percent: Some(3),
            target_tier: 24,
            observed_at: Utc::now(),
        };

        assert_eq!(
            event.summary(),
            "zawn#7627: Ascendant 1 10 RR (+30 RR), 290 RR to target (3%)"
        );
        assert!(!event.target_reached());
    }
}
