use std::time::Duration;

use crate::api::LookupStrategy;

#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub target_tier: u32,
    pub resolve_attempts: u32,
    pub resolve_retry_delay: Duration,
    pub event_buffer: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            target_tier: 24, // Immortal 1
            resolve_attempts: 3,
            resolve_retry_delay: Duration::from_secs(5),
            event_buffer: 64,
        }
    }
}

#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub region: String,
    pub platform: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
    pub lookup: LookupStrategy,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.henrikdev.xyz".to_string(),
            region: "eu".to_string(),
            platform: "pc".to_string(),
            user_agent: "RankTracker/1.0",
            timeout_secs: 10,
            api_key: None,
            lookup: LookupStrategy::NameTag,
        }
    }
}

#[derive(Clone)]
pub struct DiscordSettings {
    pub api_base_url: String,
    pub token: Option<String>,
    pub channel_id: Option<String>,
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://discord.com/api/v10".to_string(),
            token: None,
            channel_id: None,
        }
    }
}

impl DiscordSettings {
    /// Token and channel, if both are configured
    pub fn destination(&self) -> Option<(&str, &str)> {
        Some((self.token.as_deref()?, self.channel_id.as_deref()?))
    }
}

/// Immutable startup configuration, passed explicitly to every service
#[derive(Default)]
pub struct AppConfig {
    pub monitor: MonitorSettings,
    pub api: ApiSettings,
    pub discord: DiscordSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.monitor.poll_interval, Duration::from_secs(60));
        assert_eq!(config.monitor.target_tier, 24);
        assert_eq!(config.api.lookup, LookupStrategy::NameTag);
        assert!(config.discord.destination().is_none());
    }

    #[test]
    fn test_discord_destination_requires_both_parts() {
        let mut discord = DiscordSettings {
            token: Some("token".to_string()),
            ..DiscordSettings::default()
        };
        assert!(discord.destination().is_none());

        discord.channel_id = Some("1310677185169850452".to_string());
        assert_eq!(
            discord.destination(),
            Some(("token", "1310677185169850452"))
        );
    }
}
