use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use crate::config::DiscordSettings;
use crate::domain::RankUpdateEvent;
use crate::errors::StartupError;
use crate::http::AuthorizedClient;
use crate::notifier::Notifier;
use crate::notifier::render::{Embed, build_embed};

const USER_AGENT: &str = "DiscordBot (rank-tracker, 1.0)";
const TIMEOUT_SECS: u64 = 10;

/// Posts rank updates as embeds to one Discord channel
pub struct DiscordNotifier {
    client: AuthorizedClient,
    api_base_url: String,
    channel_id: String,
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    embeds: [&'a Embed; 1],
}

impl DiscordNotifier {
    pub fn new(settings: &DiscordSettings, token: &str, channel_id: &str) -> Result<Self> {
        let authorization = format!("Bot {}", token);
        let client = AuthorizedClient::new(USER_AGENT, TIMEOUT_SECS, Some(&authorization))?;

        Ok(Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            channel_id: channel_id.to_string(),
        })
    }

    fn build_channel_url(&self) -> String {
        format!("{}/channels/{}", self.api_base_url, self.channel_id)
    }

    fn build_messages_url(&self) -> String {
        format!("{}/messages", self.build_channel_url())
    }

    fn unavailable(&self, reason: String) -> StartupError {
        StartupError::DestinationUnavailable {
            channel: self.channel_id.clone(),
            reason,
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn verify_destination(&self) -> Result<(), StartupError> {
        let url = self.build_channel_url();
        let response = self
            .client
            .get(&url)
            .await
            .map_err(|e| self.unavailable(format!("{:#}", e)))?;

        if !response.status().is_success() {
            return Err(self.unavailable(response.status().to_string()));
        }

        info!("Delivering rank updates to Discord channel {}", self.channel_id);
        Ok(())
    }

    async fn notify(&self, event: &RankUpdateEvent) -> Result<()> {
        let embed = build_embed(event);
        let body = CreateMessage { embeds: [&embed] };

        let response = self
            .client
            .post_json(&self.build_messages_url(), &body)
            .await
            .context("Failed to post Discord message")?;

        if !response.status().is_success() {
            anyhow::bail!("Discord returned status: {}", response.status());
        }

        debug!("[{}] Posted update for match {}", event.identity, event.match_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let settings = DiscordSettings {
            api_base_url: "https://discord.example.test/api/v10/".to_string(),
            ..DiscordSettings::default()
        };
        let notifier = DiscordNotifier::new(&settings, "token", "1310677185169850452").unwrap();

        assert_eq!(
            notifier.build_messages_url(),
            "https://discord.example.test/api/v10/channels/1310677185169850452/messages"
        );
    }

    #[tokio::test]
    async fn test_unreachable_destination_is_unavailable() {
        let settings = DiscordSettings {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..DiscordSettings::default()
        };
        let notifier = DiscordNotifier::new(&settings, "token", "42").unwrap();

        let err = notifier.verify_destination().await.unwrap_err();
        assert!(matches!(err, StartupError::DestinationUnavailable { ref channel, .. } if channel == "42"));
    }
}
