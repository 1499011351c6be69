use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::api::StatsClient;
use crate::config::settings::AppConfig;
use crate::domain::{PlayerIdentity, tier_name};
use crate::errors::StartupError;
use crate::monitor::MonitorSupervisor;
use crate::notifier::{DiscordNotifier, LogNotifier, Notifier};

pub struct WatchService {
    config: AppConfig,
    players: Vec<PlayerIdentity>,
    dry_run: bool,
}

impl WatchService {
    pub fn new(config: AppConfig, players: Vec<PlayerIdentity>, dry_run: bool) -> Self {
        Self {
            config,
            players,
            dry_run,
        }
    }

    pub async fn run(self) -> Result<()> {
        info!("=== Starting Rank Tracker ===");
        info!(
            "Target tier: {} ({}), polling every {:?}",
            self.config.monitor.target_tier,
            tier_name(self.config.monitor.target_tier),
            self.config.monitor.poll_interval
        );

        let notifier = self.build_notifier()?;
        let resolver = Arc::new(StatsClient::new(&self.config.api)?);

        if self.config.api.api_key.is_none() {
            warn!("HENRIK_API_KEY is not set; requests may be rejected");
        }

        let shutdown = CancellationToken::new();
        Self::cancel_on_ctrl_c(shutdown.clone());

        let supervisor =
            MonitorSupervisor::new(self.players, resolver, notifier, self.config.monitor);
        supervisor.run(shutdown).await?;

        info!("=== Rank Tracker Stopped ===");
        Ok(())
    }

    fn build_notifier(&self) -> Result<Arc<dyn Notifier>> {
        if self.dry_run {
            return Ok(Arc::new(LogNotifier));
        }

        let Some((token, channel_id)) = self.config.discord.destination() else {
            return Err(StartupError::DestinationUnavailable {
                channel: self
                    .config
                    .discord
                    .channel_id
                    .clone()
                    .unwrap_or_else(|| "<unset>".to_string()),
                reason: "DISCORD_TOKEN and --channel-id are required unless --dry-run".to_string(),
            }
            .into());
        };

        let notifier = DiscordNotifier::new(&self.config.discord, token, channel_id)?;
        Ok(Arc::new(notifier))
    }

    fn cancel_on_ctrl_c(shutdown: CancellationToken) {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown requested"),
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
            shutdown.cancel();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_destination_is_fatal() {
        let service = WatchService::new(
            AppConfig::new(),
            vec![PlayerIdentity::new("zawn", "7627")],
            false,
        );

        let err = service.run().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StartupError>(),
            Some(StartupError::DestinationUnavailable { .. })
        ));
    }
}
