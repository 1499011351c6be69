use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::domain::RankUpdateEvent;
use crate::errors::StartupError;
use crate::notifier::Notifier;

/// Writes rank updates to the log instead of delivering them (dry run)
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn verify_destination(&self) -> Result<(), StartupError> {
        info!("Dry run: rank updates will only be logged");
        Ok(())
    }

    async fn notify(&self, event: &RankUpdateEvent) -> Result<()> {
        info!("Rank update: {}", event.summary());
        Ok(())
    }
}
