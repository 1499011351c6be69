pub mod discord;
pub mod log_notifier;
pub mod render;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::RankUpdateEvent;
use crate::errors::StartupError;

pub use discord::DiscordNotifier;
pub use log_notifier::LogNotifier;

/// Renders and delivers rank updates.
///
/// Delivery is best effort: failures are reported to the caller once and
/// never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Check that the destination exists before any monitor starts
    async fn verify_destination(&self) -> Result<(), StartupError>;

    async fn notify(&self, event: &RankUpdateEvent) -> Result<()>;
}
