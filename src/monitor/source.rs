use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{PlayerIdentity, RankState};
use crate::errors::ResolveError;

/// Rank data for one already-resolved player.
///
/// `Ok(None)` means the data is temporarily unavailable and the cycle should
/// be skipped. `Err` is reserved for transport failures such as timeouts.
#[async_trait]
pub trait RankSource: Send + Sync {
    async fn fetch_current_rank(&self) -> Result<Option<RankState>>;

    async fn fetch_latest_match_id(&self) -> Result<Option<String>>;
}

/// Resolves a configured player into the lookup strategy used for the
/// lifetime of that player's monitor.
#[async_trait]
pub trait SourceResolver: Send + Sync {
    async fn resolve(&self, identity: &PlayerIdentity) -> Result<Arc<dyn RankSource>, ResolveError>;
}
