//! Per-player poll/detect/diff loop.
//!
//! A monitor resolves its player once, records a silent baseline, then polls
//! the latest match id on a fixed period. A changed match id triggers a rank
//! fetch and, on success, one [`RankUpdateEvent`].

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tokio_util::sync::CancellationToken;

use crate::config::MonitorSettings;
use crate::domain::{MonitorState, PlayerIdentity, RankState, RankUpdateEvent};
use crate::errors::ResolveError;
use crate::monitor::{RankSource, SourceResolver};
use crate::rank_scale::{self, TargetProgress};

/// Why a monitor task stopped
#[derive(Debug)]
pub enum MonitorExit {
    /// Shutdown was requested
    Cancelled,
    /// The player could not be resolved at startup
    ResolutionFailed(ResolveError),
    /// Nobody is listening for events anymore
    ChannelClosed,
}

pub struct PlayerMonitor {
    state: MonitorState,
    source: Arc<dyn RankSource>,
    target_tier: u32,
    /// The baseline match id fetch failed, so the next id seen is adopted
    /// without an event.
    baseline_failed: bool,
}

impl PlayerMonitor {
    /// Resolve the player and record the baseline.
    ///
    /// `NotFound` fails immediately; an unavailable lookup is retried
    /// `resolve_attempts` times before giving up.
    pub async fn start(
        identity: PlayerIdentity,
        resolver: &dyn SourceResolver,
        settings: &MonitorSettings,
    ) -> Result<Self, ResolveError> {
        let source = Self::resolve_with_retry(&identity, resolver, settings).await?;
        Ok(Self::initialize(identity, source, settings.target_tier).await)
    }

    /// Record the baseline from one match id fetch and one rank fetch.
    ///
    /// Never produces an event: anything observed here predates the monitor.
    /// An empty history is a valid baseline, so the player's first match is
    /// still reported.
    pub async fn initialize(
        identity: PlayerIdentity,
        source: Arc<dyn RankSource>,
        target_tier: u32,
    ) -> Self {
        let mut state = MonitorState::new(identity);
        let mut baseline_failed = false;

        state.last_match_id = match source.fetch_latest_match_id().await {
            Ok(match_id) => match_id,
            Err(e) => {
                warn!("[{}] Baseline match fetch failed: {:#}", state.identity, e);
                baseline_failed = true;
                None
            }
        };
        state.last_rank_state = match source.fetch_current_rank().await {
            Ok(rank) => rank,
            Err(e) => {
                warn!("[{}] Baseline rank fetch failed: {:#}", state.identity, e);
                None
            }
        };

        info!(
            "[{}] Baseline: last match {}, rank {}",
            state.identity,
            state.last_match_id.as_deref().unwrap_or("unknown"),
            describe_rank(state.last_rank_state.as_ref())
        );

        Self {
            state,
            source,
            target_tier,
            baseline_failed,
        }
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.state.identity
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run one poll cycle.
    ///
    /// `lastMatchId` only advances once the rank for the new match has been
    /// fetched, so a failed rank fetch is retried on the next cycle.
    pub async fn poll(&mut self) -> Result<Option<RankUpdateEvent>> {
        let Some(match_id) = self.source.fetch_latest_match_id().await? else {
            debug!("[{}] Latest match unavailable", self.identity());
            return Ok(None);
        };

        if self.baseline_failed {
            self.complete_baseline(match_id).await?;
            return Ok(None);
        }

        if !self.state.is_new_match(&match_id) {
            debug!("[{}] No new match", self.identity());
            return Ok(None);
        }

        info!("[{}] New match detected: {}", self.identity(), match_id);

        let Some(rank) = self.source.fetch_current_rank().await? else {
            warn!(
                "[{}] Rank unavailable after match {}, retrying next cycle",
                self.identity(),
                match_id
            );
            return Ok(None);
        };

        Ok(Some(self.apply_update(match_id, rank)))
    }

    /// Poll on a fixed period until cancelled.
    ///
    /// A cycle interrupted by cancellation is dropped without emitting.
    pub async fn run(
        mut self,
        settings: &MonitorSettings,
        events: mpsc::Sender<RankUpdateEvent>,
        cancel: CancellationToken,
    ) -> MonitorExit {
        let period = settings.poll_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return MonitorExit::Cancelled,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return MonitorExit::Cancelled,
                outcome = self.poll() => outcome,
            };

            match outcome {
                Ok(Some(event)) => {
                    if events.send(event).await.is_err() {
                        warn!("[{}] Event channel closed, stopping", self.identity());
                        return MonitorExit::ChannelClosed;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "[{}] Poll cycle at {} failed: {:#}",
                        self.identity(),
                        Utc::now().format("%Y-%m-%d %H:%M:%S"),
                        e
                    );
                }
            }
        }
    }

    async fn resolve_with_retry(
        identity: &PlayerIdentity,
        resolver: &dyn SourceResolver,
        settings: &MonitorSettings,
    ) -> Result<Arc<dyn RankSource>, ResolveError> {
        let attempts = settings.resolve_attempts.max(1);
        let mut attempt = 1;

        loop {
            match resolver.resolve(identity).await {
                Ok(source) => return Ok(source),
                Err(e) if e.is_fatal() || attempt >= attempts => {
                    error!("[{}] Identity resolution failed: {}", identity, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        "[{}] Identity resolution attempt {}/{} failed: {}",
                        identity, attempt, attempts, e
                    );
                    attempt += 1;
                    sleep(settings.resolve_retry_delay).await;
                }
            }
        }
    }

    /// The baseline match fetch failed; adopt the first id seen silently.
    async fn complete_baseline(&mut self, match_id: String) -> Result<()> {
        info!("[{}] Baseline match recorded late: {}", self.identity(), match_id);
        self.state.last_match_id = Some(match_id);
        self.baseline_failed = false;

        if self.state.last_rank_state.is_none() {
            self.state.last_rank_state = self.source.fetch_current_rank().await?;
        }
        Ok(())
    }

    fn apply_update(&mut self, match_id: String, rank: RankState) -> RankUpdateEvent {
        let points_delta = match self.state.last_rank_state.as_ref() {
            Some(previous) => {
                let delta = rank_scale::delta(previous, &rank);
                if delta.is_none() {
                    warn!(
                        "[{}] Rank movement out of range: {} -> {}",
                        self.identity(),
                        describe_rank(Some(previous)),
                        describe_rank(Some(&rank))
                    );
                }
                delta
            }
            None => None,
        };

        let progress = TargetProgress::evaluate(&rank, self.target_tier);
        if progress.is_anomalous() {
            warn!(
                "[{}] Points to target is negative ({:?}): {} RR reported in tier {}",
                self.identity(),
                progress.points(),
                rank.points_in_tier,
                rank.tier_index
            );
        }

        let event = RankUpdateEvent {
            identity: self.state.identity.clone(),
            match_id: match_id.clone(),
            new_rank_state: rank.clone(),
            points_delta,
            points_to_target: progress.points(),
            progress_percent: progress.percent(),
            target_tier: self.target_tier,
            observed_at: Utc::now(),
        };

        self.state.record(match_id, rank);
        info!("[{}] {}", self.identity(), event.summary());
        event
    }
}

fn describe_rank(rank: Option<&RankState>) -> String {
    match rank {
        Some(rank) => format!("{} {} RR", rank.tier_name, rank.points_in_tier),
        None => "unknown".to_string(),
    }
}
