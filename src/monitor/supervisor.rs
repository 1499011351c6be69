use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorSettings;
use crate::domain::{PlayerIdentity, RankUpdateEvent};
use crate::monitor::player::{MonitorExit, PlayerMonitor};
use crate::monitor::SourceResolver;
use crate::notifier::Notifier;

/// Runs one monitor task per tracked player and routes their events to the
/// notifier. A failing monitor never affects the others.
pub struct MonitorSupervisor {
    players: Vec<PlayerIdentity>,
    resolver: Arc<dyn SourceResolver>,
    notifier: Arc<dyn Notifier>,
    settings: MonitorSettings,
}

impl MonitorSupervisor {
    pub fn new(
        players: Vec<PlayerIdentity>,
        resolver: Arc<dyn SourceResolver>,
        notifier: Arc<dyn Notifier>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            players,
            resolver,
            notifier,
            settings,
        }
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// Fails only when the notification destination is unavailable.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        self.notifier.verify_destination().await?;

        info!("Monitoring {} player(s)", self.players.len());

        let (tx, mut rx) = mpsc::channel(self.settings.event_buffer.max(1));
        let mut tasks = self.spawn_monitors(&tx, &shutdown);
        drop(tx);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => self.deliver(&event).await,
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::log_exit(joined);
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            Self::log_exit(joined);
        }

        if !shutdown.is_cancelled() {
            error!("All player monitors have stopped; idling until shutdown");
            shutdown.cancelled().await;
        }

        info!("Supervisor stopped");
        Ok(())
    }

    fn spawn_monitors(
        &self,
        events: &mpsc::Sender<RankUpdateEvent>,
        shutdown: &CancellationToken,
    ) -> JoinSet<(PlayerIdentity, MonitorExit)> {
        let mut tasks = JoinSet::new();

        for identity in &self.players {
            tasks.spawn(run_player(
                identity.clone(),
                Arc::clone(&self.resolver),
                self.settings,
                events.clone(),
                shutdown.child_token(),
            ));
        }

        tasks
    }

    async fn deliver(&self, event: &RankUpdateEvent) {
        if let Err(e) = self.notifier.notify(event).await {
            error!("[{}] Failed to deliver rank update: {:#}", event.identity, e);
        }
    }

    fn log_exit(joined: Result<(PlayerIdentity, MonitorExit), tokio::task::JoinError>) {
        match joined {
            Ok((identity, MonitorExit::Cancelled)) => info!("[{}] Monitor stopped", identity),
            Ok((identity, MonitorExit::ResolutionFailed(e))) => {
                error!("[{}] Monitor terminated: {}", identity, e)
            }
            Ok((identity, MonitorExit::ChannelClosed)) => {
                warn!("[{}] Monitor stopped: event channel closed", identity)
            }
            Err(e) => error!("Monitor task aborted: {}", e),
        }
    }
}

/// Whole lifetime of one player's monitor: resolve, baseline, poll
async fn run_player(
    identity: PlayerIdentity,
    resolver: Arc<dyn SourceResolver>,
    settings: MonitorSettings,
    events: mpsc::Sender<RankUpdateEvent>,
    cancel: CancellationToken,
) -> (PlayerIdentity, MonitorExit) {
    let started = tokio::select! {
        biased;
        _ = cancel.cancelled() => return (identity, MonitorExit::Cancelled),
        started = PlayerMonitor::start(identity.clone(), resolver.as_ref(), &settings) => started,
    };

    let exit = match started {
        Ok(monitor) => monitor.run(&settings, events, cancel).await,
        Err(e) => MonitorExit::ResolutionFailed(e),
    };

    (identity, exit)
}
