use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::StatsClient;
use crate::config::settings::AppConfig;
use crate::domain::{PlayerIdentity, RankState, tier_name};
use crate::monitor::SourceResolver;
use crate::notifier::render::{progress_bar, rank_emoji};
use crate::rank_scale::TargetProgress;

/// One-shot lookup of a player's rank, printed to stdout
pub struct CheckService {
    config: AppConfig,
    player: PlayerIdentity,
}

impl CheckService {
    pub fn new(config: AppConfig, player: PlayerIdentity) -> Self {
        Self { config, player }
    }

    pub async fn run(&self) -> Result<()> {
        let client = StatsClient::new(&self.config.api)?;
        let source = client
            .resolve(&self.player)
            .await
            .with_context(|| format!("Could not resolve {}", self.player))?;

        let rank = source
            .fetch_current_rank()
            .await?
            .with_context(|| format!("No rank data available for {}", self.player))?;
        let last_match = source.fetch_latest_match_id().await?;

        println!("{}", self.render(&rank, last_match.as_deref()));
        Ok(())
    }

    fn render(&self, rank: &RankState, last_match: Option<&str>) -> String {
        let target_tier = self.config.monitor.target_tier;
        let mut lines = vec![
            format!("{} {}", rank_emoji(&rank.tier_name), self.player.to_string().bold()),
            format!(
                "  Rank:       {} — {} RR",
                rank.tier_name.cyan(),
                rank.points_in_tier
            ),
            format!("  Last match: {}", last_match.unwrap_or("none")),
        ];

        if let Some(map) = &rank.map_name {
            lines.push(format!("  Map:        {}", map));
        }

        let progress = match TargetProgress::evaluate(rank, target_tier) {
            TargetProgress::Reached => format!("{} or higher reached", tier_name(target_tier))
                .green()
                .to_string(),
            TargetProgress::Remaining { points, percent } => format!(
                "{} RR before {}  {} {}%",
                points.to_string().yellow(),
                tier_name(target_tier),
                progress_bar(percent),
                percent
            ),
        };
        lines.push(format!("  Target:     {}", progress));

        lines.join("\n")
    }
}
