pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod monitor;
pub mod notifier;
pub mod rank_scale;
pub mod services;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::{ApiArgs, CheckArgs, Command, WatchArgs};
use crate::config::settings::AppConfig;
use crate::config::tracked_players;
use crate::services::check::CheckService;
use crate::services::watch::WatchService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_watch(args: &WatchArgs) -> Result<()> {
    let players = tracked_players(&args.players)?;

    let mut config = build_config(&args.api);
    config.monitor.poll_interval = Duration::from_secs(args.interval_secs);
    config.discord.token = std::env::var("DISCORD_TOKEN").ok();
    config.discord.channel_id = args.channel_id.clone();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = WatchService::new(config, players, args.dry_run);
        service.run().await
    })
}

pub fn handle_check(args: &CheckArgs) -> Result<()> {
    let player = args.player.parse()?;
    let config = build_config(&args.api);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = CheckService::new(config, player);
        service.run().await
    })
}

fn build_config(api: &ApiArgs) -> AppConfig {
    let mut config = AppConfig::new();
    config.monitor.target_tier = api.target_tier;
    config.api.region = api.region.clone();
    config.api.lookup = api.lookup;
    config.api.api_key = std::env::var("HENRIK_API_KEY").ok();
    config
}
