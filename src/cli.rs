use clap::{Args, Parser, Subcommand};

use crate::api::LookupStrategy;

#[derive(Parser, Debug)]
#[command(author, version, about = "competitive rank tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Watch players and post a notification after every ranked match
    Watch(WatchArgs),
    /// Print a player's current rank and progress toward the target tier
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct WatchArgs {
    /// Players to track, as name#tag (repeatable or comma separated)
    #[arg(short, long = "player", env = "TRACKED_PLAYERS", value_delimiter = ',', required = true)]
    pub players: Vec<String>,

    /// Seconds between two polls of the same player
    #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Discord channel receiving the notifications
    #[arg(long, env = "DISCORD_CHANNEL_ID")]
    pub channel_id: Option<String>,

    /// Log updates instead of posting them
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    /// Player to look up, as name#tag
    #[arg(short, long)]
    pub player: String,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ApiArgs {
    /// Tier index progress is measured against (24 = Immortal 1)
    #[arg(short, long, default_value_t = 24)]
    pub target_tier: u32,

    /// Stats API region
    #[arg(short, long, default_value = "eu")]
    pub region: String,

    /// How players are looked up in the stats API
    #[arg(long, value_enum, default_value_t = LookupStrategy::NameTag)]
    pub lookup: LookupStrategy,
}
