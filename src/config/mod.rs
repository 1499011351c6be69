pub mod players;
pub mod settings;

pub use players::tracked_players;
pub use settings::{ApiSettings, AppConfig, DiscordSettings, MonitorSettings};
