pub mod player;
mod source;
pub mod supervisor;

pub use player::{MonitorExit, PlayerMonitor};
pub use source::{RankSource, SourceResolver};
pub use supervisor::MonitorSupervisor;
