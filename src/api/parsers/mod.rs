pub mod account;
pub mod history;
pub mod mmr;

pub use account::parse_puuid;
pub use history::{parse_latest_match_id, parse_latest_rank};
pub use mmr::parse_current_rank;
