pub mod models;
pub mod tiers;

pub use models::*;
pub use tiers::{tier_family, tier_name};
