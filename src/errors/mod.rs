use thiserror::Error;

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Outcome of resolving a configured player into a lookup strategy
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The stats API has no record of this player
    #[error("player record not found")]
    NotFound,
    /// The lookup could not be completed right now
    #[error("player lookup unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

impl ResolveError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::NotFound)
    }
}

/// Failures that stop the whole supervisor before any monitor starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("destination channel {channel} is unavailable: {reason}")]
    DestinationUnavailable { channel: String, reason: String },
    #[error("no players configured")]
    NoPlayers,
    #[error("player {0} is configured more than once")]
    DuplicatePlayer(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityParseError {
    #[error("'{0}' is not of the form name#tag")]
    MissingTag(String),
    #[error("'{0}' has an empty name or tag")]
    EmptyPart(String),
}
