use std::collections::HashSet;

use anyhow::Result;

use crate::domain::PlayerIdentity;
use crate::errors::StartupError;

/// Build the tracked player set from `name#tag` arguments.
///
/// Riot IDs are case-insensitive, so `Zawn#7627` and `zawn#7627` are the
/// same player and rejected as a duplicate.
pub fn tracked_players(entries: &[String]) -> Result<Vec<PlayerIdentity>> {
    if entries.is_empty() {
        return Err(StartupError::NoPlayers.into());
    }

    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(entries.len());

    for entry in entries {
        let identity: PlayerIdentity = entry.parse()?;
        if !seen.insert(identity.to_string().to_lowercase()) {
            return Err(StartupError::DuplicatePlayer(identity.to_string()).into());
        }
        players.push(identity);
    }

    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tracked_players() {
        let players = tracked_players(&entries(&["zawn#7627", "other#EUW"])).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[1], PlayerIdentity::new("other", "EUW"));
    }

    #[test]
    fn test_tracked_players_rejects_duplicates() {
        let err = tracked_players(&entries(&["zawn#7627", "ZAWN#7627"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StartupError>(),
            Some(StartupError::DuplicatePlayer(_))
        ));
    }

    #[test]
    fn test_tracked_players_rejects_empty_set() {
        let err = tracked_players(&[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StartupError>(),
            Some(StartupError::NoPlayers)
        ));
    }
}
