use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::StatusCode;
use urlencoding::encode;

use crate::api::parsers;
use crate::api::sources::{LookupStrategy, NameTagSource, PuuidSource};
use crate::config::ApiSettings;
use crate::domain::PlayerIdentity;
use crate::errors::{ResolveError, fetch_context, parse_context};
use crate::http::AuthorizedClient;
use crate::monitor::{RankSource, SourceResolver};

/// Stats API client.
///
/// Holds the shared connection pool and hands out one [`RankSource`] per
/// player, built with the configured lookup strategy.
pub struct StatsClient {
    http: AuthorizedClient,
    base_url: String,
    region: String,
    platform: String,
    lookup: LookupStrategy,
}

impl StatsClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let http = AuthorizedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.api_key.as_deref(),
        )?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            region: settings.region.clone(),
            platform: settings.platform.clone(),
            lookup: settings.lookup,
        })
    }

    /// Look up the player's opaque id, distinguishing "no such player"
    /// from "could not ask right now"
    pub async fn resolve_puuid(&self, identity: &PlayerIdentity) -> Result<String, ResolveError> {
        let url = self.build_account_url(identity);
        debug!("Resolving {} via {}", identity, url);

        let response = self
            .http
            .get(&url)
            .await
            .with_context(|| fetch_context(&url))
            .map_err(ResolveError::Unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ResolveError::Unavailable(anyhow::anyhow!(
                "account lookup returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .with_context(|| parse_context("account response"))
            .map_err(ResolveError::Unavailable)?;

        parsers::parse_puuid(&data).ok_or_else(|| {
            ResolveError::Unavailable(anyhow::anyhow!(parse_context("account puuid")))
        })
    }

    fn build_source(&self, identity: &PlayerIdentity, puuid: &str) -> Arc<dyn RankSource> {
        match self.lookup {
            LookupStrategy::NameTag => Arc::new(NameTagSource::new(
                self.http.clone(),
                self.build_mmr_url(identity),
                self.build_history_url(identity),
            )),
            LookupStrategy::Puuid => Arc::new(PuuidSource::new(
                self.http.clone(),
                self.build_puuid_history_url(puuid),
            )),
        }
    }

    // --- Helper Methods ---

    fn build_account_url(&self, identity: &PlayerIdentity) -> String {
        format!(
            "{}/valorant/v1/account/{}/{}",
            self.base_url,
            encode(&identity.display_name),
            encode(&identity.tag_line)
        )
    }

    fn build_mmr_url(&self, identity: &PlayerIdentity) -> String {
        format!(
            "{}/valorant/v3/mmr/{}/{}/{}/{}",
            self.base_url,
            self.region,
            self.platform,
            encode(&identity.display_name),
            encode(&identity.tag_line)
        )
    }

    fn build_history_url(&self, identity: &PlayerIdentity) -> String {
        format!(
            "{}/valorant/v1/mmr-history/{}/{}/{}",
            self.base_url,
            self.region,
            encode(&identity.display_name),
            encode(&identity.tag_line)
        )
    }

    fn build_puuid_history_url(&self, puuid: &str) -> String {
        format!(
            "{}/valorant/v1/by-puuid/mmr-history/{}/{}",
            self.base_url,
            self.region,
            encode(puuid)
        )
    }
}

#[async_trait]
impl SourceResolver for StatsClient {
    async fn resolve(&self, identity: &PlayerIdentity) -> Result<Arc<dyn RankSource>, ResolveError> {
        let puuid = self.resolve_puuid(identity).await?;
        info!("Resolved {} ({:?} lookup)", identity, self.lookup);
        Ok(self.build_source(identity, &puuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(lookup: LookupStrategy) -> StatsClient {
        let settings = ApiSettings {
            base_url: "https://api.example.test/".to_string(),
            lookup,
            ..ApiSettings::default()
        };
        StatsClient::new(&settings).unwrap()
    }

    #[test]
    fn test_urls_are_encoded() {
        let client = client(LookupStrategy::NameTag);
        let identity = PlayerIdentity::new("Big Name", "EU#1");

        assert_eq!(
            client.build_account_url(&identity),
            "https://api.example.test/valorant/v1/account/Big%20Name/EU%231"
        );
        assert_eq!(
            client.build_mmr_url(&identity),
            "https://api.example.test/valorant/v3/mmr/eu/pc/Big%20Name/EU%231"
        );
        assert_eq!(
            client.build_history_url(&identity),
            "https://api.example.test/valorant/v1/mmr-history/eu/Big%20Name/EU%231"
        );
    }

    #[test]
    fn test_puuid_history_url() {
        let client = client(LookupStrategy::Puuid);
        assert_eq!(
            client.build_puuid_history_url("54942ced-1967"),
            "https://api.example.test/valorant/v1/by-puuid/mmr-history/eu/54942ced-1967"
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_is_not_fatal() {
        let settings = ApiSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ApiSettings::default()
        };
        let client = StatsClient::new(&settings).unwrap();

        let err = client
            .resolve(&PlayerIdentity::new("zawn", "7627"))
            .await
            .err()
            .unwrap();
        assert!(!err.is_fatal());
    }
}
