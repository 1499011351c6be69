use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::api::parsers;
use crate::domain::RankState;
use crate::errors::{fetch_context, parse_context};
use crate::http::AuthorizedClient;
use crate::monitor::RankSource;

/// How a player's rank data is looked up.
///
/// Resolved once per player at startup, never switched mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LookupStrategy {
    /// Query by display name and tag line
    NameTag,
    /// Resolve the opaque player id once and query by it
    Puuid,
}

/// Looks up rank data directly by name and tag
pub struct NameTagSource {
    http: AuthorizedClient,
    mmr_url: String,
    history_url: String,
}

impl NameTagSource {
    pub fn new(http: AuthorizedClient, mmr_url: String, history_url: String) -> Self {
        Self {
            http,
            mmr_url,
            history_url,
        }
    }
}

#[async_trait]
impl RankSource for NameTagSource {
    async fn fetch_current_rank(&self) -> Result<Option<RankState>> {
        let data = fetch_json(&self.http, &self.mmr_url).await?;
        Ok(parsers::parse_current_rank(&data))
    }

    async fn fetch_latest_match_id(&self) -> Result<Option<String>> {
        let data = fetch_json(&self.http, &self.history_url).await?;
        Ok(parsers::parse_latest_match_id(&data))
    }
}

/// Looks up rank data through the player's resolved opaque id.
///
/// Both the rank and the match id come from the newest history entry, which
/// also carries the map the match was played on. The rank read alongside a
/// match id is kept for the following rank fetch, so a detected match costs
/// one request and the rank belongs to that match.
pub struct PuuidSource {
    http: AuthorizedClient,
    history_url: String,
    pending_rank: Mutex<Option<RankState>>,
}

impl PuuidSource {
    pub fn new(http: AuthorizedClient, history_url: String) -> Self {
        Self {
            http,
            history_url,
            pending_rank: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RankSource for PuuidSource {
    async fn fetch_current_rank(&self) -> Result<Option<RankState>> {
        if let Some(rank) = self.pending_rank.lock().await.take() {
            return Ok(Some(rank));
        }
        let data = fetch_json(&self.http, &self.history_url).await?;
        Ok(parsers::parse_latest_rank(&data))
    }

    async fn fetch_latest_match_id(&self) -> Result<Option<String>> {
        let data = fetch_json(&self.http, &self.history_url).await?;
        *self.pending_rank.lock().await = parsers::parse_latest_rank(&data);
        Ok(parsers::parse_latest_match_id(&data))
    }
}

/// GET a JSON document.
///
/// Non-2xx responses and unparsable bodies are errors carrying the status or
/// the parse failure; the caller logs them against the player.
pub(crate) async fn fetch_json(http: &AuthorizedClient, url: &str) -> Result<Value> {
    let response = http.get(url).await.with_context(|| fetch_context(url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Stats API returned {} for {}", status, url);
    }

    response
        .json::<Value>()
        .await
        .with_context(|| parse_context("stats API payload"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const HISTORY: &str = r#"{"status":200,"data":[{"currenttier":21,"currenttier_patched":"Ascendant 1","ranking_in_tier":10,"match_id":"b2c1-new","map":{"name":"Ascent"}}]}"#;

    /// Serve a fixed response on an ephemeral port, counting requests
    async fn serve(status: u16, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/history", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = stream.read(&mut request).await;
                counter.fetch_add(1, Ordering::SeqCst);

                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, hits)
    }

    fn http() -> AuthorizedClient {
        AuthorizedClient::new("RankTracker/test", 5, None).unwrap()
    }

    #[tokio::test]
    async fn test_detected_match_and_rank_share_one_request() {
        let (url, hits) = serve(200, HISTORY).await;
        let source = PuuidSource::new(http(), url);

        let match_id = source.fetch_latest_match_id().await.unwrap();
        let rank = source.fetch_current_rank().await.unwrap().unwrap();

        assert_eq!(match_id.as_deref(), Some("b2c1-new"));
        assert_eq!(rank.tier_index, 21);
        assert_eq!(rank.map_name.as_deref(), Some("Ascent"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // Without a preceding match fetch the rank is fetched directly
        source.fetch_current_rank().await.unwrap().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_status_is_reported_to_caller() {
        let (url, _) = serve(503, "{}").await;
        let source = NameTagSource::new(http(), url.clone(), url);

        let err = source.fetch_latest_match_id().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_reported_to_caller() {
        let (url, _) = serve(200, "<html>").await;
        assert!(fetch_json(&http(), &url).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_history_is_absent() {
        let (url, _) = serve(200, r#"{"status":200,"data":[]}"#).await;
        let source = PuuidSource::new(http(), url);

        assert!(source.fetch_latest_match_id().await.unwrap().is_none());
        assert!(source.fetch_current_rank().await.unwrap().is_none());
    }
}
