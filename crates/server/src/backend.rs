//! Backend persistence/RPC client
//!
//! The backend owns the verification records, the XP ledger, and the
//! access-event log. The gate only needs the narrow contract below; the
//! HTTP implementation keeps every call on a bounded timeout so a slow
//! backend cannot stall the webhook response.

use async_trait::async_trait;
use serde::Serialize;

use fraggate_core::{GateConfig, SteamId64};

use crate::error::{Result, ServerError};
use crate::gate::AccessOutcome;

/// A kill to be recorded in the backend's match ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillRecord {
    pub match_id: u64,
    pub killer: SteamId64,
    pub victim: SteamId64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<SteamId64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
}

/// Narrow contract to the backend service.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Is this identity verified? Transport and parse failures are errors;
    /// the caller resolves them to the configured fallback.
    async fn is_verified(&self, identity: SteamId64) -> Result<bool>;

    /// Record an access decision. Fire-and-forget at the call site.
    async fn record_access(&self, identity: SteamId64, outcome: &AccessOutcome) -> Result<()>;

    /// Credit XP to an identity. Fire-and-forget at the call site.
    async fn award_xp(
        &self,
        identity: SteamId64,
        amount: u32,
        reason: &str,
        match_id: u64,
    ) -> Result<()>;

    /// Record a kill in the match ledger. Fire-and-forget at the call site.
    async fn record_kill(&self, kill: &KillRecord) -> Result<()>;
}

/// reqwest-backed implementation of [`BackendClient`].
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &GateConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            token: config.backend_token.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, &url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[derive(serde::Deserialize)]
struct VerificationResponse {
    verified: bool,
}

#[derive(Serialize)]
struct AccessEventBody<'a> {
    steam_id: SteamId64,
    outcome: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct XpBody<'a> {
    steam_id: SteamId64,
    amount: u32,
    reason: &'a str,
    match_id: u64,
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn is_verified(&self, identity: SteamId64) -> Result<bool> {
        let path = format!("/players/{identity}/verification");
        let resp = self.request(reqwest::Method::GET, &path).send().await?;

        if !resp.status().is_success() {
            return Err(ServerError::Backend(format!(
                "verification lookup returned {}",
                resp.status()
            )));
        }

        let body: VerificationResponse = resp.json().await?;
        Ok(body.verified)
    }

    async fn record_access(&self, identity: SteamId64, outcome: &AccessOutcome) -> Result<()> {
        let body = AccessEventBody {
            steam_id: identity,
            outcome: outcome.decision.as_str(),
            reason: outcome.reason,
        };
        let resp = self
            .request(reqwest::Method::POST, "/access-events")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ServerError::Backend(format!(
                "access record returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    async fn award_xp(
        &self,
        identity: SteamId64,
        amount: u32,
        reason: &str,
        match_id: u64,
    ) -> Result<()> {
        let body = XpBody {
            steam_id: identity,
            amount,
            reason,
            match_id,
        };
        let resp = self
            .request(reqwest::Method::POST, "/xp")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ServerError::Backend(format!(
                "xp award returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    async fn record_kill(&self, kill: &KillRecord) -> Result<()> {
        let resp = self
            .request(reqwest::Method::POST, "/kills")
            .json(kill)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ServerError::Backend(format!(
                "kill record returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
