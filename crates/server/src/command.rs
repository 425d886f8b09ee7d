//! Command channel to the game server
//!
//! The gate ejects players by sending one console command line. Two
//! transports exist in the wider system (a persistent RCON session and a
//! one-shot authenticated HTTPS console call); the gate depends only on
//! the success/failure contract, and this crate ships the one-shot HTTP
//! transport.

use async_trait::async_trait;
use serde::Serialize;

use fraggate_core::GateConfig;

use crate::error::{Result, ServerError};

/// Narrow contract to the game-server console.
#[async_trait]
pub trait CommandChannel: Send + Sync {
    /// Send one console command line.
    async fn send(&self, command: &str) -> Result<()>;
}

/// One-shot authenticated HTTPS console call.
pub struct HttpConsole {
    http: reqwest::Client,
    url: String,
    password: Option<String>,
}

#[derive(Serialize)]
struct ConsoleBody<'a> {
    cmd: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

impl HttpConsole {
    /// Build from config; `None` when no console URL is configured.
    pub fn from_config(config: &GateConfig) -> Result<Option<Self>> {
        let Some(url) = config.console_url.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Some(Self {
            http,
            url,
            password: config.console_password.clone(),
        }))
    }
}

#[async_trait]
impl CommandChannel for HttpConsole {
    async fn send(&self, command: &str) -> Result<()> {
        let body = ConsoleBody {
            cmd: command,
            password: self.password.as_deref(),
        };
        let resp = self.http.post(&self.url).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(ServerError::Command(format!(
                "console returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Stand-in used when no console transport is configured; every send
/// fails, which the gate records as a `command_failed` outcome.
pub struct DisabledConsole;

#[async_trait]
impl CommandChannel for DisabledConsole {
    async fn send(&self, _command: &str) -> Result<()> {
        Err(ServerError::CommandNotConfigured)
    }
}
