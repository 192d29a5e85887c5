//! HTTP client for the Telegram Bot API

use super::types::{ApiResponse, GetUpdatesParams, SendMessageParams, Update, User};
use anyhow::{Context, Result};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Headroom on top of the long-poll timeout before the request is abandoned
const REQUEST_SLACK: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Plain,
    Html,
}

impl ParseMode {
    fn as_param(self) -> Option<&'static str> {
        match self {
            ParseMode::Plain => None,
            ParseMode::Html => Some("HTML"),
        }
    }
}

pub struct TelegramClient {
    http: ReqwestClient,
    api_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(poll_timeout + REQUEST_SLACK)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // without_url keeps the token out of error messages and logs
        let response = self
            .http
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to send {} request", method))?;

        let status = response.status();
        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to parse {} response (HTTP {})", method, status))?;

        if !body.ok {
            anyhow::bail!(
                "{} failed ({}): {}",
                method,
                body.error_code.unwrap_or_else(|| i32::from(status.as_u16())),
                body.description.as_deref().unwrap_or("Unknown error")
            );
        }

        body.result
            .ok_or_else(|| anyhow::anyhow!("Missing result in {} response", method))
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(&self, offset: Option<i64>, timeout: Duration) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &params).await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str, parse_mode: ParseMode) -> Result<()> {
        let params = SendMessageParams {
            chat_id,
            text,
            parse_mode: parse_mode.as_param(),
        };
        let _: serde_json::Value = self.call("sendMessage", &params).await?;
        Ok(())
    }
}
