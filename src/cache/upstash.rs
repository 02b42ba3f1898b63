//! Redis cache layer over the Upstash REST API.
//!
//! Each command is a JSON array POSTed to the database URL with a bearer
//! token. Replies are `{"result": ...}` on success and `{"error": "..."}`
//! when Redis rejects the command.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheLayer, KeyTtl};
use crate::error::{AppError, AppResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

// == Upstash Cache ==
/// Cache layer client for an Upstash Redis database.
#[derive(Debug, Clone)]
pub struct UpstashCache {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl UpstashCache {
    /// Builds a client for the database at `url`, authenticating with `token`.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> AppResult<Self> {
        let url = url.into().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(AppError::Config("Upstash URL cannot be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            token: token.into(),
        })
    }

    async fn command(&self, args: &[&str]) -> AppResult<Value> {
        debug!(command = args.first().copied().unwrap_or_default(), "upstash command");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let reply: CommandReply = serde_json::from_str(&body).map_err(|_| {
            AppError::Cache(format!("unexpected Upstash response ({status}): {body}"))
        })?;

        if let Some(message) = reply.error {
            return Err(AppError::Cache(message));
        }
        if !status.is_success() {
            return Err(AppError::Cache(format!("Upstash returned {status}")));
        }

        Ok(reply.result.unwrap_or(Value::Null))
    }
}

fn integer_reply(value: &Value) -> AppResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| AppError::Cache(format!("expected integer reply, got {value}")))
}

#[async_trait]
impl CacheLayer for UpstashCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Ok(Some(other.to_string())),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.command(&["SET", key, value.as_str()]).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool> {
        let seconds = seconds.to_string();
        let reply = self.command(&["EXPIRE", key, seconds.as_str()]).await?;
        Ok(integer_reply(&reply)? == 1)
    }

    async fn ttl(&self, key: &str) -> AppResult<KeyTtl> {
        let reply = self.command(&["TTL", key]).await?;
        Ok(match integer_reply(&reply)? {
            -2 => KeyTtl::Missing,
            -1 => KeyTtl::Persistent,
            seconds => KeyTtl::Expires(seconds.max(0) as u64),
        })
    }

    async fn set_ex(&self, key: &str, value: String, seconds: u64) -> AppResult<()> {
        let seconds = seconds.to_string();
        self.command(&["SET", key, value.as_str(), "EX", seconds.as_str()])
            .await?;
        Ok(())
    }
}
