// src/types.rs
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status carried by every issued response.
pub const STATUS_SUCCESS: &str = "success";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Response {
    pub status: String,
    pub identifier: String,
}

impl Response {
    pub fn success(identifier: String) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            identifier,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// How responses are rendered on the output stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `<status> <identifier>` per line.
    Text,
}

impl OutputFormat {
    pub fn render(&self, resp: &Response) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(resp)?),
            OutputFormat::Text => Ok(format!("{} {}", resp.status, resp.identifier)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(anyhow!("unknown output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}
