use serde_json::Value;
use std::fmt;

pub const DEPLOYED_PLACEHOLDER: &str = "(Render deployed; check dashboard)";
pub const FAILED_PLACEHOLDER: &str = "(Render deploy failed; check dashboard)";
pub const TIMEOUT_PLACEHOLDER: &str = "(Timed out waiting for Render)";

/// Deploy state derived from the provider's status string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStatus {
    Pending,
    Live,
    Failed,
}

impl DeployStatus {
    /// Maps a provider status; anything not terminal counts as pending
    pub fn from_provider(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "live" | "succeeded" => DeployStatus::Live,
            "failed" | "canceled" | "deactivated" => DeployStatus::Failed,
            _ => DeployStatus::Pending,
        }
    }
}

/// One status poll, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: DeployStatus,
    /// Status string as reported
    pub raw_status: String,
    pub service_urls: Vec<String>,
}

impl StatusReport {
    /// Reads `{status, services: [{service: {dashboardUrl?, serviceDetails: {url?}}}]}`
    pub fn from_json(value: &Value) -> Self {
        let raw_status = value
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or_default()
            .to_string();

        let mut service_urls = Vec::new();
        let services = value.get("services").and_then(|s| s.as_array());
        for entry in services.into_iter().flatten() {
            let Some(service) = entry.get("service") else {
                continue;
            };
            if let Some(url) = service.get("dashboardUrl").and_then(|u| u.as_str()) {
                service_urls.push(url.to_string());
            }
            if let Some(url) = service
                .get("serviceDetails")
                .and_then(|d| d.get("url"))
                .and_then(|u| u.as_str())
            {
                service_urls.push(url.to_string());
            }
        }

        Self {
            status: DeployStatus::from_provider(&raw_status),
            raw_status,
            service_urls,
        }
    }
}

/// Terminal result of waiting on a deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Live { urls: Vec<String> },
    Failed { status: String },
    TimedOut,
}

impl DeployOutcome {
    /// Lines for the run summary; placeholders stand in when there is no URL to show
    pub fn display_urls(&self) -> Vec<String> {
        match self {
            DeployOutcome::Live { urls } if !urls.is_empty() => urls.clone(),
            DeployOutcome::Live { .. } => vec![DEPLOYED_PLACEHOLDER.to_string()],
            DeployOutcome::Failed { .. } => vec![FAILED_PLACEHOLDER.to_string()],
            DeployOutcome::TimedOut => vec![TIMEOUT_PLACEHOLDER.to_string()],
        }
    }
}

impl fmt::Display for DeployOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployOutcome::Live { urls } => write!(f, "live ({} url(s))", urls.len()),
            DeployOutcome::Failed { status } => write!(f, "failed ({})", status),
            DeployOutcome::TimedOut => f.write_str("timed out"),
        }
    }
}
