use super::error::PublishError;
use super::plan::{PublishPlan, SkipReason};
use crate::config::{ConfigError, LaunchpadConfig};
use crate::http::{HttpError, HttpRequest, HttpTransport};
use crate::secrets::SecretScanner;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Url;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Result of a create-repository call
///
/// `Assumed` means creation was refused (no permission, or the name is taken) and the URL
/// was synthesized from owner and name without checking that the repository exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    Created { url: String },
    Assumed { url: String },
}

impl RepoOutcome {
    pub fn url(&self) -> &str {
        match self {
            RepoOutcome::Created { url } | RepoOutcome::Assumed { url } => url,
        }
    }

    pub fn is_assumed(&self) -> bool {
        matches!(self, RepoOutcome::Assumed { .. })
    }
}

/// What a push transmitted and what it left out
#[derive(Debug, Clone, Default)]
pub struct PushReport {
    pub uploaded: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Repository API client for the hosted git service
pub struct GitHubPublisher {
    transport: Arc<dyn HttpTransport>,
    token: String,
    owner: String,
    api_url: String,
    branch: String,
}

impl GitHubPublisher {
    pub fn from_config(
        config: &LaunchpadConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ConfigError> {
        let (token, owner) = config.github_credentials()?;
        Ok(Self::new(
            transport,
            token.to_string(),
            owner.to_string(),
            config.github_api_url.clone(),
            config.github_branch.clone(),
        ))
    }

    pub fn new(
        transport: Arc<dyn HttpTransport>,
        token: String,
        owner: String,
        api_url: String,
        branch: String,
    ) -> Self {
        Self {
            transport,
            token,
            owner,
            api_url: api_url.trim_end_matches('/').to_string(),
            branch,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Web URL a repository is expected to live at
    pub fn expected_url(&self, name: &str) -> String {
        format!("https://github.com/{}/{}", self.owner, name)
    }

    fn request(&self, request: HttpRequest) -> HttpRequest {
        request
            .bearer(&self.token)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Creates `name` under the authenticated account
    ///
    /// A 403, or a 422 saying the name already exists, degrades to [`RepoOutcome::Assumed`]
    /// so the run can continue against a pre-existing repository.
    pub fn create_repo(&self, name: &str, private: bool) -> Result<RepoOutcome, PublishError> {
        let url = format!("{}/user/repos", self.api_url);
        let request = self
            .request(HttpRequest::post(&url))
            .json(json!({"name": name, "private": private, "auto_init": false}));

        match self.transport.send_checked(&request) {
            Ok(response) => {
                let html_url = response
                    .json_body(&url)
                    .ok()
                    .and_then(|v| v.get("html_url").and_then(|u| u.as_str()).map(str::to_string))
                    .unwrap_or_else(|| self.expected_url(name));
                info!(repo = name, url = %html_url, "Repository created");
                Ok(RepoOutcome::Created { url: html_url })
            }
            Err(HttpError::Status { status: 403, .. }) => {
                warn!(
                    repo = name,
                    "No permission to create repo; please create it manually and re-run"
                );
                Ok(RepoOutcome::Assumed {
                    url: self.expected_url(name),
                })
            }
            Err(HttpError::Status {
                status: 422,
                ref body,
                ..
            }) if body.contains("already exists") => {
                warn!(repo = name, "Repository already exists; pushing into it");
                Ok(RepoOutcome::Assumed {
                    url: self.expected_url(name),
                })
            }
            Err(source) => Err(PublishError::CreateRepo {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Uploads every publishable file under `root`, one commit per file
    ///
    /// Files are classified and pushed one at a time in walk order, so only the current
    /// file's content is held. A transport failure aborts the push, leaving earlier files in
    /// place; re-running overwrites by path.
    pub fn push_tree(
        &self,
        owner: &str,
        repo: &str,
        root: &Path,
        scanner: &dyn SecretScanner,
    ) -> Result<PushReport, PublishError> {
        let mut report = PushReport::default();

        for file in PublishPlan::walk(root, scanner) {
            let file = file?;
            if let Some(reason) = file.skip_reason {
                warn!(path = %file.rel_path, "Skipping {}", reason);
                report.skipped.push((file.rel_path, reason));
                continue;
            }
            if file.is_binary {
                info!(path = %file.rel_path, "Encoding binary file");
            }

            self.upload_file(owner, repo, &file.rel_path, &file.content)
                .map_err(|source| PublishError::Upload {
                    path: file.rel_path.clone(),
                    source,
                })?;
            report.uploaded.push(file.rel_path);
        }

        info!(
            uploaded = report.uploaded.len(),
            skipped = report.skipped.len(),
            "Push complete"
        );
        Ok(report)
    }

    /// Creates or replaces a single file on the configured branch
    pub fn upload_file(
        &self,
        owner: &str,
        repo: &str,
        rel_path: &str,
        content: &[u8],
    ) -> Result<(), HttpError> {
        let url = self.contents_url(owner, repo, rel_path)?;

        let mut body = json!({
            "message": format!("Add {}", rel_path),
            "content": BASE64.encode(content),
            "branch": self.branch,
        });
        if let Some(sha) = self.existing_sha(&url)? {
            body["sha"] = json!(sha);
        }

        debug!(path = rel_path, bytes = content.len(), "Uploading file");
        self.transport
            .send_checked(&self.request(HttpRequest::put(url.as_str())).json(body))?;
        Ok(())
    }

    /// Blob sha of the file currently on the branch, if any
    fn existing_sha(&self, url: &Url) -> Result<Option<String>, HttpError> {
        let mut lookup = url.clone();
        lookup.query_pairs_mut().append_pair("ref", &self.branch);

        let response = self
            .transport
            .send(&self.request(HttpRequest::get(lookup.as_str())))?;
        if response.status == 404 {
            return Ok(None);
        }
        let response = response.error_for_status(lookup.as_str())?;
        let sha = response
            .json_body(lookup.as_str())?
            .get("sha")
            .and_then(|s| s.as_str())
            .map(str::to_string);
        Ok(sha)
    }

    fn contents_url(&self, owner: &str, repo: &str, rel_path: &str) -> Result<Url, HttpError> {
        let invalid = |message: String| HttpError::Decode {
            url: self.api_url.clone(),
            message,
        };
        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents"])
            .extend(rel_path.split('/'));
        Ok(url)
    }
}
