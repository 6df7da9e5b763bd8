use super::error::PipelineError;
use super::summary::RunSummary;
use crate::config::{ConfigError, LaunchpadConfig};
use crate::deploy::{Clock, DeployError, DeployOutcome, RenderDeployer, SystemClock};
use crate::fs::{write_env_example, write_gitignore, FileMaterializer};
use crate::http::HttpTransport;
use crate::llm::CompletionClient;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::publish::{GitHubPublisher, PushReport, RepoOutcome};
use crate::scaffold::{minimal_scaffold, ScaffoldPlanner};
use crate::secrets::{PatternScanner, SecretScanner};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What the plan stage left on disk
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: String,
    /// Normalized paths written under the working root
    pub written: Vec<String>,
    /// The fallback scaffold was used because the model returned no files
    pub fallback: bool,
}

/// What the publish stage produced
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub repo: RepoOutcome,
    pub report: PushReport,
}

/// Sequences the stages of a run against one immutable configuration
///
/// Every stage blocks the calling thread. The first fatal error stops the run.
pub struct Pipeline {
    config: LaunchpadConfig,
    client: Option<Arc<dyn CompletionClient>>,
    transport: Arc<dyn HttpTransport>,
    scanner: Box<dyn SecretScanner>,
    clock: Arc<dyn Clock>,
    progress: Arc<dyn ProgressHandler>,
}

impl Pipeline {
    /// A pipeline without a completion client can publish and deploy but not plan
    pub fn new(config: LaunchpadConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            client: None,
            transport,
            scanner: Box::new(PatternScanner::new()),
            clock: Arc::new(SystemClock::new()),
            progress: Arc::new(NoOpHandler),
        }
    }

    pub fn with_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_scanner(mut self, scanner: Box<dyn SecretScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    fn emit(&self, event: ProgressEvent) {
        self.progress.on_progress(&event);
    }

    /// Runs every stage and returns the summary
    ///
    /// Repository credentials are checked before the first network call. The deploy stage
    /// runs only when a deploy key is configured and `skip_deploy` is false.
    pub fn run(&self, skip_deploy: bool) -> Result<RunSummary, PipelineError> {
        let start = Instant::now();
        let result = self.run_stages(skip_deploy);

        match &result {
            Ok(_) => self.emit(ProgressEvent::Completed {
                total_time: start.elapsed(),
            }),
            Err(e) => {
                warn!(stage = e.stage(), "Run aborted");
                self.emit(ProgressEvent::Failed {
                    error: e.to_string(),
                })
            }
        }
        result
    }

    fn run_stages(&self, skip_deploy: bool) -> Result<RunSummary, PipelineError> {
        self.config.github_credentials()?;

        let planned = self.plan()?;
        let published = self.publish()?;
        let deploy = if skip_deploy {
            self.emit(ProgressEvent::DeploySkipped {
                reason: "Deploy disabled on the command line".to_string(),
            });
            None
        } else {
            self.deploy(&self.config.render_branch)?
        };

        Ok(RunSummary {
            plan: planned.plan,
            repo_url: published.repo.url().to_string(),
            repo_assumed: published.repo.is_assumed(),
            uploaded: published.report.uploaded.len(),
            skipped: published.report.skipped.len(),
            deploy,
        })
    }

    /// Asks the model for a scaffold and writes it under the working root
    ///
    /// When the model returns no files, the fallback scaffold is written for the paths that
    /// do not exist yet.
    pub fn plan(&self) -> Result<PlanOutcome, PipelineError> {
        let client = self.client.as_deref().ok_or_else(|| {
            ConfigError::MissingVariable(self.config.provider.api_key_var().to_string())
        })?;
        let start = Instant::now();
        self.emit(ProgressEvent::PlanningStarted {
            project: self.config.project_name.clone(),
        });

        let result = ScaffoldPlanner::new(client)
            .with_progress(self.progress.as_ref())
            .plan(&self.config.project_spec)?;
        self.emit(ProgressEvent::PlanReady {
            files: result.files.len(),
            elapsed: start.elapsed(),
        });

        let materializer = FileMaterializer::new(&self.config.work_dir);
        if result.needs_fallback() {
            let written = materializer.write_missing(&minimal_scaffold(&self.config.project_name))?;
            self.emit(ProgressEvent::FallbackScaffold {
                written: written.len(),
            });
            return Ok(PlanOutcome {
                plan: result.plan,
                written,
                fallback: true,
            });
        }

        materializer.write(&result.files)?;
        self.emit(ProgressEvent::FilesWritten {
            count: result.files.len(),
        });
        let written = result.paths().into_iter().map(str::to_string).collect();
        Ok(PlanOutcome {
            plan: result.plan,
            written,
            fallback: false,
        })
    }

    /// Creates the repository, writes the safety files and pushes the working tree
    pub fn publish(&self) -> Result<PublishOutcome, PipelineError> {
        let publisher = GitHubPublisher::from_config(&self.config, self.transport.clone())?;
        let name = self.config.project_name.as_str();
        let root = self.config.work_dir.as_path();

        self.emit(ProgressEvent::PublishStarted {
            repo: name.to_string(),
        });
        let repo = publisher.create_repo(name, self.config.github_private)?;
        if repo.is_assumed() {
            self.emit(ProgressEvent::RepoAssumed {
                url: repo.url().to_string(),
            });
        }

        write_gitignore(root)?;
        if let Some(path) = write_env_example(root)? {
            debug!(path = %path.display(), "Environment example written");
        }

        let report = publisher.push_tree(publisher.owner(), name, root, self.scanner.as_ref())?;
        for (path, reason) in &report.skipped {
            self.emit(ProgressEvent::FileSkipped {
                path: path.clone(),
                reason: reason.to_string(),
            });
        }
        self.emit(ProgressEvent::PushComplete {
            uploaded: report.uploaded.len(),
            skipped: report.skipped.len(),
        });
        self.emit(ProgressEvent::RepoReady {
            url: repo.url().to_string(),
        });

        Ok(PublishOutcome { repo, report })
    }

    /// Triggers a deploy of `branch` and waits for it
    ///
    /// Returns `None` when no deploy key is configured or the trigger reply carries no id.
    pub fn deploy(&self, branch: &str) -> Result<Option<DeployOutcome>, PipelineError> {
        let Some(deployer) = RenderDeployer::from_config(&self.config, self.transport.clone())
        else {
            self.emit(ProgressEvent::DeploySkipped {
                reason: "No Render API key provided".to_string(),
            });
            return Ok(None);
        };
        let deployer = deployer.with_clock(self.clock.clone());
        let owner = self
            .config
            .github_owner
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVariable("GITHUB_OWNER".to_string()))?;

        let deploy_id = match deployer.trigger(owner, &self.config.project_name, branch) {
            Ok(id) => id,
            Err(DeployError::MissingId { body }) => {
                warn!(body = %body, "Deploy trigger returned no id; not polling");
                self.emit(ProgressEvent::DeploySkipped {
                    reason: "Render returned no deploy id".to_string(),
                });
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        self.emit(ProgressEvent::DeployStarted {
            deploy_id: deploy_id.clone(),
        });

        let start = self.clock.now();
        let outcome = deployer.poll(&deploy_id, self.config.deploy_timeout())?;
        info!(deploy_id = %deploy_id, outcome = %outcome, "Deploy stage finished");
        self.emit(ProgressEvent::DeployFinished {
            outcome: outcome.to_string(),
            elapsed: self.clock.now().saturating_sub(start),
        });
        Ok(Some(outcome))
    }
}
