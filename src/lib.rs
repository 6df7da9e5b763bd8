//! launchpad - LLM-driven scaffolding, publishing and deployment of small web services
//!
//! A run turns a short project description into a deployed service:
//!
//! 1. [`scaffold`] asks a text-generation provider for `{plan, files}` and repairs an
//!    unparseable reply once.
//! 2. [`fs`] writes the files under the working root (or a minimal FastAPI scaffold when the
//!    model returned none) and generates `.gitignore` and `.env.example`.
//! 3. [`publish`] creates the remote repository and uploads the tree, leaving out env files,
//!    token-named paths and anything the [`secrets`] scanner flags.
//! 4. [`deploy`] triggers a blueprint deploy and polls it against a deadline.
//!
//! [`pipeline::Pipeline`] sequences the stages. Every network call goes through the
//! [`http::HttpTransport`] seam, so the whole pipeline runs against [`http::MockTransport`],
//! [`llm::MockCompletionClient`] and [`deploy::ManualClock`] in tests.
//!
//! # Example Usage
//!
//! ```no_run
//! use launchpad::{LaunchpadConfig, Pipeline, ProviderClient, ReqwestTransport};
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LaunchpadConfig::from_env()?;
//!     let transport = Arc::new(ReqwestTransport::with_timeout(config.request_timeout())?);
//!     let client = ProviderClient::from_config(&config, transport.clone())?;
//!
//!     let summary = Pipeline::new(config, transport)
//!         .with_client(Arc::new(client))
//!         .run(false)?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod deploy;
pub mod fs;
pub mod http;
pub mod llm;
pub mod pipeline;
pub mod progress;
pub mod publish;
pub mod scaffold;
pub mod secrets;
pub mod util;

pub use config::{ConfigError, LaunchpadConfig};
pub use deploy::{DeployError, DeployOutcome, RenderDeployer};
pub use fs::{FileMaterializer, MaterializeError};
pub use http::{HttpError, HttpTransport, MockTransport, ReqwestTransport};
pub use llm::{CompletionClient, MockCompletionClient, Provider, ProviderClient, ProviderError};
pub use pipeline::{Pipeline, PipelineError, RunSummary};
pub use publish::{GitHubPublisher, PublishError, RepoOutcome};
pub use scaffold::{FileEntry, PlanError, PlanParseError, ScaffoldPlanner, ScaffoldResult};
pub use secrets::{PatternScanner, SecretScanner};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
