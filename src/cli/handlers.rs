//! Subcommand handlers
//!
//! Each handler loads configuration, applies command-line overrides and runs one slice of the
//! pipeline. Fatal errors are printed as `[x] <message>` on stderr and turn into exit code 1;
//! nothing else is printed after them.

use super::commands::{DeployArgs, PlanArgs, PushArgs, RunArgs};
use crate::config::LaunchpadConfig;
use crate::http::{HttpTransport, ReqwestTransport};
use crate::llm::ProviderClient;
use crate::pipeline::Pipeline;
use crate::progress::{ConsoleHandler, LoggingHandler, ProgressHandler};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

pub fn handle_run(args: &RunArgs, quiet: bool) -> i32 {
    exit_code(run(args, quiet))
}

pub fn handle_plan(args: &PlanArgs, quiet: bool) -> i32 {
    exit_code(plan(args, quiet))
}

pub fn handle_push(args: &PushArgs, quiet: bool) -> i32 {
    exit_code(push(args, quiet))
}

pub fn handle_deploy(args: &DeployArgs, quiet: bool) -> i32 {
    exit_code(deploy(args, quiet))
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("[x] {:#}", e);
            1
        }
    }
}

fn load_config(apply: impl FnOnce(&mut LaunchpadConfig)) -> Result<LaunchpadConfig> {
    let mut config = LaunchpadConfig::from_env()?;
    apply(&mut config);
    config.validate()?;
    debug!("{}", config);
    Ok(config)
}

fn progress_handler(quiet: bool) -> Arc<dyn ProgressHandler> {
    if quiet {
        Arc::new(LoggingHandler)
    } else {
        Arc::new(ConsoleHandler)
    }
}

fn transport(config: &LaunchpadConfig) -> Result<Arc<dyn HttpTransport>> {
    let transport = ReqwestTransport::with_timeout(config.request_timeout())
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(transport))
}

/// Pipeline with a provider client; fails before any network call when its key is missing
fn planning_pipeline(config: LaunchpadConfig, quiet: bool) -> Result<Pipeline> {
    let transport = transport(&config)?;
    let client = ProviderClient::from_config(&config, transport.clone())?;
    Ok(Pipeline::new(config, transport)
        .with_client(Arc::new(client))
        .with_progress(progress_handler(quiet)))
}

fn run(args: &RunArgs, quiet: bool) -> Result<()> {
    let config = load_config(|c| args.apply(c))?;
    config.github_credentials()?;

    let summary = planning_pipeline(config, quiet)?.run(args.skip_deploy)?;
    println!("\n{}", summary);
    Ok(())
}

fn plan(args: &PlanArgs, quiet: bool) -> Result<()> {
    let config = load_config(|c| args.apply(c))?;

    let outcome = planning_pipeline(config, quiet)?.plan()?;
    println!("\nPlan:\n{}\n", outcome.plan);
    for path in &outcome.written {
        println!("  {}", path);
    }
    Ok(())
}

fn push(args: &PushArgs, quiet: bool) -> Result<()> {
    let config = load_config(|c| args.apply(c))?;
    config.github_credentials()?;

    let transport = transport(&config)?;
    let outcome = Pipeline::new(config, transport)
        .with_progress(progress_handler(quiet))
        .publish()?;
    println!("GitHub: {}", outcome.repo.url());
    Ok(())
}

fn deploy(args: &DeployArgs, quiet: bool) -> Result<()> {
    let config = load_config(|c| args.apply(c))?;
    if !config.deploy_enabled() {
        anyhow::bail!("Missing RENDER_API_KEY in environment");
    }
    let branch = config.render_branch.clone();

    let transport = transport(&config)?;
    let outcome = Pipeline::new(config, transport)
        .with_progress(progress_handler(quiet))
        .deploy(&branch)?;
    if let Some(outcome) = outcome {
        for url in outcome.display_urls() {
            println!("Live: {}", url);
        }
    }
    Ok(())
}
