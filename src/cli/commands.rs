use crate::config::LaunchpadConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scaffold, publish and deploy small web services with an LLM
#[derive(Parser, Debug)]
#[command(
    name = "launchpad",
    about = "Scaffold, publish and deploy small web services with an LLM",
    version,
    author,
    long_about = "launchpad asks a language model for a runnable project implementing a short \
                  description, writes it to disk, publishes it to a new GitHub repository with \
                  likely secrets left out, and optionally deploys it as a Render blueprint.\n\n\
                  Settings are read from the environment and an optional .env file; see \
                  LLM_PROVIDER, GITHUB_TOKEN, GITHUB_OWNER and RENDER_API_KEY."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress progress output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Plan, write, publish and deploy a project",
        long_about = "Runs every stage: plan with the model, write the files (or a minimal \
                      FastAPI scaffold when the model returns none), create the repository, \
                      push the tree, then deploy when RENDER_API_KEY is set.\n\n\
                      Examples:\n  \
                      launchpad run\n  \
                      launchpad run --name todo-api --spec \"todo app with tags\"\n  \
                      launchpad run --work-dir ./out --skip-deploy"
    )]
    Run(RunArgs),

    #[command(
        about = "Plan and write files without publishing",
        long_about = "Asks the model for a plan and writes the files under the working \
                      directory, falling back to the minimal scaffold for missing files.\n\n\
                      Examples:\n  \
                      launchpad plan --work-dir ./out"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Publish an existing working tree",
        long_about = "Creates the repository, writes .gitignore and .env.example, and pushes \
                      every publishable file.\n\n\
                      Examples:\n  \
                      launchpad push --work-dir ./out --name todo-api"
    )]
    Push(PushArgs),

    #[command(
        about = "Deploy an already published repository",
        long_about = "Triggers a Render blueprint deploy and waits until it is live, fails or \
                      times out.\n\n\
                      Examples:\n  \
                      launchpad deploy --name todo-api --branch main --timeout 900"
    )]
    Deploy(DeployArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, value_name = "DIR", help = "Working directory for generated files")]
    pub work_dir: Option<PathBuf>,

    #[arg(short = 'n', long, value_name = "NAME", help = "Repository and service name")]
    pub name: Option<String>,

    #[arg(short = 's', long, value_name = "TEXT", help = "Project description for the model")]
    pub spec: Option<String>,

    #[arg(long, help = "Stop after publishing even when a deploy key is set")]
    pub skip_deploy: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, value_name = "DIR", help = "Working directory for generated files")]
    pub work_dir: Option<PathBuf>,

    #[arg(short = 's', long, value_name = "TEXT", help = "Project description for the model")]
    pub spec: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PushArgs {
    #[arg(long, value_name = "DIR", help = "Directory to publish")]
    pub work_dir: Option<PathBuf>,

    #[arg(short = 'n', long, value_name = "NAME", help = "Repository name")]
    pub name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeployArgs {
    #[arg(short = 'b', long, value_name = "BRANCH", help = "Branch to deploy from")]
    pub branch: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Give up waiting after this many seconds")]
    pub timeout: Option<u64>,

    #[arg(short = 'n', long, value_name = "NAME", help = "Repository name")]
    pub name: Option<String>,
}

impl RunArgs {
    /// Command-line values override the environment
    pub fn apply(&self, config: &mut LaunchpadConfig) {
        override_work_dir(config, &self.work_dir);
        override_string(&mut config.project_name, &self.name);
        override_string(&mut config.project_spec, &self.spec);
    }
}

impl PlanArgs {
    pub fn apply(&self, config: &mut LaunchpadConfig) {
        override_work_dir(config, &self.work_dir);
        override_string(&mut config.project_spec, &self.spec);
    }
}

impl PushArgs {
    pub fn apply(&self, config: &mut LaunchpadConfig) {
        override_work_dir(config, &self.work_dir);
        override_string(&mut config.project_name, &self.name);
    }
}

impl DeployArgs {
    pub fn apply(&self, config: &mut LaunchpadConfig) {
        override_string(&mut config.render_branch, &self.branch);
        override_string(&mut config.project_name, &self.name);
        if let Some(timeout) = self.timeout {
            config.deploy_timeout_secs = timeout;
        }
    }
}

fn override_work_dir(config: &mut LaunchpadConfig, work_dir: &Option<PathBuf>) {
    if let Some(dir) = work_dir {
        config.work_dir = dir.clone();
    }
}

fn override_string(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
