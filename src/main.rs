use launchpad::cli::commands::{CliArgs, Commands};
use launchpad::cli::handlers::{handle_deploy, handle_plan, handle_push, handle_run};
use launchpad::util::logging::{init_from_env, init_logging, parse_level, LoggingConfig};
use launchpad::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("launchpad v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Run(run_args) => handle_run(run_args, args.quiet),
        Commands::Plan(plan_args) => handle_plan(plan_args, args.quiet),
        Commands::Push(push_args) => handle_push(push_args, args.quiet),
        Commands::Deploy(deploy_args) => handle_deploy(deploy_args, args.quiet),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        init_from_env();
        return;
    };

    init_logging(LoggingConfig::with_level(level));
}
