use dockermi::cli::commands::{CliArgs, Commands};
use dockermi::cli::handlers::{handle_create, handle_generate, handle_run};
use dockermi::util::logging::{self, LoggingConfig};
use dockermi::{NAME, VERSION};

use clap::Parser;
use std::env;
use std::process;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Some(Commands::Generate(generate_args)) => handle_generate(generate_args, args.quiet),
        Some(Commands::Create(create_args)) => handle_create(create_args, args.quiet),
        Some(Commands::Up(run_args)) => handle_run("up", run_args),
        Some(Commands::Down(run_args)) => handle_run("down", run_args),
        None => handle_generate(&args.generate, args.quiet),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        logging::parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("DOCKERMI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        logging::parse_level(&level_str)
    };

    logging::init_logging(LoggingConfig::with_level(level));
}
