use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generates an orchestration script for docker-compose services discovered by label
#[derive(Parser, Debug)]
#[command(
    name = "dockermi",
    about = "Generates a dockermi.sh script to manage docker-compose services",
    version,
    author,
    long_about = "dockermi walks a directory tree for docker-compose files, selects the \
                  services labeled with dockermi.order and dockermi.active, and writes an \
                  executable dockermi.sh that starts them in ascending order and stops \
                  them in the exact reverse.\n\n\
                  Examples:\n  \
                  dockermi\n  \
                  dockermi --force\n  \
                  dockermi create storage\n  \
                  dockermi up\n  \
                  dockermi down --remove-orphans"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the implicit generate command when no subcommand is given
    #[command(flatten)]
    pub generate: GenerateArgs,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Scan for docker-compose services and write the orchestration script",
        long_about = "Walks the target directory for docker-compose files and writes \
                      dockermi.sh next to them.\n\n\
                      Examples:\n  \
                      dockermi generate\n  \
                      dockermi generate /srv/stacks --force"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Generate a per-group script for one dockermi.key value",
        long_about = "Groups discovered services by their dockermi.key label and writes \
                      dockermi-<KEY>.sh for the requested group into ~/.dockermi.\n\n\
                      Examples:\n  \
                      dockermi create storage\n  \
                      dockermi create misc --default-key misc"
    )]
    Create(CreateArgs),

    #[command(about = "Run the generated script with the 'up' selector")]
    Up(RunArgs),

    #[command(about = "Run the generated script with the 'down' selector")]
    Down(RunArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PATH",
        help = "Directory to scan for docker-compose files (defaults to current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(
        long,
        help = "Include services even when their dockermi labels are missing or inactive"
    )]
    pub force: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the script to FILE instead of <PATH>/dockermi.sh"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(value_name = "KEY", help = "Grouping key (dockermi.key label value)")]
    pub key: String,

    #[arg(
        value_name = "PATH",
        help = "Directory to scan for docker-compose files (defaults to current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "KEY",
        help = "Assign this grouping key to services without a dockermi.key label"
    )]
    pub default_key: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Extra arguments forwarded to the script's docker-compose calls"
    )]
    pub args: Vec<String>,
}
