//! Command handlers
//!
//! Each handler resolves its inputs, drives the discovery and synthesis
//! layers, and maps the outcome to a process exit code. User-facing status
//! goes through [`crate::cli::output`]; diagnostics go through `tracing`.

use crate::cli::commands::{CreateArgs, GenerateArgs, RunArgs};
use crate::cli::output;
use crate::config::{DockermiConfig, ScanOptions};
use crate::discovery::ServiceScanner;
use crate::script;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{error, info};

/// Scans for services and writes the orchestration script.
pub fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    match generate(args, quiet) {
        Ok(()) => 0,
        Err(err) => {
            error!("Failed to generate orchestration script: {:#}", err);
            1
        }
    }
}

/// Generates a per-group script for one grouping key.
pub fn handle_create(args: &CreateArgs, quiet: bool) -> i32 {
    match create(args, quiet) {
        Ok(()) => 0,
        Err(err) => {
            error!("Failed to create grouped script: {:#}", err);
            1
        }
    }
}

/// Runs the previously generated script with the given selector.
pub fn handle_run(verb: &str, args: &RunArgs) -> i32 {
    match run_script(verb, args) {
        Ok(code) => code,
        Err(err) => {
            error!("Failed to run orchestration script: {:#}", err);
            1
        }
    }
}

fn generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let config = DockermiConfig::default();
    config.validate().context("invalid configuration")?;

    let project_dir = resolve_project_dir(args.project_dir.clone())?;
    let scanner = ServiceScanner::new(project_dir)?.with_options(ScanOptions {
        force_include: args.force,
        default_group_key: None,
    });

    let records = scanner.scan()?;
    if records.is_empty() {
        if !quiet {
            output::notice("No docker-compose services found within this folder");
        }
        return Ok(());
    }

    let script_path = match &args.output {
        Some(path) => path.clone(),
        None => scanner.root().join(&config.script_name),
    };

    write_with_progress(&script_path, &records, &config, quiet)?;

    info!(
        script = %script_path.display(),
        services = records.len(),
        "Orchestration script generated"
    );
    if !quiet {
        output::success(&format!("Generated script: {}", script_path.display()));
        output::hint(&format!(
            "You can now run ./{} up or ./{} down",
            config.script_name, config.script_name
        ));
    }

    Ok(())
}

fn create(args: &CreateArgs, quiet: bool) -> Result<()> {
    if args.key.trim().is_empty() {
        bail!("grouping key must not be empty");
    }

    let config = DockermiConfig::default();
    config.validate().context("invalid configuration")?;

    let project_dir = resolve_project_dir(args.project_dir.clone())?;
    let scanner = ServiceScanner::new(project_dir)?.with_options(ScanOptions {
        force_include: false,
        default_group_key: args.default_key.clone(),
    });

    let mut groups = scanner.scan_grouped()?;
    let records = groups
        .remove(&args.key)
        .with_context(|| format!("no services found for key: {}", args.key))?;

    let scripts_dir = config.scripts_dir()?;
    fs::create_dir_all(scripts_dir)
        .with_context(|| format!("failed to create {}", scripts_dir.display()))?;

    let script_path = scripts_dir.join(format!("dockermi-{}.sh", args.key));
    write_with_progress(&script_path, &records, &config, quiet)?;

    info!(
        script = %script_path.display(),
        key = %args.key,
        services = records.len(),
        "Grouped orchestration script generated"
    );
    if !quiet {
        output::success(&format!("Generated script: {}", script_path.display()));
    }

    Ok(())
}

fn run_script(verb: &str, args: &RunArgs) -> Result<i32> {
    let config = DockermiConfig::default();
    config.validate().context("invalid configuration")?;

    let current_dir = env::current_dir().context("failed to resolve current directory")?;
    let script_path = current_dir.join(&config.script_name);
    if !script_path.exists() {
        bail!(
            "{} not found in the current directory; run `dockermi` first",
            config.script_name
        );
    }

    info!(script = %script_path.display(), verb, "Running orchestration script");

    let status = Command::new("bash")
        .arg(&script_path)
        .arg(verb)
        .args(&args.args)
        .status()
        .with_context(|| format!("failed to run {}", script_path.display()))?;

    Ok(status.code().unwrap_or(1))
}

fn resolve_project_dir(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir),
        None => env::current_dir().context("failed to resolve current directory"),
    }
}

fn write_with_progress(
    script_path: &std::path::Path,
    records: &[crate::discovery::ServiceRecord],
    config: &DockermiConfig,
    quiet: bool,
) -> Result<()> {
    let bar = progress_bar(records.len() as u64, quiet);
    for record in records {
        bar.set_message(record.name.clone());
        bar.inc(1);
    }
    bar.finish_and_clear();

    script::write_script(script_path, records, &config.compose_command)?;
    Ok(())
}

fn progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet || !atty::is(atty::Stream::Stdout) {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_descriptor(dir: &std::path::Path, content: &str) {
        fs::write(dir.join("docker-compose.yml"), content).unwrap();
    }

    #[test]
    fn test_generate_writes_script() {
        let dir = TempDir::new().unwrap();
        write_descriptor(
            dir.path(),
            "services:\n  web:\n    labels:\n      dockermi.order: \"1\"\n      dockermi.active: \"true\"\n",
        );

        let out = dir.path().join("dockermi.sh");
        let args = GenerateArgs {
            project_dir: Some(dir.path().to_path_buf()),
            force: false,
            output: Some(out.clone()),
        };

        assert_eq!(handle_generate(&args, true), 0);
        assert!(out.exists());
    }

    #[test]
    fn test_generate_without_services_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let args = GenerateArgs {
            project_dir: Some(dir.path().to_path_buf()),
            force: false,
            output: None,
        };

        assert_eq!(handle_generate(&args, true), 0);
        assert!(!dir.path().join("dockermi.sh").exists());
    }

    #[test]
    fn test_generate_with_missing_root_fails() {
        let args = GenerateArgs {
            project_dir: Some(PathBuf::from("/nonexistent/dockermi-root")),
            force: false,
            output: None,
        };

        assert_eq!(handle_generate(&args, true), 1);
    }

    #[test]
    fn test_create_unknown_key_fails() {
        let dir = TempDir::new().unwrap();
        write_descriptor(
            dir.path(),
            "services:\n  web:\n    labels:\n      dockermi.order: \"1\"\n      dockermi.active: \"true\"\n      dockermi.key: frontend\n",
        );

        let args = CreateArgs {
            key: "storage".to_string(),
            project_dir: Some(dir.path().to_path_buf()),
            default_key: None,
        };

        assert_eq!(handle_create(&args, true), 1);
    }

    #[test]
    fn test_create_empty_key_fails() {
        let dir = TempDir::new().unwrap();
        let args = CreateArgs {
            key: "  ".to_string(),
            project_dir: Some(dir.path().to_path_buf()),
            default_key: None,
        };

        assert_eq!(handle_create(&args, true), 1);
    }
}
