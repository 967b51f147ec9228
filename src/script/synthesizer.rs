//! Orchestration script synthesis
//!
//! Turns a set of discovered records into an executable shell script with a
//! `start_services` procedure (ascending order), a `stop_services` procedure
//! (the exact reverse), and an `up`/`down` dispatcher. Rendering is pure;
//! writing truncates any previous script so regeneration from the same records
//! is byte-identical.

use crate::discovery::ServiceRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Command the generated script delegates to for every service.
pub const DEFAULT_COMPOSE_COMMAND: &str = "docker-compose";

/// Errors raised while writing the script artifact.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to write script {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const DISPATCHER: &str = r#"if [ "$#" -lt 1 ]; then
    echo "Invalid argument!"
    echo "Usage: $0 [up|down] [extra arguments...]"
    exit 1
fi

ACTION=$1
shift

case "$ACTION" in
    up)
        start_services "$@"
        ;;
    down)
        stop_services "$@"
        ;;
    *)
        echo "Invalid argument: $ACTION"
        echo "Usage: $0 [up|down] [extra arguments...]"
        exit 1
        ;;
esac
"#;

/// References to `records` sorted into start order.
///
/// The sort is stable: records with equal order keys keep their discovery
/// order. Stop order is the exact reverse of this sequence, ties included, so
/// shutdown mirrors startup for the whole list.
pub fn sorted_for_start(records: &[ServiceRecord]) -> Vec<&ServiceRecord> {
    let mut sorted: Vec<&ServiceRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.order_key());
    sorted
}

/// Renders the orchestration script for `records`.
pub fn render_script(records: &[ServiceRecord], compose_command: &str) -> String {
    let start_order = sorted_for_start(records);

    let mut script = String::new();
    script.push_str("#!/bin/bash\n\n");
    script.push_str("# Usage: ./dockermi.sh [up|down]\n\n");

    script.push_str("start_services() {\n");
    for record in &start_order {
        script.push_str(&format!("    echo \"Starting {}...\"\n", record.name));
        script.push_str(&format!(
            "    {} -f \"{}\" up -d \"$@\"\n",
            compose_command,
            record.compose_file.display()
        ));
    }
    script.push_str("}\n\n");

    script.push_str("stop_services() {\n");
    for record in start_order.iter().rev() {
        script.push_str(&format!("    echo \"Stopping {}...\"\n", record.name));
        script.push_str(&format!(
            "    {} -f \"{}\" down \"$@\"\n",
            compose_command,
            record.compose_file.display()
        ));
    }
    script.push_str("}\n\n");

    script.push_str(DISPATCHER);
    script
}

/// Renders and writes the script at `path`, replacing any previous content,
/// and marks it executable.
pub fn write_script(
    path: &Path,
    records: &[ServiceRecord],
    compose_command: &str,
) -> Result<(), ScriptError> {
    let rendered = render_script(records, compose_command);

    fs::write(path, rendered).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| {
            ScriptError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }

    Ok(())
}
