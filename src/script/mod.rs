//! Orchestration script synthesis

pub mod synthesizer;

pub use synthesizer::{
    render_script, sorted_for_start, write_script, ScriptError, DEFAULT_COMPOSE_COMMAND,
};
