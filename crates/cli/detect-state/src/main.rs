//! Detect whether an agent should initialize a fresh project or resume.
//!
//! Exits 0 for RESUME and 1 for INITIALIZE so callers can branch on status.

use agent_state::prelude::*;
use camino::Utf8PathBuf;
use clap::Parser;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "detect-state",
    about = "Decide between INITIALIZE and RESUME for an agent session"
)]
struct Cli {
    /// State file to inspect (default: .ai-agents/project-state.json in the project dir)
    #[arg(long, value_name = "PATH")]
    state_file: Option<Utf8PathBuf>,

    /// Print a one-line JSON summary instead of the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    agent_state::logging::init();

    let state_file = match cli.state_file {
        Some(path) => StateFile::new(path),
        None => StateFile::discover(),
    };

    let detection = detect(&state_file);

    if cli.json {
        let summary = serde_json::to_string(&detection.summary(&state_file))
            .context("Failed to serialize detection summary")?;
        println!("{}", summary);
    } else {
        print!("{}", detection.render(&state_file));
    }

    Ok(detection.mode().exit_code())
}
