//! Command-line front end for the memory service client.
//!
//! Without a subcommand, checks that the service is up, reports the
//! project's mode and lists the operations that fit it.

use agent_memory::{
    ActionEntry, ClientConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_QUERY_K, DecisionEntry, Lookup,
    MemoryClient, MemoryType, PatternEntry,
};
use agent_state::prelude::*;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "memory-probe", about = "Talk to the agent memory service")]
struct Cli {
    /// Service base URL (env: OPENMEMORY_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (env: OPENMEMORY_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// User id scoping all requests (env: OPENMEMORY_USER_ID)
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Project name (env: OPENMEMORY_PROJECT)
    #[arg(long, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the service is reachable
    Health,
    /// Print INITIALIZE or RESUME for the project
    Mode,
    /// Upload a local state file as the project state
    SaveState {
        /// State file (default: .ai-agents/project-state.json in the project dir)
        #[arg(long)]
        file: Option<Utf8PathBuf>,
    },
    /// Print the stored project state
    LoadState,
    /// Record an agent action
    RecordAction {
        agent: String,
        action: String,
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        outcome: Option<String>,
    },
    /// Store a coding pattern
    StorePattern {
        name: String,
        description: String,
        #[arg(long)]
        example: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Record an architectural decision
    RecordDecision {
        decision: String,
        rationale: String,
        #[arg(long)]
        alternatives: Option<String>,
        #[arg(long)]
        consequences: Option<String>,
    },
    /// Search project memories
    Query {
        query: String,
        #[arg(long = "type", default_value_t = MemoryType::All)]
        memory_type: MemoryType,
        #[arg(short, default_value_t = DEFAULT_QUERY_K)]
        k: usize,
    },
    /// Print development history
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },
    /// Print stored coding patterns
    Patterns,
    /// Print stored architectural decisions
    Decisions,
    /// Print state, history, patterns and decisions together
    Context,
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(user_id) = &self.user_id {
            config = config.with_user_id(user_id);
        }
        if let Some(project) = &self.project {
            config = config.with_project(project);
        }
        config
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    agent_state::logging::init();

    let client = MemoryClient::new(cli.config()).context("Failed to create memory client")?;

    let Some(command) = cli.command else {
        return walkthrough(&client);
    };

    match command {
        Command::Health => {
            let lookup = client.health_check();
            let reason = lookup.error().map(ToString::to_string);
            let Some(health) = lookup.into_option() else {
                eprintln!(
                    "ERROR: memory service is not available at {}",
                    client.config().base_url
                );
                if let Some(reason) = reason {
                    eprintln!("  {}", reason);
                }
                return Ok(ExitCode::FAILURE);
            };
            print_json(&health)?;
        }
        Command::Mode => println!("{}", client.detect_mode(None)?),
        Command::SaveState { file } => {
            let state_file = match file {
                Some(path) => StateFile::new(path),
                None => StateFile::discover(),
            };
            let state = state_file.load_raw()?;
            print_json(&client.save_project_state(&state, None)?)?;
        }
        Command::LoadState => match client.load_project_state(None)? {
            Lookup::Found(state) => print_json(&state)?,
            Lookup::Empty => {
                eprintln!("No project state stored");
                return Ok(Mode::Initialize.exit_code());
            }
            Lookup::Unavailable(err) => return Err(err).context("Failed to load project state"),
        },
        Command::RecordAction {
            agent,
            action,
            context,
            outcome,
        } => {
            let entry = ActionEntry {
                agent_name: agent,
                action,
                context,
                outcome,
            };
            print_json(&client.record_action(&entry, None)?)?;
        }
        Command::StorePattern {
            name,
            description,
            example,
            tags,
        } => {
            let entry = PatternEntry {
                pattern_name: name,
                description,
                example,
                tags,
            };
            print_json(&client.store_pattern(&entry, None)?)?;
        }
        Command::RecordDecision {
            decision,
            rationale,
            alternatives,
            consequences,
        } => {
            let entry = DecisionEntry {
                decision,
                rationale,
                alternatives,
                consequences,
            };
            print_json(&client.record_decision(&entry, None)?)?;
        }
        Command::Query {
            query,
            memory_type,
            k,
        } => print_json(&client.query_memories(&query, memory_type, k, None)?)?,
        Command::History { limit } => print_json(&client.get_history(limit, None)?)?,
        Command::Patterns => print_json(&client.get_patterns(None)?)?,
        Command::Decisions => print_json(&client.get_decisions(None)?)?,
        Command::Context => print_json(&client.get_full_context(None)?)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn walkthrough(client: &MemoryClient) -> Result<ExitCode> {
    let Some(health) = client.health_check().into_option().filter(|h| h.ok) else {
        println!("ERROR: memory service is not available");
        println!("Please start the memory service first:");
        println!("  cd backend && npm run dev");
        return Ok(ExitCode::FAILURE);
    };

    println!("✓ Memory service is running");
    println!("  Version: {}", health.version.as_deref().unwrap_or("unknown"));

    let mode = client.detect_mode(None)?;
    println!("✓ Project mode: {}", mode);

    for line in mode_hints(mode) {
        println!("{}", line);
    }

    Ok(ExitCode::SUCCESS)
}

fn mode_hints(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Initialize => &[
            "",
            "This is a fresh project. Example operations:",
            "  - Save initial state: memory-probe save-state",
            "  - Record action: memory-probe record-action architect 'Created project structure'",
            "  - Store pattern: memory-probe store-pattern MVC 'Model-View-Controller pattern'",
            "  - Record decision: memory-probe record-decision 'Use TypeScript' 'Type safety'",
        ],
        Mode::Resume => &[
            "",
            "This project has existing state. Example operations:",
            "  - Load state: memory-probe load-state",
            "  - Get history: memory-probe history",
            "  - Query memories: memory-probe query 'latest changes'",
            "  - Get patterns: memory-probe patterns",
        ],
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}
