mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use scribe_core::pipeline::StageVariants;
use scribe_core::{Agent, AgentConfig, GenerateRequest, RunOutcome};

use config::ScribeConfig;

#[derive(Parser)]
#[command(name = "scribe", about = "Two-stage code generation agent backed by a local model")]
struct Cli {
    /// Repository to generate files into
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Ollama server URL (overrides SCRIBE_HOST env var)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Model name (overrides SCRIBE_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Enable debug-level logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a scribe config file
    Init {
        /// Ollama server URL to record
        #[arg(long, default_value = scribe_core::config::DEFAULT_HOST)]
        host: String,
        /// Model name to record
        #[arg(long, default_value = scribe_core::config::DEFAULT_MODEL)]
        model: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a program from a description and write it into the repo
    Create {
        /// What to build, in plain language
        description: String,
        /// Where a single-file result should land (default: src/main.py)
        #[arg(long)]
        module_path: Option<String>,
        /// Prompt variant for the planning stage
        #[arg(long, default_value = "default")]
        planning_variant: String,
        /// Prompt variant for the code generation stage
        #[arg(long, default_value = "default")]
        code_variant: String,
    },
    /// Commit generated files, optionally pushing to the remote
    Commit {
        /// Commit message
        message: String,
        /// Push to the remote after a successful commit
        #[arg(long)]
        push: bool,
    },
    /// List available prompt tasks and their variants
    Prompts,
}

/// Execute the `scribe init` command: write config file.
fn cmd_init(host: &str, model: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        model: config::ModelSection {
            host: host.to_string(),
            name: model.to_string(),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  model.host = {host}");
    println!("  model.name = {model}");

    Ok(())
}

/// Print an outcome, exiting non-zero on failure.
fn finish(outcome: RunOutcome) {
    if outcome.success {
        println!("{}", outcome.message);
    } else {
        eprintln!("{}", outcome.message);
        std::process::exit(1);
    }
}

fn build_agent(cli: &Cli) -> anyhow::Result<Agent> {
    let resolved = ScribeConfig::resolve(cli.host.as_deref(), cli.model.as_deref());
    tracing::debug!(
        host = %resolved.host,
        model = %resolved.model,
        repo = %cli.repo.display(),
        "resolved model settings"
    );
    let agent_config = AgentConfig {
        host: resolved.host,
        model: resolved.model,
        ..AgentConfig::new(&cli.repo)
    };
    Agent::new(agent_config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init { ref host, ref model, force } => {
            cmd_init(host, model, force)?;
        }
        Commands::Create {
            ref description,
            ref module_path,
            ref planning_variant,
            ref code_variant,
        } => {
            let agent = build_agent(&cli)?;
            let request = GenerateRequest {
                description: description.clone(),
                module_path: module_path.clone(),
                variants: StageVariants {
                    planning: planning_variant.clone(),
                    code_generation: code_variant.clone(),
                },
            };
            let outcome = agent.create_program(&request).await?;
            finish(outcome);
        }
        Commands::Commit { ref message, push } => {
            let agent = build_agent(&cli)?;
            let outcome = agent.commit_and_push(message, push);
            finish(outcome);
        }
        Commands::Prompts => {
            let agent = build_agent(&cli)?;
            for (task, variants) in agent.list_available_prompts() {
                println!("{task}: {}", variants.join(", "));
            }
        }
    }

    Ok(())
}
