use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use parlance_application::ParlanceServices;
use parlance_infrastructure::{ConfigService, ParlancePaths};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;

#[derive(Parser)]
#[command(name = "parlance")]
#[command(
    about = "Parlance - context-augmented prompts and adaptive conversation titles",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Configuration file (defaults to <config-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base directory for configuration, templates and conversations
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Use the built-in templates and keep nothing on disk
    #[arg(long, global = true)]
    in_memory: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file and seed the built-in templates
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    #[command(flatten)]
    Service(ServiceCommand),
}

/// Commands that run against the loaded services.
#[derive(Subcommand)]
enum ServiceCommand {
    /// Build the message list for a context map
    Prompt {
        /// JSON context map (`-` for stdin)
        context: PathBuf,
        /// Custom system prompt configured by the user
        #[arg(long)]
        system_prompt: Option<String>,
        /// Preferred response language code
        #[arg(long)]
        language: Option<String>,
    },
    /// Generate a title from the opening messages
    Title {
        /// Conversation record or message array (`-` for stdin)
        conversation: PathBuf,
        /// Language to title in
        #[arg(long)]
        language: Option<String>,
    },
    /// Refine the title of a conversation
    ImproveTitle {
        /// Conversation record (`-` for stdin)
        conversation: PathBuf,
        /// JSON array of entities detected in the conversation
        #[arg(long)]
        entities: Option<PathBuf>,
        /// Write the updated record back to the file
        #[arg(long)]
        write: bool,
    },
    /// Report whether a conversation's title should be regenerated
    NeedsUpdate {
        /// Conversation record (`-` for stdin)
        conversation: PathBuf,
    },
    /// Refresh the stored title of a conversation by id
    Refresh {
        id: String,
        /// JSON array of entities detected in the conversation
        #[arg(long)]
        entities: Option<PathBuf>,
    },
    /// Detect the language of a text
    DetectLanguage {
        text: String,
    },
    /// Find messages mentioning a term
    Search {
        /// Conversation record or message array (`-` for stdin)
        conversation: PathBuf,
        term: String,
        /// Characters of context kept on each side of the match
        #[arg(long, default_value_t = 40)]
        radius: usize,
        /// Report every matching message instead of the first
        #[arg(long)]
        all: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_paths(args: &GlobalArgs) -> Result<(ParlancePaths, ConfigService)> {
    let paths = match &args.config_dir {
        Some(dir) => ParlancePaths::with_base(dir),
        None => ParlancePaths::platform()?,
    };
    let config_service = match &args.config {
        Some(file) => ConfigService::with_file(file),
        None => ConfigService::new(&paths),
    };
    Ok((paths, config_service))
}

async fn open_services(args: &GlobalArgs) -> Result<ParlanceServices> {
    let (paths, config_service) = resolve_paths(args)?;
    let config = config_service
        .load()
        .await
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    tracing::debug!(
        base = %paths.base_dir().display(),
        in_memory = args.in_memory,
        "opening services"
    );
    if args.in_memory {
        return Ok(ParlanceServices::in_memory(config).await);
    }
    ParlanceServices::open(&paths, config)
        .await
        .with_context(|| format!("Failed to open {}", paths.base_dir().display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli { global, command } = Cli::parse();
    init_tracing(global.log_json);

    match command {
        Commands::Init { force } => {
            let (paths, config_service) = resolve_paths(&global)?;
            commands::init::run(&paths, &config_service, force).await
        }
        Commands::Service(command) => {
            let services = open_services(&global).await?;
            run_service_command(&services, command).await
        }
    }
}

async fn run_service_command(services: &ParlanceServices, command: ServiceCommand) -> Result<()> {
    match command {
        ServiceCommand::Prompt {
            context,
            system_prompt,
            language,
        } => commands::prompt::run(services, &context, system_prompt, language).await?,
        ServiceCommand::Title {
            conversation,
            language,
        } => commands::title::generate(services, &conversation, language.as_deref()).await?,
        ServiceCommand::ImproveTitle {
            conversation,
            entities,
            write,
        } => {
            commands::title::improve(services, &conversation, entities.as_deref(), write).await?
        }
        ServiceCommand::NeedsUpdate { conversation } => {
            commands::title::needs_update(services, &conversation).await?
        }
        ServiceCommand::Refresh { id, entities } => {
            commands::title::refresh(services, &id, entities.as_deref()).await?
        }
        ServiceCommand::DetectLanguage { text } => commands::language::detect(services, &text),
        ServiceCommand::Search {
            conversation,
            term,
            radius,
            all,
        } => commands::search::run(&conversation, &term, radius, all).await?,
    }

    Ok(())
}
