//! CLI entrypoint for GovMind
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use govmind_application::{
    AnalysisEventLogger, AnalysisProgressNotifier, Dispatch, LookupError, NoEventLogger,
    NoProgress, ProposalCopilot, StoreError,
};
use govmind_domain::{Committee, OutputFormat, ProposalId};
use govmind_infrastructure::{
    ChatCompletionGateway, ConfigLoader, FileConfig, JsonFileProposalRepository,
    JsonlAnalysisLogger,
};
use govmind_presentation::{
    AnalysisPoller, Cli, Command, PanelState, ProgressReporter, SimpleProgress, formatter_for,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type Copilot = ProposalCopilot<ChatCompletionGateway, JsonFileProposalRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if let Command::Config = cli.command {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let formatter = formatter_for(format);

    info!("Starting GovMind");

    // === Dependency Injection ===
    let api_key = config.gateway.api_key();
    if api_key.is_none() {
        warn!(
            env = %config.gateway.api_key_env,
            "No API key found; requests are sent without authorization"
        );
    }
    let gateway = Arc::new(ChatCompletionGateway::new(
        config.gateway.endpoint.clone(),
        config.gateway.model.clone(),
        api_key,
    )?);

    let repository = Arc::new(JsonFileProposalRepository::new(config.store.proposals_path()));

    let events: Arc<dyn AnalysisEventLogger> =
        match JsonlAnalysisLogger::open(config.store.event_log_path()) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoEventLogger),
        };

    let progress: Arc<dyn AnalysisProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let profiles = config.variants.to_profiles();
    let stale_after = Duration::from_secs(profiles.max_timeout_seconds().saturating_mul(2));
    let copilot = ProposalCopilot::with_components(gateway, repository, profiles, events, progress);

    // A previous run may have died mid-analysis
    let recovered = copilot.store().recover_interrupted(stale_after).await?;
    if !recovered.is_empty() {
        warn!(count = recovered.len(), "Marked interrupted analyses as failed");
    }

    // Never wait on an attempt longer than recovery would tolerate it
    let poller = AnalysisPoller::from_millis(config.output.poll_interval_ms).with_deadline(stale_after);

    match cli.command {
        Command::Analyze {
            title,
            description,
            id,
            dao,
            local,
        } => {
            let id = resolve_id(id, dao, local)?;
            let id = copilot.submit_and_analyze(&title, &description, id).await?;
            let state = watch(&poller, &copilot, &id).await?;
            println!("{}", formatter.panel(&id, &state));
            exit_status(&state)
        }
        Command::Status { id } => {
            let id = ProposalId::new(id)?;
            let record = copilot.status(&id).await?;
            let state = PanelState::from_record(record.as_ref());
            println!("{}", formatter.panel(&id, &state));
            Ok(())
        }
        Command::Show { id } => {
            let id = ProposalId::new(id)?;
            match copilot.get_analysis(&id).await {
                Ok(analysis) => {
                    println!("{}", formatter.analysis(&id, &analysis));
                    Ok(())
                }
                Err(LookupError::NotAnalyzed { status, .. }) => {
                    bail!("Proposal {} has no analysis yet (status: {})", id, status)
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::Retry { id } => {
            let id = ProposalId::new(id)?;
            match copilot.retry(&id).await {
                Ok(Dispatch::AlreadyAnalyzing) => {
                    info!(proposal_id = %id, "Analysis already in progress; waiting for it")
                }
                Ok(Dispatch::Started { attempt }) => {
                    info!(proposal_id = %id, attempt, "Retry dispatched")
                }
                Err(StoreError::NotFound(_)) => {
                    bail!("Proposal {} not found. Submit it with `govmind analyze` first.", id)
                }
                Err(e) => return Err(e.into()),
            }
            let state = watch(&poller, &copilot, &id).await?;
            println!("{}", formatter.panel(&id, &state));
            exit_status(&state)
        }
        Command::List => {
            let records = copilot.list().await?;
            println!("{}", formatter.proposals(&records));
            Ok(())
        }
        Command::Draft { idea, committees } => {
            match committees {
                Some(path) => {
                    let committees = read_committees(&path)?;
                    let suggestion = copilot
                        .draft_proposal_with_committees(&idea, &committees)
                        .await?;
                    println!("{}", formatter.committee_suggestion(&suggestion));
                }
                None => {
                    let draft = copilot.draft_proposal(&idea).await?;
                    println!("{}", formatter.draft(&draft));
                }
            }
            Ok(())
        }
        Command::Debate { title, content } => {
            let debate = copilot.run_debate_simulation(&title, &content).await?;
            println!("{}", formatter.debate(&debate));
            Ok(())
        }
        Command::Config => Ok(()),
    }
}

fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn resolve_id(
    id: Option<String>,
    dao: Option<String>,
    local: Option<u64>,
) -> Result<Option<ProposalId>> {
    match (id, dao, local) {
        (Some(id), _, _) => Ok(Some(ProposalId::new(id)?)),
        (None, Some(dao), Some(local)) => Ok(Some(ProposalId::composite(&dao, local)?)),
        (None, None, None) => Ok(None),
        _ => bail!("--dao and --local must be given together"),
    }
}

fn read_committees(path: &Path) -> Result<Vec<Committee>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read committees file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} must be a JSON array of committees", path.display()))
}

async fn watch(poller: &AnalysisPoller, copilot: &Copilot, id: &ProposalId) -> Result<PanelState> {
    let state = poller
        .watch(copilot, id, |state| {
            info!(proposal_id = %id, state = state.label(), "Analysis panel updated")
        })
        .await?;
    Ok(state)
}

/// A failed analysis is reported, then surfaced through the exit code.
fn exit_status(state: &PanelState) -> Result<()> {
    if matches!(state, PanelState::Failed) {
        bail!("Analysis failed; run `govmind retry` to try again");
    }
    Ok(())
}
