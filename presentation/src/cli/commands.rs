//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for govmind_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => govmind_domain::OutputFormat::Full,
            OutputFormat::Json => govmind_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for govmind
#[derive(Parser, Debug)]
#[command(name = "govmind")]
#[command(author, version, about = "AI analysis, drafting and debate for DAO proposals")]
#[command(long_about = r#"
GovMind sends DAO governance proposals to a chat-completions model and keeps
track of each proposal's analysis lifecycle:

  Pending -> Analyzing -> Analyzed | Failed

Failed analyses can be retried. Drafting and debate requests return their
result directly.

Configuration files are loaded from (in priority order):
1. GOVMIND_* environment variables (e.g. GOVMIND_GATEWAY__MODEL)
2. --config <path>     Explicit config file
3. ./govmind.toml      Project-level config
4. ~/.config/govmind/config.toml   Global config

The API key is read from the variable named by gateway.api_key_env
(DEEPSEEK_API_KEY by default).

Example:
  govmind analyze "Fund audits" "Allocate 50k USDC to a security audit" --dao arbitrum --local 42
  govmind status arbitrum-42
  govmind debate "Fund audits" "Allocate 50k USDC to a security audit"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides output.format from config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write tracing output to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a proposal and wait for its analysis
    Analyze {
        title: String,
        description: String,

        /// Use this proposal id instead of a generated one
        #[arg(long, conflicts_with_all = ["dao", "local"])]
        id: Option<String>,

        /// DAO id of a composite `<dao>-<local>` proposal id
        #[arg(long, requires = "local")]
        dao: Option<String>,

        /// DAO-local proposal number of a composite id
        #[arg(long, requires = "dao")]
        local: Option<u64>,
    },

    /// Show the analysis panel state of a proposal
    Status { id: String },

    /// Print the stored analysis of a proposal
    Show { id: String },

    /// Re-run the analysis of a proposal and wait for it
    Retry { id: String },

    /// List tracked proposals, newest first
    List,

    /// Draft a proposal from a one-line idea
    Draft {
        idea: String,

        /// JSON file with the committees to route the draft to
        #[arg(long, value_name = "FILE")]
        committees: Option<PathBuf>,
    },

    /// Simulate a four-persona debate about a proposal
    Debate { title: String, content: String },

    /// Show configuration file locations
    Config,
}
