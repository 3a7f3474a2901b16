//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use dishmuse_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for turn responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Chat bubbles, recipe cards and lists
    Text,
    /// Raw JSON turn responses
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => DomainOutputFormat::Text,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for dishmuse
#[derive(Parser, Debug)]
#[command(name = "dishmuse")]
#[command(author, version, about = "DishMuse - turn what's in your kitchen into recipes")]
#[command(long_about = r#"
DishMuse is a conversational recipe assistant. Tell it what you have,
answer a few questions, and it suggests recipes, shopping lists and
plating ideas.

Configuration files are loaded from (in priority order):
1. DISHMUSE_* environment variables (e.g. DISHMUSE_MODEL__MODEL)
2. --config <path>     Explicit config file
3. ./dishmuse.toml     Project-level config
4. ~/.config/dishmuse/config.toml   Global config

Example:
  dishmuse
  dishmuse ask "I have rice, eggs and spring onions"
  dishmuse serve-stdio < requests.jsonl
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output].format)
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

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat (default)
    Chat {
        /// Ask for in-store shopping suggestions only
        #[arg(long)]
        in_store: bool,
    },

    /// Serve JSON-lines requests on stdin, one response line per request
    ServeStdio,

    /// Send a single turn and print the response
    Ask {
        /// The message to send
        text: String,

        /// Continue an existing session
        #[arg(long, value_name = "KEY")]
        session: Option<String>,

        /// Ask for in-store shopping suggestions only
        #[arg(long)]
        in_store: bool,

        /// Ask for a shopping list regardless of wording
        #[arg(long)]
        shopping_list: bool,
    },
}

impl Cli {
    /// The subcommand to run, defaulting to interactive chat.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Chat { in_store: false })
    }
}
