//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for plans and results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Critical agents, warnings and agents by domain group
    Full,
    /// Counts, estimates and warnings only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for rollcall_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => rollcall_domain::OutputFormat::Full,
            OutputFormat::Summary => rollcall_domain::OutputFormat::Summary,
            OutputFormat::Json => rollcall_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for rollcall
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(author, version, about = "Plan and verify agent-roster invocations")]
#[command(long_about = r#"
rollcall decides which agents a request should reach, estimates the time
and cost of invoking them, and afterwards checks what actually ran.

A plan flags any critical agent that was left out. A verification is
unsuccessful when a critical agent was skipped or too few planned agents
completed.

Configuration files are loaded from (in priority order):
1. ROLLCALL_* environment variables (e.g. ROLLCALL_PATHS__TEAM_DIR)
2. --config <path>     Explicit config file
3. ./rollcall.toml     Project-level config
4. ~/.config/rollcall/config.toml   Global config

Example:
  rollcall plan "Have the whole team review the platform"
  rollcall verify "security review of the login flow" --invoked ciso security-architect
  rollcall discover --expected 48 --save-cache
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to a daily file in the log directory
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and show the invocation plan for a request
    Plan {
        /// Request text
        request: String,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Reconcile a plan with the agents that actually ran
    Verify {
        /// Request text the plan is rebuilt from
        request: String,

        /// Agents that completed
        #[arg(long, value_name = "ID", num_args = 1.., value_delimiter = ',',
              required_unless_present = "report")]
        invoked: Vec<String>,

        /// Agents that ran but failed
        #[arg(long, value_name = "ID", num_args = 1.., value_delimiter = ',')]
        failed: Vec<String>,

        /// Execution report (JSON: {"invoked": [..], "failed": [..], "elapsed_minutes": N})
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Elapsed wall-clock minutes
        #[arg(long, value_name = "MIN")]
        elapsed: Option<f64>,

        /// Answer yes to any confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Do not append to the audit log
        #[arg(long)]
        no_audit: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Discover agents in the team directory and validate the roster
    Discover {
        /// Expected number of agents
        #[arg(long, value_name = "N")]
        expected: Option<usize>,

        /// Write the discovery cache next to the team directory
        #[arg(long)]
        save_cache: bool,
    },

    /// Show configuration sources and the loaded orchestration config
    ShowConfig,
}
