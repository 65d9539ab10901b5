use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "worklog-tui")]
#[command(about = "Terminal UI for working an issue and submitting its work log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open an issue against the configured tracker
    Run(IssueArgs),
    /// Open an issue against a local in-memory backend
    Dev(IssueArgs),
    /// Print config path and create default file if missing
    ConfigPath,
    /// Delete the saved work-log draft of an issue
    ClearDraft {
        #[arg(long)]
        issue: u64,
    },
}

#[derive(Debug, Args)]
pub struct IssueArgs {
    /// Issue identifier
    #[arg(long)]
    pub issue: u64,
    /// CSRF token of the issue page (overrides the config file)
    #[arg(long)]
    pub csrf_token: Option<String>,
    /// Seconds already tracked on this issue; the timer continues from here
    #[arg(long, default_value_t = 0)]
    pub elapsed: u64,
}
