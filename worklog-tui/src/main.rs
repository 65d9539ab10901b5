mod api;
mod app;
mod cli;
mod config;
mod logging;
mod runtime;
mod ui;
mod worklog;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands, IssueArgs};
use config::WorklogConfig;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use runtime::Services;
use std::io;
use time::UtcOffset;
use worklog::{DraftStore, FileDraftStore, IssueContext, MemoryDraftStore};

fn main() -> Result<()> {
    // Read while still single-threaded; later reads fail once tokio workers exist.
    let utc_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = WorklogConfig::ensure_exists()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::ClearDraft { issue } => {
            let store = FileDraftStore::in_data_dir()?;
            if store.clear(issue)? {
                println!("Removed draft for issue #{}.", issue);
            } else {
                println!("No draft stored for issue #{}.", issue);
            }
            Ok(())
        }
        Commands::Run(args) => {
            init_logging(utc_offset);
            let config = WorklogConfig::load()?;
            let client = api::ApiClient::new(&config)?;
            let drafts = FileDraftStore::in_data_dir()?;
            let services = Services::new(client, Box::new(drafts), &config);
            block_on_issue(args, &config, services, utc_offset)
        }
        Commands::Dev(args) => {
            init_logging(utc_offset);
            let config = WorklogConfig::default();
            let client = api::ApiClient::dev()?;
            let services = Services::new(client, Box::new(MemoryDraftStore::new()), &config);
            block_on_issue(args, &config, services, utc_offset)
        }
    }
}

fn init_logging(utc_offset: UtcOffset) {
    if let Err(e) = logging::init(utc_offset) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn block_on_issue(
    args: IssueArgs,
    config: &WorklogConfig,
    services: Services,
    utc_offset: UtcOffset,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(open_issue(args, config, services, utc_offset))
}

async fn open_issue(
    args: IssueArgs,
    config: &WorklogConfig,
    services: Services,
    utc_offset: UtcOffset,
) -> Result<()> {
    let issue = IssueContext {
        issue_id: args.issue,
        csrf_token: args
            .csrf_token
            .unwrap_or_else(|| config.csrf_token.clone()),
    };
    if issue.csrf_token.is_empty() {
        tracing::warn!(issue_id = issue.issue_id, "no CSRF token configured");
    }
    tracing::info!(issue_id = issue.issue_id, elapsed = args.elapsed, "opening issue");

    let mut app = App::new(issue, args.elapsed);
    app.utc_offset = utc_offset;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Lets Ctrl+Enter arrive distinct from Enter; Ctrl+J covers the rest.
    let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )
        .is_ok();
    tracing::debug!(keyboard_enhanced, "terminal ready");
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = runtime::run_app(&mut terminal, &mut app, &services).await;

    // Restore terminal
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    if let Some(target) = app.leave_to {
        println!("Issue #{} abandoned. Continue at {}", app.issue.issue_id, target);
    }

    Ok(())
}
