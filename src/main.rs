use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use expense_tracker::cli::{
    handle_budget_command, handle_dashboard_command, handle_expense_command,
    handle_export_command, handle_history_command, handle_login, handle_logout, handle_route,
    handle_whoami, BudgetCommands, ExpenseCommands, ExportFormat,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::routes::{RouteDecision, RouteGuard};
use expense_tracker::session::{
    require_session, resolve_token, Session, SessionError, SessionStore, SESSION_ENV,
};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    author = "Kaylee Beyene",
    version,
    about = "Terminal expense tracker with monthly budget goals",
    long_about = "Track everyday expenses, set a spending goal per month and category, \
                  and see where the money went on the dashboard."
)]
struct Cli {
    /// Session token to use instead of the stored one
    #[arg(long, global = true, env = SESSION_ENV, hide_env_values = true)]
    session: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as an owner
    Login {
        owner: String,
        #[arg(long)]
        email: Option<String>,
        /// Replace an existing session
        #[arg(long)]
        force: bool,
    },

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Show how the route guard treats a path
    Route { path: String },

    /// Show the spending dashboard
    Dashboard {
        /// Print the dashboard data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Monthly budget goal commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Export expenses and budget goals
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show recent changes to your data
    History {
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show configuration paths and settings
    Config,
}

impl Commands {
    /// The route a command is served under
    fn route(&self) -> Option<&'static str> {
        match self {
            Commands::Login { .. } => Some("/login"),
            Commands::Whoami
            | Commands::Dashboard { .. }
            | Commands::Expense(_)
            | Commands::Budget(_)
            | Commands::Export { .. }
            | Commands::History { .. } => Some("/dashboard"),
            Commands::Logout | Commands::Route { .. } | Commands::Config => None,
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Gate a protected command on the session
fn authorize(guard: &RouteGuard, route: &str, token: Option<&str>) -> Result<Session> {
    if let RouteDecision::RedirectToLogin(target) = guard.evaluate(route, token.is_some()) {
        log::info!("{} requires a session; redirecting to {}", route, target);
        return Err(SessionError::NoSession.into());
    }
    Ok(require_session(token)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let store = SessionStore::new(paths.session_file());
    let token = resolve_token(cli.session.as_deref(), &store)?;
    let guard = RouteGuard::from_settings(&settings.routes);

    let Some(command) = cli.command else {
        if let RouteDecision::RedirectToDashboard(_) = guard.evaluate("/", token.is_some()) {
            let session = require_session(token.as_deref())?;
            handle_dashboard_command(&storage, &settings, &session, false)?;
        } else {
            println!("Expense Tracker - monthly budgets and spending dashboards");
            println!();
            println!("Run 'expense login <owner>' to sign in.");
            println!("Run 'expense --help' for usage information.");
        }
        return Ok(());
    };

    let session = match command.route() {
        Some("/login") => None,
        Some(route) => Some(authorize(&guard, route, token.as_deref())?),
        None => None,
    };

    match (command, session) {
        (Commands::Login { owner, email, force }, _) => {
            let current = token.as_deref().and_then(|t| Session::from_token(t).ok());
            handle_login(&store, &guard, current.as_ref(), &owner, email, force)?;
        }
        (Commands::Logout, _) => handle_logout(&store)?,
        (Commands::Route { path }, _) => handle_route(&guard, &path, token.is_some())?,
        (Commands::Config, _) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Session file:    {}", paths.session_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency:            {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Default category:    {}", settings.default_category);
            println!("  Categories:          {}", settings.categories.join(", "));
            println!("  Require budget goal: {}", settings.require_budget_goal);
            println!("  Top categories:      {}", settings.top_categories);
        }
        (Commands::Whoami, Some(session)) => handle_whoami(&session)?,
        (Commands::Dashboard { json }, Some(session)) => {
            handle_dashboard_command(&storage, &settings, &session, json)?;
        }
        (Commands::Expense(cmd), Some(session)) => {
            handle_expense_command(&storage, &settings, &session, cmd)?;
        }
        (Commands::Budget(cmd), Some(session)) => {
            handle_budget_command(&storage, &settings, &session, cmd)?;
        }
        (
            Commands::Export {
                format,
                output,
                pretty,
            },
            Some(session),
        ) => handle_export_command(&storage, &session, format, output, pretty)?,
        (Commands::History { limit }, Some(session)) => {
            handle_history_command(&storage, &session, limit)?;
        }
        (_, None) => return Err(SessionError::NoSession.into()),
    }

    Ok(())
}
