//! # StockLedger CLI Library
//!
//! Argument parsing, startup and command dispatch for the `stockledger`
//! binary.
//!
//! ## Module Organization
//! ```text
//! stockledger_cli/
//! ├── lib.rs          ◄─── You are here (Cli, startup & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (flags, env, defaults)
//! │   └── inventory.rs◄─── Catalog + write-through repository
//! ├── commands/
//! │   ├── mod.rs      ◄─── Output format, prompts
//! │   ├── product.rs  ◄─── add / remove / show
//! │   ├── report.rs   ◄─── list / summary / dashboard / export
//! │   ├── status.rs   ◄─── database health and migration state
//! │   └── menu.rs     ◄─── Interactive numbered menu
//! ├── render.rs       ◄─── Text tables and report blocks
//! └── error.rs        ◄─── CliError, codes, exit statuses
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stockledger_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::OutputFormat;
use error::{CliError, CliResult};
use state::{AppConfig, InventoryState};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "stockledger",
    version,
    about = "Single-user inventory ledger",
    long_about = "Register products, remove them, and report stock levels and value. \
                  Runs the interactive menu when no subcommand is given.",
    after_help = "Examples:\n  stockledger add --name Widget --category Tools --price 10.00 --quantity 3\n  stockledger list\n  stockledger dashboard --top 5 --json\n  stockledger remove 2 --yes\n  stockledger status"
)]
pub struct Cli {
    /// SQLite database file (overrides STOCKLEDGER_DB_PATH).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Emit machine-readable JSON output.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(about = "Register a new product")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        /// Unit price, e.g. 10.00
        #[arg(long, allow_hyphen_values = true)]
        price: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },
    #[command(about = "Remove a product by id")]
    Remove {
        #[arg(allow_hyphen_values = true)]
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    #[command(about = "List all products with a summary")]
    List,
    #[command(about = "Show one product in full")]
    Show {
        #[arg(allow_hyphen_values = true)]
        id: i64,
    },
    #[command(about = "Print product count, low-stock count and total stock value")]
    Summary,
    #[command(about = "Category breakdown, top products by quantity, low stock")]
    Dashboard {
        /// Length of the top-by-quantity ranking
        #[arg(long)]
        top: Option<usize>,
    },
    #[command(about = "Write the whole catalog and its dashboard as JSON")]
    Export,
    #[command(about = "Check the database and report migration state and catalog size")]
    Status,
    #[command(about = "Run the interactive menu")]
    Menu,
}

impl Cli {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Runs the binary: parse, configure, execute, report.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap derive; --help / --version exit here                         │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber to stderr, RUST_LOG overrides the default      │
/// │                                                                         │
/// │  3. Resolve Configuration ────────────────────────────────────────────► │
/// │     • --db, then STOCKLEDGER_* variables, then defaults                 │
/// │                                                                         │
/// │  4. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  5. Restore Catalog & Execute ────────────────────────────────────────► │
/// │     • one subcommand, or the menu until the operator quits              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting StockLedger");

    let json = cli.json;
    let result = match AppConfig::from_env(cli.db.clone()) {
        Ok(config) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            execute(cli, &config, &mut stdin.lock(), &mut stdout.lock()).await
        }
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, json);
            ExitCode::from(err.exit_code())
        }
    }
}

/// Opens the database, restores the catalog and runs one command.
///
/// Input and output are parameters so tests can drive the whole flow.
pub async fn execute<R: BufRead, W: Write>(
    cli: Cli,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let format = cli.format();
    let command = cli.command.unwrap_or(Command::Menu);
    debug!(?command, ?format, "Executing command");

    let db = open_database(config).await?;
    let mut state = InventoryState::open(&db).await?;

    let result = match command {
        Command::Add {
            name,
            category,
            price,
            quantity,
        } => {
            commands::product::add(&mut state, &name, &category, &price, &quantity, format, out)
                .await
        }
        Command::Remove { id, yes } => {
            commands::product::remove(&mut state, id, yes, format, input, out).await
        }
        Command::List => commands::report::list(&state, config, format, out),
        Command::Show { id } => commands::product::show(&state, config, id, format, out),
        Command::Summary => commands::report::summary(&state, config, format, out),
        Command::Dashboard { top } => {
            commands::report::dashboard(&state, config, top, format, out)
        }
        Command::Export => commands::report::export(&state, config, out),
        Command::Status => commands::status::status(&db, &state, config, format, out).await,
        Command::Menu => commands::menu::run(&mut state, config, input, out).await,
    };

    out.flush()?;
    db.close().await;
    result
}

/// Connects to the configured database, creating its directory first.
pub async fn open_database(config: &AppConfig) -> CliResult<Database> {
    config.ensure_data_dir()?;

    let db_config = if config.db_path == Path::new(":memory:") {
        DbConfig::in_memory()
    } else {
        DbConfig::new(&config.db_path)
    };
    let db = Database::new(db_config).await?;
    info!(path = %config.db_path.display(), "Database ready");
    Ok(db)
}

fn print_error(err: &CliError, json: bool) {
    let report = err.report();
    if json {
        match serde_json::to_string(&report) {
            Ok(encoded) => eprintln!("{}", encoded),
            Err(_) => eprintln!("Error: {}", report.message),
        }
    } else {
        eprintln!("Error: {}", report.message);
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockledger=trace` - Trace for stockledger crates only
/// - `RUST_LOG=stockledger=info` - Lifecycle events (database open, restore)
/// - Default: warnings only
///
/// Logs go to stderr; stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
