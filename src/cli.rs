//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use crate::adapters::csv_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_file_adapter::JsonFileAdapter;
use crate::domain::error::LedgerError;
use crate::domain::ledger_store::LedgerStore;
use crate::domain::settings::{Settings, StorageBackend};
use crate::domain::state::LedgerState;
use crate::logging::init_tracing;
use crate::ports::export_port::ExportPort;
use crate::ports::snapshot_port::SnapshotPort;

pub type SharedSnapshots = Arc<dyn SnapshotPort + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "pocketledger", about = "Personal-finance bookkeeping backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the demo dataset as the current snapshot
    Init {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// Print savings rate, runway and recent activity as JSON
    Profile {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export the transaction history to CSV
    Export {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match &cli.command {
        Command::Serve { config }
        | Command::Init { config, .. }
        | Command::Profile { config }
        | Command::Export { config, .. } => config.clone(),
    };

    let settings = match load_settings(config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    init_tracing(&settings.log_filter);

    let result = match cli.command {
        Command::Serve { .. } => run_serve(&settings),
        Command::Init { force, .. } => run_init(&settings, force),
        Command::Profile { .. } => run_profile(&settings),
        Command::Export { output, .. } => run_export(&settings, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Reads settings from `path`, or uses every default when no file is given.
pub fn load_settings(path: Option<&PathBuf>) -> Result<Settings, LedgerError> {
    let adapter = match path {
        Some(path) => {
            FileConfigAdapter::from_file(path).map_err(|e| LedgerError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    Settings::from_config(&adapter)
}

pub fn open_snapshots(settings: &Settings) -> Result<SharedSnapshots, LedgerError> {
    match settings.backend {
        StorageBackend::Json => Ok(Arc::new(JsonFileAdapter::new(settings.json_path.clone()))),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => Ok(Arc::new(
            crate::adapters::sqlite_adapter::SqliteAdapter::from_settings(settings)?,
        )),
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(LedgerError::ConfigInvalid {
            section: "storage".to_string(),
            key: "backend".to_string(),
            reason: "built without the sqlite feature".to_string(),
        }),
    }
}

pub fn fallback_state(settings: &Settings) -> LedgerState {
    if settings.seed {
        LedgerState::seed()
    } else {
        LedgerState::default()
    }
}

pub fn open_ledger(settings: &Settings) -> Result<LedgerStore, LedgerError> {
    let snapshots = open_snapshots(settings)?;
    Ok(LedgerStore::open(snapshots, fallback_state(settings)))
}

/// Saves the demo dataset. Returns `false`, writing nothing, when a snapshot
/// already exists and `force` is not set.
pub fn write_seed(snapshots: &dyn SnapshotPort, force: bool) -> Result<bool, LedgerError> {
    if !force && snapshots.load().map(|s| s.is_some()).unwrap_or(true) {
        return Ok(false);
    }
    snapshots.save(&LedgerState::seed())?;
    Ok(true)
}

fn run_init(settings: &Settings, force: bool) -> Result<(), LedgerError> {
    let snapshots = open_snapshots(settings)?;
    if write_seed(&*snapshots, force)? {
        info!(target_store = %snapshots.describe(), "wrote demo ledger");
        eprintln!("Wrote demo ledger to {}", snapshots.describe());
    } else {
        eprintln!(
            "Snapshot already exists at {}; pass --force to overwrite",
            snapshots.describe()
        );
    }
    Ok(())
}

fn run_profile(settings: &Settings) -> Result<(), LedgerError> {
    let ledger = open_ledger(settings)?;
    let json = serde_json::to_string_pretty(&ledger.profile()).map_err(|e| {
        LedgerError::Storage {
            reason: format!("failed to render profile: {e}"),
        }
    })?;
    println!("{json}");
    Ok(())
}

fn run_export(settings: &Settings, output: &PathBuf) -> Result<(), LedgerError> {
    let ledger = open_ledger(settings)?;
    let transactions = ledger.transactions();
    CsvExportAdapter::new().write(transactions, &output.display().to_string())?;
    eprintln!(
        "Exported {} transactions to {}",
        transactions.len(),
        output.display()
    );
    Ok(())
}

fn run_serve(settings: &Settings) -> Result<(), LedgerError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::stub_link_adapter::StubLinkAdapter;
        use crate::adapters::web::{AppState, build_router};

        let ledger = open_ledger(settings)?;
        let state = AppState::new(ledger, Arc::new(StubLinkAdapter));
        let router = build_router(state);
        let addr = settings.listen;

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, "pocketledger listening");
            eprintln!("Serving on http://{addr}");
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = settings;
        Err(LedgerError::ConfigInvalid {
            section: "web".to_string(),
            key: "listen".to_string(),
            reason: "built without the web feature".to_string(),
        })
    }
}
