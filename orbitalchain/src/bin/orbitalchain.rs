use clap::{Parser, Subcommand};
use std::{fs, io::Write, path::PathBuf};
use tracing::info;

use orbitalchain_lib::{
    config::Config,
    import::{import_tle_set, ImportOptions},
    snapshot, Chaincode, Function, SmartContract,
};
use tleproto::{encode_payload, TIMESTAMP_DATE_FORMAT};

/// Local development host for the OrbitalChain TLE ledger contract
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Configuration toml file.
    ///
    /// Built-in defaults are used when not provided.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ledger snapshot file, overrides the configuration
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the genesis record
    Init,

    /// Create (or overwrite) the record at a key
    Create {
        id: String,
        satellite_name: String,
        line1: String,
        line2: String,

        /// Record timestamp, today's UTC date when not provided
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// Print the record at a key
    Query { id: String },

    /// Print every record
    QueryAll {
        /// Include each record's key
        #[arg(long)]
        keys: bool,
    },

    /// Create one record per entry of a TLE set file (i.e. SAT_TLE.txt)
    Import {
        tle_set: PathBuf,

        /// Timestamp for every imported record, today's UTC date when not provided
        #[arg(long)]
        timestamp: Option<String>,

        /// Overrides the configured key prefix
        #[arg(long)]
        key_prefix: Option<String>,

        /// Overrides the configured first key index
        #[arg(long)]
        start_index: Option<usize>,
    },

    /// Invoke a contract function by name, e.g. `invoke QueryTLE TLE0`
    Invoke {
        function: String,
        args: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, stdout carries query output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let opts = Opts::parse();

    let cfg = match &opts.config {
        Some(p) => Config::load(p)?,
        None => Config::default(),
    };
    let ledger_path = opts.ledger.clone().unwrap_or_else(|| cfg.ledger.clone());
    let pretty = opts.pretty || cfg.pretty;

    let contract = SmartContract::new();
    let mut stub = snapshot::load(&ledger_path)?;

    let mut stdout = std::io::stdout().lock();
    let dirty = match opts.command {
        Command::Init => {
            contract.init_ledger(&mut stub)?;
            true
        }
        Command::Create {
            id,
            satellite_name,
            line1,
            line2,
            timestamp,
        } => {
            let timestamp = timestamp.unwrap_or_else(today);
            contract.create_tle(&mut stub, &id, &satellite_name, &line1, &line2, &timestamp)?;
            true
        }
        Command::Query { id } => {
            let tle = contract.query_tle(&stub, &id)?;
            stdout.write_all(&encode_payload(&tle, pretty)?)?;
            writeln!(stdout)?;
            false
        }
        Command::QueryAll { keys } => {
            let out = if keys {
                encode_payload(&contract.query_all_tle_entries(&stub)?, pretty)?
            } else {
                encode_payload(&contract.query_all_tle(&stub)?, pretty)?
            };
            stdout.write_all(&out)?;
            writeln!(stdout)?;
            false
        }
        Command::Import {
            tle_set,
            timestamp,
            key_prefix,
            start_index,
        } => {
            let text = fs::read_to_string(&tle_set)?;
            let import_opts = ImportOptions {
                key_prefix: key_prefix.unwrap_or(cfg.import.key_prefix),
                start_index: start_index.unwrap_or(cfg.import.start_index),
                timestamp: timestamp.unwrap_or_else(today),
            };
            let keys = import_tle_set(&contract, &mut stub, &text, &import_opts)?;
            for k in keys {
                writeln!(stdout, "{k}")?;
            }
            true
        }
        Command::Invoke { function, args } => {
            let f: Function = function.parse()?;
            let payload = contract.invoke(&mut stub, f.name(), &args)?;
            if !payload.is_empty() {
                stdout.write_all(&payload)?;
                writeln!(stdout)?;
            }
            f.is_mutating()
        }
    };

    if dirty {
        snapshot::save(&ledger_path, &stub)?;
        info!(ledger = %ledger_path.display(), records = stub.len(), "Ledger updated");
    }

    Ok(())
}

fn today() -> String {
    chrono::Utc::now().format(TIMESTAMP_DATE_FORMAT).to_string()
}
