//! logstore inspection tool
//!
//! Walks the records of a store file for debugging.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logstore::{RecordStore, Result, StoreConfig, LEN_WIDTH};
use tracing_subscriber::{fmt, EnvFilter};

/// Inspect a logstore file
#[derive(Parser, Debug)]
#[command(name = "logstore-inspect")]
#[command(about = "Inspect an append-only record store file")]
#[command(version)]
struct Args {
    /// Store file
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the store size and record count
    Stat,

    /// List records with their offsets
    List {
        /// Stop after this many records
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Append a record
    Append {
        /// The payload to append
        payload: String,
    },
}

/// Longest payload preview printed by `list`
const PREVIEW_LEN: usize = 48;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let store = RecordStore::open(&args.file, &StoreConfig::default())?;

    match args.command {
        Commands::Stat => {
            let size = store.size()?;
            let mut count = 0usize;
            walk(&store, None, |_, _| count += 1)?;
            println!("size:    {} bytes", size);
            println!("records: {}", count);
        }
        Commands::List { limit } => {
            walk(&store, limit, |pos, payload| {
                let shown = &payload[..payload.len().min(PREVIEW_LEN)];
                let ellipsis = if payload.len() > PREVIEW_LEN { "..." } else { "" };
                println!(
                    "{:>12}  len={:<8} {}{}",
                    pos,
                    payload.len(),
                    String::from_utf8_lossy(shown),
                    ellipsis
                );
            })?;
        }
        Commands::Append { payload } => {
            let (written, pos) = store.append(payload.as_bytes())?;
            println!("offset={} bytes_written={}", pos, written);
        }
    }

    store.close()
}

/// Visit records from offset 0 until the end of the store or `limit`
///
/// A torn or malformed tail stops the walk with an error.
fn walk<F>(store: &RecordStore, limit: Option<usize>, mut visit: F) -> Result<()>
where
    F: FnMut(u64, &[u8]),
{
    let size = store.size()?;
    let mut pos = 0u64;
    let mut seen = 0usize;

    while pos < size {
        if limit.is_some_and(|max| seen >= max) {
            break;
        }
        let payload = store.read(pos)?;
        visit(pos, &payload);
        pos += LEN_WIDTH + payload.len() as u64;
        seen += 1;
    }

    Ok(())
}
