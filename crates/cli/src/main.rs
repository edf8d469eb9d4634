use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

use tally_engine::MatchConfig;
use tally_import::{load_bank_file, load_gl_file};
use tally_report::{write_csv_pack, write_json_pack};

#[derive(Debug, Parser)]
#[clap(
    name = "tally",
    about = "Reconcile a bank statement feed against a general-ledger feed"
)]
struct Args {
    /// CSV export of the bank statement feed.
    #[clap(long, default_value = "data/incoming/bank.csv")]
    bank: PathBuf,
    /// CSV export of the general-ledger feed.
    #[clap(long, default_value = "data/incoming/gl.csv")]
    gl: PathBuf,
    /// Directory the report pack is written into.
    #[clap(long, short = 'o', default_value = "reports")]
    out: PathBuf,
    /// Allowed amount difference in the tolerance pass, e.g. 1.00.
    #[clap(long)]
    tolerance: Option<Decimal>,
    /// Allowed date distance in days in the tolerance pass.
    #[clap(long)]
    date_window: Option<i64>,
    /// TOML file with match settings; flags override its values.
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,
    /// Report pack format.
    #[clap(long, value_enum, default_value = "csv")]
    format: Format,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file at '{}'", path.display()))?;
            MatchConfig::from_toml(&content).map_err(anyhow::Error::msg)?
        }
        None => MatchConfig::default(),
    };
    if let Some(tolerance) = args.tolerance {
        config.amount_tolerance = tolerance;
    }
    if let Some(days) = args.date_window {
        config.date_window_days = days;
    }

    let bank = load_bank_file(&args.bank)
        .with_context(|| format!("Could not load bank feed from '{}'", args.bank.display()))?;
    let gl = load_gl_file(&args.gl)
        .with_context(|| format!("Could not load GL feed from '{}'", args.gl.display()))?;
    tracing::info!(bank = bank.len(), gl = gl.len(), "feeds loaded");

    let recon = tally_engine::reconcile(bank, gl, &config)?;
    let pack = tally_report::build(&recon.bank, &recon.gl, &recon.matches)?;
    tracing::info!(
        matched = pack.matched.len(),
        unmatched_bank = pack.unmatched_bank.len(),
        unmatched_gl = pack.unmatched_gl.len(),
        "reconciliation complete"
    );

    match args.format {
        Format::Csv => write_csv_pack(&pack, &args.out)
            .with_context(|| format!("Could not write report pack to '{}'", args.out.display()))?,
        Format::Json => write_json_pack(&pack, &args.out)
            .with_context(|| format!("Could not write report pack to '{}'", args.out.display()))?,
    }

    println!("Reconciliation complete. Output saved to: {}", args.out.display());
    Ok(())
}
