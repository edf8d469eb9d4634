use chrono::NaiveDate;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use tally_core::{BankRecord, GlRecord, Money};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Missing input feed: {0}")]
    MissingFeed(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No data rows")]
    NoDataRows,
}

/// Header names of one feed. Matched case-insensitively after trimming, so
/// `Bank_ID` or ` amount ` in an export header still resolves.
struct FeedSchema {
    id: &'static str,
    date: &'static str,
    amount: &'static str,
    text: &'static str,
}

const BANK_SCHEMA: FeedSchema = FeedSchema {
    id: "bank_id",
    date: "txn_date",
    amount: "amount",
    text: "description",
};

const GL_SCHEMA: FeedSchema = FeedSchema {
    id: "gl_id",
    date: "posting_date",
    amount: "amount",
    text: "memo",
};

struct ColumnIndexes {
    id: usize,
    date: usize,
    amount: usize,
    text: usize,
}

struct RawRow {
    id: String,
    date: Option<NaiveDate>,
    amount: Option<Money>,
    text: Option<String>,
}

/// Parse the bank statement feed. Unparseable dates and amounts become
/// `None` on the record; a missing column or an empty feed is fatal.
pub fn load_bank_feed<R: Read>(data: R) -> Result<Vec<BankRecord>, FeedError> {
    let rows = read_rows(data, &BANK_SCHEMA)?;
    Ok(rows
        .into_iter()
        .map(|r| BankRecord::new(r.id, r.date, r.amount, r.text))
        .collect())
}

/// Parse the general-ledger feed under the same contract as the bank feed.
pub fn load_gl_feed<R: Read>(data: R) -> Result<Vec<GlRecord>, FeedError> {
    let rows = read_rows(data, &GL_SCHEMA)?;
    Ok(rows
        .into_iter()
        .map(|r| GlRecord::new(r.id, r.date, r.amount, r.text))
        .collect())
}

pub fn load_bank_file(path: &Path) -> Result<Vec<BankRecord>, FeedError> {
    load_bank_feed(open_feed(path)?)
}

pub fn load_gl_file(path: &Path) -> Result<Vec<GlRecord>, FeedError> {
    load_gl_feed(open_feed(path)?)
}

fn open_feed(path: &Path) -> Result<std::fs::File, FeedError> {
    if !path.exists() {
        return Err(FeedError::MissingFeed(path.to_path_buf()));
    }
    Ok(std::fs::File::open(path)?)
}

fn read_rows<R: Read>(data: R, schema: &FeedSchema) -> Result<Vec<RawRow>, FeedError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(data);

    let headers = reader.headers()?.clone();
    let indexes = resolve_columns(&headers, schema)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.is_empty() {
            continue;
        }

        let id = record.get(indexes.id).unwrap_or_default().trim().to_string();
        let date = parse_date_field(record.get(indexes.date), &id, schema.date);
        let amount = parse_amount_field(record.get(indexes.amount), &id, schema.amount);
        let text = record
            .get(indexes.text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        rows.push(RawRow { id, date, amount, text });
    }

    if rows.is_empty() {
        return Err(FeedError::NoDataRows);
    }

    Ok(rows)
}

fn resolve_columns(
    headers: &csv::StringRecord,
    schema: &FeedSchema,
) -> Result<ColumnIndexes, FeedError> {
    let find = |name: &str| -> Result<usize, FeedError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| FeedError::MissingColumn(name.to_string()))
    };

    Ok(ColumnIndexes {
        id: find(schema.id)?,
        date: find(schema.date)?,
        amount: find(schema.amount)?,
        text: find(schema.text)?,
    })
}

/// A field that fails to parse is kept as `None` rather than failing the
/// load: the record must still reach the unmatched report.
fn parse_date_field(field: Option<&str>, id: &str, column: &str) -> Option<NaiveDate> {
    let raw = field.map(str::trim).filter(|s| !s.is_empty())?;
    match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            tracing::warn!(id, column, value = raw, "unparseable date, field left missing");
            None
        }
    }
}

fn parse_amount_field(field: Option<&str>, id: &str, column: &str) -> Option<Money> {
    let raw = field.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<Money>() {
        Ok(amount) => Some(amount),
        Err(_) => {
            tracing::warn!(id, column, value = raw, "unparseable amount, field left missing");
            None
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    for fmt in &[
        "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y",
    ] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    None
}
