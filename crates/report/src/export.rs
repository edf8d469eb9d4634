use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::builder::{MatchedRow, ReportPack, SummaryRow, UnmatchedBankRow, UnmatchedGlRow};
use crate::ReportError;

/// Column headers of a report table. The csv writer derives headers from
/// the first serialized row, so an empty table needs them spelled out to
/// still produce a well-formed file.
trait TableSchema {
    const HEADERS: &'static [&'static str];
}

impl TableSchema for MatchedRow {
    const HEADERS: &'static [&'static str] = &[
        "bank_id",
        "gl_id",
        "match_type",
        "txn_date",
        "description",
        "amount_bank",
        "posting_date",
        "memo",
        "amount_gl",
    ];
}

impl TableSchema for UnmatchedBankRow {
    const HEADERS: &'static [&'static str] = &["bank_id", "txn_date", "amount", "description"];
}

impl TableSchema for UnmatchedGlRow {
    const HEADERS: &'static [&'static str] = &["gl_id", "posting_date", "amount", "memo"];
}

impl TableSchema for SummaryRow {
    const HEADERS: &'static [&'static str] = &["match_type", "count"];
}

/// Writes the pack as one CSV file per table into `out_dir`, creating the
/// directory if needed.
pub fn write_csv_pack(pack: &ReportPack, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;
    write_table(&pack.matched, &out_dir.join("matched.csv"))?;
    write_table(&pack.unmatched_bank, &out_dir.join("unmatched_bank.csv"))?;
    write_table(&pack.unmatched_gl, &out_dir.join("unmatched_gl.csv"))?;
    write_table(&pack.summary, &out_dir.join("summary.csv"))?;
    Ok(())
}

/// Writes the whole pack as a single `report.json` document into `out_dir`.
pub fn write_json_pack(pack: &ReportPack, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;
    let file = fs::File::create(out_dir.join("report.json"))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, pack)?;
    writer.flush()?;
    Ok(())
}

fn write_table<T>(rows: &[T], path: &Path) -> Result<(), ReportError>
where
    T: Serialize + TableSchema,
{
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(rows, &mut writer)
}

fn write_rows<T, W>(rows: &[T], writer: &mut csv::Writer<W>) -> Result<(), ReportError>
where
    T: Serialize + TableSchema,
    W: Write,
{
    if rows.is_empty() {
        writer.write_record(T::HEADERS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
