use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use tally_core::{BankRecord, GlRecord, MatchResult, MatchType, Money};

use crate::ReportError;

/// One accepted pairing joined to the full fields of both sides. The two
/// feeds both call their value column `amount`, so it carries a side suffix
/// here; every other column name is already distinct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRow {
    pub bank_id: String,
    pub gl_id: String,
    pub match_type: MatchType,
    pub txn_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount_bank: Option<Money>,
    pub posting_date: Option<NaiveDate>,
    pub memo: Option<String>,
    pub amount_gl: Option<Money>,
}

/// A never-matched bank record, raw feed fields only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedBankRow {
    pub bank_id: String,
    pub txn_date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

/// A never-matched GL record, raw feed fields only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedGlRow {
    pub gl_id: String,
    pub posting_date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub match_type: String,
    pub count: usize,
}

pub const TOTAL_MATCHED: &str = "TOTAL_MATCHED";

/// The externally visible shape of a reconciliation run: the four tables
/// the export layer writes out.
#[derive(Debug, Serialize)]
pub struct ReportPack {
    pub matched: Vec<MatchedRow>,
    pub unmatched_bank: Vec<UnmatchedBankRow>,
    pub unmatched_gl: Vec<UnmatchedGlRow>,
    pub summary: Vec<SummaryRow>,
}

/// Projects the engine's output into the report tables. Matched rows keep
/// the order of `matches` (phase 1 results first); unmatched rows keep feed
/// load order.
pub fn build(
    bank: &[BankRecord],
    gl: &[GlRecord],
    matches: &[MatchResult],
) -> Result<ReportPack, ReportError> {
    let bank_by_id: HashMap<&str, &BankRecord> =
        bank.iter().map(|r| (r.bank_id.as_str(), r)).collect();
    let gl_by_id: HashMap<&str, &GlRecord> = gl.iter().map(|r| (r.gl_id.as_str(), r)).collect();

    let mut matched = Vec::with_capacity(matches.len());
    for result in matches {
        let b = bank_by_id
            .get(result.bank_id.as_str())
            .ok_or_else(|| ReportError::UnknownId {
                side: "bank",
                id: result.bank_id.clone(),
            })?;
        let g = gl_by_id
            .get(result.gl_id.as_str())
            .ok_or_else(|| ReportError::UnknownId {
                side: "GL",
                id: result.gl_id.clone(),
            })?;
        matched.push(MatchedRow {
            bank_id: b.bank_id.clone(),
            gl_id: g.gl_id.clone(),
            match_type: result.match_type,
            txn_date: b.txn_date,
            description: b.description.clone(),
            amount_bank: b.amount,
            posting_date: g.posting_date,
            memo: g.memo.clone(),
            amount_gl: g.amount,
        });
    }

    let unmatched_bank = bank
        .iter()
        .filter(|r| !r.matched)
        .map(|r| UnmatchedBankRow {
            bank_id: r.bank_id.clone(),
            txn_date: r.txn_date,
            amount: r.amount,
            description: r.description.clone(),
        })
        .collect();

    let unmatched_gl = gl
        .iter()
        .filter(|r| !r.matched)
        .map(|r| UnmatchedGlRow {
            gl_id: r.gl_id.clone(),
            posting_date: r.posting_date,
            amount: r.amount,
            memo: r.memo.clone(),
        })
        .collect();

    let summary = summarize(matches);

    Ok(ReportPack {
        matched,
        unmatched_bank,
        unmatched_gl,
        summary,
    })
}

/// One row per match type present, then the `TOTAL_MATCHED` row with the
/// overall count.
fn summarize(matches: &[MatchResult]) -> Vec<SummaryRow> {
    let mut summary = Vec::new();
    for match_type in [MatchType::ExactAmount, MatchType::ToleranceDate] {
        let count = matches.iter().filter(|m| m.match_type == match_type).count();
        if count > 0 {
            summary.push(SummaryRow {
                match_type: match_type.to_string(),
                count,
            });
        }
    }
    summary.push(SummaryRow {
        match_type: TOTAL_MATCHED.to_string(),
        count: matches.len(),
    });
    summary
}
