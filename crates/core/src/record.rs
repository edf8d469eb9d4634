use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::money::Money;
use crate::normalize::token_set;

/// One line item from the bank statement feed. Date and amount are `None`
/// when the raw field failed to parse; the record still participates in
/// reconciliation wherever its parsed fields allow.
#[derive(Debug, Clone)]
pub struct BankRecord {
    pub bank_id: String,
    pub txn_date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    /// Normalized word set of `description`, computed once at load time.
    pub desc_tokens: BTreeSet<String>,
    pub matched: bool,
}

impl BankRecord {
    pub fn new(
        bank_id: impl Into<String>,
        txn_date: Option<NaiveDate>,
        amount: Option<Money>,
        description: Option<String>,
    ) -> Self {
        let desc_tokens = description.as_deref().map(token_set).unwrap_or_default();
        BankRecord {
            bank_id: bank_id.into(),
            txn_date,
            amount,
            description,
            desc_tokens,
            matched: false,
        }
    }
}

/// One line item from the general-ledger feed.
#[derive(Debug, Clone)]
pub struct GlRecord {
    pub gl_id: String,
    pub posting_date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub memo: Option<String>,
    /// Normalized word set of `memo`, computed once at load time.
    pub memo_tokens: BTreeSet<String>,
    pub matched: bool,
}

impl GlRecord {
    pub fn new(
        gl_id: impl Into<String>,
        posting_date: Option<NaiveDate>,
        amount: Option<Money>,
        memo: Option<String>,
    ) -> Self {
        let memo_tokens = memo.as_deref().map(token_set).unwrap_or_default();
        GlRecord {
            gl_id: gl_id.into(),
            posting_date,
            amount,
            memo,
            memo_tokens,
            matched: false,
        }
    }
}

/// How a pairing was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactAmount,
    ToleranceDate,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::ExactAmount => write!(f, "exact_amount"),
            MatchType::ToleranceDate => write!(f, "tolerance_date"),
        }
    }
}

/// An accepted pairing. The set of these for a run is the authoritative
/// one-to-one mapping between the two feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub bank_id: String,
    pub gl_id: String,
    pub match_type: MatchType,
}
