pub mod config;
pub mod exact;
pub mod store;
pub mod tolerance;

pub use config::MatchConfig;
pub use exact::match_exact_amount;
pub use store::RecordStore;
pub use tolerance::match_tolerance_date;

use thiserror::Error;

use tally_core::{BankRecord, GlRecord, MatchResult};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Bank feed has no records")]
    EmptyBankFeed,
    #[error("GL feed has no records")]
    EmptyGlFeed,
}

/// The complete outcome of a run: both record sets with their final
/// `matched` flags, and the accepted pairings in phase order (all
/// exact-amount results precede all tolerance-date results).
#[derive(Debug)]
pub struct Reconciliation {
    pub bank: Vec<BankRecord>,
    pub gl: Vec<GlRecord>,
    pub matches: Vec<MatchResult>,
}

/// Runs both passes in sequence over a fresh record store. Either feed
/// being empty is a precondition failure; matching never starts on partial
/// inputs.
pub fn reconcile(
    bank: Vec<BankRecord>,
    gl: Vec<GlRecord>,
    config: &MatchConfig,
) -> Result<Reconciliation, EngineError> {
    if bank.is_empty() {
        return Err(EngineError::EmptyBankFeed);
    }
    if gl.is_empty() {
        return Err(EngineError::EmptyGlFeed);
    }

    let mut store = RecordStore::new(bank, gl);

    let mut matches = match_exact_amount(&mut store);
    tracing::info!(matched = matches.len(), "exact-amount pass complete");

    let tolerance_matches = match_tolerance_date(&mut store, config);
    tracing::info!(
        matched = tolerance_matches.len(),
        tolerance = %config.tolerance(),
        window_days = config.date_window_days,
        "tolerance-date pass complete"
    );
    matches.extend(tolerance_matches);

    let (bank, gl) = store.into_parts();
    Ok(Reconciliation { bank, gl, matches })
}
