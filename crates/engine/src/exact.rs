use tally_core::{MatchResult, MatchType};

use crate::store::RecordStore;

/// Phase 1: pair a bank record with a GL record when their amounts are equal
/// and the GL side has exactly one open candidate. Ambiguity (zero or
/// several candidates) leaves the bank record open for phase 2.
///
/// Bank records are visited strictly in load order; each accepted pairing
/// shrinks the open GL pool before the next bank record is considered, so
/// duplicate-amount groups resolve greedily rather than globally.
pub fn match_exact_amount(store: &mut RecordStore) -> Vec<MatchResult> {
    let mut matches = Vec::new();

    for bank_idx in 0..store.bank().len() {
        let pairing = {
            let record = &store.bank()[bank_idx];
            if record.matched {
                continue;
            }
            let Some(amount) = record.amount else { continue };

            let mut candidates = store
                .open_gl()
                .filter(|(_, gl)| gl.amount == Some(amount))
                .map(|(gl_idx, _)| gl_idx);
            (candidates.next(), candidates.next())
        };

        if let (Some(gl_idx), None) = pairing {
            matches.push(store.claim(bank_idx, gl_idx, MatchType::ExactAmount));
        }
    }

    matches
}
