use tally_core::{token_overlap, DateRange, MatchResult, MatchType};

use crate::config::MatchConfig;
use crate::store::RecordStore;

struct Candidate {
    gl_idx: usize,
    score: usize,
    date_distance: u64,
    gl_id: String,
}

/// Phase 2: pair the records phase 1 left open, using the amount tolerance
/// and date window. Candidates are ranked by token-overlap score; the top
/// candidate is accepted if it is the only one or shares at least one token
/// with the bank description. Several textually unrelated candidates are an
/// ambiguity and produce no match.
///
/// Ties on score break deterministically: smaller date distance first, then
/// lower `gl_id`.
pub fn match_tolerance_date(store: &mut RecordStore, config: &MatchConfig) -> Vec<MatchResult> {
    let tolerance = config.tolerance();
    let mut matches = Vec::new();

    for bank_idx in 0..store.bank().len() {
        let accepted = {
            let record = &store.bank()[bank_idx];
            if record.matched {
                continue;
            }
            // Records with a missing date or amount cannot be ranged over
            // and stay unmatched.
            let (Some(txn_date), Some(amount)) = (record.txn_date, record.amount) else {
                continue;
            };

            let window = DateRange::around(txn_date, config.date_window_days);
            let mut candidates: Vec<Candidate> = store
                .open_gl()
                .filter_map(|(gl_idx, gl)| {
                    let posting_date = gl.posting_date?;
                    let gl_amount = gl.amount?;
                    if !window.contains(posting_date) {
                        return None;
                    }
                    if amount.abs_diff(gl_amount) > tolerance {
                        return None;
                    }
                    Some(Candidate {
                        gl_idx,
                        score: token_overlap(&record.desc_tokens, &gl.memo_tokens),
                        date_distance: (posting_date - txn_date).num_days().unsigned_abs(),
                        gl_id: gl.gl_id.clone(),
                    })
                })
                .collect();

            if candidates.is_empty() {
                continue;
            }

            candidates.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then(a.date_distance.cmp(&b.date_distance))
                    .then(a.gl_id.cmp(&b.gl_id))
            });

            let sole_candidate = candidates.len() == 1;
            let best = &candidates[0];
            if sole_candidate || best.score >= 1 {
                Some(best.gl_idx)
            } else {
                None
            }
        };

        if let Some(gl_idx) = accepted {
            matches.push(store.claim(bank_idx, gl_idx, MatchType::ToleranceDate));
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{BankRecord, GlRecord, Money};

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, d)
    }

    fn money(s: &str) -> Option<Money> {
        Some(s.parse().unwrap())
    }

    fn bank(id: &str, day: u32, amount: &str, desc: &str) -> BankRecord {
        BankRecord::new(id, date(day), money(amount), Some(desc.to_string()))
    }

    fn gl(id: &str, day: u32, amount: &str, memo: &str) -> GlRecord {
        GlRecord::new(id, date(day), money(amount), Some(memo.to_string()))
    }

    fn run(bank: Vec<BankRecord>, gl: Vec<GlRecord>) -> (RecordStore, Vec<MatchResult>) {
        let mut store = RecordStore::new(bank, gl);
        let matches = match_tolerance_date(&mut store, &MatchConfig::default());
        (store, matches)
    }

    #[test]
    fn boundary_amount_and_date_are_inclusive() {
        // Amount distance exactly 1.00 and date distance exactly 3 days.
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![gl("G1", 13, "101.00", "invoice 402")],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_type, MatchType::ToleranceDate);
    }

    #[test]
    fn amount_past_tolerance_is_excluded() {
        let (store, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![gl("G1", 13, "101.01", "invoice 402")],
        );
        assert!(matches.is_empty());
        assert!(!store.bank()[0].matched);
    }

    #[test]
    fn date_past_window_is_excluded() {
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![gl("G1", 14, "100.00", "invoice 402")],
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn window_applies_on_both_sides() {
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![gl("G1", 7, "100.50", "invoice 402")],
        );
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn sole_candidate_is_accepted_without_token_overlap() {
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "payment for invoice 402")],
            vec![gl("G1", 11, "100.25", "office supplies")],
        );
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn ambiguity_with_zero_overlap_is_rejected() {
        // Two candidates in window, neither shares a token: refuse to guess.
        let (store, matches) = run(
            vec![bank("B1", 10, "100.00", "payment for invoice 402")],
            vec![
                gl("G1", 11, "100.00", "office supplies"),
                gl("G2", 12, "100.00", "travel reimbursement"),
            ],
        );
        assert!(matches.is_empty());
        assert!(!store.bank()[0].matched);
        assert_eq!(store.open_gl().count(), 2);
    }

    #[test]
    fn token_overlap_picks_among_candidates() {
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "payment for invoice 402")],
            vec![
                gl("G1", 10, "100.00", "office supplies"),
                gl("G2", 12, "100.40", "invoice 402 settled"),
            ],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].gl_id, "G2");
    }

    #[test]
    fn score_tie_breaks_on_date_distance_then_gl_id() {
        // Both candidates share one token with the description. G2 is two
        // days away, G1 three, so G2 wins despite the lower id losing.
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![
                gl("G1", 13, "100.00", "invoice payment"),
                gl("G2", 12, "100.00", "invoice payment"),
            ],
        );
        assert_eq!(matches[0].gl_id, "G2");

        // Equal date distance as well: lowest gl_id wins.
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![
                gl("G9", 12, "100.00", "invoice payment"),
                gl("G2", 12, "100.00", "invoice payment"),
            ],
        );
        assert_eq!(matches[0].gl_id, "G2");
    }

    #[test]
    fn missing_date_or_amount_skips_the_bank_record() {
        let incomplete = BankRecord::new("B1", None, money("100.00"), Some("invoice".into()));
        let (store, matches) = run(
            vec![incomplete, bank("B2", 10, "100.00", "invoice 402")],
            vec![gl("G1", 10, "100.00", "invoice 402")],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].bank_id, "B2");
        assert!(!store.bank()[0].matched);
    }

    #[test]
    fn gl_records_with_missing_fields_are_not_candidates() {
        let undated = GlRecord::new("G1", None, money("100.00"), Some("invoice 402".into()));
        let unpriced = GlRecord::new("G2", date(10), None, Some("invoice 402".into()));
        let (_, matches) = run(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![undated, unpriced, gl("G3", 11, "100.00", "invoice 402")],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].gl_id, "G3");
    }

    #[test]
    fn claimed_gl_records_leave_the_pool_for_later_bank_records() {
        let (store, matches) = run(
            vec![
                bank("B1", 10, "100.00", "invoice 402"),
                bank("B2", 10, "100.00", "invoice 402"),
            ],
            vec![gl("G1", 10, "100.00", "invoice 402")],
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].bank_id, "B1");
        assert!(!store.bank()[1].matched);
    }

    #[test]
    fn custom_config_widens_the_window() {
        let config = MatchConfig::new(rust_decimal::Decimal::new(500, 2), 7);
        let mut store = RecordStore::new(
            vec![bank("B1", 10, "100.00", "invoice 402")],
            vec![gl("G1", 16, "104.50", "invoice 402")],
        );
        let matches = match_tolerance_date(&mut store, &config);
        assert_eq!(matches.len(), 1);
    }
}
