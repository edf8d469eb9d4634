use tally_core::{BankRecord, GlRecord, MatchResult, MatchType};

/// Owns both record sets for the duration of a run. The `matched` flags are
/// mutated only through [`RecordStore::claim`], which also keeps the open-GL
/// index pool in step so the passes never re-filter the full GL collection.
#[derive(Debug)]
pub struct RecordStore {
    bank: Vec<BankRecord>,
    gl: Vec<GlRecord>,
    open_gl: Vec<usize>,
}

impl RecordStore {
    pub fn new(bank: Vec<BankRecord>, gl: Vec<GlRecord>) -> Self {
        let open_gl = (0..gl.len()).collect();
        RecordStore { bank, gl, open_gl }
    }

    pub fn bank(&self) -> &[BankRecord] {
        &self.bank
    }

    pub fn gl(&self) -> &[GlRecord] {
        &self.gl
    }

    /// GL records not yet claimed by any match, in load order.
    pub fn open_gl(&self) -> impl Iterator<Item = (usize, &GlRecord)> + '_ {
        self.open_gl.iter().map(move |&i| (i, &self.gl[i]))
    }

    /// Marks both sides matched and removes the GL record from the open
    /// pool. Callers guarantee both indexes are currently unmatched.
    pub fn claim(&mut self, bank_idx: usize, gl_idx: usize, match_type: MatchType) -> MatchResult {
        debug_assert!(!self.bank[bank_idx].matched);
        debug_assert!(!self.gl[gl_idx].matched);

        self.bank[bank_idx].matched = true;
        self.gl[gl_idx].matched = true;
        self.open_gl.retain(|&i| i != gl_idx);

        MatchResult {
            bank_id: self.bank[bank_idx].bank_id.clone(),
            gl_id: self.gl[gl_idx].gl_id.clone(),
            match_type,
        }
    }

    pub fn into_parts(self) -> (Vec<BankRecord>, Vec<GlRecord>) {
        (self.bank, self.gl)
    }
}
