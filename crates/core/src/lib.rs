pub mod money;
pub mod normalize;
pub mod period;
pub mod record;

pub use money::{Money, ParseMoneyError};
pub use normalize::{normalize, token_overlap, token_set};
pub use period::DateRange;
pub use record::{BankRecord, GlRecord, MatchResult, MatchType};
