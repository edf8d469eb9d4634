pub mod feed;

pub use feed::{load_bank_feed, load_bank_file, load_gl_feed, load_gl_file, FeedError};
