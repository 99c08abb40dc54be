pub mod matcher;
pub mod tally;

pub use matcher::match_signals;
pub use tally::MatchTally;
