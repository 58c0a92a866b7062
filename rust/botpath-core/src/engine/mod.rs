pub mod open_set;
pub mod search;

pub use open_set::{NodeId, OpenSet};
pub use search::SearchEngine;
