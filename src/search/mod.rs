pub mod context;
pub mod eval;
pub mod ordering;
pub mod root;
pub mod search;
pub mod tt;

pub use context::SearchContext;
pub use root::{root_search, SearchReport};
pub use tt::{NodeType, TranspositionTable};
