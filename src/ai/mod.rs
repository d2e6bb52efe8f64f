pub mod parallel;
pub mod search;

pub use parallel::{
    DEFAULT_DEPTH, RootScore, SearchConfig, SearchError, SearchOutcome, Searcher,
    compute_best_move,
};
pub use search::{SCORE_INF, SearchStats, SearchWindow, evaluate, static_eval};
