use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Instant;

use crate::ai::search::{SearchStats, SearchWindow, evaluate_with_stats, static_eval};
use crate::board::BoardState;
use crate::movegen::legal_moves;
use crate::rules::apply_move;
use crate::types::{Move, Side};

pub const DEFAULT_DEPTH: u8 = 6;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Search settings. `threads = None` runs on rayon's global pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u8,
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            threads: None,
        }
    }
}

/// Score of one root move, from Black's point of view.
#[derive(Debug, Clone, Serialize)]
pub struct RootScore {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: i32,
    /// Root moves in generation order.
    pub root_scores: Vec<RootScore>,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

pub struct Searcher {
    config: SearchConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            config: SearchConfig {
                depth,
                threads: None,
            },
            pool: None,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Searches every root move as its own task and returns the best one.
    ///
    /// Scores are Black-minus-White; the root reduction maximizes when Black
    /// is to move and minimizes when White is. Ties keep the earliest move.
    pub fn search(&self, state: &BoardState) -> SearchOutcome {
        let start = Instant::now();
        let moves = legal_moves(state);

        if moves.is_empty() {
            debug!("no legal moves for {:?}, passing", state.to_move());
            return SearchOutcome {
                best_move: Move::pass(),
                score: static_eval(state),
                root_scores: Vec::new(),
                nodes: 1,
                elapsed_ms: start.elapsed().as_millis() as u64,
            };
        }

        debug!(
            "searching {} root moves for {:?} at depth {}",
            moves.len(),
            state.to_move(),
            self.config.depth
        );

        let results = match &self.pool {
            Some(pool) => pool.install(|| search_roots(state, moves, self.config.depth)),
            None => search_roots(state, moves, self.config.depth),
        };

        let maximizing = state.to_move() == Side::Black;
        let mut nodes = 0u64;
        let mut best: Option<&RootScore> = None;
        for (root, root_nodes) in &results {
            nodes += *root_nodes;
            let better = match best {
                None => true,
                Some(current) if maximizing => root.score > current.score,
                Some(current) => root.score < current.score,
            };
            if better {
                best = Some(root);
            }
        }

        let (best_move, score) = match best {
            Some(root) => (root.mv.clone(), root.score),
            None => (Move::pass(), static_eval(state)),
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!("best move {best_move} scores {score} ({nodes} nodes, {elapsed_ms}ms)");

        SearchOutcome {
            best_move,
            score,
            root_scores: results.into_iter().map(|(root, _)| root).collect(),
            nodes,
            elapsed_ms,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }
}

/// Evaluates each root move on its own task. Each task owns its successor
/// state and a fresh full window; results come back in generation order.
fn search_roots(state: &BoardState, moves: Vec<Move>, depth: u8) -> Vec<(RootScore, u64)> {
    moves
        .into_par_iter()
        .with_max_len(1)
        .map(|mv| {
            let child = apply_move(state, &mv);
            let mut stats = SearchStats::default();
            let score = evaluate_with_stats(&child, depth, SearchWindow::FULL, &mut stats);
            trace!("root {} -> {score} ({} nodes)", mv.placed, stats.nodes);
            (RootScore { mv, score }, stats.nodes)
        })
        .collect()
}

/// Best move for the side to move and its score (Black minus White).
/// Returns the pass sentinel when the side to move has no legal move.
pub fn compute_best_move(state: &BoardState, depth: u8) -> (Move, i32) {
    let outcome = Searcher::with_depth(depth).search(state);
    (outcome.best_move, outcome.score)
}
