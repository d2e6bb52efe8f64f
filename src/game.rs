use log::{debug, info};
use thiserror::Error;

use crate::ai::{SearchOutcome, Searcher};
use crate::board::BoardState;
use crate::movegen::{find_move, legal_moves};
use crate::rules::apply_move;
use crate::types::{GameResult, GameState, Move, Position, Side, Winner};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("position ({x}, {y}) is out of range")]
    OutOfRange { x: i32, y: i32 },
    #[error("invalid move: field is not empty")]
    Occupied,
    #[error("invalid move: no tiles get flipped")]
    NoFlips,
    #[error("cannot pass while legal moves exist")]
    PassNotAllowed,
}

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, state: &BoardState) -> Move;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, state: &BoardState) -> Move {
        legal_moves(state).into_iter().next().unwrap_or_else(Move::pass)
    }
}

/// Selector backed by the parallel alpha-beta search.
pub struct AlphaBetaSelector {
    searcher: Searcher,
}

impl AlphaBetaSelector {
    pub fn new(searcher: Searcher) -> Self {
        Self { searcher }
    }

    pub fn search(&self, state: &BoardState) -> SearchOutcome {
        self.searcher.search(state)
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select_move(&self, state: &BoardState) -> Move {
        self.search(state).best_move
    }
}

/// Turn bookkeeping around the engine: move validation, passes and game end.
pub struct GameInstance {
    state: BoardState,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<Position>,
    consecutive_passes: u8,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: BoardState::new(),
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            consecutive_passes: 0,
            selector,
        }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(Box::new(AlphaBetaSelector::new(Searcher::with_depth(depth))))
    }

    /// Resets to the initial board, keeping the selector.
    pub fn start(&mut self) {
        self.state = BoardState::new();
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
        self.consecutive_passes = 0;
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn current_side(&self) -> Side {
        self.state.to_move()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.state)
    }

    /// Validates and plays a move for the side to move.
    pub fn register_move(&mut self, x: i32, y: i32) -> Result<Move, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        let pos = to_position(x, y)?;
        if self.state.cell(pos).side().is_some() {
            return Err(GameError::Occupied);
        }
        let mv = find_move(&self.state, pos).ok_or(GameError::NoFlips)?;

        debug!("{:?} plays {}", self.state.to_move(), mv);
        self.play(&mv);
        Ok(mv)
    }

    /// Passes for the side to move. Only allowed without legal moves.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if !self.legal_moves().is_empty() {
            return Err(GameError::PassNotAllowed);
        }

        self.play(&Move::pass());
        Ok(())
    }

    /// Lets the selector choose and play a move (or pass) for the side to move.
    pub fn ai_move(&mut self) -> Result<Move, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }

        let mv = self.selector.select_move(&self.state);
        debug!("AI ({:?}) plays {}", self.state.to_move(), mv);
        self.play(&mv);
        Ok(mv)
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.state.count();
        GameState {
            board: self.state.to_array(),
            is_black_turn: self.state.to_move().is_black(),
            black_count,
            white_count,
            score_black: self.state.disc_differential(Side::Black),
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.state.count();
        GameResult {
            winner: if black_count > white_count {
                Some(Winner::Black)
            } else if white_count > black_count {
                Some(Winner::White)
            } else {
                None
            },
            black_count,
            white_count,
        }
    }

    pub fn board_text(&self) -> String {
        self.state.to_string()
    }

    fn play(&mut self, mv: &Move) {
        self.state = apply_move(&self.state, mv);
        self.is_pass = mv.is_pass();
        self.flipped = mv.flips.clone();

        if mv.is_pass() {
            self.consecutive_passes += 1;
        } else {
            self.consecutive_passes = 0;
        }

        if self.consecutive_passes >= 2 || self.state.empty_count() == 0 {
            self.is_game_over = true;
            let (black, white) = self.state.count();
            info!("game over: black {black}, white {white}");
        }
    }

    #[cfg(test)]
    fn set_state_for_test(&mut self, state: BoardState) {
        self.state = state;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
        self.consecutive_passes = 0;
    }
}

fn to_position(x: i32, y: i32) -> Result<Position, GameError> {
    if !(0..8).contains(&x) || !(0..8).contains(&y) {
        return Err(GameError::OutOfRange { x, y });
    }
    Ok(Position::new(x as i8, y as i8))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMoveSelector {
        pos: Position,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, state: &BoardState) -> Move {
            find_move(state, self.pos).unwrap_or_else(Move::pass)
        }
    }

    fn one_empty_corner() -> BoardState {
        // Black cannot move; White can take (0,0) and fill the board.
        let mut rows = ["WWWWWWWW"; 8];
        rows[0] = ".BWWWWWW";
        BoardState::from_rows(&rows, Side::Black).unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new(Box::new(FirstLegalMoveSelector));
        let state = game.to_game_state();

        assert!(!state.is_black_turn);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert_eq!(state.score_black, 0);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn register_move_rejects_invalid_placements() {
        let mut game = GameInstance::new(Box::new(FirstLegalMoveSelector));

        assert_eq!(game.register_move(3, 3), Err(GameError::Occupied));
        assert_eq!(game.register_move(0, 0), Err(GameError::NoFlips));
        assert_eq!(
            game.register_move(8, 0),
            Err(GameError::OutOfRange { x: 8, y: 0 })
        );
        assert_eq!(game.current_side(), Side::White);
    }

    #[test]
    fn register_move_applies_flips_and_switches_turn() {
        let mut game = GameInstance::new(Box::new(FirstLegalMoveSelector));

        let mv = game.register_move(3, 2).unwrap();
        let state = game.to_game_state();

        assert_eq!(mv.flips, vec![Position::new(3, 3)]);
        assert!(state.is_black_turn);
        assert_eq!((state.black_count, state.white_count), (1, 4));
        assert_eq!(state.flipped, vec![Position::new(3, 3)]);
    }

    #[test]
    fn pass_is_rejected_while_moves_exist() {
        let mut game = GameInstance::new(Box::new(FirstLegalMoveSelector));
        assert_eq!(game.pass(), Err(GameError::PassNotAllowed));
    }

    #[test]
    fn pass_switches_turn_without_ending_game() {
        let mut game = GameInstance::new(Box::new(FirstLegalMoveSelector));
        game.set_state_for_test(one_empty_corner());

        game.pass().unwrap();

        assert_eq!(game.current_side(), Side::White);
        assert!(game.is_pass);
        assert!(game.flipped.is_empty());
        assert!(!game.is_game_over);
        assert!(!game.legal_moves().is_empty());
    }

    #[test]
    fn two_passes_end_the_game() {
        let mut game = GameInstance::new(Box::new(FirstLegalMoveSelector));
        let mut rows = ["BBBBBBBB"; 8];
        rows[7] = "BBBBBBB.";
        game.set_state_for_test(BoardState::from_rows(&rows, Side::White).unwrap());

        assert!(game.ai_move().unwrap().is_pass());
        assert!(!game.is_game_over);
        assert!(game.ai_move().unwrap().is_pass());
        assert!(game.is_game_over);
        assert_eq!(game.ai_move(), Err(GameError::GameOver));
        assert_eq!(game.to_game_result().winner, Some(Winner::Black));
    }

    #[test]
    fn full_board_after_move_sets_game_over() {
        let mut game = GameInstance::new(Box::new(FixedMoveSelector {
            pos: Position::new(0, 0),
        }));
        game.set_state_for_test(one_empty_corner().with_turn(Side::White));

        let mv = game.ai_move().unwrap();
        let state = game.to_game_state();

        assert_eq!(mv.placed, Position::new(0, 0));
        assert!(state.is_game_over);
        assert!(state.is_black_turn);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 64);
        assert_eq!(state.flipped, vec![Position::new(1, 0)]);
        assert_eq!(game.to_game_result().winner, Some(Winner::White));
    }

    #[test]
    fn alpha_beta_selector_plays_a_legal_opening() {
        let mut game = GameInstance::with_depth(2);
        let openings = game.legal_moves();

        let mv = game.ai_move().unwrap();

        assert!(openings.contains(&mv));
        assert!(game.to_game_state().is_black_turn);
    }

    #[test]
    fn start_resets_the_board() {
        let mut game = GameInstance::new(Box::new(FirstLegalMoveSelector));
        game.ai_move().unwrap();
        game.start();

        assert_eq!(*game.state(), BoardState::new());
        assert!(!game.is_pass);
    }
}
