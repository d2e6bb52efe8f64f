use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Returns `0` for empty, `1` for black and `2` for white.
    pub fn to_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
        }
    }
}

/// One of the two players. Black is always the maximizing side in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }

    pub fn is_black(self) -> bool {
        self == Side::Black
    }
}

/// A board coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    /// Sentinel for "no move".
    pub const PASS: Position = Position { x: -1, y: -1 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn is_pass(self) -> bool {
        self == Self::PASS
    }

    pub fn in_bounds(self) -> bool {
        (0..8).contains(&self.x) && (0..8).contains(&self.y)
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}:{})", self.x, self.y)
    }
}

/// A placement plus the discs it flips.
///
/// Identity is the placed position only: the flip set is derived from the
/// board the move was generated on.
#[derive(Debug, Clone)]
pub struct Move {
    pub placed: Position,
    pub flips: Vec<Position>,
}

/// Serialized flat as `{ x, y, flipped: [{ x, y }] }`, a plain struct so JS
/// callers get an object rather than a `Map`.
impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Move", 3)?;
        state.serialize_field("x", &self.placed.x)?;
        state.serialize_field("y", &self.placed.y)?;
        state.serialize_field("flipped", &self.flips)?;
        state.end()
    }
}

impl Move {
    pub fn new(placed: Position, flips: Vec<Position>) -> Self {
        Self { placed, flips }
    }

    pub fn pass() -> Self {
        Self {
            placed: Position::PASS,
            flips: Vec::new(),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.placed.is_pass()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.placed == other.placed
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.placed.hash(state);
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pass() {
            write!(f, "Pass")
        } else {
            write!(
                f,
                "Placed tile {} and flipping {} tiles",
                self.placed,
                self.flips.len()
            )
        }
    }
}

/// Public game state returned from the game driver and WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub is_black_turn: bool,
    pub black_count: u8,
    pub white_count: u8,
    /// Black discs minus white discs.
    pub score_black: i32,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: positions flipped by it.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Option<Winner>,
    pub black_count: u8,
    pub white_count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
}

#[cfg(test)]
mod tests {
    use serde_test::{Token, assert_ser_tokens};

    use super::*;

    #[test]
    fn moves_compare_by_placed_position_only() {
        let a = Move::new(Position::new(2, 3), vec![Position::new(3, 3)]);
        let b = Move::new(Position::new(2, 3), Vec::new());
        let c = Move::new(Position::new(3, 2), vec![Position::new(3, 3)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn move_serializes_as_flat_struct() {
        let mv = Move::new(Position::new(2, 3), vec![Position::new(3, 3)]);

        assert_ser_tokens(
            &mv,
            &[
                Token::Struct {
                    name: "Move",
                    len: 3,
                },
                Token::Str("x"),
                Token::I8(2),
                Token::Str("y"),
                Token::I8(3),
                Token::Str("flipped"),
                Token::Seq { len: Some(1) },
                Token::Struct {
                    name: "Position",
                    len: 2,
                },
                Token::Str("x"),
                Token::I8(3),
                Token::Str("y"),
                Token::I8(3),
                Token::StructEnd,
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn pass_serializes_with_sentinel_and_no_flips() {
        assert_ser_tokens(
            &Move::pass(),
            &[
                Token::Struct {
                    name: "Move",
                    len: 3,
                },
                Token::Str("x"),
                Token::I8(-1),
                Token::Str("y"),
                Token::I8(-1),
                Token::Str("flipped"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn pass_sentinel_is_off_board() {
        assert!(Move::pass().is_pass());
        assert!(!Position::PASS.in_bounds());
        assert!(Position::new(7, 0).in_bounds());
        assert!(!Position::new(8, 0).in_bounds());
    }

    #[test]
    fn side_opponent_round_trips_colours() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.cell(), Cell::White);
        assert_eq!(Cell::Black.side(), Some(Side::Black));
        assert_eq!(Cell::Empty.side(), None);
    }
}
