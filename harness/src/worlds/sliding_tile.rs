//! `SlidingTile`: the 3×3 sliding puzzle.
//!
//! A board is nine cells in row-major order, `0` marking the blank. An
//! action names the direction the blank moves. The goal is
//! `1 2 3 / 4 5 6 / 7 8 _`.

use std::fmt;

use lodestar_kernel::space::{SearchState, StateError, Successor};

use crate::contract::SearchWorldV1;
use crate::worlds::WorldError;

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;
const GOAL: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

/// A board position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; CELLS],
}

impl Board {
    /// Parse nine digits (`0` = blank); spaces and `/` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] unless the input is a permutation of 0..=8.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let digits: Vec<u8> = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(|c| {
                c.to_digit(10)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or_else(|| WorldError::Parse {
                        detail: format!("not a digit: {c:?}"),
                    })
            })
            .collect::<Result<_, _>>()?;
        let tiles: [u8; CELLS] = digits.try_into().map_err(|d: Vec<u8>| WorldError::Parse {
            detail: format!("expected {CELLS} tiles, got {}", d.len()),
        })?;
        let mut seen = [false; CELLS];
        for &t in &tiles {
            let slot = seen.get_mut(usize::from(t)).ok_or_else(|| WorldError::Parse {
                detail: format!("tile {t} out of range"),
            })?;
            if std::mem::replace(slot, true) {
                return Err(WorldError::Parse {
                    detail: format!("tile {t} repeated"),
                });
            }
        }
        Ok(Self { tiles })
    }

    #[must_use]
    pub fn solved() -> Self {
        Self { tiles: GOAL }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles == GOAL
    }

    fn blank(&self) -> usize {
        self.tiles.iter().position(|&t| t == 0).unwrap_or(CELLS - 1)
    }

    /// Whether the goal is reachable: the inversion count must be even.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        let inversions = tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| *b < a).count())
            .sum::<usize>();
        inversions % 2 == 0
    }

    /// Board after moving the blank, or `None` if the move leaves the board.
    #[must_use]
    pub fn slide(&self, dir: Slide) -> Option<Self> {
        let blank = self.blank();
        let (row, col) = (blank / SIDE, blank % SIDE);
        let target = match dir {
            Slide::Up if row > 0 => blank - SIDE,
            Slide::Down if row + 1 < SIDE => blank + SIDE,
            Slide::Left if col > 0 => blank - 1,
            Slide::Right if col + 1 < SIDE => blank + 1,
            _ => return None,
        };
        let mut tiles = self.tiles;
        tiles.swap(blank, target);
        Some(Self { tiles })
    }

    /// Sum of tile distances from their goal cells.
    #[must_use]
    pub fn manhattan(&self) -> f64 {
        let total: usize = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, &t)| {
                let home = usize::from(t) - 1;
                (i / SIDE).abs_diff(home / SIDE) + (i % SIDE).abs_diff(home % SIDE)
            })
            .sum();
        f64::from(u32::try_from(total).unwrap_or(u32::MAX))
    }

    /// Number of tiles not on their goal cell.
    #[must_use]
    pub fn misplaced(&self) -> f64 {
        let count = self
            .tiles
            .iter()
            .zip(GOAL.iter())
            .filter(|(t, g)| **t != 0 && t != g)
            .count();
        f64::from(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.tiles.iter().enumerate() {
            if i > 0 && i % SIDE == 0 {
                f.write_str("/")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

impl SearchState for Board {
    type Action = Slide;

    fn successors(&self) -> Result<Vec<Successor<Self>>, StateError> {
        Ok([Slide::Up, Slide::Down, Slide::Left, Slide::Right]
            .into_iter()
            .filter_map(|dir| self.slide(dir).map(|next| Successor::new(dir, next, 1.0)))
            .collect())
    }
}

/// Which heuristic the world reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileHeuristic {
    Manhattan,
    Misplaced,
}

/// Sliding-puzzle world starting from a fixed board.
#[derive(Debug, Clone)]
pub struct SlidingTile {
    id: String,
    start: Board,
    heuristic: TileHeuristic,
}

impl SlidingTile {
    /// World starting at `start`, scored with the Manhattan heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] for an unsolvable board.
    pub fn new(start: Board) -> Result<Self, WorldError> {
        if !start.is_solvable() {
            return Err(WorldError::Parse {
                detail: format!("board {start:?} is unsolvable"),
            });
        }
        Ok(Self {
            id: format!("sliding_tile:{start:?}"),
            start,
            heuristic: TileHeuristic::Manhattan,
        })
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: TileHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

impl SearchWorldV1 for SlidingTile {
    type State = Board;

    fn world_id(&self) -> &str {
        &self.id
    }

    fn initial_state(&self) -> Board {
        self.start
    }

    fn is_goal(&self, state: &Board) -> bool {
        state.is_solved()
    }

    fn heuristic(&self, state: &Board) -> f64 {
        match self.heuristic {
            TileHeuristic::Manhattan => state.manhattan(),
            TileHeuristic::Misplaced => state.misplaced(),
        }
    }

    fn state_label(&self, state: &Board) -> String {
        format!("{state:?}")
    }
}
