//! `GridWorld`: 4-connected grid with walls and unit step costs.
//!
//! Layouts are written as ASCII rows:
//!
//! ```text
//! S..#
//! .#..
//! ...G
//! ```
//!
//! `S` is the start, `G` the goal, `#` a wall and `.` open floor. Successors
//! are generated in the fixed order up, down, left, right.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use lodestar_kernel::space::{SearchState, StateError, Successor};

use crate::contract::SearchWorldV1;
use crate::worlds::WorldError;

/// Direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(Debug)]
struct Layout {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl Layout {
    fn step(&self, x: usize, y: usize, (dx, dy): (isize, isize)) -> Option<(usize, usize)> {
        let x = x.checked_add_signed(dx)?;
        let y = y.checked_add_signed(dy)?;
        (x < self.width && y < self.height && !self.walls[y * self.width + x]).then_some((x, y))
    }
}

/// A cell of a [`GridWorld`]. Equality and hashing use coordinates only.
#[derive(Clone)]
pub struct Cell {
    layout: Rc<Layout>,
    pub x: usize,
    pub y: usize,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y) == (other.x, other.y)
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x, self.y).hash(state);
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl SearchState for Cell {
    type Action = Move;

    fn successors(&self) -> Result<Vec<Successor<Self>>, StateError> {
        Ok(Move::ALL
            .iter()
            .filter_map(|&m| {
                let (nx, ny) = self.layout.step(self.x, self.y, m.delta())?;
                let next = Self {
                    layout: Rc::clone(&self.layout),
                    x: nx,
                    y: ny,
                };
                Some(Successor::new(m, next, 1.0))
            })
            .collect())
    }
}

/// Grid world with a single start and goal.
#[derive(Debug)]
pub struct GridWorld {
    id: String,
    layout: Rc<Layout>,
    start: (usize, usize),
    goal: (usize, usize),
}

impl GridWorld {
    /// Parse an ASCII layout (see the module docs).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] for ragged rows, unknown characters, or a
    /// missing or repeated `S`/`G`.
    pub fn parse(text: &str) -> Result<Self, WorldError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(WorldError::Parse {
                detail: "empty grid".into(),
            });
        }

        let mut walls = Vec::with_capacity(width * height);
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(WorldError::Parse {
                    detail: format!("row {y} has length {}, expected {width}", row.chars().count()),
                });
            }
            for (x, c) in row.chars().enumerate() {
                let slot = match c {
                    'S' => &mut start,
                    'G' => &mut goal,
                    '#' | '.' => {
                        walls.push(c == '#');
                        continue;
                    }
                    other => {
                        return Err(WorldError::Parse {
                            detail: format!("unexpected character {other:?} at ({x},{y})"),
                        })
                    }
                };
                if slot.replace((x, y)).is_some() {
                    return Err(WorldError::Parse {
                        detail: format!("repeated {c:?} at ({x},{y})"),
                    });
                }
                walls.push(false);
            }
        }

        let (Some(start), Some(goal)) = (start, goal) else {
            return Err(WorldError::Parse {
                detail: "layout needs exactly one S and one G".into(),
            });
        };
        Ok(Self {
            id: format!("grid:{width}x{height}"),
            layout: Rc::new(Layout {
                width,
                height,
                walls,
            }),
            start,
            goal,
        })
    }

    /// Open `width × height` grid, start top-left, goal bottom-right.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] if either dimension is zero.
    pub fn open(width: usize, height: usize) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::Parse {
                detail: "grid dimensions must be positive".into(),
            });
        }
        let walls = vec![false; width * height];
        Ok(Self {
            id: format!("grid:{width}x{height}"),
            layout: Rc::new(Layout {
                width,
                height,
                walls,
            }),
            start: (0, 0),
            goal: (width - 1, height - 1),
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.layout.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.layout.height
    }

    /// Manhattan distance to the goal. Admissible for unit 4-connected moves.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn manhattan(&self, cell: &Cell) -> f64 {
        (cell.x.abs_diff(self.goal.0) + cell.y.abs_diff(self.goal.1)) as f64
    }
}

impl SearchWorldV1 for GridWorld {
    type State = Cell;

    fn world_id(&self) -> &str {
        &self.id
    }

    fn initial_state(&self) -> Cell {
        Cell {
            layout: Rc::clone(&self.layout),
            x: self.start.0,
            y: self.start.1,
        }
    }

    fn is_goal(&self, state: &Cell) -> bool {
        (state.x, state.y) == self.goal
    }

    fn heuristic(&self, state: &Cell) -> f64 {
        self.manhattan(state)
    }

    fn state_label(&self, state: &Cell) -> String {
        format!("{},{}", state.x, state.y)
    }
}
