use std::fmt;

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub const BOTH: [Mark; 2] = [Mark::X, Mark::O];

    #[inline]
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Name used when a player confirms an empty name.
    pub fn default_name(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfRange { x: usize, y: usize },

    #[error("cell ({x}, {y}) is already taken by {by}")]
    Occupied { x: usize, y: usize, by: Mark },
}

/// 3×3 tic-tac-toe board, indexed `[y][x]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE],
}

const LINES: [[(usize, usize); 3]; 8] = [
    // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // columns
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark at `(x, y)`; `None` for empty or out-of-range cells.
    pub fn get(&self, x: usize, y: usize) -> Option<Mark> {
        self.cells.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn place(&mut self, x: usize, y: usize, mark: Mark) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(BoardError::OutOfRange { x, y })?;
        if let Some(by) = *cell {
            return Err(BoardError::Occupied { x, y, by });
        }
        *cell = Some(mark);
        Ok(())
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(x, y)| self.cells[y][x]);
            match (a, b, c) {
                (Some(m), Some(n), Some(o)) if m == n && n == o => Some(m),
                _ => None,
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// `None` while the game is still open.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(m) => Some(Outcome::Win(m)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Every occupied cell as `(x, y, mark)`.
    pub fn marks(&self) -> impl Iterator<Item = (usize, usize, Mark)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, c)| c.map(|m| (x, y, m)))
        })
    }
}
