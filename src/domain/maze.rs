/// The maze: a fixed 28x31 grid of cells plus pellet bookkeeping.
///
/// The layout is compiled in — there are no loadable maps. All coordinate
/// queries are total over i32: anything out of bounds reads as Wall, which
/// keeps every mover inside the grid without explicit clamping.

use super::tile::Cell;

pub const MAZE_WIDTH: i32 = 28;
pub const MAZE_HEIGHT: i32 = 31;

/// W = wall, . = pellet, O = power pellet, _ = empty, G = ghost door
/// The middle band around the ghost house is dotless except for the two
/// vertical side corridors, and the tunnel row carries no pellets at all;
/// that leaves exactly 244 pellets.
const LAYOUT: [&str; MAZE_HEIGHT as usize] = [
    "WWWWWWWWWWWWWWWWWWWWWWWWWWWW",
    "W............WW............W",
    "W.WWWW.WWWWW.WW.WWWWW.WWWW.W",
    "WOWWWW.WWWWW.WW.WWWWW.WWWWOW",
    "W.WWWW.WWWWW.WW.WWWWW.WWWW.W",
    "W..........................W",
    "W.WWWW.WW.WWWWWWWW.WW.WWWW.W",
    "W.WWWW.WW.WWWWWWWW.WW.WWWW.W",
    "W......WW....WW....WW......W",
    "WWWWWW.WWWWW_WW_WWWWW.WWWWWW",
    "WWWWWW.WWWWW_WW_WWWWW.WWWWWW",
    "WWWWWW.WW__________WW.WWWWWW",
    "WWWWWW.WW_WWWGGWWW_WW.WWWWWW",
    "WWWWWW.WW_W______W_WW.WWWWWW",
    "__________W______W__________",
    "WWWWWW.WW_W______W_WW.WWWWWW",
    "WWWWWW.WW_WWWWWWWW_WW.WWWWWW",
    "WWWWWW.WW__________WW.WWWWWW",
    "WWWWWW.WW_WWWWWWWW_WW.WWWWWW",
    "WWWWWW.WW_WWWWWWWW_WW.WWWWWW",
    "W............WW............W",
    "W.WWWW.WWWWW.WW.WWWWW.WWWW.W",
    "W.WWWW.WWWWW.WW.WWWWW.WWWW.W",
    "WO..WW................WW..OW",
    "WWW.WW.WW.WWWWWWWW.WW.WW.WWW",
    "WWW.WW.WW.WWWWWWWW.WW.WW.WWW",
    "W......WW....WW....WW......W",
    "W.WWWWWWWWWW.WW.WWWWWWWWWW.W",
    "W.WWWWWWWWWW.WW.WWWWWWWWWW.W",
    "W..........................W",
    "WWWWWWWWWWWWWWWWWWWWWWWWWWWW",
];

/// What `consume_pellet` found at the cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Eaten {
    Nothing,
    Pellet,
    PowerPellet,
}

pub struct Maze {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
    pub total_pellets: u32,
    pub remaining_pellets: u32,
}

impl Maze {
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity((MAZE_WIDTH * MAZE_HEIGHT) as usize);
        let mut pellets = 0;
        for row in LAYOUT {
            for ch in row.bytes() {
                let cell = match ch {
                    b'W' => Cell::Wall,
                    b'.' => Cell::Pellet,
                    b'O' => Cell::PowerPellet,
                    b'G' => Cell::GhostDoor,
                    _ => Cell::Empty,
                };
                if cell.is_pellet() {
                    pellets += 1;
                }
                cells.push(cell);
            }
        }
        Maze {
            width: MAZE_WIDTH,
            height: MAZE_HEIGHT,
            cells,
            total_pellets: pellets,
            remaining_pellets: pellets,
        }
    }

    /// Cell at (x, y). Out of bounds reads as Wall (closed world).
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return Cell::Wall;
        }
        self.cells[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.cells[(y * self.width + x) as usize] = cell;
        }
    }

    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.cell_at(x, y).is_walkable()
    }

    #[inline]
    pub fn is_walkable_for_ghost(&self, x: i32, y: i32) -> bool {
        self.cell_at(x, y).is_walkable_for_ghost()
    }

    /// Clear the pellet at (x, y), if any, and report what was eaten.
    /// The remaining counter is decremented exactly once per pellet.
    pub fn consume_pellet(&mut self, x: i32, y: i32) -> Eaten {
        match self.cell_at(x, y) {
            Cell::Pellet => {
                self.set_cell(x, y, Cell::Empty);
                self.remaining_pellets -= 1;
                Eaten::Pellet
            }
            Cell::PowerPellet => {
                self.set_cell(x, y, Cell::Empty);
                self.remaining_pellets -= 1;
                Eaten::PowerPellet
            }
            _ => Eaten::Nothing,
        }
    }

    /// Rebuild the grid and counters from the static layout.
    pub fn reset(&mut self) {
        *self = Maze::new();
    }
}
