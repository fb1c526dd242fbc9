/// Maze cell types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Pellet,
    PowerPellet,
    Empty,
    /// The door across the top of the ghost house. Ghosts may cross it,
    /// the player may not.
    GhostDoor,
}

impl Cell {
    /// Can the player occupy this cell?
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Wall | Cell::GhostDoor)
    }

    /// Can a ghost occupy this cell? (ghosts pass through the door)
    pub fn is_walkable_for_ghost(self) -> bool {
        self != Cell::Wall
    }

    /// Is this an edible pellet of either kind?
    pub fn is_pellet(self) -> bool {
        matches!(self, Cell::Pellet | Cell::PowerPellet)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_walkable_only_for_ghosts() {
        assert!(!Cell::GhostDoor.is_walkable());
        assert!(Cell::GhostDoor.is_walkable_for_ghost());
        // All other cells agree between the two queries
        for cell in [Cell::Wall, Cell::Pellet, Cell::PowerPellet, Cell::Empty] {
            assert_eq!(cell.is_walkable(), cell.is_walkable_for_ghost());
        }
    }
}
