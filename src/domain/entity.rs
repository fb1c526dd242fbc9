/// Entities: the player, the four ghosts, and the bonus fruit.
///
/// All positions are integer tile coordinates. Movement is gated by a
/// per-entity tick counter: an entity steps one tile every `interval`
/// ticks, so speed differences are expressed as interval differences.

use super::ai;
use super::maze::Maze;

/// Fixed spawn tiles (the maze layout never changes, so these are compiled
/// in alongside it).
pub const PLAYER_SPAWN: (i32, i32) = (14, 23);
pub const HOME_ENTRANCE: (i32, i32) = (14, 11);
pub const HOUSE_INTERIOR: (i32, i32) = (14, 14);
pub const FRUIT_TILE: (i32, i32) = (14, 17);

/// Ticks of post-respawn immunity (visual only — does not block Frightened).
const RESPAWN_IMMUNITY_TICKS: u32 = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed enumeration order used by every direction search. Tie-breaks in
/// the greedy chooser and the BFS depend on this exact order.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Wrap an x coordinate through the horizontal tunnel.
#[inline]
pub fn wrap_x(maze: &Maze, x: i32) -> i32 {
    if x < 0 {
        maze.width - 1
    } else if x >= maze.width {
        0
    } else {
        x
    }
}

// ── Player ──

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Direction of travel; None until the first input commits.
    pub dir: Option<Direction>,
    /// Last requested direction, applied opportunistically at the next
    /// step where the turn is legal (the "early turn" buffer).
    pub next_dir: Option<Direction>,
    pub anim_frame: u32,
    pub move_tick: u32,
    pub power_mode: bool,
    pub power_ticks: u32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: PLAYER_SPAWN.0,
            y: PLAYER_SPAWN.1,
            dir: None,
            next_dir: None,
            anim_frame: 0,
            move_tick: 0,
            power_mode: false,
            power_ticks: 0,
        }
    }

    /// Buffer a direction request. Last write wins.
    pub fn set_direction(&mut self, dir: Direction) {
        self.next_dir = Some(dir);
    }

    /// Enter power mode. Duration shrinks as levels climb, with a floor
    /// for high levels.
    pub fn activate_power(&mut self, level: u32) {
        self.power_mode = true;
        self.power_ticks = match level {
            0 | 1 => 48,
            2 => 40,
            3..=4 => 32,
            5..=8 => 24,
            _ => 16,
        };
    }

    /// Advance one tick: power timer, animation, then at most one tile of
    /// movement. Blocked moves are silently refused — position stays and
    /// direction is preserved.
    pub fn update(&mut self, maze: &Maze, base_interval: u32) {
        if self.power_mode {
            self.power_ticks = self.power_ticks.saturating_sub(1);
            if self.power_ticks == 0 {
                self.power_mode = false;
            }
        }

        self.anim_frame = self.anim_frame.wrapping_add(1);

        // Powered movement is one tick faster than normal
        let interval = if self.power_mode {
            base_interval.saturating_sub(1).max(1)
        } else {
            base_interval
        };

        self.move_tick += 1;
        if self.move_tick < interval {
            return;
        }
        self.move_tick = 0;

        // Commit the buffered turn if the tile that way is open
        if let Some(next) = self.next_dir {
            let (dx, dy) = next.delta();
            if maze.is_walkable(self.x + dx, self.y + dy) {
                self.dir = Some(next);
                self.next_dir = None;
            }
        }

        if let Some(dir) = self.dir {
            let (dx, dy) = dir.delta();
            let nx = wrap_x(maze, self.x + dx);
            let ny = self.y + dy;
            if maze.is_walkable(nx, ny) {
                self.x = nx;
                self.y = ny;
            }
        }
    }

    /// Send the player back to its spawn tile with travel direction
    /// cleared (after losing a life, or on level advance).
    pub fn respawn(&mut self) {
        self.x = PLAYER_SPAWN.0;
        self.y = PLAYER_SPAWN.1;
        self.dir = None;
    }
}

// ── Ghosts ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GhostKind {
    /// Aggressive: targets the player directly.
    Blinky,
    /// Ambusher: targets four tiles ahead of the player's facing.
    Pinky,
    /// Flanker: reflects the player's tile through itself.
    Inky,
    /// Erratic: chases from afar, retreats to a far corner when close.
    Clyde,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub kind: GhostKind,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub mode: GhostMode,
    pub move_tick: u32,
    pub anim_frame: u32,
    /// Home-entrance tile, meaningful only while Eaten.
    pub target: (i32, i32),
    /// Post-respawn immunity countdown (visual; decays independently).
    pub respawn_timer: u32,
}

impl Ghost {
    pub fn new(kind: GhostKind, x: i32, y: i32) -> Self {
        Ghost {
            kind,
            x,
            y,
            dir: Direction::Left,
            mode: GhostMode::Scatter,
            move_tick: 0,
            anim_frame: 0,
            target: HOME_ENTRANCE,
            respawn_timer: 0,
        }
    }

    /// The four ghosts at their level-start tiles, spread around the house.
    pub fn starting_pack() -> [Ghost; 4] {
        [
            Ghost::new(GhostKind::Blinky, 14, 11),
            Ghost::new(GhostKind::Pinky, 12, 11),
            Ghost::new(GhostKind::Inky, 16, 11),
            Ghost::new(GhostKind::Clyde, 14, 9),
        ]
    }

    /// Effective movement interval for the current mode and level.
    /// Ghosts speed up every three levels and slow down while Frightened.
    fn move_interval(&self, level: u32, base_interval: u32) -> u32 {
        let mut interval = base_interval;
        if level > 1 {
            interval = interval.saturating_sub((level - 1) / 3).max(1);
        }
        if self.mode == GhostMode::Frightened {
            interval += 2;
        }
        interval
    }

    /// Advance one tick. Mode transitions happen before movement and at
    /// most one transition is taken per tick.
    pub fn update(&mut self, maze: &Maze, player: &Player, level: u32, base_interval: u32) {
        self.anim_frame = self.anim_frame.wrapping_add(1);

        if self.mode == GhostMode::Eaten {
            // Close enough to the entrance: snap into the house interior.
            // The generous radius is deliberate — the eyes visibly "pop"
            // home from just outside rather than threading the door.
            let dx = (self.x - self.target.0).abs();
            let dy = (self.y - self.target.1).abs();
            if dx <= 2 && dy <= 2 {
                self.x = HOUSE_INTERIOR.0;
                self.y = HOUSE_INTERIOR.1;
                self.mode = GhostMode::Scatter;
                self.respawn_timer = RESPAWN_IMMUNITY_TICKS;
                return;
            }
            // Eyes travel at full speed, one tile per tick, on the
            // shortest path home. No tunnel wrap — the route home never
            // leaves the maze core.
            self.move_tick = 0;
            self.dir = ai::return_home_direction(maze, self.x, self.y, self.dir, self.target);
            let (dx, dy) = self.dir.delta();
            let (nx, ny) = (self.x + dx, self.y + dy);
            if maze.is_walkable_for_ghost(nx, ny) {
                self.x = nx;
                self.y = ny;
            }
            return;
        }

        if self.respawn_timer > 0 {
            self.respawn_timer -= 1;
        }

        // Frightened tracks the player's power window; the immunity timer
        // never blocks this.
        if player.power_mode && self.mode != GhostMode::Frightened {
            self.mode = GhostMode::Frightened;
        } else if !player.power_mode && self.mode == GhostMode::Frightened {
            self.mode = GhostMode::Chase;
        }

        self.move_tick += 1;
        if self.move_tick < self.move_interval(level, base_interval) {
            return;
        }
        self.move_tick = 0;

        self.dir = ai::choose_direction(maze, self, player);

        let (dx, dy) = self.dir.delta();
        let nx = wrap_x(maze, self.x + dx);
        let ny = self.y + dy;
        if maze.is_walkable_for_ghost(nx, ny) {
            self.x = nx;
            self.y = ny;
        }
    }

    /// Capture by a powered player: become eyes heading for the entrance.
    pub fn mark_eaten(&mut self) {
        self.mode = GhostMode::Eaten;
        self.target = HOME_ENTRANCE;
    }

    /// Put the ghost back at its level-start tile in Scatter, facing Left.
    pub fn reset_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.dir = Direction::Left;
        self.mode = GhostMode::Scatter;
        self.move_tick = 0;
        self.respawn_timer = 0;
    }
}

// ── Fruit ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FruitKind {
    Cherry,
    Strawberry,
    Orange,
    Apple,
    Melon,
    Galaxian,
    Bell,
    Key,
}

impl FruitKind {
    /// Level-indexed progression, capped at the last entry.
    pub fn for_level(level: u32) -> FruitKind {
        match level {
            0 | 1 => FruitKind::Cherry,
            2 => FruitKind::Strawberry,
            3 => FruitKind::Orange,
            4 => FruitKind::Apple,
            5 => FruitKind::Melon,
            6 => FruitKind::Galaxian,
            7 => FruitKind::Bell,
            _ => FruitKind::Key,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            FruitKind::Cherry => 100,
            FruitKind::Strawberry => 300,
            FruitKind::Orange => 500,
            FruitKind::Apple => 700,
            FruitKind::Melon => 1000,
            FruitKind::Galaxian => 2000,
            FruitKind::Bell => 3000,
            FruitKind::Key => 5000,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fruit {
    pub x: i32,
    pub y: i32,
    pub kind: FruitKind,
    pub age: u32,
}

impl Fruit {
    pub fn new(level: u32) -> Self {
        Fruit {
            x: FRUIT_TILE.0,
            y: FRUIT_TILE.1,
            kind: FruitKind::for_level(level),
            age: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticked(player: &mut Player, maze: &Maze, times: u32) {
        for _ in 0..times {
            player.update(maze, 2);
        }
    }

    #[test]
    fn power_duration_shrinks_with_level() {
        let mut p = Player::new();
        p.activate_power(1);
        assert_eq!(p.power_ticks, 48);
        p.activate_power(2);
        assert_eq!(p.power_ticks, 40);
        p.activate_power(4);
        assert_eq!(p.power_ticks, 32);
        p.activate_power(8);
        assert_eq!(p.power_ticks, 24);
        p.activate_power(20);
        assert_eq!(p.power_ticks, 16);
    }

    #[test]
    fn power_mode_expires() {
        let maze = Maze::new();
        let mut p = Player::new();
        p.power_mode = true;
        p.power_ticks = 3;
        ticked(&mut p, &maze, 2);
        assert!(p.power_mode);
        ticked(&mut p, &maze, 1);
        assert!(!p.power_mode);
    }

    #[test]
    fn movement_gated_by_interval() {
        let maze = Maze::new();
        let mut p = Player::new();
        p.set_direction(Direction::Left);
        p.update(&maze, 2);
        // First tick only arms the counter
        assert_eq!((p.x, p.y), PLAYER_SPAWN);
        p.update(&maze, 2);
        assert_eq!((p.x, p.y), (PLAYER_SPAWN.0 - 1, PLAYER_SPAWN.1));
    }

    #[test]
    fn powered_player_moves_every_tick() {
        let maze = Maze::new();
        let mut p = Player::new();
        p.activate_power(1);
        p.set_direction(Direction::Left);
        p.update(&maze, 2);
        assert_eq!(p.x, PLAYER_SPAWN.0 - 1);
    }

    #[test]
    fn buffered_turn_waits_for_opening() {
        let maze = Maze::new();
        let mut p = Player::new();
        // Up from the spawn row is a wall, so the request stays buffered
        p.set_direction(Direction::Up);
        ticked(&mut p, &maze, 2);
        assert_eq!((p.x, p.y), PLAYER_SPAWN);
        assert_eq!(p.dir, None);
        assert_eq!(p.next_dir, Some(Direction::Up));
        // A left request overwrites the buffer and commits
        p.set_direction(Direction::Left);
        ticked(&mut p, &maze, 2);
        assert_eq!(p.dir, Some(Direction::Left));
        assert_eq!(p.next_dir, None);
        assert_eq!(p.x, PLAYER_SPAWN.0 - 1);
    }

    #[test]
    fn blocked_move_keeps_direction() {
        let maze = Maze::new();
        let mut p = Player::new();
        p.x = 1;
        p.y = 1;
        p.dir = Some(Direction::Up);
        ticked(&mut p, &maze, 2);
        // (1, 0) is a wall: no movement, direction preserved
        assert_eq!((p.x, p.y), (1, 1));
        assert_eq!(p.dir, Some(Direction::Up));
    }

    #[test]
    fn tunnel_wraps_both_ways() {
        let maze = Maze::new();
        let mut p = Player::new();
        p.x = 0;
        p.y = 14;
        p.dir = Some(Direction::Left);
        ticked(&mut p, &maze, 2);
        assert_eq!((p.x, p.y), (maze.width - 1, 14));
        p.dir = Some(Direction::Right);
        ticked(&mut p, &maze, 2);
        assert_eq!((p.x, p.y), (0, 14));
    }

    #[test]
    fn ghost_interval_scales_with_level_and_mode() {
        let mut g = Ghost::new(GhostKind::Blinky, 14, 11);
        assert_eq!(g.move_interval(1, 2), 2);
        assert_eq!(g.move_interval(4, 2), 1);
        // Floor of 1 no matter how high the level
        assert_eq!(g.move_interval(40, 2), 1);
        g.mode = GhostMode::Frightened;
        assert_eq!(g.move_interval(1, 2), 4);
    }

    #[test]
    fn frightened_follows_power_window() {
        let maze = Maze::new();
        let mut player = Player::new();
        let mut g = Ghost::new(GhostKind::Blinky, 1, 1);
        player.power_mode = true;
        g.update(&maze, &player, 1, 2);
        assert_eq!(g.mode, GhostMode::Frightened);
        player.power_mode = false;
        g.update(&maze, &player, 1, 2);
        assert_eq!(g.mode, GhostMode::Chase);
    }

    #[test]
    fn eaten_ghost_snaps_home_near_entrance() {
        let maze = Maze::new();
        let player = Player::new();
        let mut g = Ghost::new(GhostKind::Pinky, 13, 12);
        g.mark_eaten();
        g.update(&maze, &player, 1, 2);
        assert_eq!((g.x, g.y), HOUSE_INTERIOR);
        assert_eq!(g.mode, GhostMode::Scatter);
        assert!(g.respawn_timer > 0);
    }

    #[test]
    fn eaten_ghost_moves_every_tick() {
        let maze = Maze::new();
        let player = Player::new();
        // Far from the entrance: must step every single tick
        let mut g = Ghost::new(GhostKind::Blinky, 1, 1);
        g.mark_eaten();
        let before = (g.x, g.y);
        g.update(&maze, &player, 1, 2);
        assert_ne!((g.x, g.y), before);
    }

    #[test]
    fn fruit_kind_caps_at_key() {
        assert_eq!(FruitKind::for_level(1), FruitKind::Cherry);
        assert_eq!(FruitKind::for_level(5), FruitKind::Melon);
        assert_eq!(FruitKind::for_level(8), FruitKind::Key);
        assert_eq!(FruitKind::for_level(99), FruitKind::Key);
    }
}
