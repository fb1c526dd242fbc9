/// WorldState: the complete snapshot of a running game.
///
/// The world exclusively owns the maze and every entity. During a tick the
/// orchestrator hands each entity a read-only view of the maze; only pellet
/// consumption and level/run resets mutate it. The renderer reads the world
/// immutably between ticks and never feeds anything back.

use crate::config::{FruitConfig, GameConfig, ScoreConfig, SpeedConfig};
use crate::domain::entity::{Fruit, Ghost, Player};
use crate::domain::maze::Maze;

pub const INITIAL_LIVES: u32 = 3;

/// Ticks a freshly posted HUD message stays visible (~1.5 s at 30/s).
const MESSAGE_TICKS: u32 = 45;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Start,
    Playing,
    GameOver,
    /// Declared for the win screen; level completion currently loops
    /// straight back into Playing, so nothing enters this phase yet.
    #[allow(dead_code)]
    Win,
}

pub struct WorldState {
    pub maze: Maze,
    pub player: Player,
    pub ghosts: [Ghost; 4],

    /// At most one live fruit; None while despawned.
    pub fruit: Option<Fruit>,
    /// Ticks since the last fruit spawn or despawn.
    pub fruit_timer: u32,

    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub phase: Phase,
    pub tick: u64,

    /// Transient HUD message; empty when nothing is showing.
    pub message: String,
    pub message_timer: u32,

    // ── Tunables (fixed for the run) ──
    pub speed: SpeedConfig,
    pub scoring: ScoreConfig,
    pub fruit_timing: FruitConfig,
}

impl WorldState {
    pub fn new(config: &GameConfig) -> Self {
        WorldState {
            maze: Maze::new(),
            player: Player::new(),
            ghosts: Ghost::starting_pack(),
            fruit: None,
            fruit_timer: 0,
            score: 0,
            lives: INITIAL_LIVES,
            level: 1,
            phase: Phase::Start,
            tick: 0,
            message: String::new(),
            message_timer: 0,
            speed: config.speed.clone(),
            scoring: config.scoring.clone(),
            fruit_timing: config.fruit.clone(),
        }
    }

    /// Put the player and all four ghosts back on their level-start tiles
    /// (Scatter, facing Left, direction buffers cleared). Shared by level
    /// advance and full run reset — score, lives and level are untouched.
    pub fn reset_positions(&mut self) {
        self.player.respawn();
        self.player.next_dir = None;
        self.player.power_mode = false;
        for (ghost, fresh) in self.ghosts.iter_mut().zip(Ghost::starting_pack()) {
            ghost.reset_to(fresh.x, fresh.y);
        }
    }

    /// Show a HUD message; a new post restarts the timer.
    pub fn post_message(&mut self, text: String) {
        self.message = text;
        self.message_timer = MESSAGE_TICKS;
    }

    /// Count the current message down, clearing it on expiry.
    /// Called once per simulation tick.
    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}
