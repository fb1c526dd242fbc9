/// Events emitted during a simulation step.
/// The presentation layer consumes these for screen flashes and messages.

use crate::domain::entity::{FruitKind, GhostKind};

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum GameEvent {
    PelletEaten { x: i32, y: i32 },
    PowerPelletEaten { x: i32, y: i32 },
    FruitSpawned { kind: FruitKind },
    FruitEaten { kind: FruitKind, score: u32 },
    GhostEaten { kind: GhostKind },
    LifeLost { remaining: u32 },
    LevelCleared { next_level: u32 },
    GameOver,
}
