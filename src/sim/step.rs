/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Fruit spawn/despawn timers
///   2. Player movement + pellet consumption + fruit pickup
///   3. Ghost updates (pre-tick positions recorded first)
///   4. Ghost de-overlap (later index rolls back)
///   5. Collision resolution (overlap OR same-tick swap)
///   6. Level completion check
///
/// Every operation is total: blocked moves, absent fruit and empty cells
/// degrade to no-ops, never to errors.

use crate::domain::entity::Fruit;
use crate::domain::maze::Eaten;

use super::event::GameEvent;
use super::world::{Phase, WorldState, INITIAL_LIVES};

pub fn step(world: &mut WorldState) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    resolve_fruit_timers(world, &mut events);

    let prev_player = (world.player.x, world.player.y);
    world.player.update(&world.maze, world.speed.player_move_rate);

    resolve_pellet(world, &mut events);
    resolve_fruit_pickup(world, &mut events);

    // Record every ghost's pre-tick tile: the de-overlap pass and the
    // swap-collision check both need where each ghost came from.
    let mut prev_ghosts = [(0i32, 0i32); 4];
    for (i, ghost) in world.ghosts.iter_mut().enumerate() {
        prev_ghosts[i] = (ghost.x, ghost.y);
        ghost.update(
            &world.maze,
            &world.player,
            world.level,
            world.speed.ghost_move_rate,
        );
    }

    resolve_ghost_overlap(world, &prev_ghosts);
    resolve_collisions(world, prev_player, &prev_ghosts, &mut events);
    resolve_level_complete(world, &mut events);

    events
}

// ── Fruit lifecycle ──

fn resolve_fruit_timers(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    world.fruit_timer += 1;

    if world.fruit.is_none() && world.fruit_timer > world.fruit_timing.spawn_delay_ticks {
        let fruit = Fruit::new(world.level);
        events.push(GameEvent::FruitSpawned { kind: fruit.kind });
        world.fruit = Some(fruit);
        world.fruit_timer = 0;
    }

    if let Some(fruit) = &mut world.fruit {
        fruit.age += 1;
        if fruit.age > world.fruit_timing.lifetime_ticks {
            world.fruit = None;
            world.fruit_timer = 0;
        }
    }
}

fn resolve_fruit_pickup(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if let Some(fruit) = &world.fruit {
        if world.player.x == fruit.x && world.player.y == fruit.y {
            let gained = fruit.kind.score();
            world.score += gained;
            events.push(GameEvent::FruitEaten {
                kind: fruit.kind,
                score: gained,
            });
            world.fruit = None;
        }
    }
}

// ── Pellets ──

fn resolve_pellet(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let (px, py) = (world.player.x, world.player.y);
    match world.maze.consume_pellet(px, py) {
        Eaten::Pellet => {
            world.score += world.scoring.pellet;
            events.push(GameEvent::PelletEaten { x: px, y: py });
        }
        Eaten::PowerPellet => {
            world.score += world.scoring.power_pellet;
            world.player.activate_power(world.level);
            events.push(GameEvent::PowerPelletEaten { x: px, y: py });
        }
        Eaten::Nothing => {}
    }
}

// ── Ghost anti-stacking ──

/// Pairs are processed in fixed index order; when two ghosts land on the
/// same tile, the later-indexed one rolls back to its pre-tick position.
fn resolve_ghost_overlap(world: &mut WorldState, prev: &[(i32, i32); 4]) {
    for i in 0..world.ghosts.len() {
        for j in (i + 1)..world.ghosts.len() {
            if world.ghosts[i].x == world.ghosts[j].x && world.ghosts[i].y == world.ghosts[j].y {
                world.ghosts[j].x = prev[j].0;
                world.ghosts[j].y = prev[j].1;
            }
        }
    }
}

// ── Collisions ──

/// A collision with a ghost is either a shared post-tick tile or a
/// same-tick swap: the player now stands where the ghost was while the
/// ghost stands where the player was. The swap case means the two moved
/// through each other within one discrete step and counts the same as an
/// overlap.
fn resolve_collisions(
    world: &mut WorldState,
    prev_player: (i32, i32),
    prev_ghosts: &[(i32, i32); 4],
    events: &mut Vec<GameEvent>,
) {
    use crate::domain::entity::GhostMode;

    for i in 0..world.ghosts.len() {
        let ghost = &world.ghosts[i];
        let overlap = world.player.x == ghost.x && world.player.y == ghost.y;
        let swapped = (world.player.x, world.player.y) == prev_ghosts[i]
            && (ghost.x, ghost.y) == prev_player;
        if !overlap && !swapped {
            continue;
        }

        if world.player.power_mode && ghost.mode == GhostMode::Frightened {
            world.score += world.scoring.ghost;
            let kind = ghost.kind;
            world.ghosts[i].mark_eaten();
            events.push(GameEvent::GhostEaten { kind });
        } else if ghost.mode != GhostMode::Frightened && ghost.mode != GhostMode::Eaten {
            world.lives -= 1;
            world.player.respawn();
            events.push(GameEvent::LifeLost {
                remaining: world.lives,
            });
            if world.lives == 0 {
                world.phase = Phase::GameOver;
                events.push(GameEvent::GameOver);
            }
        }
        // Frightened-but-unpowered and Eaten ghosts fall through: the
        // mode filter above already excludes them from the penalty branch.
    }
}

// ── Level / run transitions ──

fn resolve_level_complete(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.maze.remaining_pellets == 0 {
        next_level(world);
        events.push(GameEvent::LevelCleared {
            next_level: world.level,
        });
    }
}

/// Advance to the next level: fresh maze, level-start positions, score and
/// lives carried over.
pub fn next_level(world: &mut WorldState) {
    world.level += 1;
    world.maze.reset();
    world.reset_positions();
    world.phase = Phase::Playing;
}

/// Start a fresh run from level 1.
pub fn reset_run(world: &mut WorldState) {
    world.score = 0;
    world.lives = INITIAL_LIVES;
    world.level = 1;
    world.maze.reset();
    world.reset_positions();
    world.phase = Phase::Playing;
}
