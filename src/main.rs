/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::entity::Direction;
use sim::event::GameEvent;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = WorldState::new(&config);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Chomper!");
    println!("Final Score: {}", world.score);
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(world.speed.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, &kb) {
            break;
        }

        // Direction keys buffer a turn request; later presses within the
        // same frame overwrite earlier ones.
        if world.phase == Phase::Playing {
            for key in kb.presses() {
                if let Some(dir) = direction_for_key(*key) {
                    world.player.set_direction(dir);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            let events = step::step(world);
            process_events(world, &events);
            world.tick_message();
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Route simulation events to the HUD message bar.
fn process_events(world: &mut WorldState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PowerPelletEaten { .. } => {
                world.post_message("POWER UP!".to_string());
            }
            GameEvent::FruitSpawned { .. } => {
                world.post_message("Bonus fruit!".to_string());
            }
            GameEvent::FruitEaten { score, .. } => {
                world.post_message(format!("Fruit +{score}"));
            }
            GameEvent::GhostEaten { .. } => {
                world.post_message(format!("Ghost +{}", world.scoring.ghost));
            }
            GameEvent::LifeLost { remaining } => {
                world.post_message(format!("Caught! {remaining} left"));
            }
            GameEvent::LevelCleared { next_level } => {
                world.post_message(format!("Level {next_level}!"));
            }
            GameEvent::PelletEaten { .. } | GameEvent::GameOver => {}
        }
    }
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

fn direction_for_key(key: KeyCode) -> Option<Direction> {
    if KEYS_LEFT.contains(&key) {
        Some(Direction::Left)
    } else if KEYS_RIGHT.contains(&key) {
        Some(Direction::Right)
    } else if KEYS_UP.contains(&key) {
        Some(Direction::Up)
    } else if KEYS_DOWN.contains(&key) {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Handle phase-level keys. Returns true to quit the program.
fn handle_meta(world: &mut WorldState, kb: &InputState) -> bool {
    if kb.any_pressed(KEYS_QUIT) {
        return true;
    }

    match world.phase {
        Phase::Start => {
            if kb.any_pressed(KEYS_CONFIRM) {
                world.phase = Phase::Playing;
            }
        }
        Phase::GameOver | Phase::Win => {
            if kb.any_pressed(KEYS_RESTART) {
                step::reset_run(world);
            }
        }
        Phase::Playing => {}
    }

    false
}
