/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to the original arcade tunables if the file is missing or
/// incomplete. Hoisting every speed, score and timer into one structure
/// keeps the simulation deterministic and lets tests override tunables.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub scoring: ScoreConfig,
    pub fruit: FruitConfig,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
    /// Ticks per player step (the power-mode bonus shaves one off).
    pub player_move_rate: u32,
    /// Ticks per ghost step before level/mode adjustments.
    pub ghost_move_rate: u32,
}

#[derive(Clone, Debug)]
pub struct ScoreConfig {
    pub pellet: u32,
    pub power_pellet: u32,
    pub ghost: u32,
}

#[derive(Clone, Debug)]
pub struct FruitConfig {
    pub spawn_delay_ticks: u32,
    pub lifetime_ticks: u32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    scoring: TomlScoring,
    #[serde(default)]
    fruit: TomlFruit,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_player_move")]
    player_move_rate: u32,
    #[serde(default = "default_ghost_move")]
    ghost_move_rate: u32,
}

#[derive(Deserialize, Debug)]
struct TomlScoring {
    #[serde(default = "default_pellet_score")]
    pellet: u32,
    #[serde(default = "default_power_pellet_score")]
    power_pellet: u32,
    #[serde(default = "default_ghost_score")]
    ghost: u32,
}

#[derive(Deserialize, Debug)]
struct TomlFruit {
    #[serde(default = "default_fruit_spawn_delay")]
    spawn_delay_ticks: u32,
    #[serde(default = "default_fruit_lifetime")]
    lifetime_ticks: u32,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 33 }        // ~30 ticks/s
fn default_player_move() -> u32 { 2 }
fn default_ghost_move() -> u32 { 2 }
fn default_pellet_score() -> u32 { 10 }
fn default_power_pellet_score() -> u32 { 50 }
fn default_ghost_score() -> u32 { 200 }
fn default_fruit_spawn_delay() -> u32 { 600 }
fn default_fruit_lifetime() -> u32 { 480 }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_ms: default_tick_rate(),
            player_move_rate: default_player_move(),
            ghost_move_rate: default_ghost_move(),
        }
    }
}

impl Default for TomlScoring {
    fn default() -> Self {
        TomlScoring {
            pellet: default_pellet_score(),
            power_pellet: default_power_pellet_score(),
            ghost: default_ghost_score(),
        }
    }
}

impl Default for TomlFruit {
    fn default() -> Self {
        TomlFruit {
            spawn_delay_ticks: default_fruit_spawn_delay(),
            lifetime_ticks: default_fruit_lifetime(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: toml_cfg.speed.tick_rate_ms,
                player_move_rate: toml_cfg.speed.player_move_rate.max(1),
                ghost_move_rate: toml_cfg.speed.ghost_move_rate.max(1),
            },
            scoring: ScoreConfig {
                pellet: toml_cfg.scoring.pellet,
                power_pellet: toml_cfg.scoring.power_pellet,
                ghost: toml_cfg.scoring.ghost,
            },
            fruit: FruitConfig {
                spawn_delay_ticks: toml_cfg.fruit.spawn_delay_ticks,
                lifetime_ticks: toml_cfg.fruit.lifetime_ticks,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_arcade_tunables() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.speed.player_move_rate, 2);
        assert_eq!(cfg.speed.ghost_move_rate, 2);
        assert_eq!(cfg.scoring.pellet, 10);
        assert_eq!(cfg.scoring.power_pellet, 50);
        assert_eq!(cfg.scoring.ghost, 200);
        assert_eq!(cfg.fruit.spawn_delay_ticks, 600);
        assert_eq!(cfg.fruit.lifetime_ticks, 480);
    }

    #[test]
    fn partial_toml_fills_in_the_rest() {
        let cfg: TomlConfig = toml::from_str("[speed]\ntick_rate_ms = 16\n").unwrap();
        let cfg = GameConfig::from_toml(cfg);
        assert_eq!(cfg.speed.tick_rate_ms, 16);
        assert_eq!(cfg.speed.player_move_rate, 2);
        assert_eq!(cfg.scoring.ghost, 200);
    }
}
