/// Ghost AI — per-kind targeting, greedy chase steering, and the BFS
/// shortest-path search used by eyes returning home.
///
/// The chase behaviors are deliberately greedy: each step picks the legal
/// move that minimizes Manhattan distance to a target tile, never
/// reversing unless stuck. Local minima are acceptable while chasing.
/// The return-home search is a real BFS because eyes must never stall.

use std::collections::VecDeque;

use super::entity::{wrap_x, Direction, Ghost, GhostKind, GhostMode, Player, DIRECTIONS};
use super::maze::Maze;

fn manhattan(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// The tile this ghost is steering toward. Targets may land outside the
/// grid (the frightened mirror in particular); out-of-bounds cells read
/// as Wall, so the greedy search just drifts away from the edge.
pub fn chase_target(maze: &Maze, ghost: &Ghost, player: &Player) -> (i32, i32) {
    if ghost.mode == GhostMode::Frightened {
        // Flee: mirror the player through the ghost's own tile
        return (2 * ghost.x - player.x, 2 * ghost.y - player.y);
    }

    let (mut tx, mut ty) = (player.x, player.y);
    match ghost.kind {
        GhostKind::Blinky => {}
        GhostKind::Pinky => {
            // Ambush four tiles ahead of the player's facing
            if let Some(dir) = player.dir {
                let (dx, dy) = dir.delta();
                tx += dx * 4;
                ty += dy * 4;
            }
        }
        GhostKind::Inky => {
            // Flank: reflect the player through this ghost
            tx = 2 * player.x - ghost.x;
            ty = 2 * player.y - ghost.y;
        }
        GhostKind::Clyde => {
            // Shy: head for the far corner once the player is close
            if manhattan(ghost.x, ghost.y, player.x, player.y) < 8 {
                tx = 0;
                ty = maze.height - 1;
            }
        }
    }
    (tx, ty)
}

/// Greedy steering: of the four cardinal moves, pick the ghost-walkable
/// one closest to the target. The reverse of the current facing is held
/// back as a fallback so ghosts only backtrack when cornered; ties keep
/// the first candidate in the fixed enumeration order.
pub fn choose_direction(maze: &Maze, ghost: &Ghost, player: &Player) -> Direction {
    let (tx, ty) = chase_target(maze, ghost, player);

    let mut best: Option<(Direction, i32)> = None;
    let mut reverse: Option<(Direction, i32)> = None;

    for dir in DIRECTIONS {
        let (dx, dy) = dir.delta();
        let (nx, ny) = (ghost.x + dx, ghost.y + dy);
        // No wrap here: a tunnel mouth reads as Wall, so ghosts turn
        // around at the edge instead of following the player through.
        if !maze.is_walkable_for_ghost(nx, ny) {
            continue;
        }
        let dist = manhattan(nx, ny, tx, ty);
        if dir == ghost.dir.opposite() {
            if reverse.map_or(true, |(_, d)| dist < d) {
                reverse = Some((dir, dist));
            }
        } else if best.map_or(true, |(_, d)| dist < d) {
            best = Some((dir, dist));
        }
    }

    match (best, reverse) {
        (Some((dir, _)), _) => dir,
        (None, Some((dir, _))) => dir,
        // Fully boxed in: keep facing (movement will simply refuse)
        (None, None) => ghost.dir,
    }
}

/// Shortest-path first move from (x, y) to `target` over ghost-walkable
/// cells, honoring the horizontal tunnel. Ties fall to the enumeration
/// order in which neighbors are expanded. Already at the target, or no
/// path: any walkable neighbor, then the current facing.
pub fn return_home_direction(
    maze: &Maze,
    x: i32,
    y: i32,
    current: Direction,
    target: (i32, i32),
) -> Direction {
    let (w, h) = (maze.width, maze.height);
    let mut visited = vec![false; (w * h) as usize];
    visited[(y * w + x) as usize] = true;

    let mut queue: VecDeque<(i32, i32, Option<Direction>)> = VecDeque::with_capacity(64);
    queue.push_back((x, y, None));

    while let Some((cx, cy, first)) = queue.pop_front() {
        if (cx, cy) == target {
            match first {
                Some(dir) => return dir,
                None => break, // already home
            }
        }
        for dir in DIRECTIONS {
            let (dx, dy) = dir.delta();
            let nx = wrap_x(maze, cx + dx);
            let ny = cy + dy;
            if ny < 0 || ny >= h || !maze.is_walkable_for_ghost(nx, ny) {
                continue;
            }
            let idx = (ny * w + nx) as usize;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            queue.push_back((nx, ny, first.or(Some(dir))));
        }
    }

    // No path (or standing on the target): step anywhere legal
    for dir in DIRECTIONS {
        let (dx, dy) = dir.delta();
        if maze.is_walkable_for_ghost(x + dx, y + dy) {
            return dir;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::HOME_ENTRANCE;

    fn ghost_at(kind: GhostKind, x: i32, y: i32) -> Ghost {
        Ghost::new(kind, x, y)
    }

    fn player_at(x: i32, y: i32, dir: Option<Direction>) -> Player {
        let mut p = Player::new();
        p.x = x;
        p.y = y;
        p.dir = dir;
        p
    }

    #[test]
    fn blinky_targets_player_tile() {
        let maze = Maze::new();
        let g = ghost_at(GhostKind::Blinky, 1, 1);
        let p = player_at(10, 20, Some(Direction::Left));
        assert_eq!(chase_target(&maze, &g, &p), (10, 20));
    }

    #[test]
    fn pinky_leads_the_player() {
        let maze = Maze::new();
        let g = ghost_at(GhostKind::Pinky, 1, 1);
        assert_eq!(
            chase_target(&maze, &g, &player_at(10, 20, Some(Direction::Right))),
            (14, 20)
        );
        assert_eq!(
            chase_target(&maze, &g, &player_at(10, 20, Some(Direction::Up))),
            (10, 16)
        );
        // An idle player gets no lead
        assert_eq!(chase_target(&maze, &g, &player_at(10, 20, None)), (10, 20));
    }

    #[test]
    fn inky_reflects_player_through_self() {
        let maze = Maze::new();
        let g = ghost_at(GhostKind::Inky, 6, 10);
        let p = player_at(10, 20, None);
        assert_eq!(chase_target(&maze, &g, &p), (14, 30));
    }

    #[test]
    fn clyde_retreats_when_close() {
        let maze = Maze::new();
        let far = ghost_at(GhostKind::Clyde, 1, 1);
        let p = player_at(10, 20, None);
        assert_eq!(chase_target(&maze, &far, &p), (10, 20));
        let near = ghost_at(GhostKind::Clyde, 9, 17); // Manhattan 4
        assert_eq!(chase_target(&maze, &near, &p), (0, maze.height - 1));
    }

    #[test]
    fn frightened_flees_by_mirroring() {
        let maze = Maze::new();
        let mut g = ghost_at(GhostKind::Blinky, 5, 5);
        g.mode = GhostMode::Frightened;
        let p = player_at(8, 9, None);
        // 2*self - player; may leave the grid and that is fine
        assert_eq!(chase_target(&maze, &g, &p), (2, 1));
    }

    #[test]
    fn ties_keep_first_direction_in_order() {
        let maze = Maze::new();
        // (5, 5) sits in an east-west corridor: up and down are walls,
        // left and right are open and equidistant from a target straight
        // above. Left precedes Right in the enumeration order.
        let mut g = ghost_at(GhostKind::Blinky, 5, 5);
        g.dir = Direction::Up;
        let p = player_at(5, 1, None);
        assert_eq!(choose_direction(&maze, &g, &p), Direction::Left);
    }

    #[test]
    fn reverses_only_when_cornered() {
        let maze = Maze::new();
        // West tunnel mouth, facing out: the only legal move is back east
        let mut g = ghost_at(GhostKind::Blinky, 0, 14);
        g.dir = Direction::Left;
        let p = player_at(26, 14, None);
        assert_eq!(choose_direction(&maze, &g, &p), Direction::Right);
    }

    #[test]
    fn bfs_finds_shortest_first_move() {
        let maze = Maze::new();
        // Straight shot east along row 11 to the home entrance
        let dir = return_home_direction(&maze, 11, 11, Direction::Up, HOME_ENTRANCE);
        assert_eq!(dir, Direction::Right);
    }

    #[test]
    fn bfs_uses_the_tunnel() {
        let maze = Maze::new();
        // Row 14 is split by the ghost house walls, so the short way from
        // the west stub to the east stub is out through the tunnel.
        let dir = return_home_direction(&maze, 1, 14, Direction::Right, (26, 14));
        assert_eq!(dir, Direction::Left);
    }

    #[test]
    fn bfs_at_target_falls_back_to_any_neighbor() {
        let maze = Maze::new();
        // Standing on the entrance: first walkable neighbor in order.
        // Up is a wall; down is the ghost door, which eyes may cross.
        let dir = return_home_direction(
            &maze,
            HOME_ENTRANCE.0,
            HOME_ENTRANCE.1,
            Direction::Left,
            HOME_ENTRANCE,
        );
        assert_eq!(dir, Direction::Down);
    }

    #[test]
    fn bfs_reaches_entrance_from_anywhere_walkable() {
        let maze = Maze::new();
        // Every ghost-walkable tile must have a path home (no Eaten loop)
        for y in 0..maze.height {
            for x in 0..maze.width {
                if !maze.is_walkable_for_ghost(x, y) || (x, y) == HOME_ENTRANCE {
                    continue;
                }
                // Walk the BFS result to the entrance, bounded by the
                // total cell count
                let (mut cx, mut cy) = (x, y);
                let mut steps = 0;
                while (cx, cy) != HOME_ENTRANCE {
                    let dir = return_home_direction(&maze, cx, cy, Direction::Left, HOME_ENTRANCE);
                    let (dx, dy) = dir.delta();
                    cx = wrap_x(&maze, cx + dx);
                    cy += dy;
                    steps += 1;
                    assert!(
                        steps <= maze.width * maze.height,
                        "no progress from ({x}, {y})"
                    );
                }
            }
        }
    }
}
