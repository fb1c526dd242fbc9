/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws. The maze is a
/// fixed 28x31 grid, so there is no camera: tile (x, y) always lands at
/// the same two terminal columns.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::entity::{Direction, FruitKind, Ghost, GhostKind, GhostMode};
use crate::domain::tile::Cell as MazeCell;
use crate::sim::world::{Phase, WorldState};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells.
    ///
    /// Using the SAME explicit RGB for both `Clear(ClearType::All)` and
    /// every cell's background keeps inter-row gap pixels on VTE-based
    /// terminals from flashing a different color.
    const BASE_BG: Color = Color::Rgb { r: 12, g: 12, b: 24 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        // Color::Reset would fall back to the terminal default and break
        // the uniform background; normalize it away.
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }
}

// ── Renderer ──

/// Each maze tile spans 2 terminal columns, so the 28-wide maze needs 56.
const CELL_W: usize = 2;

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

// Palette
const WALL_FG: Color = Color::Rgb { r: 40, g: 60, b: 220 };
const WALL_BG: Color = Color::Rgb { r: 20, g: 25, b: 80 };
const PELLET_FG: Color = Color::Rgb { r: 255, g: 185, b: 175 };
const DOOR_FG: Color = Color::Rgb { r: 255, g: 160, b: 200 };
const PLAYER_FG: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const FRIGHT_FG: Color = Color::Rgb { r: 60, g: 60, b: 255 };
const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → clear for a clean transition
        let phase_changed = self.last_phase != Some(world.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        self.front.clear();

        match world.phase {
            Phase::Start => self.compose_title(),
            Phase::Playing => self.compose_game(world),
            Phase::GameOver => self.compose_game_over(world),
            Phase::Win => self.compose_win(world),
        }

        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame. No ResetColor here:
        // it would fall back to the terminal default, not BASE_BG.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                let mut buf = [0u8; 4];
                queue!(self.writer, Print(&*cell.ch.encode_utf8(&mut buf)))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &WorldState) {
        let buf_w = self.front.width;

        // ── HUD row ──
        let power = if w.player.power_mode {
            format!("POWER {:>2}", w.player.power_ticks)
        } else {
            String::new()
        };
        let hud = format!(
            " Level:{:<3} Score:{:<7} ♥×{}  {} ",
            w.level, w.score, w.lives, power,
        );
        for x in 0..buf_w {
            self.front.set(x, HUD_ROW, Cell::new(' ', Color::White, HUD_BG));
        }
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Maze ──
        for y in 0..w.maze.height {
            let row = MAP_ROW + y as usize;
            if row >= self.front.height {
                break;
            }
            for x in 0..w.maze.width {
                let col = x as usize * CELL_W;
                if col + 1 >= buf_w {
                    break;
                }
                self.compose_tile(w, x, y, col, row);
            }
        }

        // Fruit, ghosts, player on top (player last so it wins overlaps)
        if let Some(fruit) = &w.fruit {
            let (ch, fg) = fruit_glyph(fruit.kind);
            self.set_tile(fruit.x, fruit.y, ch, fg, Cell::BASE_BG);
        }
        for ghost in &w.ghosts {
            self.compose_ghost(w, ghost);
        }
        self.compose_player(w);

        // ── Message bar ──
        let msg_row = MAP_ROW + w.maze.height as usize + 1;
        if msg_row < self.front.height && !w.message.is_empty() {
            let msg = format!(" ◈ {} ", w.message);
            let bar_bg = Color::Rgb { r: 200, g: 180, b: 50 };
            for x in 0..buf_w {
                self.front.set(x, msg_row, Cell::new(' ', Color::Black, bar_bg));
            }
            self.front.put_str(0, msg_row, &msg, Color::Black, bar_bg);
        }

        // ── Help bar ──
        let help_row = MAP_ROW + w.maze.height as usize + 2;
        if help_row < self.front.height {
            let help = " Arrows/WASD: Move   Q/ESC: Quit";
            self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
        }
    }

    /// Write a single-column glyph into the left half of a tile cell,
    /// blanking the right half.
    fn set_tile(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        let col = x as usize * CELL_W;
        let row = MAP_ROW + y as usize;
        self.front.set(col, row, Cell::new(ch, fg, bg));
        self.front.set(col + 1, row, Cell::new(' ', fg, bg));
    }

    fn compose_tile(&mut self, w: &WorldState, x: i32, y: i32, col: usize, row: usize) {
        let (c0, c1, fg, bg) = match w.maze.cell_at(x, y) {
            MazeCell::Wall => ('█', '█', WALL_FG, WALL_BG),
            MazeCell::GhostDoor => ('─', '─', DOOR_FG, Cell::BASE_BG),
            MazeCell::Pellet => ('·', ' ', PELLET_FG, Cell::BASE_BG),
            MazeCell::PowerPellet => {
                // Slow blink, synced to the world tick
                let ch = if (w.tick / 6) % 2 == 0 { '●' } else { '○' };
                (ch, ' ', PELLET_FG, Cell::BASE_BG)
            }
            MazeCell::Empty => (' ', ' ', Color::Reset, Cell::BASE_BG),
        };
        self.front.set(col, row, Cell::new(c0, fg, bg));
        self.front.set(col + 1, row, Cell::new(c1, fg, bg));
    }

    fn compose_player(&mut self, w: &WorldState) {
        // Chomp animation: mouth opens toward the direction of travel,
        // closing to a full circle every other step.
        let open = (w.player.anim_frame / 2) % 2 == 0;
        let ch = if !open {
            'O'
        } else {
            match w.player.dir {
                Some(Direction::Left) => '>',
                Some(Direction::Right) => '<',
                Some(Direction::Up) => 'v',
                Some(Direction::Down) => '^',
                None => 'O',
            }
        };
        self.set_tile(w.player.x, w.player.y, ch, PLAYER_FG, Cell::BASE_BG);
    }

    fn compose_ghost(&mut self, w: &WorldState, ghost: &Ghost) {
        // Eyes heading home render as a bare pair of eyes
        if ghost.mode == GhostMode::Eaten {
            let col = ghost.x as usize * CELL_W;
            let row = MAP_ROW + ghost.y as usize;
            self.front.set(col, row, Cell::new('"', Color::White, Cell::BASE_BG));
            self.front.set(col + 1, row, Cell::new(' ', Color::White, Cell::BASE_BG));
            return;
        }

        let fg = if ghost.mode == GhostMode::Frightened {
            // Flash white when the power window is almost over
            if w.player.power_ticks < 16 && (w.tick / 3) % 2 == 0 {
                Color::White
            } else {
                FRIGHT_FG
            }
        } else {
            ghost_color(ghost.kind)
        };

        // Fresh out of the house: flicker during the immunity window
        let ch = if ghost.respawn_timer > 0 && (ghost.respawn_timer / 2) % 2 == 1 {
            'm'
        } else {
            'M'
        };
        self.set_tile(ghost.x, ghost.y, ch, fg, Cell::BASE_BG);
    }

    // ── Static screens ──

    fn compose_title(&mut self) {
        let box_art = [
            "╔══════════════════════════════╗",
            "║        C H O M P E R         ║",
            "╚══════════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front.put_str(10, 4 + i, l, PLAYER_FG, Color::Reset);
        }
        self.front.put_str(12, 9, "Eat every pellet. Dodge the ghosts.", Color::White, Color::Reset);
        self.front.put_str(12, 10, "Power pellets turn the tables.", Color::White, Color::Reset);
        self.front.put_str(12, 13, "▸ SPACE / ENTER: Start", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_str(12, 14, "▸ Q / ESC:       Quit", Color::DarkGrey, Color::Reset);
    }

    fn compose_game_over(&mut self, w: &WorldState) {
        let box_art = [
            "╔══════════════════════════╗",
            "║   ✕  G A M E  O V E R  ✕ ║",
            "╚══════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front.put_str(10, 4 + i, l, Color::Rgb { r: 255, g: 60, b: 60 }, Color::Reset);
        }
        let score = format!("◈ Final Score: {}", w.score);
        let level = format!("◈ Reached Level: {}", w.level);
        self.front.put_str(12, 9, &score, Color::White, Color::Reset);
        self.front.put_str(12, 10, &level, Color::White, Color::Reset);
        self.front.put_str(12, 12, "▸ R:       New Game", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_str(12, 13, "▸ Q / ESC: Quit", Color::DarkGrey, Color::Reset);
    }

    fn compose_win(&mut self, w: &WorldState) {
        let box_art = [
            "╔══════════════════════════╗",
            "║   ★  Y O U   W I N !  ★  ║",
            "╚══════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front.put_str(10, 4 + i, l, Color::Rgb { r: 255, g: 220, b: 50 }, Color::Reset);
        }
        let score = format!("◈ Final Score: {}", w.score);
        self.front.put_str(12, 9, &score, Color::White, Color::Reset);
        self.front.put_str(12, 11, "▸ R:       Play Again", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_str(12, 12, "▸ Q / ESC: Quit", Color::DarkGrey, Color::Reset);
    }
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Blinky => Color::Rgb { r: 255, g: 40, b: 40 },
        GhostKind::Pinky => Color::Rgb { r: 255, g: 160, b: 220 },
        GhostKind::Inky => Color::Rgb { r: 60, g: 220, b: 255 },
        GhostKind::Clyde => Color::Rgb { r: 255, g: 170, b: 70 },
    }
}

fn fruit_glyph(kind: FruitKind) -> (char, Color) {
    match kind {
        FruitKind::Cherry => ('%', Color::Rgb { r: 255, g: 50, b: 50 }),
        FruitKind::Strawberry => ('@', Color::Rgb { r: 255, g: 80, b: 120 }),
        FruitKind::Orange => ('o', Color::Rgb { r: 255, g: 160, b: 40 }),
        FruitKind::Apple => ('O', Color::Rgb { r: 220, g: 40, b: 40 }),
        FruitKind::Melon => ('0', Color::Rgb { r: 120, g: 220, b: 80 }),
        FruitKind::Galaxian => ('^', Color::Rgb { r: 255, g: 220, b: 50 }),
        FruitKind::Bell => ('A', Color::Rgb { r: 255, g: 230, b: 120 }),
        FruitKind::Key => ('¤', Color::Rgb { r: 160, g: 200, b: 255 }),
    }
}
