//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Scene`.  No game
//! logic is performed; this module only translates draw commands into
//! terminal commands, scaling world coordinates onto the character grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use bomb_buster::assets::{SpriteSheet, Tint};
use bomb_buster::geometry::Vector2i;
use bomb_buster::scene::{DrawCommand, Scene, SpriteId, TextStyle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Blue;
const C_BANNER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::White => Color::White,
        Tint::Red => Color::Red,
        Tint::Yellow => Color::Yellow,
        Tint::Green => Color::Green,
        Tint::Cyan => Color::Cyan,
        Tint::Blue => Color::Blue,
        Tint::Magenta => Color::Magenta,
        Tint::Grey => Color::DarkGrey,
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates into the bordered play area of the terminal.
///
/// Row 0 is reserved for the title, row 1 and `rows - 2` for the border and
/// `rows - 1` for the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    cols: u16,
    rows: u16,
    world_w: i32,
    world_h: i32,
}

impl Grid {
    pub fn new(cols: u16, rows: u16, scene: &Scene) -> Self {
        Self {
            cols,
            rows,
            world_w: scene.viewport.width.max(1),
            world_h: scene.viewport.height.max(1),
        }
    }

    fn inner_cols(&self) -> i32 {
        (self.cols as i32 - 2).max(1)
    }

    fn inner_rows(&self) -> i32 {
        (self.rows as i32 - 4).max(1)
    }

    /// Terminal cell for a world point, clamped inside the border.
    pub fn cell(&self, p: Vector2i) -> (u16, u16) {
        let col = 1 + (p.x * self.inner_cols() / self.world_w).clamp(0, self.inner_cols() - 1);
        let row = 2 + (p.y * self.inner_rows() / self.world_h).clamp(0, self.inner_rows() - 1);
        (col as u16, row as u16)
    }

    /// Leftmost column so that `text` is centred on `col`, kept inside the border.
    fn centred(&self, col: u16, text: &str) -> u16 {
        let half = text.chars().count() as u16 / 2;
        let max = self.cols.saturating_sub(1 + text.chars().count() as u16).max(1);
        col.saturating_sub(half).clamp(1, max)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    scene: &Scene,
    sheet: &SpriteSheet,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let grid = Grid::new(cols, rows, scene);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_title(out, &grid)?;
    draw_border(out, &grid)?;

    for command in &scene.commands {
        match command {
            DrawCommand::Sprite { sprite, rect } => {
                draw_sprite(out, &grid, sheet, sprite, rect.center())?
            }
            DrawCommand::Text { text, at, style: kind } => {
                draw_text(out, &grid, text, *at, *kind)?
            }
        }
    }

    draw_controls_hint(out, &grid)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Title (row 0) ─────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let title = "★  BOMB  BUSTER  ★";
    out.queue(cursor::MoveTo(grid.centred(grid.cols / 2, title), 0))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let w = grid.cols as usize;
    let h = grid.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    grid: &Grid,
    sheet: &SpriteSheet,
    sprite: &SpriteId,
    center: Vector2i,
) -> std::io::Result<()> {
    // Sheets are checked for completeness at load time.
    let Some(glyph) = sheet.glyph(sprite) else {
        return Ok(());
    };
    let (col, row) = grid.cell(center);
    out.queue(cursor::MoveTo(grid.centred(col, &glyph.text), row))?;
    out.queue(style::SetForegroundColor(tint_color(glyph.tint)))?;
    out.queue(Print(&glyph.text))?;
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn draw_text<W: Write>(
    out: &mut W,
    grid: &Grid,
    text: &str,
    at: Vector2i,
    kind: TextStyle,
) -> std::io::Result<()> {
    match kind {
        TextStyle::Hud => {
            let (col, row) = grid.cell(at);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
            out.queue(Print(text))?;
        }
        TextStyle::Banner => draw_banner(out, grid, text)?,
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, grid: &Grid, text: &str) -> std::io::Result<()> {
    let inner = format!("   {}   ", text);
    let bar = "═".repeat(inner.chars().count());
    let lines = [
        format!("╔{}╗", bar),
        format!("║{}║", inner),
        format!("╚{}╝", bar),
    ];

    let cx = grid.cols / 2;
    let start_row = (grid.rows / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(C_BANNER))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(grid.centred(cx, line), start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W A S D : Move   SPACE : Fire   Q : Quit"))?;
    Ok(())
}
