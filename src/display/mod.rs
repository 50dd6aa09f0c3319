//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.  World coordinates (pixels) are scaled
//! onto whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use musou_shooter::constants::{HEIGHT, WIDTH};
use musou_shooter::entities::{Direction, GameState, GameStatus, Mood, Sprite, SpriteKind};
use musou_shooter::geometry::{Rect, Vec2};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Blue;
const C_HUD_STATUS: Color = Color::Magenta;
const C_CHARACTER: Color = Color::White;
const C_BEAM: Color = Color::Cyan;
const C_SHIELD: Color = Color::Grey;
const C_GRAVITY: Color = Color::DarkMagenta;
const C_NEO_GRAVITY: Color = Color::DarkRed;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const ENEMY_COLORS: [Color; 3] = [Color::Green, Color::DarkYellow, Color::Red];
const BOMB_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Terminal cells available to the play area: inside the border, below the HUD
/// and above the hint row.
#[derive(Clone, Copy)]
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    fn cell(&self, p: Vec2) -> (u16, u16) {
        let cx = (p.x / WIDTH * self.cols as f32).clamp(0.0, self.cols as f32 - 1.0);
        let cy = (p.y / HEIGHT * self.rows as f32).clamp(0.0, self.rows as f32 - 1.0);
        (1 + cx as u16, 2 + cy as u16)
    }

    /// Inclusive cell span covered by `rect`, clipped to the play area.
    fn span(&self, rect: &Rect) -> ((u16, u16), (u16, u16)) {
        let top_left = self.cell(Vec2::new(rect.left(), rect.top()));
        let bottom_right = self.cell(Vec2::new(rect.right() - 0.01, rect.bottom() - 0.01));
        (top_left, bottom_right)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    for sprite in state.sprites() {
        draw_sprite(out, &view, &sprite)?;
    }

    draw_controls_hint(out, height)?;

    if state.status == GameStatus::Ended {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score.value())))?;

    let mut status = Vec::new();
    if state.character.is_hyper() {
        status.push("HYPER");
    }
    if state.shield.is_some() {
        status.push("SHIELD");
    }
    if !state.fields.is_empty() {
        status.push("GRAVITY");
    }
    let status = status.join("  ");
    let sx = width.saturating_sub(status.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STATUS))?;
    out.queue(Print(status))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let ((c0, r0), (c1, r1)) = view.span(rect);
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(glyph.repeat((c1 - c0 + 1) as usize)))?;
    }
    Ok(())
}

/// A short label centred on `rect`.
fn label<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let (cx, cy) = view.cell(rect.center());
    let half = text.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(cx.saturating_sub(half).max(1), cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn facing_glyph(facing: Direction) -> &'static str {
    match facing {
        Direction::Right => "→",
        Direction::UpRight => "↗",
        Direction::Up => "↑",
        Direction::UpLeft => "↖",
        Direction::Left => "←",
        Direction::DownLeft => "↙",
        Direction::Down => "↓",
        Direction::DownRight => "↘",
    }
}

fn beam_glyph(facing: Direction) -> &'static str {
    match facing {
        Direction::Right | Direction::Left => "══",
        Direction::Up | Direction::Down => "║",
        Direction::UpRight | Direction::DownLeft => "╱",
        Direction::UpLeft | Direction::DownRight => "╲",
    }
}

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let rect = &sprite.rect;
    match sprite.kind {
        SpriteKind::NeoGravity => fill(out, view, rect, "░", C_NEO_GRAVITY),
        SpriteKind::Gravity { radius } => {
            let ((c0, r0), (c1, r1)) = view.span(rect);
            let center = rect.center();
            out.queue(style::SetForegroundColor(C_GRAVITY))?;
            for row in r0..=r1 {
                for col in c0..=c1 {
                    // Centre of this cell back in world space.
                    let wx = (col - 1) as f32 * WIDTH / view.cols as f32
                        + WIDTH / view.cols as f32 / 2.0;
                    let wy = (row - 2) as f32 * HEIGHT / view.rows as f32
                        + HEIGHT / view.rows as f32 / 2.0;
                    if Vec2::new(wx - center.x, wy - center.y).length() <= radius {
                        out.queue(cursor::MoveTo(col, row))?;
                        out.queue(Print("░"))?;
                    }
                }
            }
            Ok(())
        }
        SpriteKind::Character { facing, hyper, mood } => {
            let face = match mood {
                Mood::Neutral => "(・ө・)",
                Mood::Joy => "(^ө^)",
                Mood::Sad => "(;ө;)",
            };
            if hyper {
                out.queue(style::SetAttribute(Attribute::Reverse))?;
            }
            label(out, view, rect, &format!("{face}{}", facing_glyph(facing)), C_CHARACTER)?;
            out.queue(style::SetAttribute(Attribute::NoReverse))?;
            Ok(())
        }
        SpriteKind::Enemy { variant } => {
            let body = match variant {
                0 => "<▼>",
                1 => "(◉)",
                _ => "/Ψ\\",
            };
            let color = ENEMY_COLORS[variant as usize % ENEMY_COLORS.len()];
            label(out, view, rect, body, color)
        }
        SpriteKind::Bomb { radius, color } => {
            let glyph = if radius >= 30 { "●" } else { "•" };
            let color = BOMB_COLORS[color as usize % BOMB_COLORS.len()];
            label(out, view, rect, glyph, color)
        }
        SpriteKind::Beam { facing } => label(out, view, rect, beam_glyph(facing), C_BEAM),
        SpriteKind::Shield => fill(out, view, rect, "█", C_SHIELD),
        SpriteKind::Explosion { frame } => {
            let glyph = if frame == 0 { "✶✶✶" } else { "✸✸✸" };
            label(out, view, rect, glyph, C_EXPLOSION)
        }
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Arrows/WASD: Move (Z: fast)  SPACE: Beam  TAB: Gravity  ENTER: Neo  X: Hyper  C: Shield  Q: Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score.value());
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
