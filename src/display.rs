//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! frame.  No game logic is performed; this module only maps world-grid
//! sprites onto terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;
use ray_invaders::entities::{DamageStage, GameStatus};
use ray_invaders::mapper::Layout;
use ray_invaders::snapshot::{RenderSnapshot, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_STATUS: Color = Color::White;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::DarkGrey;
const C_COVER: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// A terminal cell is roughly twice as tall as it is wide.
const CELL_ASPECT: f32 = 2.0;
/// Rows reserved above the play area for the HUD.
const HUD_ROWS: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width × height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    frame: &RenderSnapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let play_rows = height.saturating_sub(HUD_ROWS + 1);
    let layout = Layout::fit(Vec2::new(width as f32 / CELL_ASPECT, play_rows as f32));
    let screen = Screen {
        layout,
        width,
        height: HUD_ROWS + play_rows,
    };

    for sprite in &frame.sprites {
        draw_sprite(out, &screen, sprite)?;
    }

    draw_hud(out, frame, width)?;
    draw_controls_hint(out, height)?;

    match frame.status {
        GameStatus::Waiting => draw_banner(out, width, height, &["← → to start"], Color::White)?,
        GameStatus::Won => draw_banner(
            out,
            width,
            height,
            &["YOU  WON", format!("Score: {}", frame.score).as_str(), "← → play again"],
            Color::Green,
        )?,
        GameStatus::Lost => draw_banner(
            out,
            width,
            height,
            &["GAME  OVER", format!("Score: {}", frame.score).as_str(), "← → play again"],
            Color::Red,
        )?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

struct Screen {
    layout: Layout,
    width: u16,
    /// First row below the play area.
    height: u16,
}

impl Screen {
    /// Top-left cell and extent in cells of a world-space box.
    fn cells(&self, position: Vec2, size: Vec2) -> (i32, i32, i32, i32) {
        let top_left = self.layout.world_to_screen(position);
        let extent = self.layout.size_to_screen(size);
        let col = (top_left.x * CELL_ASPECT).round() as i32;
        let row = top_left.y.round() as i32 + HUD_ROWS as i32;
        let w = ((extent.x * CELL_ASPECT).round() as i32).max(1);
        let h = (extent.y.round() as i32).max(1);
        (col, row, w, h)
    }
}

fn sprite_style(sprite: &Sprite) -> (Color, [char; 2]) {
    match sprite.kind {
        SpriteKind::Enemy => (C_ENEMY, ['▀', '▄']),
        SpriteKind::Cover(stage) => {
            let glyph = match stage {
                DamageStage::Full => '█',
                DamageStage::ThreeQuarters => '▓',
                DamageStage::Half => '▒',
                DamageStage::Quarter | DamageStage::Destroyed => '░',
            };
            (C_COVER, [glyph, glyph])
        }
        SpriteKind::EnemyBullet => (C_BULLET_ENEMY, ['↓', '¦']),
        SpriteKind::Player => (C_PLAYER, ['▲', '▲']),
        SpriteKind::PlayerBullet => (C_BULLET_PLAYER, ['║', '|']),
    }
}

fn draw_sprite<W: Write>(out: &mut W, screen: &Screen, sprite: &Sprite) -> std::io::Result<()> {
    let (col, row, w, h) = screen.cells(sprite.position, sprite.size);
    let (color, glyphs) = sprite_style(sprite);
    out.queue(style::SetForegroundColor(color))?;

    for dy in 0..h {
        let y = row + dy;
        if y < HUD_ROWS as i32 || y >= screen.height as i32 {
            continue;
        }
        // Enemies wiggle: the checker pattern shifts with the frame index.
        let line: String = (0..w)
            .filter(|dx| {
                let x = col + dx;
                x >= 0 && x < screen.width as i32
            })
            .map(|dx| glyphs[((dx + dy + sprite.frame as i32) % 2) as usize])
            .collect();
        if line.is_empty() {
            continue;
        }
        out.queue(cursor::MoveTo(col.max(0) as u16, y as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &RenderSnapshot, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", frame.score)))?;

    let status = match frame.status {
        GameStatus::Waiting => "[ READY ]",
        GameStatus::Playing => "[ PLAYING ]",
        GameStatus::Won => "[ WON ]",
        GameStatus::Lost => "[ LOST ]",
    };
    let sx = (width / 2).saturating_sub(status.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STATUS))?;
    out.queue(Print(status))?;

    let enemies = format!("Invaders:{:>3}", frame.live_enemies);
    let ex = width.saturating_sub(enemies.len() as u16 + 1);
    out.queue(cursor::MoveTo(ex, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(enemies))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    lines: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
