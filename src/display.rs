//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and a read-only view of the
//! session; no game logic is performed. The 480×640 logical surface is
//! scaled onto whatever cell grid the terminal currently offers.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use holdout::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
use holdout::sim::{FrameState, GameEvent};

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_VICTORY: Color = Color::Green;
const C_DEFEAT: Color = Color::Red;

/// Play area inside the terminal: everything below the HUD row
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn current() -> std::io::Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self {
            cols: w.max(20),
            rows: h.saturating_sub(2).max(10),
        })
    }

    /// Map a logical surface point onto a cell, clamped to the grid
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cx = (x / SURFACE_WIDTH * f32::from(self.cols)) as i32;
        let cy = (y / SURFACE_HEIGHT * f32::from(self.rows)) as i32;
        (
            cx.clamp(0, i32::from(self.cols) - 1) as u16,
            cy.clamp(0, i32::from(self.rows) - 1) as u16 + 1,
        )
    }
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &FrameState) -> std::io::Result<()> {
    let view = Viewport::current()?;

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_hud(out, frame, &view)?;

    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in frame.bullets {
        let (cx, cy) = view.cell(bullet.pos.x, bullet.pos.y);
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(Print('|'))?;
    }

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in frame.enemies {
        let (cx, cy) = view.cell(enemy.pos.x, enemy.pos.y);
        out.queue(cursor::MoveTo(cx.min(view.cols.saturating_sub(2)), cy))?;
        out.queue(Print("▓▓"))?;
    }

    // The round player ship, drawn last so it stays visible
    let (px, py) = view.cell(frame.player.center().x, frame.player.center().y);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(px.saturating_sub(1), py))?;
    out.queue(Print("(O)"))?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows + 1))?;
    out.flush()?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, frame: &FrameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("SCORE {:>6}", frame.score)))?;

    let time_str = format!("TIME LEFT {:>2}s", frame.remaining_secs);
    out.queue(cursor::MoveTo(
        view.cols.saturating_sub(time_str.chars().count() as u16),
        0,
    ))?;
    out.queue(Print(time_str))?;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print("─".repeat(usize::from(view.cols))))?;
    Ok(())
}

/// Menu screen, shown before the first run and after every terminal phase.
pub fn draw_menu<W: Write>(out: &mut W, last_outcome: Option<&GameEvent>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let mut line = |row: u16, color: Color, text: &str| -> std::io::Result<()> {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
        Ok(())
    };

    line(cy.saturating_sub(6), Color::Cyan, "★  H O L D O U T  ★")?;
    line(
        cy.saturating_sub(4),
        Color::White,
        "Survive 10 seconds against the falling swarm",
    )?;

    match last_outcome {
        Some(GameEvent::Victory { final_score }) => {
            line(cy.saturating_sub(2), C_VICTORY, "VICTORY!")?;
            line(
                cy.saturating_sub(1),
                Color::White,
                &format!("Final score: {final_score}"),
            )?;
        }
        Some(GameEvent::GameOver { final_score }) => {
            line(cy.saturating_sub(2), C_DEFEAT, "GAME OVER")?;
            line(
                cy.saturating_sub(1),
                Color::White,
                &format!("Final score: {final_score}"),
            )?;
        }
        None => {}
    }

    line(
        cy + 2,
        C_HINT,
        "← → ↑ ↓ / WASD : Move   SPACE : Shoot   Q : Quit",
    )?;
    line(cy + 4, C_HINT, "Press ENTER to start")?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
