/// Terminal rendering layer. All terminal I/O lives here.
///
/// `TerminalScreen` buffers whatever the controller reports through the
/// `Screen` trait; `draw` turns the buffered view into terminal commands.
/// No game logic is performed here.

use std::collections::VecDeque;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::achievements::{Achievement, Tier};
use crate::controller::GameSummary;
use crate::entities::{Arena, ObjectKind, Sprite};
use crate::screen::Screen;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SHIP: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_ASTEROID: Color = Color::DarkYellow;
const C_ENEMY: Color = Color::Red;
const C_SHIELD: Color = Color::Yellow;
const C_HEALTH: Color = Color::Magenta;
const C_STAT: Color = Color::Yellow;
const C_LOG: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;

/// Each grid cell is drawn two terminal columns wide so the arena looks square.
const CELL_COLS: u16 = 2;
/// Log lines kept for the message pane.
const LOG_LINES: usize = 8;

pub struct TerminalScreen<W: Write> {
    out: W,
    arena: Arena,
    sprites: Vec<Sprite>,
    stats: Vec<(String, String)>,
    progress: Vec<(String, f64)>,
    messages: VecDeque<String>,
    paused: bool,
    running: bool,
    summary: Option<GameSummary>,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, arena: Arena) -> Self {
        Self {
            out,
            arena,
            sprites: Vec::new(),
            stats: Vec::new(),
            progress: Vec::new(),
            messages: VecDeque::with_capacity(LOG_LINES),
            paused: false,
            running: false,
            summary: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() == LOG_LINES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Render one complete frame from the buffered view.
    pub fn draw(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border()?;
        self.draw_sprites()?;
        self.draw_stats()?;
        self.draw_log()?;
        self.draw_controls_hint()?;

        if self.paused && self.summary.is_none() {
            self.draw_banner("PAUSED", Color::Yellow)?;
        }
        if self.summary.is_some() {
            self.draw_game_over()?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.bottom_row() + 1))?;
        self.out.flush()?;
        Ok(())
    }

    // ── Geometry ─────────────────────────────────────────────────────────────

    fn inner_cols(&self) -> u16 {
        self.arena.width.max(0) as u16 * CELL_COLS
    }

    fn bottom_row(&self) -> u16 {
        self.arena.height.max(0) as u16 + 1
    }

    fn panel_col(&self) -> u16 {
        self.inner_cols() + 4
    }

    // ── Border ───────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.inner_cols() as usize;
        let bottom = self.bottom_row();
        let right = self.inner_cols() + 1;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

        for row in 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(right, row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── Entities ─────────────────────────────────────────────────────────────

    fn draw_sprites(&mut self) -> std::io::Result<()> {
        // Drawn back to front so the ship (first) stays on top.
        for i in (0..self.sprites.len()).rev() {
            let sprite = self.sprites[i];
            if !self.arena.contains(sprite.position) {
                continue;
            }
            let col = 1 + sprite.position.x as u16 * CELL_COLS;
            let row = 1 + sprite.position.y as u16;
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out
                .queue(style::SetForegroundColor(colour_for(sprite.kind)))?;
            self.out.queue(Print(sprite.symbol))?;
        }
        Ok(())
    }

    // ── Side panel ───────────────────────────────────────────────────────────

    fn draw_stats(&mut self) -> std::io::Result<()> {
        let col = self.panel_col();
        let mut row = 1;

        self.out.queue(style::SetForegroundColor(C_STAT))?;
        for (label, value) in &self.stats {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(Print(format!("{label:<14}{value}")))?;
            row += 1;
        }

        row += 1;
        for (name, progress) in &self.progress {
            let tier = Tier::for_progress(*progress);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(tier_colour(tier)))?;
            self.out.queue(Print(format!(
                "{name:<20}{bar} {pct:>3.0}%",
                bar = progress_bar(*progress, 10),
                pct = progress * 100.0
            )))?;
            row += 1;
        }
        Ok(())
    }

    fn draw_log(&mut self) -> std::io::Result<()> {
        let col = self.panel_col();
        let first = self.bottom_row().saturating_sub(LOG_LINES as u16);

        self.out.queue(style::SetForegroundColor(C_LOG))?;
        for (i, message) in self.messages.iter().enumerate() {
            self.out.queue(cursor::MoveTo(col, first + i as u16))?;
            self.out.queue(Print(message))?;
        }
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(0, self.bottom_row() + 1))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print("W A S D : Move   F : Fire   P : Pause   Q : Quit"))?;
        Ok(())
    }

    // ── Overlays ─────────────────────────────────────────────────────────────

    fn draw_banner(&mut self, text: &str, color: Color) -> std::io::Result<()> {
        let cx = 1 + self.inner_cols() / 2;
        let row = self.bottom_row() / 2;
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_game_over(&mut self) -> std::io::Result<()> {
        let Some(summary) = &self.summary else {
            return Ok(());
        };
        let text = summary.to_string();

        let lines: &[(&str, Color)] = &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
        ];

        let col = 2;
        let mut row = 2;
        for (msg, color) in lines {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
            row += 1;
        }

        self.out.queue(style::SetForegroundColor(Color::White))?;
        for line in text.lines() {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
            self.out.queue(Print(line))?;
            row += 1;
        }

        row += 1;
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        self.out.queue(Print("Q - Quit"))?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn pause(&mut self) {
        self.paused = !self.paused;
    }

    fn render(&mut self, sprites: &[Sprite]) {
        self.sprites.clear();
        self.sprites.extend_from_slice(sprites);
    }

    fn set_stat(&mut self, label: &str, value: &str) {
        match self.stats.iter_mut().find(|(l, _)| l == label) {
            Some((_, v)) => *v = value.to_string(),
            None => self.stats.push((label.to_string(), value.to_string())),
        }
    }

    fn set_achievement_progress_stat(&mut self, name: &str, progress: f64) {
        match self.progress.iter_mut().find(|(n, _)| n == name) {
            Some((_, p)) => *p = progress,
            None => self.progress.push((name.to_string(), progress)),
        }
    }

    fn log_achievements(&mut self, achievements: &[Achievement]) {
        for achievement in achievements {
            self.push_message(achievement.to_string());
        }
    }

    fn log(&mut self, message: &str) {
        self.push_message(message.to_string());
    }

    fn show_game_over(&mut self, summary: &GameSummary) {
        self.summary = Some(summary.clone());
    }
}

fn colour_for(kind: ObjectKind) -> Color {
    match kind {
        ObjectKind::Ship => C_SHIP,
        ObjectKind::Bullet => C_BULLET,
        ObjectKind::Asteroid => C_ASTEROID,
        ObjectKind::Enemy => C_ENEMY,
        ObjectKind::ShieldPowerUp => C_SHIELD,
        ObjectKind::HealthPowerUp => C_HEALTH,
    }
}

fn tier_colour(tier: Tier) -> Color {
    match tier {
        Tier::Novice => Color::DarkGrey,
        Tier::Expert => Color::Cyan,
        Tier::Master => Color::Green,
    }
}

/// `[#####-----]` style bar, `width` cells wide.
fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
