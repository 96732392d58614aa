//! Terminal rendering layer — all terminal output lives here.
//!
//! `TerminalCanvas` rasterizes [`Shape`]s onto a character grid, one cell per
//! `cell_width × cell_height` world units, and [`TerminalCanvas::present`]
//! writes the finished grid out.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use homing_survival::render::{Align, Color, Renderer, Shape};

const GAUGE_WIDTH: usize = 10;

fn term_color(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::White,
        Color::Gray => style::Color::DarkGrey,
        Color::Blue => style::Color::Blue,
        Color::Red => style::Color::Red,
        Color::Yellow => style::Color::Yellow,
        Color::Purple => style::Color::Magenta,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
    dimmed: bool,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::White, dimmed: false };

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cell: Vec2,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, cell: Vec2) -> Self {
        Self {
            cols,
            rows,
            cell,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    /// Visible area in world units.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * self.cell
    }

    /// Centre of a terminal cell in viewport coordinates.
    pub fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + Vec2::splat(0.5)) * self.cell
    }

    /// Write the grid to the terminal, one colour change per run of cells.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut current: Option<style::Color> = None;
            let mut run = String::new();
            for col in 0..self.cols {
                let cell = self.cells[self.index(col as i32, row as i32)];
                let color = if cell.dimmed {
                    style::Color::DarkGrey
                } else {
                    term_color(cell.color)
                };
                if current != Some(color) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(color))?;
                    current = Some(color);
                }
                run.push(cell.ch);
            }
            out.queue(Print(&run))?;
        }
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    // ── Grid helpers ──────────────────────────────────────────────────────────

    fn index(&self, col: i32, row: i32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }

    fn to_cell(&self, pos: Vec2) -> (i32, i32) {
        let c = (pos / self.cell).floor();
        (c.x as i32, c.y as i32)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if self.in_bounds(col, row) {
            let i = self.index(col, row);
            self.cells[i] = Cell { ch, color, dimmed: false };
        }
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    /// Visible cells within `reach` of `center` on both axes, with each
    /// cell's centre point.
    fn covered_cells(&self, center: Vec2, reach: f32) -> impl Iterator<Item = (i32, i32, Vec2)> + '_ {
        let (c0, r0) = self.to_cell(center - Vec2::splat(reach));
        let (c1, r1) = self.to_cell(center + Vec2::splat(reach));
        let cell = self.cell;
        (r0.max(0)..=r1.min(self.rows as i32 - 1)).flat_map(move |row| {
            (c0.max(0)..=c1.min(self.cols as i32 - 1)).map(move |col| {
                let mid = (Vec2::new(col as f32, row as f32) + Vec2::splat(0.5)) * cell;
                (col, row, mid)
            })
        })
    }

    // ── Primitives ────────────────────────────────────────────────────────────

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let hits: Vec<(i32, i32)> = self
            .covered_cells(center, radius)
            .filter(|(_, _, mid)| mid.distance(center) <= radius)
            .map(|(col, row, _)| (col, row))
            .collect();
        if hits.is_empty() {
            // Smaller than a cell: still show a dot.
            let (col, row) = self.to_cell(center);
            self.put(col, row, '•', color);
        }
        for (col, row) in hits {
            self.put(col, row, '█', color);
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let band = self.cell.max_element() / 2.0;
        let hits: Vec<(i32, i32)> = self
            .covered_cells(center, radius + band)
            .filter(|(_, _, mid)| (mid.distance(center) - radius).abs() <= band)
            .map(|(col, row, _)| (col, row))
            .collect();
        for (col, row) in hits {
            self.put(col, row, '○', color);
        }
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let (c0, r0) = self.to_cell(origin);
        let (c1, r1) = self.to_cell(origin + size);
        for col in c0.max(0)..=c1.min(self.cols as i32 - 1) {
            self.put(col, r0, '─', color);
            self.put(col, r1, '─', color);
        }
        for row in r0.max(0)..=r1.min(self.rows as i32 - 1) {
            self.put(c0, row, '│', color);
            self.put(c1, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(c1, r0, '┐', color);
        self.put(c0, r1, '└', color);
        self.put(c1, r1, '┘', color);
    }

    fn gauge(&mut self, pos: Vec2, progress: f32, color: Color) {
        let (col, row) = self.to_cell(pos);
        let filled = (progress.clamp(0.0, 1.0) * GAUGE_WIDTH as f32).round() as usize;
        self.put(col, row, '[', Color::Gray);
        self.put_str(col + 1, row, &"█".repeat(filled), color);
        self.put_str(col + 1 + filled as i32, row, &"·".repeat(GAUGE_WIDTH - filled), Color::Gray);
        self.put(col + 1 + GAUGE_WIDTH as i32, row, ']', Color::Gray);
    }
}

impl Renderer for TerminalCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw(&mut self, shape: &Shape) {
        match shape {
            Shape::FillCircle { center, radius, color } => self.fill_circle(*center, *radius, *color),
            Shape::StrokeCircle { center, radius, color } => {
                self.stroke_circle(*center, *radius, *color)
            }
            Shape::StrokeRect { origin, size, color } => self.stroke_rect(*origin, *size, *color),
            Shape::Text { pos, text, color, align } => {
                let (mut col, row) = self.to_cell(*pos);
                if *align == Align::Center {
                    col -= text.chars().count() as i32 / 2;
                }
                self.put_str(col, row, text, *color);
            }
            Shape::Gauge { pos, progress, color } => self.gauge(*pos, *progress, *color),
            Shape::Crosshair { pos } => {
                let (col, row) = self.to_cell(*pos);
                self.put(col, row, '+', Color::Gray);
            }
            Shape::Dim => {
                for cell in &mut self.cells {
                    cell.dimmed = true;
                }
            }
        }
    }
}
