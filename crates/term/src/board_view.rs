//! BoardView: maps a board snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each board cell is two columns wide. The left half shows a marble's first
//! color and the right half its second, so a dual marble reads as two
//! half-discs and a single-hue marble as one full disc.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Hue, MarbleColor, Position, PreviewMode};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Smallest viewport that fits a board of the given size and its panel
    ///
    /// Saturates at `u16::MAX` for boards wider or taller than a terminal.
    pub fn fitting(board_width: i32, board_height: i32) -> Self {
        let w = frame_width(board_width)
            .saturating_add(PANEL_GAP)
            .saturating_add(PANEL_W);
        let h = frame_height(board_height).max(PANEL_MIN_H);
        Self::new(w, h)
    }
}

/// Terminal columns of a board `cells` wide, borders included
fn frame_width(cells: i32) -> u16 {
    to_u16(cells).saturating_mul(CELL_W).saturating_add(2)
}

/// Terminal rows of a board `cells` tall, borders included
fn frame_height(cells: i32) -> u16 {
    to_u16(cells).saturating_add(2)
}

fn to_u16(n: i32) -> u16 {
    u16::try_from(n.max(0)).unwrap_or(u16::MAX)
}

const CELL_W: u16 = 2;
const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 12;
const PANEL_MIN_H: u16 = 11;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    preview: PreviewMode,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            preview: PreviewMode::Side,
        }
    }
}

impl BoardView {
    pub fn new(preview: PreviewMode) -> Self {
        Self { preview }
    }

    /// Render a snapshot into an existing framebuffer.
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame_w = frame_width(snap.width);
        let frame_h = frame_height(snap.height);
        let border = CellStyle::fg(Rgb::new(200, 200, 200));
        draw_border(fb, 0, 0, frame_w, frame_h, border);

        for (y, row) in snap.board.iter().enumerate().take(usize::from(u16::MAX)) {
            for (x, &code) in row.iter().enumerate().take(usize::from(u16::MAX)) {
                let (x, y) = (x as u16, y as u16);
                if code == 0 {
                    let dot = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dim();
                    draw_cell(fb, x, y, ['·', ' '], [dot, dot]);
                } else {
                    let (glyphs, styles) = marble_glyphs(MarbleColor::from_bits(code));
                    draw_cell(fb, x, y, glyphs, styles);
                }
            }
        }

        if self.preview == PreviewMode::Board {
            for marble in &snap.next {
                if snap.cell(marble.position) == Some(0) {
                    let style = CellStyle::fg(color_rgb(marble.color)).on(PLAY_BG).dim();
                    let Position { x, y } = marble.position;
                    draw_cell(fb, to_u16(x), to_u16(y), ['∘', ' '], [style, style]);
                }
            }
        }

        self.draw_side_panel(fb, snap, frame_w.saturating_add(PANEL_GAP));

        if snap.free_cells == 0 {
            let text = "GAME OVER";
            let x = frame_w.saturating_sub(text.len() as u16) / 2;
            let style = CellStyle::fg(Rgb::new(255, 255, 255))
                .on(Rgb::new(120, 20, 20))
                .bold();
            fb.fill_rect(1, frame_h / 2, frame_w.saturating_sub(2), 1, ' ', style);
            fb.put_str(x, frame_h / 2, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, panel_x: u16) {
        if panel_x >= fb.width() {
            return;
        }
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = 0;
        for (name, number) in [
            ("SCORE", snap.total_score),
            ("LAST", snap.last_move_score),
            ("FREE", snap.free_cells as u32),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }

        if self.preview == PreviewMode::Side {
            fb.put_str(panel_x, y, "NEXT", label);
            let mut x = panel_x;
            for marble in &snap.next {
                let (glyphs, styles) = marble_glyphs(marble.color);
                for (ch, style) in glyphs.into_iter().zip(styles) {
                    fb.put_char(x, y + 1, ch, style);
                    x += 1;
                }
                x += 1;
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_cell(fb: &mut FrameBuffer, x: u16, y: u16, glyphs: [char; 2], styles: [CellStyle; 2]) {
    let px = x.saturating_mul(CELL_W).saturating_add(1);
    let py = y.saturating_add(1);
    fb.put_char(px, py, glyphs[0], styles[0]);
    fb.put_char(px.saturating_add(1), py, glyphs[1], styles[1]);
}

/// The two half-cell glyphs of a marble and their styles
fn marble_glyphs(color: MarbleColor) -> ([char; 2], [CellStyle; 2]) {
    if color.is_bomb_joker() {
        let style = CellStyle::fg(Rgb::new(255, 90, 40)).on(PLAY_BG).bold();
        return (['✹', ' '], [style, style]);
    }
    if color.is_joker() {
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(PLAY_BG).bold();
        return (['★', ' '], [style, style]);
    }
    if color.is_bomb() {
        let style = CellStyle::fg(Rgb::new(160, 160, 160)).on(PLAY_BG);
        return (['✹', ' '], [style, style]);
    }
    let (c1, c2) = color.components();
    let left = CellStyle::fg(color_rgb(c1)).on(PLAY_BG).bold();
    let right = CellStyle::fg(color_rgb(c2)).on(PLAY_BG).bold();
    (['◖', '◗'], [left, right])
}

/// Display color of the first hue of `color`
fn color_rgb(color: MarbleColor) -> Rgb {
    match color.regular_colors().iter().next() {
        Some(hue) => hue_rgb(hue),
        None => Rgb::new(160, 160, 160),
    }
}

fn hue_rgb(hue: Hue) -> Rgb {
    match hue {
        Hue::Red => Rgb::new(220, 70, 70),
        Hue::Green => Rgb::new(90, 210, 110),
        Hue::Blue => Rgb::new(80, 120, 230),
        Hue::Yellow => Rgb::new(240, 220, 80),
        Hue::Orange => Rgb::new(255, 160, 40),
        Hue::White => Rgb::new(235, 235, 235),
        Hue::Cyan => Rgb::new(80, 220, 220),
    }
}
