//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Tetromino};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TETROMINO_SIZE};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the falling-block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Top-left corner of the board frame in the framebuffer
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a game snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        self.draw_border(fb, origin, frame_w, frame_h);

        for x in 0..BOARD_WIDTH {
            for y in 0..BOARD_HEIGHT {
                let (ch, style) = match snap.board[x][y] {
                    Some(color) => block(color),
                    None => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim()),
                };
                self.fill_cell_rect(fb, origin, x as u16, y as u16, ch, style);
            }
        }

        // Only the falling piece may cover the shadow.
        if let Some(shadow_y) = snap.shadow_y() {
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            self.draw_shadow(fb, origin, snap, shadow_y, style);
        }

        if !snap.game_over {
            self.draw_piece(fb, origin, &snap.falling, snap.falling.y, block);
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.paused {
            self.draw_overlay_text(fb, origin, frame_w, frame_h, &["PAUSED"]);
        } else if snap.game_over {
            self.draw_overlay_text(fb, origin, frame_w, frame_h, &["GAME OVER", "R: restart"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(o.x + w - 1, o.y, '┐', style);
        fb.put_char(o.x, o.y + h - 1, '└', style);
        fb.put_char(o.x + w - 1, o.y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(o.x + dx, o.y, '─', style);
            fb.put_char(o.x + dx, o.y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(o.x, o.y + dy, '│', style);
            fb.put_char(o.x + w - 1, o.y + dy, '│', style);
        }
    }

    /// Draw the live cells of `piece` with its anchor row moved to `anchor_y`.
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        piece: &Tetromino,
        anchor_y: i32,
        look: impl Fn(Color) -> (char, CellStyle),
    ) {
        for (i, j, color) in piece.live_cells() {
            let x = piece.x + i as i32;
            let y = anchor_y + j as i32;
            if x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32 {
                let (ch, style) = look(color);
                self.fill_cell_rect(fb, o, x as u16, y as u16, ch, style);
            }
        }
    }

    fn draw_shadow(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        snap: &GameSnapshot,
        shadow_y: i32,
        style: CellStyle,
    ) {
        let piece = &snap.falling;
        for (i, j, _) in piece.live_cells() {
            let x = piece.x + i as i32;
            let y = shadow_y + j as i32;
            if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
                continue;
            }
            if snap.board[x as usize][y as usize].is_none() {
                self.fill_cell_rect(fb, o, x as u16, y as u16, '░', style);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = o.x + 1 + cell_x * self.cell_w;
        let py = o.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        o: Origin,
        frame_w: u16,
    ) {
        let panel_x = o.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = o.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if snap.show_preview {
            let preview = &snap.next;
            for (i, j, color) in preview.live_cells() {
                let (ch, style) = block(color);
                let px = panel_x + i as u16 * self.cell_w;
                fb.fill_rect(px, y + j as u16, self.cell_w, 1, ch, style);
            }
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y += TETROMINO_SIZE as u16;

        // Statistics are hidden while paused.
        if snap.paused {
            return;
        }
        let stats = &snap.stats;

        for (name, number) in [
            ("SCORE", stats.score),
            ("LEVEL", u64::from(stats.level)),
            ("LINES", u64::from(stats.lines)),
            ("PIECES", u64::from(stats.total_pieces)),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u64(panel_x, y + 1, number, value);
            y += 3;
        }

        for kind in PieceKind::ALL {
            if y >= viewport.height {
                break;
            }
            let (_, style) = block(kind.color());
            fb.put_str(panel_x, y, kind.as_str(), style);
            fb.put_u64_padded(panel_x + 2, y, u64::from(stats.pieces[kind.index()]), 4, value);
            y += 1;
        }

        if !snap.error_code.is_none() {
            let alert = CellStyle::new(Rgb::new(255, 80, 80), PANEL_BG).bold();
            fb.put_str(panel_x, y + 1, "ASSERT", alert);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = o.y.saturating_add(frame_h / 2);
        for (row, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = o.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y + row as u16, text, style);
        }
    }
}

fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::White => Rgb::new(240, 240, 240),
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
    }
}

fn block(color: Color) -> (char, CellStyle) {
    ('█', CellStyle::new(color_rgb(color), PLAY_BG).bold())
}
