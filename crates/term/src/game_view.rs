//! GameView: draws a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so layout can be unit-tested.

use crate::core::pieces::piece;
use crate::core::{GameSnapshot, SnapshotCell};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
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

/// Lays out the field, its border and a side panel.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Display color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(70, 110, 235),
        PieceKind::J => Rgb::new(255, 165, 0),
        PieceKind::L => Rgb::new(150, 230, 60),
        PieceKind::O => Rgb::new(220, 70, 220),
        PieceKind::S => Rgb::new(70, 220, 220),
        PieceKind::Z => Rgb::new(220, 60, 60),
        PieceKind::T => Rgb::new(240, 220, 70),
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// The GAME OVER banner only shows for snapshots taken straight from a
    /// finished `GameState`. A `Session` restarts in the same call that ends
    /// the game, so its snapshots are always playable and the result shows up
    /// in the LAST/BEST panel instead.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let field_w = (FIELD_WIDTH as u16) * self.cell_w;
        let field_h = (FIELD_HEIGHT as u16) * self.cell_h;
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let board_style = CellStyle::fg(BOARD_BG, BOARD_BG);
        fb.fill_rect(start_x + 1, start_y + 1, field_w, field_h, ' ', board_style);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = cell_glyph(*cell);
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);

        if !snap.playable() {
            let text = "GAME OVER";
            let x = start_x.saturating_add(frame_w.saturating_sub(text.len() as u16) / 2);
            let y = start_y.saturating_add(frame_h / 2);
            fb.put_str(x, y, text, CellStyle::fg(Rgb::new(255, 255, 255), PANEL_BG).bold());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::fg(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.set(x, y, style.cell('┌'));
        fb.set(right, y, style.cell('┐'));
        fb.set(x, bottom, style.cell('└'));
        fb.set(right, bottom, style.cell('┘'));
        fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
        fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
        fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
        fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        let counters = [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)];
        for (name, number) in counters {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        // Preview the spawn rotation inside its 4x4 box, one field cell per glyph pair.
        let next = piece(snap.next);
        let preview = CellStyle::fg(piece_color(snap.next), PANEL_BG);
        for offset in next.cells(0) {
            let px = panel_x.saturating_add(offset.col as u16 * self.cell_w);
            let py = y.saturating_add(offset.row as u16);
            fb.fill_rect(px, py, self.cell_w, 1, '█', preview);
        }
        y = y.saturating_add(5);

        if snap.games_played > 0 {
            fb.put_str(panel_x, y, "GAMES", label);
            fb.put_u32(panel_x, y + 1, snap.games_played, value);
            y = y.saturating_add(3);
            if let Some(last) = snap.last_final_score {
                fb.put_str(panel_x, y, "LAST", label);
                fb.put_u32(panel_x, y + 1, last, value);
                y = y.saturating_add(3);
            }
            fb.put_str(panel_x, y, "BEST", label);
            fb.put_u32(panel_x, y + 1, snap.best_score, value);
        }
    }
}

fn cell_glyph(cell: SnapshotCell) -> (char, CellStyle) {
    match cell {
        SnapshotCell::Empty => ('·', CellStyle::fg(Rgb::new(90, 90, 100), BOARD_BG).dim()),
        SnapshotCell::Locked(kind) => ('█', CellStyle::fg(piece_color(kind), BOARD_BG)),
        SnapshotCell::Active(kind) => ('█', CellStyle::fg(piece_color(kind), BOARD_BG).bold()),
        SnapshotCell::Ghost => ('░', CellStyle::fg(Rgb::new(140, 140, 140), BOARD_BG).dim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_distinct_color() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(piece_color(*a), piece_color(*b));
            }
        }
    }

    #[test]
    fn test_ghost_and_active_glyphs_differ() {
        assert_ne!(
            cell_glyph(SnapshotCell::Ghost).0,
            cell_glyph(SnapshotCell::Active(PieceKind::T)).0
        );
        assert_eq!(cell_glyph(SnapshotCell::Empty).0, '·');
    }
}
