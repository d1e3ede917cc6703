use crate::field::{HEIGHT, WIDTH};
use crate::game_state::ActivePiece;
use crate::geometry::Ghost;
use crate::types::{PieceKind, Phase, Position};

/// What a renderer should draw in one field cell.
///
/// `Active` and `Ghost` are overlays computed for the snapshot; the engine's
/// field only ever holds locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapshotCell {
    #[default]
    Empty,
    Locked(PieceKind),
    Active(PieceKind),
    Ghost,
}

/// Read-only view of a game for the render port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[SnapshotCell; WIDTH]; HEIGHT],
    pub active: Option<ActivePiece>,
    pub ghost: Option<Ghost>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub soft_drop: bool,
    pub phase: Phase,
    pub speed_ms: u32,
    /// Finished games in this session (filled in by the session, not the game)
    pub games_played: u32,
    pub last_final_score: Option<u32>,
    pub best_score: u32,
}

impl GameSnapshot {
    /// Draw an overlay cell. Overlays never cover locked cells; out-of-field
    /// positions are ignored.
    pub(crate) fn paint(&mut self, at: Position, cell: SnapshotCell) {
        if at.row < 0 || at.col < 0 {
            return;
        }
        let (row, col) = (at.row as usize, at.col as usize);
        if row >= HEIGHT || col >= WIDTH {
            return;
        }
        let slot = &mut self.board[row][col];
        if !matches!(slot, SnapshotCell::Locked(_)) {
            *slot = cell;
        }
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[SnapshotCell::Empty; WIDTH]; HEIGHT],
            active: None,
            ghost: None,
            next: PieceKind::I,
            score: 0,
            level: 0,
            lines: 0,
            soft_drop: false,
            phase: Phase::Falling,
            speed_ms: 0,
            games_played: 0,
            last_final_score: None,
            best_score: 0,
        }
    }
}
