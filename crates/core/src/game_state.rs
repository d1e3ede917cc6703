//! Game state module - the falling / lock / spawn / game-over state machine
//!
//! Ties together the catalog, geometry, field and scoring. Every mutation is
//! validate-then-commit: a candidate position or rotation is checked with
//! [`collides`] and either committed or dropped. Rejection is a normal
//! outcome, not an error.
//!
//! The state machine has no clock. A host calls [`GameState::tick`] once per
//! gravity interval ([`GameState::speed_ms`]) and feeds input through
//! [`GameState::apply`].

use tracing::{debug, info, trace};

use crate::field::Field;
use crate::geometry::{
    collides, ghost_position, move_down, move_left, move_right, rotate_left, rotate_right, Ghost,
};
use crate::pieces::{piece, random_piece, Piece};
use crate::rng::SimpleRng;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, effective_interval_ms,
};
use crate::snapshot::{GameSnapshot, SnapshotCell};
use crate::types::*;

/// The piece currently under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub position: Position,
}

impl ActivePiece {
    /// A piece of `kind` at the spawn position in rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            position: SPAWN_POSITION,
        }
    }

    pub fn piece(&self) -> &'static Piece {
        piece(self.kind)
    }

    /// Absolute field cells covered by the piece
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.piece()
            .cells(self.rotation)
            .iter()
            .map(move |&offset| self.position + offset)
    }

    pub fn collides(&self, field: &Field) -> bool {
        collides(field, self.piece(), self.rotation, self.position)
    }
}

/// What a gravity tick (or hard drop) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over; nothing changed.
    Halted,
    /// The active piece moved down one row.
    Fell,
    /// The piece locked and the next piece spawned.
    Locked(LockEvent),
    /// The piece locked and the next spawn collided.
    ToppedOut(LockEvent),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    field: Field,
    active: ActivePiece,
    next: PieceKind,
    rng: SimpleRng,
    lines: u32,
    score: u32,
    soft_drop: bool,
    phase: Phase,
    /// Successful spawns this game, including the first piece.
    pieces_spawned: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Start a game on an empty field
    pub fn new(seed: u32) -> Self {
        Self::with_setup(seed, Field::new(), None)
    }

    /// Start a game from a prepared field, optionally forcing the first piece.
    ///
    /// The first spawn runs immediately, so a field that blocks the spawn
    /// position yields a state that is already [`Phase::GameOver`].
    pub fn with_setup(seed: u32, field: Field, first: Option<PieceKind>) -> Self {
        Self::from_rng(SimpleRng::new(seed), field, first)
    }

    fn from_rng(mut rng: SimpleRng, field: Field, first: Option<PieceKind>) -> Self {
        let next = match first {
            Some(kind) => kind,
            None => random_piece(&mut rng).kind(),
        };

        let mut state = Self {
            field,
            active: ActivePiece::spawn(next),
            next,
            rng,
            lines: 0,
            score: 0,
            soft_drop: false,
            phase: Phase::Falling,
            pieces_spawned: 0,
            last_event: None,
        };
        state.spawn();
        state
    }

    /// Throw the current game away and start a fresh one.
    ///
    /// The random stream continues, so consecutive games see different pieces.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        info!(score = self.score, lines = self.lines, "restarting game");
        *self = Self::from_rng(rng, Field::new(), None);
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Cumulative cleared lines this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Current tick interval in milliseconds
    pub fn speed_ms(&self) -> u32 {
        effective_interval_ms(self.level(), self.soft_drop)
    }

    /// Where the active piece would land; `None` once the game is over
    pub fn ghost(&self) -> Option<Ghost> {
        if self.is_game_over() {
            return None;
        }
        let active = self.active;
        Some(ghost_position(
            &self.field,
            active.piece(),
            active.rotation,
            active.position,
        ))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Promote `next` to the active piece and draw a new `next`.
    ///
    /// Returns false (and ends the game) if the spawn position collides.
    fn spawn(&mut self) -> bool {
        self.active = ActivePiece::spawn(self.next);
        self.next = random_piece(&mut self.rng).kind();

        if self.active.collides(&self.field) {
            self.phase = Phase::GameOver;
            info!(
                kind = self.active.kind.as_str(),
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
            return false;
        }

        self.phase = Phase::Falling;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        trace!(kind = self.active.kind.as_str(), next = self.next.as_str(), "spawned");
        true
    }

    /// One gravity step
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Halted;
        }

        let candidate = move_down(self.active.position);
        if collides(
            &self.field,
            self.active.piece(),
            self.active.rotation,
            candidate,
        ) {
            return self.lock(0);
        }

        self.active.position = candidate;
        if self.soft_drop {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        TickOutcome::Fell
    }

    /// Drop to the ghost position, score the distance and lock at once.
    pub fn hard_drop(&mut self) -> TickOutcome {
        let Some(ghost) = self.ghost() else {
            return TickOutcome::Halted;
        };

        self.active.position = ghost.position;
        let bonus = calculate_drop_score(ghost.drops, true);
        self.score = self.score.saturating_add(bonus);
        self.lock(bonus)
    }

    /// Merge, clear, score, then spawn the next piece.
    fn lock(&mut self, drop_bonus: u32) -> TickOutcome {
        let active = self.active;
        let merged = self
            .field
            .merge(active.piece(), active.rotation, active.position);
        let clear = merged.clear_lines();

        self.field = clear.field;
        self.lines = self.lines.saturating_add(clear.lines_cleared);
        // Scored with the level reached after adding this clear.
        let line_clear_score = calculate_line_score(clear.lines_cleared, self.level());
        self.score = self.score.saturating_add(line_clear_score);

        let event = LockEvent {
            lines_cleared: clear.lines_cleared,
            line_clear_score,
            drop_bonus,
        };
        self.last_event = Some(event);

        if clear.lines_cleared > 0 {
            debug!(
                rows = ?clear.rows.as_slice(),
                lines = self.lines,
                level = self.level(),
                points = line_clear_score,
                "lines cleared"
            );
        } else {
            trace!(kind = active.kind.as_str(), row = active.position.row, "locked");
        }

        if self.spawn() {
            TickOutcome::Locked(event)
        } else {
            TickOutcome::ToppedOut(event)
        }
    }

    fn try_shift(&mut self, shift: fn(Position) -> Position) -> bool {
        let candidate = shift(self.active.position);
        if collides(
            &self.field,
            self.active.piece(),
            self.active.rotation,
            candidate,
        ) {
            trace!(?candidate, "move rejected");
            return false;
        }
        self.active.position = candidate;
        true
    }

    /// Rotate in place. There are no wall kicks: a colliding rotation is rejected.
    fn try_rotate(&mut self, turn: fn(&Piece, usize) -> usize) -> bool {
        let piece = self.active.piece();
        let candidate = turn(piece, self.active.rotation);
        if candidate == self.active.rotation {
            return false;
        }
        if collides(&self.field, piece, candidate, self.active.position) {
            trace!(rotation = candidate, "rotation rejected");
            return false;
        }
        self.active.rotation = candidate;
        true
    }

    fn set_soft_drop(&mut self, engaged: bool) -> bool {
        let changed = self.soft_drop != engaged;
        self.soft_drop = engaged;
        changed
    }

    /// Apply one input event.
    ///
    /// Returns true if the state changed. Every event is ignored once the game is over.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        if self.is_game_over() {
            return false;
        }

        match event {
            InputEvent::MoveLeft => self.try_shift(move_left),
            InputEvent::MoveRight => self.try_shift(move_right),
            InputEvent::RotateCw => self.try_rotate(rotate_right),
            InputEvent::RotateCcw => self.try_rotate(rotate_left),
            InputEvent::SoftDropStart => self.set_soft_drop(true),
            InputEvent::SoftDropStop => self.set_soft_drop(false),
            InputEvent::HardDrop => {
                self.hard_drop();
                true
            }
        }
    }

    /// Fill a render snapshot. Ghost and active cells only exist in the snapshot.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (row, cells) in self.field.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                out.board[row][col] = match cell {
                    Some(kind) => SnapshotCell::Locked(*kind),
                    None => SnapshotCell::Empty,
                };
            }
        }

        let ghost = self.ghost();
        if let Some(ghost) = ghost {
            let shadow = ActivePiece {
                position: ghost.position,
                ..self.active
            };
            for cell in shadow.cells() {
                out.paint(cell, SnapshotCell::Ghost);
            }
            for cell in self.active.cells() {
                out.paint(cell, SnapshotCell::Active(self.active.kind));
            }
        }

        out.active = (!self.is_game_over()).then_some(self.active);
        out.ghost = ghost;
        out.next = self.next;
        out.score = self.score;
        out.level = self.level();
        out.lines = self.lines;
        out.soft_drop = self.soft_drop;
        out.phase = self.phase;
        out.speed_ms = self.speed_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
