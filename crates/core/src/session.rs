//! Session module - one game at a time, its tick timer and the restart policy
//!
//! A session is the single owner of the game state. Hosts push input events
//! and timestamps into it from one thread, so there is exactly one mutator at
//! a time.
//!
//! After every mutation the session compares the game's tick interval with the
//! armed one and re-arms from "now" when it changed (soft drop toggled, level
//! up). When a game ends, the timer is cancelled, the result is recorded and a
//! new game starts immediately with a freshly armed timer.

use tracing::{debug, info, trace};

use crate::game_state::{GameState, TickOutcome};
use crate::snapshot::GameSnapshot;
use crate::timer::TickTimer;
use crate::types::InputEvent;

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    timer: TickTimer,
    games_played: u32,
    last_final_score: Option<u32>,
    best_score: u32,
}

impl Session {
    /// Start the first game and arm its timer at `now_ms`
    pub fn new(seed: u32, now_ms: u64) -> Self {
        Self::with_state(GameState::new(seed), now_ms)
    }

    /// Wrap an existing game. A game that is already over restarts right away.
    pub fn with_state(state: GameState, now_ms: u64) -> Self {
        let mut session = Self {
            state,
            timer: TickTimer::new(),
            games_played: 0,
            last_final_score: None,
            best_score: 0,
        };
        session.timer.arm(now_ms, session.state.speed_ms());
        session.settle(now_ms);
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Final score of the most recently finished game
    pub fn last_final_score(&self) -> Option<u32> {
        self.last_final_score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// When the host must call [`Session::poll`] next
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    /// Feed one input event.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64) -> bool {
        let changed = self.state.apply(event);
        trace!(event = event.as_str(), changed, "input");
        self.settle(now_ms);
        changed
    }

    /// Run the gravity tick if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<TickOutcome> {
        if !self.timer.fire_if_due(now_ms) {
            return None;
        }
        let outcome = self.state.tick();
        self.settle(now_ms);
        Some(outcome)
    }

    /// Restart on game over, otherwise keep the timer in step with the game speed.
    fn settle(&mut self, now_ms: u64) {
        if self.state.is_game_over() {
            self.timer.cancel();

            let score = self.state.score();
            self.games_played = self.games_played.saturating_add(1);
            self.last_final_score = Some(score);
            self.best_score = self.best_score.max(score);
            info!(
                score,
                lines = self.state.lines(),
                games = self.games_played,
                "game over"
            );

            self.state.restart();
            self.timer.arm(now_ms, self.state.speed_ms());
            return;
        }

        let speed = self.state.speed_ms();
        if speed != self.timer.interval_ms() {
            debug!(from = self.timer.interval_ms(), to = speed, "tick interval changed");
            self.timer.arm(now_ms, speed);
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
        out.games_played = self.games_played;
        out.last_final_score = self.last_final_score;
        out.best_score = self.best_score;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
