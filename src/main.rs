//! Terminal blockfall runner (default binary).
//!
//! Single-threaded host: crossterm events and the session's gravity deadline
//! are multiplexed through `event::poll` with a bounded timeout, and every
//! loop iteration redraws from a fresh snapshot.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::config::HostConfig;
use blockfall::core::{GameSnapshot, Session};
use blockfall::input::{should_quit, InputHandler};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = HostConfig::from_env();
    logging::init(&config)?;
    info!(seed = config.seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &HostConfig) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut session = Session::new(config.seed, now_ms());
    let mut input = InputHandler::with_release_timeout_ms(config.soft_drop_release_ms);
    let release_events = term.key_release_events();
    debug!(release_events, "input mode");

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_input_update = now_ms();

    loop {
        let games_before = session.games_played();

        // Render.
        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Wait for input, the next gravity deadline or the next frame.
        let now = now_ms();
        let until_tick = session
            .next_deadline_ms()
            .map_or(config.frame_ms, |deadline| deadline.saturating_sub(now));
        let timeout = Duration::from_millis(until_tick.min(config.frame_ms));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            info!(
                                score = session.state().score(),
                                games = session.games_played(),
                                "quit"
                            );
                            return Ok(());
                        }
                        if let Some(ev) = input.handle_key_press(key) {
                            session.handle(ev, now_ms());
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(ev) = input.handle_key_release(key) {
                            session.handle(ev, now_ms());
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = now_ms();
        if !release_events {
            let elapsed = now.saturating_sub(last_input_update) as u32;
            if let Some(ev) = input.update(elapsed) {
                session.handle(ev, now);
            }
        }
        last_input_update = now;

        session.poll(now);

        // A fresh game starts without a held soft drop.
        if session.games_played() != games_before {
            input.reset();
        }
    }
}
