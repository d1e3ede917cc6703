//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! The first frame (and any frame after a size change or `invalidate`) is a
//! full redraw; every later frame only rewrites runs of changed cells.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written to the terminal; `None` forces a full redraw.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    key_release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
            key_release_events: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor. Asks for key release events
    /// when the terminal supports the kitty keyboard protocol.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.key_release_events {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Whether the terminal reports key releases (otherwise hosts fall back
    /// to a release timeout).
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    /// Force the next draw to be a full redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller may render over; no
    /// frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the style currently active on the terminal so runs of equally
/// styled cells emit their color escapes once.
struct StyledWriter<'a> {
    out: &'a mut Vec<u8>,
    current: Option<CellStyle>,
}

impl<'a> StyledWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, current: None }
    }

    fn print(&mut self, ch: char, style: CellStyle) -> Result<()> {
        if self.current != Some(style) {
            self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.current = Some(style);
        }
        self.out.queue(Print(ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut w = StyledWriter::new(out);
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            w.print(cell.ch, cell.style)?;
        }
        if y + 1 < fb.height() {
            w.out.queue(Print("\r\n"))?;
        }
    }
    w.finish()
}

/// Encode only the cells that differ between `prev` and `next`.
///
/// Frames of different sizes are rewritten row by row.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut w = StyledWriter::new(out);
    for (x, y, len) in changed_runs(prev, next) {
        w.out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            w.print(cell.ch, cell.style)?;
        }
    }
    w.finish()
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal runs `(x, y, len)` of cells that changed between two frames.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| (0, y, w)).collect();
    }

    let differs = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);
    let mut runs = Vec::new();
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !differs(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}
