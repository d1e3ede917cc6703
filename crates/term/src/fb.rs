//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// 2D grid of styled character cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, keeping the allocation when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.resize((width as usize) * (height as usize), Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write a cell; out-of-range coordinates are clipped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16).filter(|cx| *cx < self.width) else {
                break;
            };
            self.set(cx, y, style.cell(ch));
        }
    }

    /// Decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for (i, d) in digits[..len].iter().rev().enumerate() {
            self.set(x.saturating_add(i as u16), y, style.cell(*d as char));
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x.saturating_add(dx), y.saturating_add(dy), style.cell(ch));
            }
        }
    }

    /// Frame contents as text, one line per row (styles dropped).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(12, 1);
        fb.put_u32(1, 0, 4090, CellStyle::default());
        assert_eq!(fb.to_text(), " 4090       \n");

        fb.put_u32(0, 0, 0, CellStyle::default());
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('0'));
    }

    #[test]
    fn test_put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(1, 0, "abc", CellStyle::default());
        assert_eq!(fb.to_text(), " ab\n");
    }

    #[test]
    fn test_resize_resets_new_cells() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_str(0, 0, "xy", CellStyle::default());
        fb.resize(2, 2);
        assert_eq!(fb.get(0, 1), Some(Cell::default()));
    }
}
