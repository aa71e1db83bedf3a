//! Framebuffer and style types for terminal rendering.

use anyhow::Result;

use crate::core::Surface;
use crate::types::{Color, ColorSpec};

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        }
    }
}

impl CellStyle {
    /// Style for a foreground color on the fixed black background.
    pub fn foreground(fg: ColorSpec) -> Self {
        Self {
            fg: fg.color,
            bold: fg.bold,
            ..Self::default()
        }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
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
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Like [`put_char`](Self::put_char) but with signed coordinates; anything
    /// off the grid is dropped.
    pub fn put_clipped(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        self.put_char(x, y, ch, style);
    }

    /// Characters of row `y` as a string (empty past the last row).
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.ch)
            .collect()
    }
}

/// A framebuffer is a headless surface: `flush` has nowhere to go.
impl Surface for FrameBuffer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        FrameBuffer::clear(self, Cell::default());
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: ColorSpec) {
        self.put_clipped(x, y, ch, CellStyle::foreground(fg));
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
