//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal output, tests).
//!
//! # Engine Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FRAMES_PER_SECOND` | 60 | Global tick rate of a new engine |
//! | `DEFAULT_TRANSPARENCY_CHAR` | `'?'` | Shape character that is never drawn |
//! | `DEFAULT_COLOR_SYMBOL` | `'w'` | Fallback color symbol (white) |
//! | `DEFAULT_SHAPE_PATH` | `"default"` | Animation path selected by new entities |
//! | `UNSET_MOVES_PER_SECOND` | -1 | Movement follows the animation rate |
//!
//! # Color Mask Symbols
//!
//! Color masks are strings aligned with shape frames. Each symbol selects a color;
//! uppercase selects the bold/bright variant:
//!
//! | Symbol | Color |
//! |--------|-------|
//! | `#` | black |
//! | `b` / `B` | blue |
//! | `w` / `W` | white |
//! | `g` / `G` | green |
//! | `y` / `Y` | yellow |
//! | `m` / `M` | magenta |
//! | `r` / `R` | red |
//! | `c` / `C` | cyan |
//!
//! # Examples
//!
//! ```
//! use termination_types::{Color, ColorSpec, Position, Rect};
//!
//! let red = ColorSpec::from_symbol('R').unwrap();
//! assert_eq!(red.color, Color::Red);
//! assert!(red.bold);
//! assert_eq!(ColorSpec::from_symbol('x'), None);
//!
//! let a = Rect::new(0, 0, 3, 2);
//! let b = Rect::new(2, 1, 3, 2);
//! assert!(a.intersects(&b));
//!
//! let p = Position::new(1, 2, 0);
//! assert_eq!(p.x, 1);
//! ```

/// Global tick rate used by a freshly created engine.
pub const DEFAULT_FRAMES_PER_SECOND: i32 = 60;

/// Shape character that suppresses the cell write.
pub const DEFAULT_TRANSPARENCY_CHAR: char = '?';

/// Color symbol used when neither the mask nor the entity supplies one.
pub const DEFAULT_COLOR_SYMBOL: char = 'w';

/// Shape path selected by newly spawned entities.
pub const DEFAULT_SHAPE_PATH: &str = "default";

/// Sentinel for "no separate movement rate".
pub const UNSET_MOVES_PER_SECOND: i32 = -1;

/// Integer grid position. `z` decides processing and paint order (higher first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Stable identity of an entity, handed out by the engine's monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned rectangle in grid cells.
///
/// Covers the half-open ranges `[x, x + width)` by `[y, y + height)`, so two
/// sprites standing side by side do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covered by something of `width`×`height` drawn at `origin`.
    pub fn at(origin: Position, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the two rectangles share at least one cell.
    ///
    /// ```
    /// use termination_types::Rect;
    ///
    /// let a = Rect::new(0, 0, 2, 2);
    /// assert!(a.intersects(&Rect::new(1, 1, 2, 2)));
    /// assert!(!a.intersects(&Rect::new(2, 0, 2, 2)));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// The eight terminal base colors a color mask can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// A resolved foreground color: base color plus bold/bright attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSpec {
    pub color: Color,
    pub bold: bool,
}

impl ColorSpec {
    pub const fn new(color: Color, bold: bool) -> Self {
        Self { color, bold }
    }

    pub const fn plain(color: Color) -> Self {
        Self { color, bold: false }
    }

    /// Resolve a color mask symbol
    ///
    /// Returns `None` for symbols outside the table; callers fall back to a
    /// default color in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use termination_types::{Color, ColorSpec};
    ///
    /// assert_eq!(ColorSpec::from_symbol('b'), Some(ColorSpec::plain(Color::Blue)));
    /// assert_eq!(ColorSpec::from_symbol('B'), Some(ColorSpec::new(Color::Blue, true)));
    /// assert_eq!(ColorSpec::from_symbol('#'), Some(ColorSpec::plain(Color::Black)));
    /// assert_eq!(ColorSpec::from_symbol(' '), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let color = match symbol {
            '#' => return Some(Self::plain(Color::Black)),
            'b' | 'B' => Color::Blue,
            'w' | 'W' => Color::White,
            'g' | 'G' => Color::Green,
            'y' | 'Y' => Color::Yellow,
            'm' | 'M' => Color::Magenta,
            'r' | 'R' => Color::Red,
            'c' | 'C' => Color::Cyan,
            _ => return None,
        };
        Some(Self::new(color, symbol.is_ascii_uppercase()))
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::plain(Color::White)
    }
}
