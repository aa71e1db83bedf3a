//! Compositor: turns one shape frame (plus optional color mask) into grid writes.
//!
//! This module is pure apart from the [`Surface`] it writes to, so it can be
//! unit-tested against a recording surface.

use crate::error::EngineError;
use crate::surface::Surface;
use crate::types::{ColorSpec, EntityId, Position};

/// Size of a drawn frame in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    /// Widest line, in characters.
    pub width: i32,
    /// Number of lines, counting empty ones.
    pub height: i32,
}

/// Pick the fallback color for an entity: its own symbol if valid, else the
/// engine's, else a configuration error.
pub fn resolve_default_color(
    entity: EntityId,
    entity_symbol: char,
    engine_symbol: char,
) -> Result<ColorSpec, EngineError> {
    ColorSpec::from_symbol(entity_symbol)
        .or_else(|| ColorSpec::from_symbol(engine_symbol))
        .ok_or(EngineError::NoDefaultColor {
            entity,
            entity_symbol,
            engine_symbol,
        })
}

/// Draw `frame` with its top-left corner at `origin`.
///
/// - `'\n'` moves to the next row and back to `origin.x`; it is never drawn.
/// - Every other character advances one column, including `transparency`,
///   which is simply not written.
/// - Mask symbols line up with frame characters by position in the string
///   (newlines included). A missing or unknown symbol uses `default_color`.
pub fn compose<S: Surface + ?Sized>(
    surface: &mut S,
    frame: &str,
    mask: Option<&str>,
    origin: Position,
    default_color: ColorSpec,
    transparency: char,
) -> Extent {
    let mut mask_symbols = mask.map(str::chars);
    let mut x = origin.x;
    let mut y = origin.y;
    let mut column = 0;
    let mut extent = Extent {
        width: 0,
        height: 1,
    };

    for ch in frame.chars() {
        let symbol = mask_symbols.as_mut().and_then(Iterator::next);

        if ch == '\n' {
            extent.width = extent.width.max(column);
            extent.height += 1;
            column = 0;
            x = origin.x;
            y += 1;
            continue;
        }

        if ch != transparency {
            let color = symbol
                .and_then(ColorSpec::from_symbol)
                .unwrap_or(default_color);
            surface.set_cell(x, y, ch, color);
        }
        x += 1;
        column += 1;
    }

    extent.width = extent.width.max(column);
    extent
}
