//! The character grid the engine draws into.

use anyhow::Result;

use crate::types::ColorSpec;

/// A clearable grid of colored character cells that can be flushed to a display.
///
/// Coordinates are absolute and may fall outside the grid; implementations
/// clip such writes. The background is whatever `clear` fills with.
pub trait Surface {
    /// Grid size as `(width, height)`.
    fn size(&self) -> (u16, u16);

    fn clear(&mut self);

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: ColorSpec);

    /// Present everything written since the last flush.
    fn flush(&mut self) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (u16, u16) {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: ColorSpec) {
        (**self).set_cell(x, y, ch, fg)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
