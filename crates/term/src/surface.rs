//! A [`Surface`] backed by the real terminal.

use anyhow::Result;
use crossterm::terminal;

use crate::core::Surface;
use crate::fb::{CellStyle, FrameBuffer};
use crate::renderer::TerminalRenderer;
use crate::types::ColorSpec;

/// Draws into a framebuffer and flushes only the changed cells.
///
/// Opening puts the terminal into raw mode on the alternate screen; [`close`]
/// (or dropping the surface) restores it.
///
/// [`close`]: TerminalSurface::close
pub struct TerminalSurface {
    fb: FrameBuffer,
    renderer: TerminalRenderer,
    open: bool,
}

impl TerminalSurface {
    /// Take over the terminal, sized to its current dimensions.
    pub fn open() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        log::debug!("terminal opened at {width}x{height}");
        Ok(Self {
            fb: FrameBuffer::new(width, height),
            renderer,
            open: true,
        })
    }

    /// Pick up a terminal resize; the next flush redraws everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.fb.resize(width, height);
        self.renderer.invalidate();
    }

    /// The cells the next flush will draw.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Restore the terminal.
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.renderer.exit()
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (u16, u16) {
        (self.fb.width(), self.fb.height())
    }

    fn clear(&mut self) {
        self.fb.clear(Default::default());
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: ColorSpec) {
        self.fb.put_clipped(x, y, ch, CellStyle::foreground(fg));
    }

    fn flush(&mut self) -> Result<()> {
        self.renderer.draw_swap(&mut self.fb)
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            log::warn!("failed to restore terminal: {err:#}");
        }
    }
}
