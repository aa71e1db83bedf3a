//! Terminal surface for the sprite engine.
//!
//! The engine draws into a [`FrameBuffer`]; [`TerminalRenderer`] diffs each
//! frame against the last one and writes only the changed runs through
//! `crossterm`. [`TerminalSurface`] ties the two together behind the core
//! [`Surface`](crate::core::Surface) trait.
//!
//! Colors are the eight named ANSI colors; bold selects the bright variant.
//! The background is always black.

pub mod fb;
pub mod renderer;
pub mod surface;

pub use termination_core as core;
pub use termination_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::TerminalSurface;
