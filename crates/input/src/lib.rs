//! Terminal input for the sprite engine.
//!
//! Keyboard and mouse events from `crossterm` are mapped into [`InputEvent`]s
//! and delivered to a client closure on a background thread, so the engine's
//! tick loop never blocks on input. Esc and Ctrl-C arrive as
//! [`InputEvent::Quit`].

pub mod map;
pub mod reader;

pub use termination_types as types;

pub use map::{map_event, map_mouse, should_quit, InputEvent, MouseAction, MouseInput};
pub use reader::InputReader;
