//! Stock movement callbacks: one cell per active movement tick.
//!
//! ```
//! use termination_core::{movements, Engine, Position};
//!
//! let mut engine: Engine<()> = Engine::new(80, 24);
//! engine.spawn(Position::new(0, 0, 0)).on_move(movements::right);
//! ```

use crate::entity::{Entity, Stage};
use crate::types::Position;

pub fn up<D>(_: &Stage, _: &mut Entity<D>, mut position: Position) -> Position {
    position.y -= 1;
    position
}

pub fn down<D>(_: &Stage, _: &mut Entity<D>, mut position: Position) -> Position {
    position.y += 1;
    position
}

pub fn left<D>(_: &Stage, _: &mut Entity<D>, mut position: Position) -> Position {
    position.x -= 1;
    position
}

pub fn right<D>(_: &Stage, _: &mut Entity<D>, mut position: Position) -> Position {
    position.x += 1;
    position
}
