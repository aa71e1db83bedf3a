//! Core engine module - entities, timing, compositing and overlap detection
//!
//! This crate contains the whole sprite engine. It has **no dependency** on a
//! concrete terminal: everything is drawn through the [`Surface`] trait, which
//! makes the engine:
//!
//! - **Testable**: ticks can run against an in-memory surface
//! - **Portable**: any character grid (terminal, framebuffer, test recorder) works
//! - **Deterministic**: frame stepping and movement depend only on the frame counter
//!
//! # Module Structure
//!
//! - [`timing`]: per-entity rate gating against the global frame counter
//! - [`shape`]: named animation paths of multi-line frames (and color masks)
//! - [`compose`]: turns a frame plus color mask into surface writes
//! - [`spatial`]: bucket-grid index for overlap queries
//! - [`entity`]: the sprite record and its callbacks
//! - [`engine`]: registry, clock and the per-tick pass
//! - [`config`]: engine settings, optionally from the environment
//! - [`debug`]: optional file sink for diagnostics
//! - [`movements`]: stock one-cell movement callbacks
//!
//! # Example
//!
//! ```
//! use termination_core::{Engine, Position, Shape};
//!
//! let mut engine: Engine<()> = Engine::new(80, 24);
//! engine.frames_per_second = 10;
//!
//! let walker = engine.spawn(Position::new(0, 5, 0));
//! walker.shape = Shape::single(["(>'-')>", "<('-'<)"]);
//! walker.frames_per_second = 5; // animate every other tick
//! walker.on_move(termination_core::movements::right);
//! let id = walker.id();
//!
//! assert!(engine.validate().is_ok());
//! assert_eq!(engine.entity(id).unwrap().position().x, 0);
//! ```
//!
//! # Timing
//!
//! The engine counts frames `1..=frames_per_second` and wraps. An entity with a
//! lower rate is active on every `frames_per_second / rate`-th frame; movement
//! uses `moves_per_second` when set and the animation rate otherwise.
//! [`Engine::run`] sleeps out the remainder of each `1s / frames_per_second`
//! budget after every tick.

pub mod compose;
pub mod config;
pub mod debug;
pub mod engine;
pub mod entity;
pub mod error;
pub mod movements;
pub mod shape;
pub mod spatial;
pub mod surface;
pub mod timing;

pub use termination_types as types;

// Re-export commonly used types for convenience
pub use compose::{compose, Extent};
pub use config::EngineConfig;
pub use debug::install_debug_sink;
pub use engine::{Engine, Mailbox, StopHandle};
pub use entity::{CollisionCallback, DeathCallback, Entity, MovementCallback, Stage};
pub use error::EngineError;
pub use shape::{ColorMask, Shape};
pub use spatial::SpatialIndex;
pub use surface::Surface;
pub use types::{Color, ColorSpec, EntityId, Position, Rect};
