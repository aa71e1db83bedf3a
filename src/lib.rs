//! Termination (workspace facade crate).
//!
//! A terminal sprite animation engine. The implementation lives in dedicated
//! crates under `crates/`; this package re-exports them as
//! `termination::{core,input,term,types}` and hosts the demo binaries.

pub use termination_core as core;
pub use termination_input as input;
pub use termination_term as term;
pub use termination_types as types;
