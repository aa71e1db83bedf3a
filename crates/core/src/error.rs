//! Fatal configuration errors.
//!
//! Everything here is a client mistake rather than a runtime condition: the
//! engine never retries, it hands the error back from `tick`/`run`/`validate`
//! and the caller decides how to exit.

use std::fmt;

use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Neither the entity's nor the engine's default color symbol is in the table.
    NoDefaultColor {
        entity: EntityId,
        entity_symbol: char,
        engine_symbol: char,
    },
    /// `global / entity` rounded down to zero: the entity asked to run faster than the engine.
    ZeroStride { global_rate: i32, entity_rate: i32 },
    /// The frame counter was read as zero while gating an entity.
    FrameCounterZero { global_rate: i32, entity_rate: i32 },
    /// The selected shape path does not exist in the entity's shape.
    MissingShapePath { entity: EntityId, path: String },
    /// The frame index points past the end of the selected shape path.
    FrameOutOfRange {
        entity: EntityId,
        path: String,
        frame: usize,
        frames: usize,
    },
    /// The engine rate must be a positive number of ticks per second.
    InvalidFramesPerSecond(i32),
    /// The spatial index already holds a rectangle for this entity.
    DuplicateIndexEntry(EntityId),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoDefaultColor {
                entity,
                entity_symbol,
                engine_symbol,
            } => write!(
                f,
                "no default color defined for entity {entity}: entity {entity_symbol:?} and engine {engine_symbol:?} are both invalid"
            ),
            EngineError::ZeroStride {
                global_rate,
                entity_rate,
            } => write!(
                f,
                "asked to update every 0 frames ({global_rate}/{entity_rate}=0); an entity rate cannot exceed the engine rate"
            ),
            EngineError::FrameCounterZero {
                global_rate,
                entity_rate,
            } => write!(
                f,
                "frame number should never be 0 (engine {global_rate}/s, entity {entity_rate}/s)"
            ),
            EngineError::MissingShapePath { entity, path } => {
                write!(f, "entity {entity} has no shape path {path:?}")
            }
            EngineError::FrameOutOfRange {
                entity,
                path,
                frame,
                frames,
            } => write!(
                f,
                "entity {entity} shape path {path:?} has {frames} frame(s), frame {frame} requested"
            ),
            EngineError::InvalidFramesPerSecond(rate) => {
                write!(f, "frames per second must be positive, got {rate}")
            }
            EngineError::DuplicateIndexEntry(id) => {
                write!(f, "entity {id} is already in the spatial index")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_message_names_the_path() {
        let err = EngineError::MissingShapePath {
            entity: EntityId(3),
            path: "left".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"left\""), "{msg}");
        assert!(msg.contains("#3"), "{msg}");
    }

    #[test]
    fn converts_into_anyhow_and_back() {
        let err: anyhow::Error = EngineError::InvalidFramesPerSecond(0).into();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::InvalidFramesPerSecond(0))
        );
    }
}
