//! Per-entity rate gating against the shared engine clock.
//!
//! The engine counts frames `1..=frames_per_second` and wraps. An entity running
//! at a lower rate is active on every `stride`-th frame, where
//! `stride = global / entity` (integer division).

use crate::error::EngineError;

/// Decide whether frame `frame_num` is an active frame for an entity running at
/// `entity_rate` against an engine running at `global_rate`.
///
/// Rates `<= 0` and rates equal to the engine's are active on every frame.
///
/// # Examples
///
/// ```
/// use termination_core::timing::is_active;
///
/// // 60 fps engine, 20 fps entity: every third frame.
/// assert!(!is_active(60, 1, 20).unwrap());
/// assert!(!is_active(60, 2, 20).unwrap());
/// assert!(is_active(60, 3, 20).unwrap());
///
/// // An entity faster than the engine is a configuration error.
/// assert!(is_active(10, 1, 20).is_err());
/// ```
pub fn is_active(global_rate: i32, frame_num: i32, entity_rate: i32) -> Result<bool, EngineError> {
    if entity_rate <= 0 || entity_rate == global_rate {
        return Ok(true);
    }

    let stride = global_rate / entity_rate;
    if frame_num == 0 {
        return Err(EngineError::FrameCounterZero {
            global_rate,
            entity_rate,
        });
    }
    if stride == 0 {
        return Err(EngineError::ZeroStride {
            global_rate,
            entity_rate,
        });
    }

    Ok(frame_num % stride == 0)
}

/// Rate that drives movement: `moves_per_second` when positive, otherwise the
/// animation rate.
pub fn movement_rate(frames_per_second: i32, moves_per_second: i32) -> i32 {
    if moves_per_second > 0 {
        moves_per_second
    } else {
        frames_per_second
    }
}

/// Check a rate ahead of time without needing a live frame counter.
pub fn check_rate(global_rate: i32, entity_rate: i32) -> Result<(), EngineError> {
    is_active(global_rate, 1, entity_rate).map(|_| ())
}
