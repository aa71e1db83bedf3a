//! Entities: positioned, animated sprites with optional behavior callbacks.

use std::fmt;

use crate::compose::resolve_default_color;
use crate::error::EngineError;
use crate::shape::{ColorMask, Shape};
use crate::timing::{check_rate, movement_rate};
use crate::types::{
    EntityId, Position, Rect, DEFAULT_COLOR_SYMBOL, DEFAULT_SHAPE_PATH, UNSET_MOVES_PER_SECOND,
};

/// Read-only view of the engine handed to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    pub frames_per_second: i32,
    /// Current frame, `1..=frames_per_second`.
    pub frame_num: i32,
}

/// Decides where an entity goes next. Receives the current position and returns the new one.
pub type MovementCallback<D> = Box<dyn FnMut(&Stage, &mut Entity<D>, Position) -> Position>;

/// Called once per overlapping peer on every tick the overlap persists.
pub type CollisionCallback<D> = Box<dyn FnMut(&Stage, &mut Entity<D>, &Entity<D>)>;

/// Called exactly once, right before the entity leaves the registry.
pub type DeathCallback<D> = Box<dyn FnOnce(&Stage, &mut Entity<D>)>;

/// Result of advancing the animation by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Advanced,
    /// The animation finished its final pass and the entity should die.
    Expired,
}

/// A sprite owned by an [`Engine`](crate::Engine).
///
/// Public fields are free to change at any time from client code or from the
/// entity's own callbacks. Position changes go through the movement callback
/// or [`Engine::move_entity`](crate::Engine::move_entity) so z-order stays sorted.
pub struct Entity<D> {
    pub shape: Shape,
    pub color_mask: Option<ColorMask>,
    /// Color symbol used where the mask has nothing to say.
    pub default_color: char,
    /// Die after one full extra pass of the current path.
    pub death_on_last_frame: bool,
    /// Die once the entity has been on screen and then leaves it completely.
    pub death_on_off_screen: bool,
    pub data: D,
    /// Animation rate; cannot exceed the engine rate.
    pub frames_per_second: i32,
    /// Movement rate; `<= 0` means "same as `frames_per_second`".
    pub moves_per_second: i32,
    pub shape_path: String,

    pub movement: Option<MovementCallback<D>>,
    pub collision: Option<CollisionCallback<D>>,
    pub death: Option<DeathCallback<D>>,

    id: EntityId,
    position: Position,
    width: i32,
    height: i32,
    frame: Option<usize>,
    wraps: u32,
    visible: bool,
    bounds: Option<Rect>,
    doomed: bool,
    pub(crate) tick_stamp: u64,
}

impl<D> Entity<D> {
    pub(crate) fn new(id: EntityId, position: Position, frames_per_second: i32, data: D) -> Self {
        Self {
            shape: Shape::new(),
            color_mask: None,
            default_color: DEFAULT_COLOR_SYMBOL,
            death_on_last_frame: false,
            death_on_off_screen: false,
            data,
            frames_per_second,
            moves_per_second: UNSET_MOVES_PER_SECOND,
            shape_path: DEFAULT_SHAPE_PATH.to_string(),
            movement: None,
            collision: None,
            death: None,
            id,
            position,
            width: 1,
            height: 1,
            frame: None,
            wraps: 0,
            visible: false,
            bounds: None,
            doomed: false,
            tick_stamp: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Width of the last rendered frame.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the last rendered frame.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Index of the frame being shown, `None` before the first animation step.
    pub fn frame(&self) -> Option<usize> {
        self.frame
    }

    /// Whether the entity has been seen on screen (only tracked with `death_on_off_screen`).
    pub fn has_been_visible(&self) -> bool {
        self.visible
    }

    /// Collision rectangle, `None` until the entity has been rendered once.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Ask the engine to kill this entity as soon as the current callback returns.
    pub fn kill(&mut self) {
        self.doomed = true;
    }

    pub fn is_doomed(&self) -> bool {
        self.doomed
    }

    pub fn on_move<F>(&mut self, movement: F) -> &mut Self
    where
        F: FnMut(&Stage, &mut Entity<D>, Position) -> Position + 'static,
    {
        self.movement = Some(Box::new(movement));
        self
    }

    pub fn on_collision<F>(&mut self, collision: F) -> &mut Self
    where
        F: FnMut(&Stage, &mut Entity<D>, &Entity<D>) + 'static,
    {
        self.collision = Some(Box::new(collision));
        self
    }

    pub fn on_death<F>(&mut self, death: F) -> &mut Self
    where
        F: FnOnce(&Stage, &mut Entity<D>) + 'static,
    {
        self.death = Some(Box::new(death));
        self
    }

    /// Replace the shape and restart the animation on the same path.
    pub fn set_shape(&mut self, shape: Shape) -> &mut Self {
        self.shape = shape;
        self.frame = None;
        self.wraps = 0;
        self
    }

    /// Check rates, colors and the selected shape path against an engine
    /// running at `global_rate` with `engine_color` as its default color.
    pub fn validate(&self, global_rate: i32, engine_color: char) -> Result<(), EngineError> {
        check_rate(global_rate, self.frames_per_second)?;
        check_rate(
            global_rate,
            movement_rate(self.frames_per_second, self.moves_per_second),
        )?;
        resolve_default_color(self.id, self.default_color, engine_color)?;
        if !self.shape.contains(&self.shape_path) {
            return Err(self.missing_path());
        }
        Ok(())
    }

    /// Advance the animation one step along the current path.
    ///
    /// The first step shows frame 0. Reaching the end of the path wraps to 0;
    /// with `death_on_last_frame` set, the second wrap expires the entity instead.
    pub(crate) fn step_frame(&mut self) -> Result<Step, EngineError> {
        let frames = self
            .shape
            .frame_count(&self.shape_path)
            .ok_or_else(|| self.missing_path())?;

        match self.frame {
            None => self.frame = Some(0),
            Some(index) if index + 1 >= frames => {
                if self.death_on_last_frame && self.wraps > 0 {
                    return Ok(Step::Expired);
                }
                self.frame = Some(0);
                self.wraps += 1;
            }
            Some(index) => self.frame = Some(index + 1),
        }
        Ok(Step::Advanced)
    }

    /// Frame string and aligned mask string for the current path and frame.
    pub(crate) fn current_frame(&self) -> Result<(&str, Option<&str>), EngineError> {
        let index = self.frame.unwrap_or(0);
        let frames = self
            .shape
            .path(&self.shape_path)
            .ok_or_else(|| self.missing_path())?;
        let frame = frames
            .get(index)
            .ok_or_else(|| EngineError::FrameOutOfRange {
                entity: self.id,
                path: self.shape_path.clone(),
                frame: index,
                frames: frames.len(),
            })?;
        let mask = self
            .color_mask
            .as_ref()
            .and_then(|mask| mask.frame(&self.shape_path, index));
        Ok((frame.as_str(), mask))
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_extent(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub(crate) fn latch_visible(&mut self) {
        self.visible = true;
    }

    /// Store the fresh rectangle; returns `true` if this is the first one.
    pub(crate) fn refresh_bounds(&mut self) -> bool {
        let first = self.bounds.is_none();
        self.bounds = Some(Rect::at(self.position, self.width, self.height));
        first
    }

    fn missing_path(&self) -> EngineError {
        EngineError::MissingShapePath {
            entity: self.id,
            path: self.shape_path.clone(),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for Entity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("shape_path", &self.shape_path)
            .field("frame", &self.frame)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frames_per_second", &self.frames_per_second)
            .field("moves_per_second", &self.moves_per_second)
            .field("visible", &self.visible)
            .field("bounds", &self.bounds)
            .field("data", &self.data)
            .field("movement", &self.movement.is_some())
            .field("collision", &self.collision.is_some())
            .field("death", &self.death.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(frames: &[&str]) -> Entity<()> {
        let mut e = Entity::new(EntityId(0), Position::default(), 60, ());
        e.set_shape(Shape::single(frames.iter().copied()));
        e
    }

    #[test]
    fn new_entity_defaults() {
        let e = entity(&["x"]);
        assert_eq!(e.shape_path, "default");
        assert_eq!(e.default_color, 'w');
        assert_eq!(e.moves_per_second, -1);
        assert_eq!((e.width(), e.height()), (1, 1));
        assert_eq!(e.frame(), None);
        assert_eq!(e.bounds(), None);
        assert!(!e.has_been_visible());
    }

    #[test]
    fn first_step_shows_frame_zero_then_cycles() {
        let mut e = entity(&["a", "b", "c"]);
        let mut shown = Vec::new();
        for _ in 0..7 {
            assert_eq!(e.step_frame(), Ok(Step::Advanced));
            shown.push(e.frame().unwrap());
        }
        assert_eq!(shown, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn death_on_last_frame_expires_on_second_wrap() {
        let mut e = entity(&["a", "b", "c"]);
        e.death_on_last_frame = true;
        let mut steps = 0;
        while e.step_frame() == Ok(Step::Advanced) {
            steps += 1;
            assert!(steps < 100);
        }
        // 0,1,2 then wrap to 0,1,2 then the second wrap expires.
        assert_eq!(steps, 6);
        assert_eq!(e.frame(), Some(2));
    }

    #[test]
    fn single_frame_path_expires_on_third_step() {
        let mut e = entity(&["a"]);
        e.death_on_last_frame = true;
        assert_eq!(e.step_frame(), Ok(Step::Advanced));
        assert_eq!(e.step_frame(), Ok(Step::Advanced));
        assert_eq!(e.step_frame(), Ok(Step::Expired));
    }

    #[test]
    fn switching_to_shorter_path_wraps_instead_of_overrunning() {
        let mut e = entity(&["a", "b", "c", "d"]);
        e.shape.insert("left", ["<"]);
        for _ in 0..4 {
            e.step_frame().unwrap();
        }
        assert_eq!(e.frame(), Some(3));
        e.shape_path = "left".to_string();
        e.step_frame().unwrap();
        assert_eq!(e.frame(), Some(0));
        assert_eq!(e.current_frame().unwrap().0, "<");
    }

    #[test]
    fn missing_path_is_named() {
        let mut e = entity(&["a"]);
        e.shape_path = "nope".to_string();
        assert_eq!(
            e.step_frame(),
            Err(EngineError::MissingShapePath {
                entity: EntityId(0),
                path: "nope".to_string()
            })
        );
        assert!(e.current_frame().is_err());
    }

    #[test]
    fn stale_frame_index_is_out_of_range() {
        let mut e = entity(&["a", "b"]);
        e.shape.insert("short", ["s"]);
        e.step_frame().unwrap();
        e.step_frame().unwrap();
        e.shape_path = "short".to_string();
        assert!(matches!(
            e.current_frame(),
            Err(EngineError::FrameOutOfRange { frame: 1, frames: 1, .. })
        ));
    }

    #[test]
    fn current_frame_pairs_mask_by_path_and_index() {
        let mut e = entity(&["ab", "cd"]);
        e.color_mask = Some(Shape::single(["rr"]));
        e.step_frame().unwrap();
        assert_eq!(e.current_frame().unwrap(), ("ab", Some("rr")));
        e.step_frame().unwrap();
        assert_eq!(e.current_frame().unwrap(), ("cd", None));
    }

    #[test]
    fn validate_reports_configuration_errors() {
        let mut e = entity(&["a"]);
        assert!(e.validate(60, 'w').is_ok());

        e.frames_per_second = 120;
        assert!(matches!(e.validate(60, 'w'), Err(EngineError::ZeroStride { .. })));
        e.frames_per_second = 60;

        e.moves_per_second = 90;
        assert!(matches!(e.validate(60, 'w'), Err(EngineError::ZeroStride { .. })));
        e.moves_per_second = -1;

        e.default_color = 'x';
        assert!(e.validate(60, 'w').is_ok());
        assert!(matches!(e.validate(60, 'q'), Err(EngineError::NoDefaultColor { .. })));
        e.default_color = 'w';

        e.shape_path = "gone".to_string();
        assert!(matches!(e.validate(60, 'w'), Err(EngineError::MissingShapePath { .. })));
    }

    #[test]
    fn kill_marks_entity_doomed() {
        let mut e = entity(&["a"]);
        assert!(!e.is_doomed());
        e.kill();
        assert!(e.is_doomed());
    }
}
