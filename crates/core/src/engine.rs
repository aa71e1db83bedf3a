//! The engine: entity registry, clock, and the per-tick update pass.
//!
//! One tick runs, for every entity from highest to lowest z:
//!
//! 1. movement callback (when the movement gate is open)
//! 2. animation step (when the animation gate is open)
//! 3. compose the current frame onto the surface
//! 4. off-screen death check
//! 5. bounds refresh in the spatial index
//! 6. collision callbacks for every overlapping peer
//!
//! and then flushes the surface. [`Engine::run`] repeats ticks and sleeps out
//! the rest of each frame budget until stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, trace};

use crate::compose::{compose, resolve_default_color};
use crate::config::EngineConfig;
use crate::debug::install_debug_sink;
use crate::entity::{Entity, Stage, Step};
use crate::error::EngineError;
use crate::spatial::SpatialIndex;
use crate::surface::Surface;
use crate::timing::{is_active, movement_rate};
use crate::types::{EntityId, Position, Rect};

/// Cloneable, thread-safe sender of `data` replacements for entities.
///
/// Posts are applied by the engine at the start of the next tick, so other
/// threads never touch an entity directly.
pub struct Mailbox<D> {
    tx: Sender<(EntityId, D)>,
}

impl<D> Clone for Mailbox<D> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<D> Mailbox<D> {
    /// Queue a new `data` value for `id`. Returns `false` once the engine is gone.
    pub fn post(&self, id: EntityId, data: D) -> bool {
        self.tx.send((id, data)).is_ok()
    }
}

/// Cooperative shutdown flag for [`Engine::run`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Stop the loop after the tick in progress. There is no way back.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Sprite engine generic over the per-entity payload `D`.
pub struct Engine<D> {
    /// Global tick rate. Entity rates may not exceed it.
    pub frames_per_second: i32,
    /// Shape character that is never drawn.
    pub transparency_char: char,
    /// Color symbol used when an entity's own default is invalid.
    pub default_color: char,

    width: i32,
    height: i32,
    frame_num: i32,
    ticks: u64,
    next_id: u64,
    entities: Vec<Entity<D>>,
    index: SpatialIndex,
    frame_start: Option<Instant>,
    mail_tx: Sender<(EntityId, D)>,
    mail_rx: Receiver<(EntityId, D)>,
    stop: StopHandle,
}

impl<D> Engine<D> {
    /// Engine for a `width`×`height` grid with default settings (60 fps).
    pub fn new(width: u16, height: u16) -> Self {
        Self::build(&EngineConfig::default(), width, height)
    }

    /// Engine sized to an existing surface.
    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        let (width, height) = surface.size();
        Self::new(width, height)
    }

    /// Engine with explicit settings. Installs the debug sink when a path is configured.
    pub fn with_config(config: &EngineConfig, width: u16, height: u16) -> Result<Self> {
        if config.frames_per_second <= 0 {
            return Err(EngineError::InvalidFramesPerSecond(config.frames_per_second).into());
        }
        if let Some(path) = &config.debug_path {
            install_debug_sink(path)?;
        }
        Ok(Self::build(config, width, height))
    }

    fn build(config: &EngineConfig, width: u16, height: u16) -> Self {
        let (mail_tx, mail_rx) = crossbeam_channel::unbounded();
        Self {
            frames_per_second: config.frames_per_second,
            transparency_char: config.transparency_char,
            default_color: config.default_color,
            width: width as i32,
            height: height as i32,
            frame_num: 0,
            ticks: 0,
            next_id: 0,
            entities: Vec::new(),
            index: SpatialIndex::new(),
            frame_start: None,
            mail_tx,
            mail_rx,
            stop: StopHandle::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Current frame number, `1..=frames_per_second` once a tick has run, 0 before.
    pub fn frame_num(&self) -> i32 {
        self.frame_num
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stage(&self) -> Stage {
        Stage {
            width: self.width,
            height: self.height,
            frames_per_second: self.frames_per_second,
            frame_num: self.frame_num,
        }
    }

    pub fn mailbox(&self) -> Mailbox<D> {
        Mailbox {
            tx: self.mail_tx.clone(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Create an entity at `position` with default data.
    pub fn spawn(&mut self, position: Position) -> &mut Entity<D>
    where
        D: Default,
    {
        self.spawn_with(position, D::default())
    }

    /// Create an entity at `position` carrying `data`.
    ///
    /// The entity joins the registry right away; it gets collision bounds on
    /// its first render.
    pub fn spawn_with(&mut self, position: Position, data: D) -> &mut Entity<D> {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        self.entities
            .push(Entity::new(id, position, self.frames_per_second, data));
        self.sort();
        debug!("spawned entity {id} at {position:?}");

        let index = self.index_of(id).unwrap_or(self.entities.len() - 1);
        &mut self.entities[index]
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity<D>> {
        let i = self.index_of(id)?;
        Some(&self.entities[i])
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity<D>> {
        let i = self.index_of(id)?;
        Some(&mut self.entities[i])
    }

    /// Entities in processing order (z descending).
    pub fn entities(&self) -> impl Iterator<Item = &Entity<D>> {
        self.entities.iter()
    }

    /// Teleport an entity, keeping the registry sorted. Returns `false` for unknown ids.
    pub fn move_entity(&mut self, id: EntityId, position: Position) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let old_z = self.entities[i].position().z;
        self.entities[i].set_position(position);
        if old_z != position.z {
            self.sort();
        }
        true
    }

    /// Peers currently overlapping `id`'s last computed bounds.
    pub fn colliding_with(&self, id: EntityId) -> Vec<EntityId> {
        let Some(rect) = self.entity(id).and_then(Entity::bounds) else {
            return Vec::new();
        };
        self.index
            .query(rect)
            .into_iter()
            .filter(|&peer| peer != id)
            .collect()
    }

    /// Kill an entity: run its death callback, then drop it from the registry
    /// and the spatial index. Order of the remaining entities is preserved.
    pub fn die(&mut self, id: EntityId) -> Option<Entity<D>> {
        let i = self.index_of(id)?;
        let stage = self.stage();

        let entity = &mut self.entities[i];
        if let Some(death) = entity.death.take() {
            death(&stage, entity);
        }

        let entity = self.entities.remove(i);
        self.index.remove(id);
        debug!("entity {id} died at {:?}", entity.position());
        Some(entity)
    }

    /// Check every entity's configuration before the loop starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.frames_per_second <= 0 {
            return Err(EngineError::InvalidFramesPerSecond(self.frames_per_second));
        }
        for entity in &self.entities {
            entity.validate(self.frames_per_second, self.default_color)?;
        }
        Ok(())
    }

    /// Run one full tick against `surface`, without pacing.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        if self.frames_per_second <= 0 {
            return Err(EngineError::InvalidFramesPerSecond(self.frames_per_second).into());
        }

        self.frame_start = Some(Instant::now());
        self.frame_num += 1;
        if self.frame_num > self.frames_per_second {
            self.frame_num = 1;
        }
        self.ticks += 1;

        self.drain_mailbox();
        surface.clear();

        let stage = self.stage();
        let mut cursor = 0;
        while let Some(i) = self.next_pending(cursor) {
            cursor = i;
            self.entities[i].tick_stamp = self.ticks;
            let id = self.entities[i].id();
            if self.update_entity(id, &stage, surface)? {
                cursor = 0;
            }
        }

        surface.flush()?;
        Ok(())
    }

    /// Time one tick may take at the current rate.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1) as u32
    }

    /// Sleep for whatever is left of the frame budget since the last tick started.
    pub fn pace(&self) {
        let elapsed = self
            .frame_start
            .map(|start| start.elapsed())
            .unwrap_or_default();
        let remaining = self
            .frame_budget()
            .checked_sub(elapsed)
            .unwrap_or_else(|| Duration::from_secs(0));
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }

    /// Tick and pace until the stop handle fires.
    pub fn run<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        self.validate()?;
        info!(
            "animation loop starting: {} entities, {}x{}, {} fps",
            self.entities.len(),
            self.width,
            self.height,
            self.frames_per_second
        );

        while !self.stop.is_stopped() {
            self.tick(surface)?;
            self.pace();
        }

        info!("animation loop stopped after {} ticks", self.ticks);
        Ok(())
    }

    /// Process one entity. Returns `true` if the registry was re-sorted.
    fn update_entity<S: Surface + ?Sized>(
        &mut self,
        id: EntityId,
        stage: &Stage,
        surface: &mut S,
    ) -> Result<bool> {
        let mut resorted = false;
        let Some(mut i) = self.index_of(id) else {
            return Ok(false);
        };

        // Movement.
        let rate = {
            let e = &self.entities[i];
            movement_rate(e.frames_per_second, e.moves_per_second)
        };
        if is_active(stage.frames_per_second, stage.frame_num, rate)? {
            trace!("entity {id} moves on frame {}", stage.frame_num);
            if let Some(mut movement) = self.entities[i].movement.take() {
                let entity = &mut self.entities[i];
                let current = entity.position();
                let next = movement(stage, entity, current);
                entity.set_position(next);
                if entity.movement.is_none() {
                    entity.movement = Some(movement);
                }

                if next.z != current.z {
                    self.sort();
                    resorted = true;
                    i = self.index_of(id).unwrap_or(i);
                }
            }
            if self.entities[i].is_doomed() {
                self.die(id);
                return Ok(resorted);
            }
        }

        // Animation.
        if is_active(
            stage.frames_per_second,
            stage.frame_num,
            self.entities[i].frames_per_second,
        )? && self.entities[i].step_frame()? == Step::Expired
        {
            debug!("entity {id} finished its last frame");
            self.die(id);
            return Ok(resorted);
        }

        // Render.
        let engine_color = self.default_color;
        let transparency = self.transparency_char;
        let entity = &mut self.entities[i];
        let color = resolve_default_color(id, entity.default_color, engine_color)?;
        let (frame, mask) = entity.current_frame()?;
        let extent = compose(surface, frame, mask, entity.position(), color, transparency);
        entity.set_extent(extent.width, extent.height);

        // Off-screen lifecycle.
        if entity.death_on_off_screen {
            let rect = Rect::at(entity.position(), entity.width(), entity.height());
            let visible = on_screen(rect, self.width, self.height);
            if !entity.has_been_visible() {
                if visible {
                    debug!("entity {id} is now visible at {rect:?}");
                    entity.latch_visible();
                }
            } else if !visible {
                debug!("entity {id} left the screen at {rect:?}");
                self.die(id);
                return Ok(resorted);
            }
        }

        // Bounds.
        let first = entity.refresh_bounds();
        let rect = Rect::at(entity.position(), entity.width(), entity.height());
        if first {
            self.index.insert(id, rect)?;
        } else {
            self.index.update(id, rect);
        }

        // Collisions.
        let peers: Vec<EntityId> = self
            .index
            .query(rect)
            .into_iter()
            .filter(|&peer| peer != id)
            .collect();
        if peers.is_empty() {
            return Ok(resorted);
        }
        debug!("entity {id} collides with {peers:?}");

        if let Some(mut collision) = self.entities[i].collision.take() {
            for peer in &peers {
                let Some(j) = self.index_of(*peer) else {
                    continue;
                };
                let (me, them) = pair_mut(&mut self.entities, i, j);
                collision(stage, me, them);
            }
            let entity = &mut self.entities[i];
            if entity.collision.is_none() {
                entity.collision = Some(collision);
            }
        }
        if self.entities[i].is_doomed() {
            self.die(id);
        }

        Ok(resorted)
    }

    fn drain_mailbox(&mut self) {
        while let Ok((id, data)) = self.mail_rx.try_recv() {
            match self.entity_mut(id) {
                Some(entity) => entity.data = data,
                None => trace!("dropping mail for missing entity {id}"),
            }
        }
    }

    fn next_pending(&self, from: usize) -> Option<usize> {
        self.entities
            .iter()
            .skip(from)
            .position(|e| e.tick_stamp != self.ticks)
            .map(|offset| from + offset)
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }

    /// Stable sort, highest z first.
    fn sort(&mut self) {
        self.entities
            .sort_by(|a, b| b.position().z.cmp(&a.position().z));
    }
}

/// An entity is off screen only when it lies entirely outside the grid on some axis.
fn on_screen(rect: Rect, width: i32, height: i32) -> bool {
    let outside_x = rect.right() <= 0 || rect.x >= width;
    let outside_y = rect.bottom() <= 0 || rect.y >= height;
    !(outside_x || outside_y)
}

/// Borrow `items[a]` mutably and `items[b]` shared. `a` and `b` must differ.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &T) {
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::tests::Recorder;
    use crate::shape::Shape;
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine(width: u16, height: u16) -> Engine<()> {
        Engine::new(width, height)
    }

    #[test]
    fn frame_counter_wraps_to_one() {
        let mut e = engine(10, 10);
        e.frames_per_second = 3;
        let mut r = Recorder::default();
        let mut seen = Vec::new();
        for _ in 0..7 {
            e.tick(&mut r).unwrap();
            seen.push(e.frame_num());
        }
        assert_eq!(seen, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn tick_clears_and_flushes_once() {
        let mut e = engine(10, 10);
        let mut r = Recorder::default();
        e.tick(&mut r).unwrap();
        assert_eq!((r.clears, r.flushes), (1, 1));
    }

    #[test]
    fn spawn_assigns_monotonic_ids() {
        let mut e = engine(10, 10);
        let a = e.spawn(Position::new(0, 0, 0)).id();
        let b = e.spawn(Position::new(0, 0, 0)).id();
        assert!(b > a);
        assert_eq!(e.len(), 2);
        assert_eq!(e.entity(a).unwrap().frames_per_second, 60);
    }

    #[test]
    fn registry_sorted_by_z_on_spawn_and_move() {
        let mut e = engine(10, 10);
        let low = e.spawn(Position::new(0, 0, 1)).id();
        let high = e.spawn(Position::new(0, 0, 5)).id();
        let zs: Vec<_> = e.entities().map(|x| x.position().z).collect();
        assert_eq!(zs, vec![5, 1]);

        assert!(e.move_entity(low, Position::new(0, 0, 9)));
        let ids: Vec<_> = e.entities().map(Entity::id).collect();
        assert_eq!(ids, vec![low, high]);
    }

    #[test]
    fn pair_mut_borrows_both_directions() {
        let mut v = vec![1, 2, 3];
        {
            let (a, b) = pair_mut(&mut v, 0, 2);
            *a += *b;
        }
        {
            let (a, b) = pair_mut(&mut v, 2, 1);
            *a += *b;
        }
        assert_eq!(v, vec![4, 2, 5]);
    }

    #[test]
    fn on_screen_requires_overlap_on_both_axes() {
        assert!(on_screen(Rect::new(0, 0, 1, 1), 10, 10));
        assert!(on_screen(Rect::new(-4, 0, 5, 1), 10, 10));
        assert!(!on_screen(Rect::new(-5, 0, 5, 1), 10, 10));
        assert!(!on_screen(Rect::new(10, 0, 5, 1), 10, 10));
        assert!(!on_screen(Rect::new(0, -1, 5, 1), 10, 10));
        assert!(!on_screen(Rect::new(0, 10, 5, 1), 10, 10));
        assert!(on_screen(Rect::new(9, 9, 5, 5), 10, 10));
    }

    #[test]
    fn die_runs_callback_once_and_removes_from_index() {
        let mut e = engine(10, 10);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = {
            let ent = e.spawn(Position::new(0, 0, 0));
            ent.shape = Shape::single(["x"]);
            ent.on_death(move |_: &Stage, _: &mut Entity<()>| seen.set(seen.get() + 1));
            ent.id()
        };
        e.tick(&mut Recorder::default()).unwrap();
        assert!(e.index.contains(id));

        assert!(e.die(id).is_some());
        assert!(e.die(id).is_none());
        assert_eq!(calls.get(), 1);
        assert!(!e.index.contains(id));
        assert!(e.is_empty());
    }

    #[test]
    fn mailbox_posts_apply_on_next_tick() {
        let mut e: Engine<u32> = Engine::new(10, 10);
        let id = {
            let ent = e.spawn(Position::default());
            ent.shape = Shape::single(["x"]);
            ent.id()
        };
        let mailbox = e.mailbox();
        assert!(mailbox.post(id, 42));
        assert!(mailbox.post(EntityId(999), 7));
        assert_eq!(e.entity(id).unwrap().data, 0);

        e.tick(&mut Recorder::default()).unwrap();
        assert_eq!(e.entity(id).unwrap().data, 42);
    }

    #[test]
    fn run_returns_immediately_once_stopped() {
        let mut e = engine(10, 10);
        e.stop_handle().stop();
        let mut r = Recorder::default();
        e.run(&mut r).unwrap();
        assert_eq!(r.flushes, 0);
        assert_eq!(e.ticks(), 0);
    }

    #[test]
    fn invalid_rate_is_rejected() {
        let mut e = engine(10, 10);
        e.frames_per_second = 0;
        let err = e.tick(&mut Recorder::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::InvalidFramesPerSecond(0))
        );

        let config = EngineConfig {
            frames_per_second: -5,
            ..EngineConfig::default()
        };
        assert!(Engine::<()>::with_config(&config, 10, 10).is_err());
    }

    #[test]
    fn frame_budget_follows_rate() {
        let mut e = engine(1, 1);
        e.frames_per_second = 10;
        assert_eq!(e.frame_budget(), Duration::from_millis(100));
    }
}
