//! A dancing character that walks toward the last mouse position.
//!
//! Esc or Ctrl-C quits.

use std::ops::ControlFlow;

use anyhow::Result;

use termination::core::{Engine, EngineConfig, Entity, Shape, Stage, Surface};
use termination::input::{InputEvent, InputReader};
use termination::term::TerminalSurface;
use termination::types::Position;

const FRAMES_PER_SECOND: i32 = 10;

/// Where the dancer is heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Goal {
    x: i32,
    y: i32,
}

fn dancer_shape() -> Shape {
    Shape::single([
        "  (>'-')>",
        "  ('-')",
        " ('-')",
        "<('-'<) ",
        " ('-')",
        "  ('-')",
    ])
}

fn step_toward(_: &Stage, dancer: &mut Entity<Goal>, mut position: Position) -> Position {
    let goal = dancer.data;
    position.x += (goal.x - position.x).signum();
    position.y += (goal.y - position.y).signum();
    position
}

fn main() -> Result<()> {
    let config = EngineConfig::default()
        .with_frames_per_second(FRAMES_PER_SECOND)
        .merge_env();

    let mut surface = TerminalSurface::open()?;
    let result = run(&config, &mut surface);

    // Always try to restore terminal state.
    let closed = surface.close();
    result.and(closed)
}

fn run(config: &EngineConfig, surface: &mut TerminalSurface) -> Result<()> {
    let (width, height) = surface.size();
    let mut engine = Engine::with_config(config, width, height)?;

    let start = Goal { x: 20, y: 20 };
    let dancer = engine.spawn_with(Position::new(start.x, start.y, 0), start);
    dancer.shape = dancer_shape();
    dancer.on_move(step_toward);
    let dancer_id = dancer.id();

    let mailbox = engine.mailbox();
    let stop = engine.stop_handle();
    let reader = InputReader::spawn(move |event| match event {
        InputEvent::Quit => {
            stop.stop();
            ControlFlow::Break(())
        }
        InputEvent::Mouse(mouse) => {
            let goal = Goal {
                x: mouse.position.x,
                y: mouse.position.y,
            };
            mailbox.post(dancer_id, goal);
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    })?;

    let result = engine.run(surface);
    reader.shutdown();
    result
}
