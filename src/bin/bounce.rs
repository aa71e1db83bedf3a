//! One ball per row bouncing between the screen edges, plus a cursor that
//! follows the mouse.
//!
//! Esc or Ctrl-C quits. Set `TERMINATION_DEBUG=<file>` to log the run.

use std::ops::ControlFlow;

use anyhow::Result;

use termination::core::{Engine, EngineConfig, Entity, Shape, Stage, Surface};
use termination::input::{InputEvent, InputReader, MouseAction, MouseInput};
use termination::term::TerminalSurface;
use termination::types::Position;

const FRAMES_PER_SECOND: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Left,
    Right,
}

/// Per-entity payload: balls carry their heading, the cursor its last mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sprite {
    Ball(Heading),
    Cursor(Option<MouseInput>),
}

fn ball_shape() -> Shape {
    Shape::single(["<-0->", "<0-->", "<-0->", "<--0>"])
        .with_path("left", ["|0-->"])
        .with_path("right", ["<--0|"])
}

fn ball_mask(frame_colors: [&str; 4], edge_colors: &str) -> Shape {
    Shape::single(frame_colors)
        .with_path("left", [edge_colors])
        .with_path("right", [edge_colors])
}

fn cursor_shape() -> Shape {
    Shape::single(["0"])
        .with_path("mouseLeft", ["<"])
        .with_path("mouseMiddle", ["|"])
        .with_path("mouseRight", [">"])
        .with_path("mouseRelease", ["*"])
        .with_path("mouseWheelDown", ["V"])
        .with_path("mouseWheelUp", ["^"])
}

fn ball_movement(stage: &Stage, ball: &mut Entity<Sprite>, mut position: Position) -> Position {
    let Sprite::Ball(heading) = ball.data else {
        return position;
    };
    match heading {
        Heading::Right if position.x + ball.width() >= stage.width => {
            ball.shape_path = "right".into();
            ball.data = Sprite::Ball(Heading::Left);
        }
        Heading::Left if position.x <= 0 => {
            ball.shape_path = "left".into();
            ball.data = Sprite::Ball(Heading::Right);
        }
        Heading::Right => {
            ball.shape_path = "default".into();
            position.x += 1;
        }
        Heading::Left => {
            ball.shape_path = "default".into();
            position.x -= 1;
        }
    }
    position
}

fn cursor_movement(_: &Stage, cursor: &mut Entity<Sprite>, position: Position) -> Position {
    let Sprite::Cursor(Some(mouse)) = cursor.data else {
        return position;
    };
    cursor.shape_path = match mouse.action {
        MouseAction::Left => "mouseLeft",
        MouseAction::Middle => "mouseMiddle",
        MouseAction::Right => "mouseRight",
        MouseAction::Release => "mouseRelease",
        MouseAction::WheelUp => "mouseWheelUp",
        MouseAction::WheelDown => "mouseWheelDown",
        MouseAction::Moved => "default",
    }
    .into();
    Position::new(mouse.position.x, mouse.position.y, position.z)
}

fn add_ball(engine: &mut Engine<Sprite>, position: Position) {
    let heading = if fastrand::bool() {
        Heading::Right
    } else {
        Heading::Left
    };
    let mask = if fastrand::bool() {
        ball_mask(["rwgwr", "rgwwr", "rwgwr", "rwwgr"], "ybbby")
    } else {
        ball_mask(["rrrrr"; 4], "yyyyy")
    };

    let ball = engine.spawn_with(position, Sprite::Ball(heading));
    ball.shape = ball_shape();
    ball.color_mask = Some(mask);
    ball.on_move(ball_movement);
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

    for y in 0..engine.height() {
        let x = fastrand::i32(0..engine.width().max(1));
        add_ball(&mut engine, Position::new(x, y, 0));
    }

    let cursor = engine.spawn_with(Position::new(-1, -1, 0), Sprite::Cursor(None));
    cursor.shape = cursor_shape();
    cursor.on_move(cursor_movement);
    let cursor_id = cursor.id();

    let mailbox = engine.mailbox();
    let stop = engine.stop_handle();
    let reader = InputReader::spawn(move |event| match event {
        InputEvent::Quit => {
            stop.stop();
            ControlFlow::Break(())
        }
        InputEvent::Mouse(mouse) => {
            mailbox.post(cursor_id, Sprite::Cursor(Some(mouse)));
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    })?;

    let result = engine.run(surface);
    reader.shutdown();
    result
}
