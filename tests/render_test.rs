//! Compositing frames and color masks onto a framebuffer, and encoding the
//! result for the terminal.

use termination::core::{compose, Engine, Position, Shape};
use termination::term::{encode_diff_into, FrameBuffer};
use termination::types::{Color, ColorSpec};

fn fg(fb: &FrameBuffer, x: u16, y: u16) -> (char, Color, bool) {
    let cell = fb.get(x, y).unwrap();
    (cell.ch, cell.style.fg, cell.style.bold)
}

#[test]
fn mask_colors_each_character_and_bold_follows_case() {
    let mut fb = FrameBuffer::new(8, 3);
    let extent = compose(
        &mut fb,
        "<-0->\n|0|",
        Some("rwGwr\nbYb"),
        Position::new(1, 0, 0),
        ColorSpec::default(),
        '?',
    );

    assert_eq!((extent.width, extent.height), (5, 2));
    assert_eq!(fg(&fb, 1, 0), ('<', Color::Red, false));
    assert_eq!(fg(&fb, 3, 0), ('0', Color::Green, true));
    assert_eq!(fg(&fb, 2, 1), ('0', Color::Yellow, true));
    assert_eq!(fg(&fb, 3, 1), ('|', Color::Blue, false));
}

#[test]
fn transparency_leaves_cells_underneath() {
    let mut fb = FrameBuffer::new(5, 1);
    compose(
        &mut fb,
        "xxxxx",
        None,
        Position::default(),
        ColorSpec::default(),
        '?',
    );
    compose(
        &mut fb,
        "?o?o",
        None,
        Position::default(),
        ColorSpec::plain(Color::Cyan),
        '?',
    );

    assert_eq!(fb.row_text(0), "xoxox");
    assert_eq!(fg(&fb, 0, 0).1, Color::White);
    assert_eq!(fg(&fb, 1, 0).1, Color::Cyan);
}

#[test]
fn short_mask_falls_back_to_default_color() {
    let mut fb = FrameBuffer::new(4, 1);
    compose(
        &mut fb,
        "abcd",
        Some("m#"),
        Position::default(),
        ColorSpec::plain(Color::Green),
        '?',
    );
    assert_eq!(fg(&fb, 0, 0).1, Color::Magenta);
    assert_eq!(fg(&fb, 1, 0).1, Color::Black);
    assert_eq!(fg(&fb, 2, 0).1, Color::Green);
    assert_eq!(fg(&fb, 3, 0).1, Color::Green);
}

#[test]
fn higher_z_draws_first_and_lower_z_lands_on_top() {
    let mut fb = FrameBuffer::new(3, 1);
    let mut engine: Engine<()> = Engine::for_surface(&fb);

    engine.spawn(Position::new(0, 0, 9)).shape = Shape::single(["AAA"]);
    engine.spawn(Position::new(1, 0, 0)).shape = Shape::single(["b"]);

    engine.tick(&mut fb).unwrap();
    assert_eq!(fb.row_text(0), "AbA");
}

#[test]
fn entity_default_color_and_engine_fallback() {
    let mut fb = FrameBuffer::new(4, 2);
    let mut engine: Engine<()> = Engine::for_surface(&fb);
    engine.default_color = 'R';

    let own = engine.spawn(Position::new(0, 0, 0));
    own.shape = Shape::single(["o"]);
    own.default_color = 'c';

    let fallback = engine.spawn(Position::new(0, 1, 0));
    fallback.shape = Shape::single(["f"]);
    fallback.default_color = 'x';

    engine.tick(&mut fb).unwrap();
    assert_eq!(fg(&fb, 0, 0), ('o', Color::Cyan, false));
    assert_eq!(fg(&fb, 0, 1), ('f', Color::Red, true));
}

#[test]
fn no_valid_default_color_fails_the_tick() {
    let mut fb = FrameBuffer::new(4, 2);
    let mut engine: Engine<()> = Engine::for_surface(&fb);
    engine.default_color = '!';

    let e = engine.spawn(Position::new(0, 0, 0));
    e.shape = Shape::single(["o"]);
    e.default_color = '?';

    assert!(engine.validate().is_err());
    assert!(engine.tick(&mut fb).is_err());
}

#[test]
fn unchanged_ticks_encode_only_moved_cells() {
    let mut fb = FrameBuffer::new(10, 1);
    let mut engine: Engine<()> = Engine::for_surface(&fb);
    let still = engine.spawn(Position::new(0, 0, 0));
    still.shape = Shape::single(["S"]);

    engine.tick(&mut fb).unwrap();
    let before = fb.clone();
    engine.tick(&mut fb).unwrap();

    let mut out = Vec::new();
    encode_diff_into(&before, &fb, &mut out).unwrap();
    assert!(!String::from_utf8_lossy(&out).contains('S'));
}
