//! Mapping from terminal events to engine-facing input events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::Position;

/// What the mouse did.
///
/// Drags report the held button, so a client sees a stream of presses while
/// the button stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Left,
    Middle,
    Right,
    Release,
    WheelUp,
    WheelDown,
    Moved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    pub action: MouseAction,
    /// Cell under the pointer; `z` is always 0.
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseInput),
    Resize { width: u16, height: u16 },
    /// Esc or Ctrl-C.
    Quit,
}

/// Translate a crossterm event; `None` for events clients never see
/// (key releases, focus changes, paste, horizontal scroll).
pub fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if should_quit(key) {
                Some(InputEvent::Quit)
            } else {
                Some(InputEvent::Key(key))
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse).map(InputEvent::Mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

pub fn map_mouse(mouse: MouseEvent) -> Option<MouseInput> {
    let action = match mouse.kind {
        MouseEventKind::Down(button) | MouseEventKind::Drag(button) => button_action(button),
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::ScrollUp => MouseAction::WheelUp,
        MouseEventKind::ScrollDown => MouseAction::WheelDown,
        MouseEventKind::Moved => MouseAction::Moved,
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
    };
    Some(MouseInput {
        action,
        position: Position::new(i32::from(mouse.column), i32::from(mouse.row), 0),
    })
}

fn button_action(button: MouseButton) -> MouseAction {
    match button {
        MouseButton::Left => MouseAction::Left,
        MouseButton::Middle => MouseAction::Middle,
        MouseButton::Right => MouseAction::Right,
    }
}

/// Check if key should stop the animation.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }

    #[test]
    fn test_key_events() {
        assert_eq!(
            map_event(Event::Key(KeyEvent::from(KeyCode::Esc))),
            Some(InputEvent::Quit)
        );
        let space = KeyEvent::from(KeyCode::Char(' '));
        assert_eq!(map_event(Event::Key(space)), Some(InputEvent::Key(space)));

        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event(Event::Key(release)), None);
    }

    #[test]
    fn test_mouse_buttons() {
        let cases = [
            (MouseEventKind::Down(MouseButton::Left), MouseAction::Left),
            (MouseEventKind::Down(MouseButton::Middle), MouseAction::Middle),
            (MouseEventKind::Down(MouseButton::Right), MouseAction::Right),
            (MouseEventKind::Drag(MouseButton::Left), MouseAction::Left),
            (MouseEventKind::Up(MouseButton::Right), MouseAction::Release),
            (MouseEventKind::ScrollUp, MouseAction::WheelUp),
            (MouseEventKind::ScrollDown, MouseAction::WheelDown),
            (MouseEventKind::Moved, MouseAction::Moved),
        ];
        for (kind, action) in cases {
            assert_eq!(
                map_event(mouse(kind, 7, 3)),
                Some(InputEvent::Mouse(MouseInput {
                    action,
                    position: Position::new(7, 3, 0),
                })),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(map_event(mouse(MouseEventKind::ScrollLeft, 0, 0)), None);
        assert_eq!(map_event(Event::FocusGained), None);
        assert_eq!(
            map_event(Event::Resize(100, 40)),
            Some(InputEvent::Resize {
                width: 100,
                height: 40
            })
        );
    }
}
