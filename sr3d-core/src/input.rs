/// Input events, actions, and the key binding table
use std::collections::HashMap;

use crate::camera::{Axis, Direction};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The platform asked the window to close
    Close,
    Key(Key, KeyPhase),
}

impl InputEvent {
    pub fn pressed(key: Key) -> Self {
        InputEvent::Key(key, KeyPhase::Pressed)
    }

    pub fn released(key: Key) -> Self {
        InputEvent::Key(key, KeyPhase::Released)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleDrawMode,
    StartMove(Axis, Direction),
    StopMove(Axis),
    StartRotate(Axis, Direction),
    StopRotate(Axis),
    ScaleUp,
    ScaleDown,
}

/// Source of input events, polled once per frame
pub trait InputSource {
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}

/// Maps a key and its phase to the action it triggers
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<(Key, KeyPhase), Action>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, phase: KeyPhase, action: Action) -> &mut Self {
        self.map.insert((key, phase), action);
        self
    }

    /// Hold-to-move binding: start on press, stop on release
    pub fn bind_move(&mut self, key: Key, axis: Axis, direction: Direction) -> &mut Self {
        self.bind(key, KeyPhase::Pressed, Action::StartMove(axis, direction))
            .bind(key, KeyPhase::Released, Action::StopMove(axis))
    }

    pub fn bind_rotate(&mut self, key: Key, axis: Axis, direction: Direction) -> &mut Self {
        self.bind(key, KeyPhase::Pressed, Action::StartRotate(axis, direction))
            .bind(key, KeyPhase::Released, Action::StopRotate(axis))
    }

    pub fn unbind(&mut self, key: Key, phase: KeyPhase) -> Option<Action> {
        self.map.remove(&(key, phase))
    }

    /// The action for an event; a platform close always quits
    pub fn action_for(&self, event: &InputEvent) -> Option<Action> {
        match *event {
            InputEvent::Close => Some(Action::Quit),
            InputEvent::Key(key, phase) => self.map.get(&(key, phase)).copied(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Esc/Q quit, Space toggles the draw mode, arrows and PageUp/PageDown move,
/// W/S A/D E/R rotate about X, Y and Z, +/- scale every object.
impl Default for KeyBindings {
    fn default() -> Self {
        use Direction::{Backward, Forward};

        let mut bindings = Self::empty();
        bindings
            .bind(Key::Escape, KeyPhase::Pressed, Action::Quit)
            .bind(Key::Char('q'), KeyPhase::Pressed, Action::Quit)
            .bind(Key::Space, KeyPhase::Released, Action::ToggleDrawMode)
            .bind(Key::Char('+'), KeyPhase::Pressed, Action::ScaleUp)
            .bind(Key::Char('-'), KeyPhase::Pressed, Action::ScaleDown)
            .bind_move(Key::Right, Axis::X, Forward)
            .bind_move(Key::Left, Axis::X, Backward)
            .bind_move(Key::Up, Axis::Y, Forward)
            .bind_move(Key::Down, Axis::Y, Backward)
            .bind_move(Key::PageUp, Axis::Z, Forward)
            .bind_move(Key::PageDown, Axis::Z, Backward)
            .bind_rotate(Key::Char('w'), Axis::X, Forward)
            .bind_rotate(Key::Char('s'), Axis::X, Backward)
            .bind_rotate(Key::Char('d'), Axis::Y, Forward)
            .bind_rotate(Key::Char('a'), Axis::Y, Backward)
            .bind_rotate(Key::Char('e'), Axis::Z, Forward)
            .bind_rotate(Key::Char('r'), Axis::Z, Backward);
        bindings
    }
}
