/// Keyboard input from crossterm events
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sr3d_core::{InputEvent, InputSource, Key};
use std::time::Duration;

pub struct TerminalInput {
    reports_releases: bool,
    /// Keys to release on the next poll when the terminal cannot report releases
    pending: Vec<Key>,
    /// Latest terminal size reported since the last `take_resize`
    resized: Option<(u16, u16)>,
}

impl TerminalInput {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            reports_releases,
            pending: Vec::new(),
            resized: None,
        }
    }

    /// Terminal size in cells, if it changed since the last call
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    fn synthesized_releases(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).map(InputEvent::released).collect()
    }

    fn accept(&mut self, event: &Event, events: &mut Vec<InputEvent>) {
        if let Event::Resize(columns, rows) = *event {
            self.resized = Some((columns, rows));
            return;
        }
        let Some(input) = translate(event) else {
            return;
        };
        if let InputEvent::Key(key, sr3d_core::KeyPhase::Pressed) = input {
            if !self.reports_releases && !self.pending.contains(&key) {
                self.pending.push(key);
            }
        }
        events.push(input);
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> sr3d_core::Result<Vec<InputEvent>> {
        let mut events = self.synthesized_releases();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.accept(&event, &mut events);
        }
        Ok(events)
    }
}

/// Ctrl+C closes; key repeats are dropped
pub fn translate(event: &Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };

    if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Close);
    }

    let key = map_key(*code)?;
    match kind {
        KeyEventKind::Press => Some(InputEvent::pressed(key)),
        KeyEventKind::Release => Some(InputEvent::released(key)),
        KeyEventKind::Repeat => None,
    }
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        _ => None,
    }
}
