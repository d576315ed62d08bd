#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Everything the runtime routes to a model is one of these variants. The
//! types are deliberately small and `Eq` so update logic can be tested by
//! constructing events directly, without a terminal.

use bitflags::bitflags;
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Pasted text (bracketed paste mode).
    Paste(PasteEvent),

    /// A tick from a runtime subscription or scheduled command.
    Tick,
}

impl Event {
    /// Convert a crossterm event into a canonical [`Event`].
    ///
    /// Returns `None` for event kinds the runtime does not route (mouse,
    /// focus, key releases).
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => KeyEvent::from_crossterm(key).map(Self::Key),
            cte::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            cte::Event::Paste(text) => Some(Self::Paste(PasteEvent { text })),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// Press or auto-repeat. Releases are filtered out before this point.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a plain key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Builder-style modifier attachment.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this event is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Whether Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Whether Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    fn from_crossterm(key: cte::KeyEvent) -> Option<Self> {
        if key.kind == cte::KeyEventKind::Release {
            return None;
        }
        let code = KeyCode::from_crossterm(key.code)?;
        Some(Self {
            code,
            modifiers: Modifiers::from_crossterm(key.modifiers),
            kind: match key.kind {
                cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
                _ => KeyEventKind::Press,
            },
        })
    }
}

/// Key codes routed to models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Delete.
    Delete,
    /// Home.
    Home,
    /// End.
    End,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Function key (F1-F12).
    F(u8),
}

impl KeyCode {
    fn from_crossterm(code: cte::KeyCode) -> Option<Self> {
        Some(match code {
            cte::KeyCode::Char(c) => Self::Char(c),
            cte::KeyCode::Enter => Self::Enter,
            cte::KeyCode::Esc => Self::Escape,
            cte::KeyCode::Backspace => Self::Backspace,
            cte::KeyCode::Tab => Self::Tab,
            cte::KeyCode::BackTab => Self::BackTab,
            cte::KeyCode::Delete => Self::Delete,
            cte::KeyCode::Home => Self::Home,
            cte::KeyCode::End => Self::End,
            cte::KeyCode::Up => Self::Up,
            cte::KeyCode::Down => Self::Down,
            cte::KeyCode::Left => Self::Left,
            cte::KeyCode::Right => Self::Right,
            cte::KeyCode::F(n) => Self::F(n),
            _ => return None,
        })
    }
}

/// Press vs. auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Initial press.
    #[default]
    Press,
    /// Held-key auto-repeat.
    Repeat,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt/Option.
        const ALT   = 0b0100;
    }
}

impl Modifiers {
    fn from_crossterm(mods: cte::KeyModifiers) -> Self {
        let mut out = Self::NONE;
        if mods.contains(cte::KeyModifiers::SHIFT) {
            out |= Self::SHIFT;
        }
        if mods.contains(cte::KeyModifiers::CONTROL) {
            out |= Self::CTRL;
        }
        if mods.contains(cte::KeyModifiers::ALT) {
            out |= Self::ALT;
        }
        out
    }
}

/// Pasted text from bracketed paste mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    /// The pasted text, verbatim.
    pub text: String,
}
