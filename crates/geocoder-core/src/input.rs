// crates/geocoder-core/src/input.rs

//! Input-side primitives: key mapping, the debounce generation counter and
//! dropdown highlight navigation. The [`Geocoder`](crate::Geocoder) owns one
//! of each; hosts only see [`Key`] and [`DebounceTicket`].

use std::time::Duration;

/// Keys the control reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// A pending debounce. The host sleeps for `delay`, then hands the ticket
/// back through [`Geocoder::on_debounce_elapsed`](crate::Geocoder::on_debounce_elapsed).
/// Only the most recently issued ticket is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "arm a timer and pass the ticket back when it fires"]
pub struct DebounceTicket {
    generation: u64,
    pub delay: Duration,
}

/// One debounce timer per control: restarting invalidates the previous ticket.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn restart(&mut self, delay: Duration) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket {
            generation: self.generation,
            delay,
        }
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: &DebounceTicket) -> bool {
        ticket.generation == self.generation
    }
}

/// Keyboard highlight over the dropdown rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    index: Option<usize>,
}

impl Highlight {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    /// Move down, wrapping past the last row.
    pub fn next(&mut self, len: usize) {
        self.index = match (len, self.index) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some((i + 1) % len),
        };
    }

    /// Move up, wrapping past the first row.
    pub fn prev(&mut self, len: usize) {
        self.index = match (len, self.index) {
            (0, _) => None,
            (len, None) | (len, Some(0)) => Some(len - 1),
            (_, Some(i)) => Some(i - 1),
        };
    }
}
