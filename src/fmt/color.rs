//! 24-bit ANSI colors for terminal tags.

use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Terminates any active SGR styling.
    pub const RESET: &'static str = "\x1b[0m";

    /// Faint text for the scope column.
    pub const DIM: &'static str = "\x1b[2m";

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB`. Malformed input falls back to white so a typo in
    /// config never breaks rendering.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Self::white();
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Some(r), Some(g), Some(b)) => Self { r, g, b },
            _ => Self::white(),
        }
    }

    #[must_use]
    pub fn fg_ansi(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// Wraps `text` in this color and a reset sequence.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}{}", self.fg_ansi(), Self::RESET)
    }

    /// Default palette for level tags.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::Trace | Level::Debug => Self::purple(),
            Level::Info => Self::cyan(),
            Level::Warn => Self::yellow(),
            Level::Error => Self::red(),
        }
    }

    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    #[must_use]
    pub const fn yellow() -> Self {
        Self::new(241, 250, 140)
    }

    #[must_use]
    pub const fn cyan() -> Self {
        Self::new(139, 233, 253)
    }

    #[must_use]
    pub const fn red() -> Self {
        Self::new(255, 85, 85)
    }

    #[must_use]
    pub const fn purple() -> Self {
        Self::new(189, 147, 249)
    }
}
