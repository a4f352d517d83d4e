//! Fixed-width level tags (`[INFO ]`, `[WARN ]`) and scope padding keep the
//! message column aligned across lines.

use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Unknown strings fall back to `default`.
    #[must_use]
    pub fn parse_or(s: &str, default: Self) -> Self {
        match s.to_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            "center" | "centre" => Self::Center,
            _ => default,
        }
    }
}

/// Pads `s` to at least `width` characters.
#[must_use]
pub fn pad(s: &str, width: usize, alignment: Alignment) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }

    let fill = width - len;
    match alignment {
        Alignment::Left => format!("{s}{}", " ".repeat(fill)),
        Alignment::Right => format!("{}{s}", " ".repeat(fill)),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(fill - left))
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagStyle {
    pub prefix: String,
    pub suffix: String,
    pub uppercase: bool,
    pub min_width: usize,
    pub alignment: Alignment,
}

impl Default for TagStyle {
    fn default() -> Self {
        Self {
            prefix: "[".to_string(),
            suffix: "]".to_string(),
            uppercase: true,
            min_width: 5,
            alignment: Alignment::Center,
        }
    }
}

impl TagStyle {
    #[must_use]
    pub fn format(&self, level: Level) -> String {
        let label = if self.uppercase {
            level.as_str().to_uppercase()
        } else {
            level.as_str().to_string()
        };
        format!(
            "{}{}{}",
            self.prefix,
            pad(&label, self.min_width, self.alignment),
            self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tag_is_centered_uppercase() {
        let style = TagStyle::default();
        assert_eq!(style.format(Level::Info), "[INFO ]");
        assert_eq!(style.format(Level::Error), "[ERROR]");
    }

    #[test]
    fn pad_alignments() {
        assert_eq!(pad("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(pad("ab", 4, Alignment::Right), "  ab");
        assert_eq!(pad("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(pad("abcdef", 4, Alignment::Left), "abcdef");
    }
}
