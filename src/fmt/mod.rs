//! Terminal and file rendering helpers: level colors, tag/scope padding and
//! line templates.

mod color;
mod tag;
mod template;

pub use color::Color;
pub use tag::{Alignment, TagStyle, pad};
pub use template::{FormatTemplate, FormatValues, Placeholder, Segment};
