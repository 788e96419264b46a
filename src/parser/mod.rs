//! Rebuilding document structure from glyph events.

mod builder;
mod event;
mod options;
mod reader;

pub use builder::StructureBuilder;
pub use event::{write_json_lines, GlyphEvent, JsonLinesSource};
pub use options::{BuildOptions, ErrorMode};
pub use reader::StructureReader;
