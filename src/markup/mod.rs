//! Overlay annotations for located findings.
//!
//! The mapper resolves each text finding's span to a rectangle, looks up
//! the category's style and appends a markup annotation to the target
//! page. Clearing and re-mapping the same findings reproduces the same
//! annotation set.

mod json;
mod mapper;
mod style;

pub use json::{to_json, JsonFormat};
pub use mapper::{AnnotationMapper, MapperOptions, MappingReport};
pub use style::{Style, StyleTable};
