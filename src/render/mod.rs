//! Output rendering for extracted outlines.

mod json;
mod sink;

pub use json::{to_json, JsonFormat};
pub use sink::{JsonDirSink, OutlineSink};
