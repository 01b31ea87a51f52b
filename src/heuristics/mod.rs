//! Deterministic fallbacks used when no provider is configured or a provider
//! call fails.

mod segment;
mod simplify;
mod translate;

pub use segment::{collapse_whitespace, segment, Segment, SEGMENT_BOUNDARIES};
pub use simplify::{simplify, SimplifiedText, LONG_SEGMENT_CHARS};
pub use translate::{translate, SUBSTITUTIONS};
