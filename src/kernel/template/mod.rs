//! Response templates: a nested intent/slot table resolved to speech content.

pub mod types;
pub mod resolver;

pub use types::*;
