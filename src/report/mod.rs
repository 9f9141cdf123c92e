//! Report rendering modules.
//!
//! Text, Markdown, and JSON renderings of a parsed report.

pub mod generator;

pub use generator::*;
