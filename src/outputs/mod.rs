//! Rendering filter results for the terminal or other programs.
//!
//! # Submodules
//!
//! - [`markdown`]: a readable Markdown view of a [`FilterOutcome`](crate::models::FilterOutcome),
//!   with items written back in the digest item grammar
//! - [`json`]: the same data as camelCase JSON for scripting
//!
//! Both renderers return a `String`; the binary decides where it goes.

pub mod json;
pub mod markdown;

use clap::ValueEnum;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}
