//! # Digest News
//!
//! Turns a directory (or web host) of daily Markdown news digests into one
//! tagged, noise-free, filterable article collection.
//!
//! ## Pipeline
//!
//! 1. **Loading** ([`loader`]): retrieve `YYYY-MM-DD-digest.md` for each day
//!    of a lookback window from a [`store::ContentStore`], concurrently
//! 2. **Parsing** ([`parser`]): read item lines, rank them, drop noise and
//!    classify each survivor with the [`rules`] tables
//! 3. **Filtering** ([`filter`]): search, date bounds and a source
//!    allow-list, then grouping by day or source
//! 4. **Output** ([`outputs`]): Markdown or JSON for the terminal
//!
//! [`session::NewsSession`] ties the steps together and owns the loaded
//! collection; favorites and flags live in a separate [`marks::MarkStore`].

pub mod cli;
pub mod clock;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod loader;
pub mod marks;
pub mod models;
pub mod outputs;
pub mod parser;
pub mod rules;
pub mod session;
pub mod store;
pub mod utils;

pub use error::{NewsError, Result};
pub use models::{Article, ArticleGroup, Category, FilterOutcome, FilterQuery, GroupBy};
pub use session::NewsSession;
