//! Ordered rule tables used to classify digest items.
//!
//! Each submodule keeps its rules as data in a static, ordered table, so the
//! order of evaluation is explicit and tests can enumerate the tables
//! directly.
//!
//! | Module | Input | Output |
//! |--------|-------|--------|
//! | [`sources`] | URL | canonical publisher name |
//! | [`tags`] | title | 1–4 topic tags |
//! | [`noise`] | title + URL | whether the item is navigation/promotion |

pub mod noise;
pub mod sources;
pub mod tags;

pub use noise::is_noise;
pub use sources::resolve_source;
pub use tags::classify_title;
