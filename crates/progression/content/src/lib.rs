//! Data-driven progression content and loaders.
//!
//! This crate reads the files an operator edits:
//! - Progression paths and their requirements (RON)
//! - Language overrides for requirement descriptions (TOML)
//! - Engine configuration (TOML)
//!
//! Content is consumed by the runtime's path builder and never appears in
//! completion state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LangFile, LangLoader, LoadResult, PathCatalog, PathLoader,
};
