//! Form catalog data model shared by the engine, the catalog loaders and the CLI.

pub mod catalog;
pub mod domain;
pub mod error;

pub use catalog::FormCatalog;
