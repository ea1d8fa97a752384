//! # Latent Kiln I/O
//!
//! Reading and writing the catalog master database (a JSON array of
//! artifact records), caller-side locator hygiene applied on load, and the
//! JSON project settings file.

pub mod locator;
pub mod catalog_file;
pub mod project;

pub use catalog_file::{CatalogFileError, CatalogReader, CatalogWriter, LocatorPolicy};
pub use locator::{fix_image_extension, normalize_locator};
pub use project::{ConfigError, ProjectMeta, ProjectSettings};
