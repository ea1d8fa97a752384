//! # Latent Kiln Align
//!
//! Interface-width auto-alignment for three stacked raster fragments.
//! The engine loads a top, middle and bottom fragment concurrently, measures
//! the opaque width at each seam, and derives two scale factors so the
//! stacked silhouette has continuous edges. Measurement and calculation are
//! pure functions over decoded pixel buffers; only loading is asynchronous.
//!
//! Every failure degrades to [`AlignmentResult::IDENTITY`]: callers never
//! handle errors from [`AlignmentEngine::align`].

pub mod config;
pub mod error;
pub mod raster;
pub mod loader;
pub mod scanner;
pub mod calculator;
pub mod engine;

pub use calculator::{compute_scales, try_compute_scales, AlignmentResult, InterfaceWidths, NativeWidths};
pub use config::AlignConfig;
pub use engine::{AlignmentEngine, Stage};
pub use error::{AlignError, LoadError};
pub use loader::{is_remote, AssetSource, FsSource, HttpSource, MemorySource, RasterSource};
pub use raster::PixelBuffer;
pub use scanner::{measure_interface, Side};
