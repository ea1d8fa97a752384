//! # Latent Kiln View
//!
//! Display data for the assembly station. Turns an alignment result into
//! concrete widths and seam overlaps for the three stacked fragments, and
//! wraps texture loading in a tagged [`Displayable`] so a failed decode
//! renders a placeholder instead of aborting the frame.
//!
//! Everything here is JSON-serializable for the frontend canvas.

pub mod composite;
pub mod texture;

pub use composite::{CompositeFrame, CompositeLayout, LayoutSettings, PiecePlacement};
pub use texture::{resolve_displayable, Displayable};
