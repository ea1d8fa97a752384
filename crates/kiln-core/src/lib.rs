//! # Latent Kiln Core
//!
//! Artifact catalog model shared by every other crate: catalog records and
//! their fragment locators, an ordered catalog indexed by id, an injectable
//! seeded random source, mock catalog generation, and the demo selection
//! logic behind "find similar" and "assemble fragments".

pub mod artifact;
pub mod catalog;
pub mod rng;
pub mod mock;
pub mod selection;

pub use artifact::{Artifact, ArtifactAssets, FragmentKind, FragmentParts, GlobeCoordinates};
pub use catalog::Catalog;
pub use rng::{RandomSource, SeededRng};
pub use selection::HybridSelection;
