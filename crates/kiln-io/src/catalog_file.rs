//! Catalog master database reader and writer.
//!
//! The file is a JSON array of artifact records, exactly the shape the
//! frontend consumes. Readers can apply a [`LocatorPolicy`] so paths stored
//! relative to the asset directory come out as servable URLs.

use std::io::{self, Read, Write};
use thiserror::Error;

use kiln_core::{Artifact, Catalog, FragmentKind};

use crate::locator::{fix_image_extension, normalize_locator};

#[derive(Error, Debug)]
pub enum CatalogFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How locators are rewritten while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorPolicy {
    /// Prefix every locator is served under, e.g. `/Latent-Kiln/`.
    pub base_url: String,
    /// Rewrite `.jpg`/`.jpeg` preview locators to `.png`.
    pub fix_extensions: bool,
}

impl LocatorPolicy {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            fix_extensions: false,
        }
    }

    pub fn with_extension_fix(mut self, fix: bool) -> Self {
        self.fix_extensions = fix;
        self
    }

    pub fn apply(&self, artifact: &mut Artifact) {
        let assets = &mut artifact.assets;
        if self.fix_extensions {
            assets.image_url = fix_image_extension(&assets.image_url);
        }
        assets.image_url = normalize_locator(&self.base_url, &assets.image_url);
        if let Some(depth) = assets.depth_url.as_mut() {
            *depth = normalize_locator(&self.base_url, depth);
        }
        for kind in FragmentKind::ALL {
            let part = assets.parts.get_mut(kind);
            *part = normalize_locator(&self.base_url, part);
        }
    }
}

/// Reads a catalog database from any byte stream.
pub struct CatalogReader<R: Read> {
    reader: R,
    policy: Option<LocatorPolicy>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, policy: None }
    }

    pub fn with_policy(mut self, policy: LocatorPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn read(&mut self) -> Result<Catalog, CatalogFileError> {
        let mut json = String::new();
        self.reader.read_to_string(&mut json)?;
        let mut artifacts: Vec<Artifact> = serde_json::from_str(&json)?;

        if let Some(policy) = &self.policy {
            for artifact in &mut artifacts {
                policy.apply(artifact);
            }
        }

        let catalog = Catalog::from_artifacts(artifacts);
        log::info!("read catalog with {} artifacts", catalog.len());
        for kind in FragmentKind::ALL {
            let usable = catalog.with_fragment(kind).count();
            if usable < catalog.len() {
                log::debug!("{} of {} artifacts lack a usable {} fragment", catalog.len() - usable, catalog.len(), kind);
            }
        }
        Ok(catalog)
    }
}

/// Writes a catalog database as pretty-printed JSON.
pub struct CatalogWriter<W: Write> {
    writer: W,
}

impl<W: Write> CatalogWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, catalog: &Catalog) -> Result<(), CatalogFileError> {
        serde_json::to_writer_pretty(&mut self.writer, catalog)?;
        self.writer.flush()?;
        Ok(())
    }
}
