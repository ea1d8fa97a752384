//! Raster loading: locator → decoded [`PixelBuffer`].
//!
//! A single attempt per call, no retry and no caching. Decoding runs on the
//! blocking pool so the three loads of one alignment overlap.
//!
//! Supported locators:
//! - `http`, `https`: fetched with [`HttpSource`]
//! - anything else: a path under the asset root, read by [`FsSource`]
//!
//! [`AssetSource`] routes between the two by scheme.

use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use image::{ImageFormat, RgbaImage};

use crate::error::LoadError;
use crate::raster::PixelBuffer;

/// Resolves fragment locators to decoded rasters.
pub trait RasterSource: Send + Sync {
    fn load(&self, locator: &str) -> impl Future<Output = Result<PixelBuffer, LoadError>> + Send;
}

impl<S: RasterSource> RasterSource for Arc<S> {
    fn load(&self, locator: &str) -> impl Future<Output = Result<PixelBuffer, LoadError>> + Send {
        self.as_ref().load(locator)
    }
}

async fn decode(locator: &str, bytes: Arc<Vec<u8>>) -> Result<PixelBuffer, LoadError> {
    let decoded = tokio::task::spawn_blocking(move || PixelBuffer::from_encoded(&bytes))
        .await
        .map_err(|e| LoadError::Task {
            locator: locator.to_string(),
            message: e.to_string(),
        })?;
    decoded.map_err(|source| LoadError::Decode {
        locator: locator.to_string(),
        source,
    })
}

/// True for locators fetched over the network.
pub fn is_remote(locator: &str) -> bool {
    let trimmed = locator.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        trimmed
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

// ── Filesystem ───────────────────────────────────────────────────────

/// Loads fragments from an asset directory, accepting the URL-style
/// locators stored in the catalog (`{base_url}assets/parts/neck/a%20b.png`).
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    base_url: String,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_url: String::new(),
        }
    }

    /// Prefix stripped from locators before they are resolved.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a locator to a file under the root.
    pub fn resolve(&self, locator: &str) -> Result<PathBuf, LoadError> {
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(LoadError::EmptyLocator);
        }
        if trimmed.contains("://") {
            return Err(LoadError::Malformed(locator.to_string()));
        }

        let mut relative = trimmed;
        if !self.base_url.is_empty() {
            relative = relative.strip_prefix(self.base_url.as_str()).unwrap_or(relative);
        }
        let relative = relative.split(['?', '#']).next().unwrap_or_default();
        let relative = relative.trim_start_matches("./").trim_start_matches('/');

        let decoded = urlencoding::decode(relative).map_err(|_| LoadError::Malformed(locator.to_string()))?;
        if decoded.is_empty() {
            return Err(LoadError::Malformed(locator.to_string()));
        }

        let mut path = self.root.clone();
        for component in Path::new(decoded.as_ref()).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return Err(LoadError::OutsideRoot(locator.to_string())),
            }
        }
        Ok(path)
    }
}

impl RasterSource for FsSource {
    async fn load(&self, locator: &str) -> Result<PixelBuffer, LoadError> {
        let path = self.resolve(locator)?;
        log::debug!("loading fragment '{}' from {}", locator, path.display());
        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(locator.to_string())
            } else {
                LoadError::Io {
                    locator: locator.to_string(),
                    source,
                }
            }
        })?;
        decode(locator, Arc::new(bytes)).await
    }
}

// ── Network ──────────────────────────────────────────────────────────

/// Fetches `http(s)` locators with a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl RasterSource for HttpSource {
    async fn load(&self, locator: &str) -> Result<PixelBuffer, LoadError> {
        let url = locator.trim();
        if url.is_empty() {
            return Err(LoadError::EmptyLocator);
        }
        if !is_remote(url) {
            return Err(LoadError::Malformed(locator.to_string()));
        }

        log::debug!("fetching fragment {}", url);
        let http_error = |source| LoadError::Http {
            locator: locator.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(locator.to_string()));
        }
        if !status.is_success() {
            return Err(LoadError::Status {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(http_error)?;
        decode(locator, Arc::new(bytes.to_vec())).await
    }
}

// ── Routing ──────────────────────────────────────────────────────────

/// The production source: remote locators over HTTP, the rest from disk.
#[derive(Debug, Clone)]
pub struct AssetSource {
    fs: FsSource,
    http: HttpSource,
}

impl AssetSource {
    pub fn new(fs: FsSource) -> Self {
        Self::with_http(fs, HttpSource::new())
    }

    pub fn with_http(fs: FsSource, http: HttpSource) -> Self {
        Self { fs, http }
    }

    pub fn fs(&self) -> &FsSource {
        &self.fs
    }
}

impl RasterSource for AssetSource {
    async fn load(&self, locator: &str) -> Result<PixelBuffer, LoadError> {
        if is_remote(locator) {
            self.http.load(locator).await
        } else {
            self.fs.load(locator).await
        }
    }
}

// ── In-memory ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct MemoryEntry {
    bytes: Arc<Vec<u8>>,
    delay: Option<Duration>,
}

/// Encoded rasters held in memory, keyed by locator. Entries may carry an
/// artificial latency, which makes completion order controllable.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, MemoryEntry>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register already-encoded bytes (any supported format).
    pub fn insert(&mut self, locator: &str, bytes: Vec<u8>) {
        self.entries.insert(
            locator.to_string(),
            MemoryEntry {
                bytes: Arc::new(bytes),
                delay: None,
            },
        );
    }

    /// Register an image, stored PNG-encoded.
    pub fn insert_image(&mut self, locator: &str, image: &RgbaImage) -> Result<(), image::ImageError> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        self.insert(locator, bytes);
        Ok(())
    }

    /// Delay every future load of `locator` by `delay`.
    pub fn set_delay(&mut self, locator: &str, delay: Duration) {
        if let Some(entry) = self.entries.get_mut(locator) {
            entry.delay = Some(delay);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RasterSource for MemorySource {
    async fn load(&self, locator: &str) -> Result<PixelBuffer, LoadError> {
        if locator.trim().is_empty() {
            return Err(LoadError::EmptyLocator);
        }
        let entry = self
            .entries
            .get(locator)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(locator.to_string()))?;
        if let Some(delay) = entry.delay {
            tokio::time::sleep(delay).await;
        }
        decode(locator, entry.bytes).await
    }
}
