use serde::{Deserialize, Serialize};

/// Tunables for interface measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// A pixel counts as opaque when its alpha is strictly above this value.
    pub opacity_threshold: u8,
    /// Number of rows averaged from the object-edge row inward.
    pub band_rows: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            opacity_threshold: 50,
            band_rows: 5,
        }
    }
}

impl AlignConfig {
    pub fn with_threshold(mut self, opacity_threshold: u8) -> Self {
        self.opacity_threshold = opacity_threshold;
        self
    }

    pub fn with_band_rows(mut self, band_rows: usize) -> Self {
        self.band_rows = band_rows;
        self
    }

    /// Band size actually scanned; a zero band still samples the edge row.
    pub fn effective_band_rows(&self) -> usize {
        self.band_rows.max(1)
    }
}
