use serde::{Deserialize, Serialize};

use kiln_align::RasterSource;

/// A texture slot in the view: either a decoded image or a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Displayable {
    Loaded { locator: String, width: u32, height: u32 },
    Placeholder { locator: String, reason: String },
}

impl Displayable {
    pub fn locator(&self) -> &str {
        match self {
            Displayable::Loaded { locator, .. } | Displayable::Placeholder { locator, .. } => locator,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Displayable::Loaded { .. })
    }

    /// Height/width ratio, used to reserve space before the texture arrives.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match self {
            Displayable::Loaded { width, height, .. } if *width > 0 => Some(*height as f64 / *width as f64),
            _ => None,
        }
    }
}

/// Load `locator` for display, substituting a placeholder on failure.
pub async fn resolve_displayable<S: RasterSource>(source: &S, locator: &str) -> Displayable {
    match source.load(locator).await {
        Ok(buf) => Displayable::Loaded {
            locator: locator.to_string(),
            width: buf.width(),
            height: buf.height(),
        },
        Err(e) => {
            log::warn!("texture '{}' unavailable: {}", locator, e);
            Displayable::Placeholder {
                locator: locator.to_string(),
                reason: e.to_string(),
            }
        }
    }
}
