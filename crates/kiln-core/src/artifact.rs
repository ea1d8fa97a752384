use serde::{Deserialize, Serialize};

/// Normalized coordinates used to place an artifact on the browsing sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobeCoordinates {
    /// Longitude-like axis.
    pub x: f64,
    /// Latitude-like axis.
    pub y: f64,
}

impl GlobeCoordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The three interchangeable fragment types an artifact is cut into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Top piece.
    Neck,
    /// Middle piece.
    Body,
    /// Bottom piece.
    Base,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 3] = [FragmentKind::Neck, FragmentKind::Body, FragmentKind::Base];

    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::Neck => "neck",
            FragmentKind::Body => "body",
            FragmentKind::Base => "base",
        }
    }
}

impl std::fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locators for the three fragments of one artifact. Empty strings mean the
/// fragment was never extracted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FragmentParts {
    #[serde(default)]
    pub neck: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub base: String,
}

impl FragmentParts {
    pub fn new(neck: &str, body: &str, base: &str) -> Self {
        Self {
            neck: neck.to_string(),
            body: body.to_string(),
            base: base.to_string(),
        }
    }

    pub fn get(&self, kind: FragmentKind) -> &str {
        match kind {
            FragmentKind::Neck => &self.neck,
            FragmentKind::Body => &self.body,
            FragmentKind::Base => &self.base,
        }
    }

    pub fn get_mut(&mut self, kind: FragmentKind) -> &mut String {
        match kind {
            FragmentKind::Neck => &mut self.neck,
            FragmentKind::Body => &mut self.body,
            FragmentKind::Base => &mut self.base,
        }
    }
}

/// Image locators attached to an artifact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtifactAssets {
    /// Whole-object preview.
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_url: Option<String>,
    #[serde(default)]
    pub parts: FragmentParts,
}

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub globe_coordinates: GlobeCoordinates,
    pub assets: ArtifactAssets,
}

impl Artifact {
    pub fn new(id: &str, region: &str) -> Self {
        Self {
            id: id.to_string(),
            region: region.to_string(),
            period: None,
            globe_coordinates: GlobeCoordinates::default(),
            assets: ArtifactAssets::default(),
        }
    }

    pub fn with_period(mut self, period: &str) -> Self {
        self.period = Some(period.to_string());
        self
    }

    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.globe_coordinates = GlobeCoordinates::new(x, y);
        self
    }

    pub fn with_preview(mut self, image_url: &str) -> Self {
        self.assets.image_url = image_url.to_string();
        self
    }

    pub fn with_parts(mut self, parts: FragmentParts) -> Self {
        self.assets.parts = parts;
        self
    }

    /// The locator for `kind`, or `None` when it is missing or malformed.
    pub fn fragment(&self, kind: FragmentKind) -> Option<&str> {
        let locator = self.assets.parts.get(kind);
        if is_usable_locator(locator) {
            Some(locator.trim())
        } else {
            None
        }
    }

    pub fn has_fragment(&self, kind: FragmentKind) -> bool {
        self.fragment(kind).is_some()
    }
}

/// A locator is usable when it is non-blank, free of control characters,
/// and names something other than a directory.
pub fn is_usable_locator(locator: &str) -> bool {
    let trimmed = locator.trim();
    !trimmed.is_empty() && !trimmed.chars().any(char::is_control) && !trimmed.ends_with('/')
}
