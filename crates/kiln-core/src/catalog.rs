use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::artifact::{Artifact, FragmentKind};

/// The artifact catalog: records in insertion order, indexed by id.
/// Records are read-only once added.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    artifacts: Vec<Artifact>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_artifacts(artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        let mut catalog = Self::new();
        for artifact in artifacts {
            catalog.add(artifact);
        }
        catalog
    }

    // ── Record management ────────────────────────────────────────────

    /// Insert an artifact and return its final id. A colliding id gets a
    /// `_1`, `_2`, ... suffix so existing records are never overwritten.
    pub fn add(&mut self, mut artifact: Artifact) -> String {
        if self.index.contains_key(&artifact.id) {
            let base = artifact.id.clone();
            let mut counter = 1;
            while self.index.contains_key(&format!("{base}_{counter}")) {
                counter += 1;
            }
            artifact.id = format!("{base}_{counter}");
            log::debug!("duplicate artifact id '{}' renamed to '{}'", base, artifact.id);
        }
        let id = artifact.id.clone();
        self.index.insert(id.clone(), self.artifacts.len());
        self.artifacts.push(artifact);
        id
    }

    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.index.get(id).map(|&i| &self.artifacts[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn as_slice(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Artifacts that carry a usable locator for `kind`.
    pub fn with_fragment(&self, kind: FragmentKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(move |a| a.has_fragment(kind))
    }

    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self.artifacts.iter().map(|a| a.region.as_str()).collect();
        regions.sort_unstable();
        regions.dedup();
        regions
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.artifacts.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let artifacts = Vec::<Artifact>::deserialize(deserializer)?;
        Ok(Catalog::from_artifacts(artifacts))
    }
}
