//! Demo selection logic for the two user actions.

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, FragmentKind};
use crate::catalog::Catalog;
use crate::rng::{shuffle, RandomSource};

/// Three fragment references picked for one composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridSelection {
    pub neck: Artifact,
    pub body: Artifact,
    pub base: Artifact,
}

/// Locators handed to the alignment engine, in stacking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRefs {
    pub top: String,
    pub middle: String,
    pub bottom: String,
}

impl HybridSelection {
    pub fn artifact(&self, kind: FragmentKind) -> &Artifact {
        match kind {
            FragmentKind::Neck => &self.neck,
            FragmentKind::Body => &self.body,
            FragmentKind::Base => &self.base,
        }
    }

    /// Locator of the fragment each artifact contributes. Always usable,
    /// since `pick_hybrid` only selects artifacts that carry the fragment.
    pub fn locator(&self, kind: FragmentKind) -> &str {
        self.artifact(kind).assets.parts.get(kind).trim()
    }

    pub fn fragment_refs(&self) -> FragmentRefs {
        FragmentRefs {
            top: self.locator(FragmentKind::Neck).to_string(),
            middle: self.locator(FragmentKind::Body).to_string(),
            bottom: self.locator(FragmentKind::Base).to_string(),
        }
    }
}

/// "Find similar": the pinned ids that exist, in catalog order, topped up
/// with a random sample of the remaining artifacts until `count` is reached.
pub fn find_similar<'a>(
    catalog: &'a Catalog,
    pinned_ids: &[&str],
    count: usize,
    rng: &mut impl RandomSource,
) -> Vec<&'a Artifact> {
    let mut matches: Vec<&Artifact> = catalog
        .iter()
        .filter(|a| pinned_ids.contains(&a.id.as_str()))
        .take(count)
        .collect();

    if matches.len() < count {
        let mut remaining: Vec<&Artifact> = catalog
            .iter()
            .filter(|a| !pinned_ids.contains(&a.id.as_str()))
            .collect();
        shuffle(&mut remaining, rng);
        let missing = count - matches.len();
        matches.extend(remaining.into_iter().take(missing));
    }
    matches
}

/// "Assemble fragments": a random neck, body and base, preferring three
/// different artifacts. Returns `None` when some fragment type is absent
/// from the whole catalog.
pub fn pick_hybrid(catalog: &Catalog, rng: &mut impl RandomSource) -> Option<HybridSelection> {
    let mut shuffled: Vec<&Artifact> = catalog.iter().collect();
    shuffle(&mut shuffled, rng);

    let neck = pick_fragment(&shuffled, FragmentKind::Neck, &[])?;
    let body = pick_fragment(&shuffled, FragmentKind::Body, &[neck.id.as_str()])?;
    let base = pick_fragment(&shuffled, FragmentKind::Base, &[neck.id.as_str(), body.id.as_str()])?;

    log::debug!("picked hybrid {} / {} / {}", neck.id, body.id, base.id);
    Some(HybridSelection {
        neck: neck.clone(),
        body: body.clone(),
        base: base.clone(),
    })
}

fn pick_fragment<'a>(
    candidates: &[&'a Artifact],
    kind: FragmentKind,
    taken: &[&str],
) -> Option<&'a Artifact> {
    let mut usable = candidates.iter().copied().filter(|a| a.has_fragment(kind));
    let first = usable.next()?;
    if !taken.contains(&first.id.as_str()) {
        return Some(first);
    }
    Some(usable.find(|a| !taken.contains(&a.id.as_str())).unwrap_or(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::FragmentParts;
    use crate::mock::mock_catalog;
    use crate::rng::SeededRng;

    fn artifact(id: &str, neck: &str, body: &str, base: &str) -> Artifact {
        Artifact::new(id, "Persia").with_parts(FragmentParts::new(neck, body, base))
    }

    #[test]
    fn test_find_similar_pins_first() {
        let catalog = mock_catalog(20, &mut SeededRng::new(1));
        let mut rng = SeededRng::new(2);
        let found = find_similar(&catalog, &["vase_5", "vase_12", "nope"], 3, &mut rng);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].id, "vase_5");
        assert_eq!(found[1].id, "vase_12");
        assert!(found[2].id != "vase_5" && found[2].id != "vase_12");
    }

    #[test]
    fn test_find_similar_small_catalog() {
        let catalog = mock_catalog(2, &mut SeededRng::new(1));
        let found = find_similar(&catalog, &[], 3, &mut SeededRng::new(9));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_pick_hybrid_prefers_distinct_artifacts() {
        let catalog = mock_catalog(10, &mut SeededRng::new(1));
        let hybrid = pick_hybrid(&catalog, &mut SeededRng::new(5)).unwrap();
        assert_ne!(hybrid.neck.id, hybrid.body.id);
        assert_ne!(hybrid.body.id, hybrid.base.id);
        assert_ne!(hybrid.neck.id, hybrid.base.id);
        let refs = hybrid.fragment_refs();
        assert!(refs.top.contains("_neck"));
        assert!(refs.middle.contains("_body"));
        assert!(refs.bottom.contains("_base"));
    }

    #[test]
    fn test_pick_hybrid_skips_missing_fragments() {
        let mut catalog = Catalog::new();
        catalog.add(artifact("only_neck", "n.png", "", ""));
        catalog.add(artifact("only_body", "", "b.png", " "));
        catalog.add(artifact("only_base", "", "", "c.png"));
        let hybrid = pick_hybrid(&catalog, &mut SeededRng::new(11)).unwrap();
        assert_eq!(hybrid.neck.id, "only_neck");
        assert_eq!(hybrid.body.id, "only_body");
        assert_eq!(hybrid.base.id, "only_base");
    }

    #[test]
    fn test_pick_hybrid_reuses_when_needed() {
        let mut catalog = Catalog::new();
        catalog.add(artifact("whole", "n.png", "b.png", "c.png"));
        let hybrid = pick_hybrid(&catalog, &mut SeededRng::new(3)).unwrap();
        assert_eq!(hybrid.neck.id, "whole");
        assert_eq!(hybrid.base.id, "whole");
    }

    #[test]
    fn test_pick_hybrid_none_without_bases() {
        let mut catalog = Catalog::new();
        catalog.add(artifact("a", "n.png", "b.png", ""));
        assert!(pick_hybrid(&catalog, &mut SeededRng::new(3)).is_none());
    }

    #[test]
    fn test_pick_hybrid_reproducible() {
        let catalog = mock_catalog(30, &mut SeededRng::new(1));
        let a = pick_hybrid(&catalog, &mut SeededRng::new(77)).unwrap();
        let b = pick_hybrid(&catalog, &mut SeededRng::new(77)).unwrap();
        assert_eq!(a, b);
    }
}
