use serde::Serialize;
use std::sync::Mutex;

use kiln_align::{AlignmentEngine, AssetSource, FsSource, RasterSource};
use kiln_core::selection;
use kiln_core::{Artifact, Catalog, FragmentKind, HybridSelection, SeededRng};
use kiln_io::ProjectSettings;
use kiln_view::{CompositeFrame, CompositeLayout};

pub mod session;

pub use session::{AssemblySession, ResolvedComposite};

/// Ids surfaced first by the "find similar" demo.
pub const DEMO_MATCH_IDS: [&str; 3] = ["africa10", "main-image (15)", "americas22"];

/// Number of artifacts "find similar" returns.
pub const SIMILAR_COUNT: usize = 3;

/// Shared application state.
pub struct AppState<S> {
    pub catalog: Mutex<Catalog>,
    pub rng: Mutex<SeededRng>,
    pub hybrid: Mutex<Option<HybridSelection>>,
    pub session: AssemblySession<S>,
    pub settings: ProjectSettings,
}

impl<S: RasterSource> AppState<S> {
    pub fn new(catalog: Catalog, source: S, settings: ProjectSettings) -> Self {
        let engine = AlignmentEngine::with_config(source, settings.align);
        Self {
            catalog: Mutex::new(catalog),
            rng: Mutex::new(SeededRng::new(settings.seed)),
            hybrid: Mutex::new(None),
            session: AssemblySession::new(engine, settings.layout),
            settings,
        }
    }
}

impl AppState<AssetSource> {
    /// State whose fragments load from the configured asset directory, or
    /// over HTTP for remote locators.
    pub fn from_settings(catalog: Catalog, settings: ProjectSettings) -> Self {
        let fs = FsSource::new(&settings.asset_root).with_base_url(&settings.base_url);
        Self::new(catalog, AssetSource::new(fs), settings)
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub artifact_count: usize,
    pub regions: Vec<String>,
    pub neck_count: usize,
    pub body_count: usize,
    pub base_count: usize,
}

/// Summary of the loaded catalog.
pub fn catalog_info<S>(state: &AppState<S>) -> Result<CatalogInfo, String> {
    let catalog = state.catalog.lock().map_err(|e| e.to_string())?;
    Ok(CatalogInfo {
        artifact_count: catalog.len(),
        regions: catalog.regions().into_iter().map(String::from).collect(),
        neck_count: catalog.with_fragment(FragmentKind::Neck).count(),
        body_count: catalog.with_fragment(FragmentKind::Body).count(),
        base_count: catalog.with_fragment(FragmentKind::Base).count(),
    })
}

#[derive(Debug, Serialize)]
pub struct ArtifactInfo {
    pub id: String,
    pub region: String,
    pub period: Option<String>,
    pub coordinates: [f64; 2],
    pub preview: String,
}

/// Every artifact, reduced to what the browsing sphere needs.
pub fn list_artifacts<S>(state: &AppState<S>) -> Result<Vec<ArtifactInfo>, String> {
    let catalog = state.catalog.lock().map_err(|e| e.to_string())?;
    Ok(catalog
        .iter()
        .map(|a| ArtifactInfo {
            id: a.id.clone(),
            region: a.region.clone(),
            period: a.period.clone(),
            coordinates: [a.globe_coordinates.x, a.globe_coordinates.y],
            preview: a.assets.image_url.clone(),
        })
        .collect())
}

/// "Find similar" demo: the curated matches, topped up at random.
pub fn find_similar<S>(state: &AppState<S>) -> Result<Vec<Artifact>, String> {
    let catalog = state.catalog.lock().map_err(|e| e.to_string())?;
    let mut rng = state.rng.lock().map_err(|e| e.to_string())?;
    let found: Vec<Artifact> = selection::find_similar(&catalog, &DEMO_MATCH_IDS, SIMILAR_COUNT, &mut *rng)
        .into_iter()
        .cloned()
        .collect();
    Ok(found)
}

/// Pick a fresh random neck/body/base combination and make it current.
pub fn generate_hybrid<S>(state: &AppState<S>) -> Result<HybridSelection, String> {
    let picked = {
        let catalog = state.catalog.lock().map_err(|e| e.to_string())?;
        let mut rng = state.rng.lock().map_err(|e| e.to_string())?;
        selection::pick_hybrid(&catalog, &mut *rng).ok_or("Catalog has no complete set of fragments")?
    };
    let mut hybrid = state.hybrid.lock().map_err(|e| e.to_string())?;
    *hybrid = Some(picked.clone());
    Ok(picked)
}

/// Align the current hybrid and return its layout.
pub async fn assemble_hybrid<S: RasterSource>(state: &AppState<S>) -> Result<CompositeLayout, String> {
    let current = {
        let hybrid = state.hybrid.lock().map_err(|e| e.to_string())?;
        hybrid.clone().ok_or("No hybrid selected")?
    };
    Ok(state.session.assemble(&current).await.layout)
}

/// Current assembly-station state for rendering.
pub fn composite_frame<S: RasterSource>(state: &AppState<S>) -> CompositeFrame {
    state.session.frame()
}
