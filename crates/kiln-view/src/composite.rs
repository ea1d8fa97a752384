use serde::{Deserialize, Serialize};

use kiln_align::AlignmentResult;
use kiln_core::{FragmentKind, HybridSelection};

/// Fixed sizing of the assembly station, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Canonical display width of the middle fragment.
    pub body_width: f64,
    /// Vertical overlap between the top and middle fragments.
    pub top_seam_overlap: f64,
    /// Vertical overlap between the middle and bottom fragments.
    pub bottom_seam_overlap: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            body_width: 224.0,
            top_seam_overlap: 16.0,
            bottom_seam_overlap: 24.0,
        }
    }
}

/// One fragment of the composite, positioned for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecePlacement {
    pub kind: FragmentKind,
    pub artifact_id: String,
    pub locator: String,
    pub region: String,
    pub period: Option<String>,
    pub display_width: f64,
    /// How far this piece is pulled up under the piece above it.
    pub overlap_above: f64,
    /// Stacking order; the top fragment is drawn over the others.
    pub z_index: u8,
}

/// The stacked composite: top, middle, bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeLayout {
    pub pieces: Vec<PiecePlacement>,
    pub alignment: AlignmentResult,
    /// Era labels of the three source artifacts, in stacking order.
    pub caption: Vec<String>,
}

impl CompositeLayout {
    pub fn from_alignment(
        selection: &HybridSelection,
        alignment: AlignmentResult,
        settings: &LayoutSettings,
    ) -> Self {
        let width = settings.body_width;
        let pieces = vec![
            placement(selection, FragmentKind::Neck, width * alignment.top_scale, 0.0, 30),
            placement(selection, FragmentKind::Body, width, settings.top_seam_overlap, 20),
            placement(
                selection,
                FragmentKind::Base,
                width * alignment.base_scale,
                settings.bottom_seam_overlap,
                10,
            ),
        ];
        let caption = pieces
            .iter()
            .map(|p| p.period.clone().unwrap_or_else(|| "Unknown".to_string()))
            .collect();

        Self {
            pieces,
            alignment,
            caption,
        }
    }

    pub fn piece(&self, kind: FragmentKind) -> Option<&PiecePlacement> {
        self.pieces.iter().find(|p| p.kind == kind)
    }

    /// Total stacked height given each piece's rendered height.
    pub fn stacked_height(&self, heights: [f64; 3]) -> f64 {
        let overlap: f64 = self.pieces.iter().map(|p| p.overlap_above).sum();
        heights.iter().sum::<f64>() - overlap
    }
}

fn placement(
    selection: &HybridSelection,
    kind: FragmentKind,
    display_width: f64,
    overlap_above: f64,
    z_index: u8,
) -> PiecePlacement {
    let artifact = selection.artifact(kind);
    PiecePlacement {
        kind,
        artifact_id: artifact.id.clone(),
        locator: selection.locator(kind).to_string(),
        region: artifact.region.clone(),
        period: artifact.period.clone(),
        display_width,
        overlap_above,
        z_index,
    }
}

/// Complete assembly-station state sent to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFrame {
    pub layout: Option<CompositeLayout>,
    /// Busy indicator: an alignment is in flight.
    pub computing: bool,
}

impl CompositeFrame {
    pub fn empty() -> Self {
        Self {
            layout: None,
            computing: false,
        }
    }
}
