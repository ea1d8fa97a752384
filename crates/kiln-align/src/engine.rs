use std::fmt;

use crate::calculator::{try_compute_scales, AlignmentResult, InterfaceWidths, NativeWidths};
use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::loader::RasterSource;
use crate::scanner::{measure_interface, Side};

/// Progress of one alignment computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loading,
    Measuring,
    Computing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Loading => "loading",
            Stage::Measuring => "measuring",
            Stage::Computing => "computing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Orchestrates load → measure → compute for one fragment triple.
///
/// The engine holds no per-call state: concurrent `align` calls share only
/// the read-only source and configuration, and every decoded buffer is
/// dropped when its call returns.
#[derive(Debug, Clone)]
pub struct AlignmentEngine<S> {
    source: S,
    config: AlignConfig,
}

impl<S: RasterSource> AlignmentEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, AlignConfig::default())
    }

    pub fn with_config(source: S, config: AlignConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Compute scale factors for stacking `top`, `middle` and `bottom`.
    /// Never fails: any error yields [`AlignmentResult::IDENTITY`].
    pub async fn align(&self, top: &str, middle: &str, bottom: &str) -> AlignmentResult {
        match self.try_align(top, middle, bottom).await {
            Ok(result) => {
                log::info!(
                    "aligned fragments: top scale {:.4}, base scale {:.4}",
                    result.top_scale,
                    result.base_scale
                );
                result
            }
            Err(e) => {
                log::warn!("auto-align failed, using default proportions: {}", e);
                transition(Stage::Done);
                AlignmentResult::IDENTITY
            }
        }
    }

    /// The fallible pipeline behind [`align`](Self::align).
    pub async fn try_align(&self, top: &str, middle: &str, bottom: &str) -> Result<AlignmentResult, AlignError> {
        transition(Stage::Idle);
        log::debug!("aligning '{}' / '{}' / '{}'", top, middle, bottom);
        transition(Stage::Loading);
        let (neck, body, base) = tokio::try_join!(
            self.source.load(top),
            self.source.load(middle),
            self.source.load(bottom),
        )?;

        transition(Stage::Measuring);
        let cfg = &self.config;
        let interfaces = InterfaceWidths {
            neck_bottom: measure_interface(&neck, Side::Bottom, cfg),
            body_top: measure_interface(&body, Side::Top, cfg),
            body_bottom: measure_interface(&body, Side::Bottom, cfg),
            base_top: measure_interface(&base, Side::Top, cfg),
        };
        log::debug!("interface widths: {:?}", interfaces);

        transition(Stage::Computing);
        let widths = NativeWidths {
            neck: neck.width(),
            body: body.width(),
            base: base.width(),
        };
        let result = try_compute_scales(&interfaces, &widths)?;

        transition(Stage::Done);
        Ok(result)
    }
}

fn transition(stage: Stage) {
    log::debug!("alignment stage: {}", stage);
}
