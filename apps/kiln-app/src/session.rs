use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use kiln_align::{AlignmentEngine, RasterSource};
use kiln_core::HybridSelection;
use kiln_view::{CompositeFrame, CompositeLayout, LayoutSettings};

/// A composite whose alignment has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComposite {
    /// Position in resolution order, starting at 1.
    pub sequence: u64,
    pub layout: CompositeLayout,
}

#[derive(Debug, Default)]
struct Latest {
    resolved: u64,
    composite: Option<ResolvedComposite>,
}

/// Caller-side wrapper around the alignment engine.
///
/// Requests are never cancelled. Whichever alignment resolves last becomes
/// the current composite, even if it was issued earlier than another one.
pub struct AssemblySession<S> {
    engine: AlignmentEngine<S>,
    layout: LayoutSettings,
    in_flight: AtomicUsize,
    latest: Mutex<Latest>,
}

/// Holds the busy flag up for one request; released on drop, so the flag
/// clears even if the request future is dropped mid-flight.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S: RasterSource> AssemblySession<S> {
    pub fn new(engine: AlignmentEngine<S>, layout: LayoutSettings) -> Self {
        Self {
            engine,
            layout,
            in_flight: AtomicUsize::new(0),
            latest: Mutex::new(Latest::default()),
        }
    }

    pub fn engine(&self) -> &AlignmentEngine<S> {
        &self.engine
    }

    /// True while any alignment is in flight.
    pub fn is_computing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Align `selection` and record the composite as current.
    pub async fn assemble(&self, selection: &HybridSelection) -> ResolvedComposite {
        let _busy = BusyGuard::new(&self.in_flight);
        let refs = selection.fragment_refs();
        let alignment = self.engine.align(&refs.top, &refs.middle, &refs.bottom).await;
        let layout = CompositeLayout::from_alignment(selection, alignment, &self.layout);

        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest.resolved += 1;
        let resolved = ResolvedComposite {
            sequence: latest.resolved,
            layout,
        };
        latest.composite = Some(resolved.clone());
        log::debug!("composite #{} resolved", resolved.sequence);
        resolved
    }

    /// The most recently resolved composite.
    pub fn latest(&self) -> Option<ResolvedComposite> {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest.composite.clone()
    }

    pub fn frame(&self) -> CompositeFrame {
        CompositeFrame {
            layout: self.latest().map(|r| r.layout),
            computing: self.is_computing(),
        }
    }
}
