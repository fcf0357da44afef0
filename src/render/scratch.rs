use tracing::debug;

use crate::core::Viewport;
use crate::render::bar_geometry::BarRect;
use crate::render::legend::LegendRun;
use crate::render::pie_geometry::SliceArc;

/// Reusable geometry buffers for one rendering pass.
///
/// Owned by exactly one engine and lent to the projection functions by
/// `&mut`; every pass clears before filling, so capacity survives
/// across frames while contents never leak between them.
#[derive(Debug, Default)]
pub struct RenderScratch {
    pub rects: Vec<BarRect>,
    pub arcs: Vec<SliceArc>,
    pub runs: Vec<LegendRun>,
}

impl RenderScratch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.arcs.clear();
        self.runs.clear();
    }
}

/// Size-tracked handle for the off-screen target pie slices are composed
/// into before being blitted.
///
/// Any size change invalidates the surface; a zero-sized surface is never
/// usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffscreenSurface {
    width: u32,
    height: u32,
    generation: u64,
    valid: bool,
}

impl OffscreenSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches the surface to `viewport`, returning whether it can be
    /// drawn into.
    pub fn ensure_size(&mut self, viewport: Viewport) -> bool {
        if viewport.width != self.width || viewport.height != self.height {
            self.width = viewport.width;
            self.height = viewport.height;
            self.generation += 1;
            self.valid = false;
            debug!(
                width = viewport.width,
                height = viewport.height,
                generation = self.generation,
                "offscreen surface resized"
            );
        }
        if !self.valid && viewport.is_valid() {
            self.valid = true;
        }
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bumped on every reallocation; lets backends drop cached pixels.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
