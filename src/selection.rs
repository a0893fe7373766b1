//! Rectangular region selection over a page
//!
//! A drag gesture anchors at its start point and stretches a signed
//! rectangle to the current pointer position. The region is kept in
//! page-local pixels and only converted to page fractions on export.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{GeometryTracker, PageDimensions};

/// A point where a drag gesture began, in page-local pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureAnchor {
    pub x: f64,
    pub y: f64,
}

/// Selected rectangle in page-local pixels.
///
/// Width and height keep their sign: a drag towards the top-left of the
/// anchor produces negative extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRegion {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering the whole page
    #[must_use]
    pub fn full_page(dims: PageDimensions) -> Self {
        Self::new(0.0, 0.0, dims.width, dims.height)
    }

    /// Same rectangle with non-negative extents, for drawing
    #[must_use]
    pub fn visual_bounds(&self) -> Self {
        let (x0, x1) = min_max(self.x, self.x + self.width);
        let (y0, y1) = min_max(self.y, self.y + self.height);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Selection expressed as fractions of the page size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRegion {
    /// Scale back to page-local pixels
    #[must_use]
    pub fn to_page_pixels(&self, dims: PageDimensions) -> SelectionRegion {
        SelectionRegion::new(
            self.x * dims.width,
            self.y * dims.height,
            self.width * dims.width,
            self.height * dims.height,
        )
    }
}

impl std::fmt::Display for NormalizedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x={:.4} y={:.4} width={:.4} height={:.4}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Gesture lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
}

/// Owns the selection region and updates it from drag gestures
#[derive(Clone, Debug, Default)]
pub struct RegionSelector {
    region: SelectionRegion,
    anchor: Option<GestureAnchor>,
    phase: GesturePhase,
}

impl RegionSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> SelectionRegion {
        self.region
    }

    pub fn anchor(&self) -> Option<GestureAnchor> {
        self.anchor
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Rectangle to draw, with the sign of the stored extents folded away
    pub fn visual_bounds(&self) -> SelectionRegion {
        self.region.visual_bounds()
    }

    /// Begin a drag at a viewport-local point.
    ///
    /// Only the vertical coordinate is clamped to the rendered page.
    pub fn gesture_start(
        &mut self,
        geometry: &GeometryTracker,
        x: f64,
        y: f64,
    ) -> Result<(), GeometryError> {
        let y = geometry.clamp_vertical(y)?;
        let anchor = GestureAnchor { x, y };

        self.anchor = Some(anchor);
        self.region = SelectionRegion::new(anchor.x, anchor.y, 0.0, 0.0);
        self.phase = GesturePhase::Dragging;
        debug!("Gesture start at ({x}, {y})");
        Ok(())
    }

    /// Stretch the region from the anchor to a viewport-local point.
    ///
    /// Returns `Ok(false)` when no gesture is in progress.
    pub fn gesture_move(
        &mut self,
        geometry: &GeometryTracker,
        x: f64,
        y: f64,
    ) -> Result<bool, GeometryError> {
        let Some(anchor) = self.anchor.filter(|_| self.is_dragging()) else {
            return Ok(false);
        };
        let y = geometry.clamp_vertical(y)?;

        self.region = SelectionRegion::new(anchor.x, anchor.y, x - anchor.x, y - anchor.y);
        Ok(true)
    }

    /// Finish the current gesture. The region is kept as-is, signed extents
    /// included.
    pub fn gesture_end(&mut self) {
        if self.is_dragging() {
            debug!("Gesture end with region {:?}", self.region);
        }
        self.phase = GesturePhase::Idle;
        self.anchor = None;
    }

    /// Platform-level cancellation; there is nothing to roll back.
    pub fn gesture_cancel(&mut self) {
        self.gesture_end();
    }

    /// Select the whole of a newly current page.
    ///
    /// An in-progress drag keeps its anchor, so the next move stretches from
    /// the old start point again.
    pub fn on_page_changed(&mut self, dims: PageDimensions) {
        self.region = SelectionRegion::full_page(dims);
    }

    /// Convert the region to page fractions
    pub fn export_normalized(
        &self,
        dims: PageDimensions,
    ) -> Result<NormalizedRegion, GeometryError> {
        if dims.width == 0.0 || dims.height == 0.0 {
            return Err(GeometryError::undefined("export_normalized"));
        }

        Ok(NormalizedRegion {
            x: self.region.x / dims.width,
            y: self.region.y / dims.height,
            width: self.region.width / dims.width,
            height: self.region.height / dims.height,
        })
    }
}
