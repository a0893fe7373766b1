//! Viewport geometry tracking
//!
//! Keeps the measured viewport rectangle and the intrinsic size of the
//! current page, and maps viewport-local vertical coordinates onto the
//! visible extent of the page after it has been scaled to fit the viewport
//! width.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Measured bounds of the surface hosting the rendered page, in screen
/// pixels relative to its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Intrinsic (unscaled) size of a page as reported by the renderer
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A zero width means no page has been loaded yet.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.width > 0.0
    }

    /// Height of the page once scaled to fill `viewport_width`.
    fn scaled_height(&self, viewport_width: f64) -> f64 {
        (self.height / self.width) * viewport_width
    }
}

/// Tracks the viewport and page sizes needed to clamp touch coordinates.
#[derive(Clone, Debug, Default)]
pub struct GeometryTracker {
    viewport: ViewportRect,
    page: PageDimensions,
}

impl GeometryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    pub fn page(&self) -> PageDimensions {
        self.page
    }

    pub fn set_viewport_rect(&mut self, rect: ViewportRect) {
        self.viewport = rect;
    }

    /// Replace the page dimensions.
    ///
    /// Callers holding a selection derived from the full page extent must
    /// reset it afterwards; the tracker does not notify anyone.
    pub fn set_page_dimensions(&mut self, dims: PageDimensions) {
        self.page = dims;
    }

    /// Rendered page height after scaling the page to the viewport width
    pub fn scaled_height(&self) -> Result<f64, GeometryError> {
        self.require_page("scaled_height")?;
        Ok(self.page.scaled_height(self.viewport.width))
    }

    /// Vertical letterboxing offset of the rendered page inside the viewport.
    ///
    /// Negative when the scaled page is taller than the viewport.
    pub fn top_offset(&self) -> Result<f64, GeometryError> {
        self.require_page("top_offset")?;
        Ok(self.offset_for(self.page.scaled_height(self.viewport.width)))
    }

    /// Viewport-local rectangle covered by the rendered page
    pub fn visible_page_bounds(&self) -> Result<ViewportRect, GeometryError> {
        self.require_page("visible_page_bounds")?;
        let scaled = self.page.scaled_height(self.viewport.width);
        Ok(ViewportRect::new(
            0.0,
            self.offset_for(scaled),
            self.viewport.width,
            scaled,
        ))
    }

    /// Clamp a viewport-local vertical coordinate to the rendered page's
    /// vertical extent.
    pub fn clamp_vertical(&self, value: f64) -> Result<f64, GeometryError> {
        self.require_page("clamp_vertical")?;
        let scaled = self.page.scaled_height(self.viewport.width);
        let top = self.offset_for(scaled);
        // max-then-min rather than f64::clamp: a degenerate viewport may
        // invert the bounds and clamp() would panic
        Ok(value.max(top).min(top + scaled))
    }

    fn offset_for(&self, scaled_height: f64) -> f64 {
        (self.viewport.height - scaled_height) / 2.0
    }

    fn require_page(&self, operation: &'static str) -> Result<(), GeometryError> {
        if self.page.is_loaded() {
            Ok(())
        } else {
            Err(GeometryError::undefined(operation))
        }
    }
}
