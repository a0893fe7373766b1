//! Viewer session state
//!
//! A `ViewerSession` is owned by the host screen and receives every layout,
//! page and gesture event in arrival order. Each event is applied to the
//! geometry tracker and region selector, and the host gets back the effects
//! it must act on.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{GeometryTracker, PageDimensions, ViewportRect};
use crate::selection::{NormalizedRegion, RegionSelector, SelectionRegion};

/// Events reported by the host's layout, renderer and gesture collaborators
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The viewport was measured or re-measured
    LayoutChanged(ViewportRect),
    /// The renderer finished loading a document
    PageLoaded {
        page_count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        dimensions: PageDimensions,
    },
    /// A different page became current
    PageChanged {
        page: usize,
        page_count: usize,
        /// Size of the new page, for renderers that report it per page
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimensions: Option<PageDimensions>,
    },
    GestureStart {
        x: f64,
        y: f64,
    },
    GestureMove {
        x: f64,
        y: f64,
    },
    /// Release; the position is informational only
    GestureEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<f64>,
    },
    GestureCancel,
    /// Save action
    Save,
}

/// Effects the host must act on after an event
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Viewport geometry changed, redraw the overlay
    Redraw,
    /// The selection rectangle changed
    SelectionChanged,
    /// The save action produced a normalized region
    RegionSaved(NormalizedRegion),
}

/// What the renderer told us about the open document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub source: Option<String>,
    /// Page number as reported by the renderer, once a page change was seen
    pub current_page: Option<usize>,
}

/// Selection state of one viewing session
#[derive(Clone, Debug, Default)]
pub struct ViewerSession {
    geometry: GeometryTracker,
    selector: RegionSelector,
    document: Option<DocumentInfo>,
}

impl ViewerSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> &GeometryTracker {
        &self.geometry
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn document(&self) -> Option<&DocumentInfo> {
        self.document.as_ref()
    }

    pub fn viewport(&self) -> ViewportRect {
        self.geometry.viewport()
    }

    pub fn page_dimensions(&self) -> PageDimensions {
        self.geometry.page()
    }

    pub fn region(&self) -> SelectionRegion {
        self.selector.region()
    }

    pub fn current_page(&self) -> Option<usize> {
        self.document.as_ref().and_then(|doc| doc.current_page)
    }

    /// Normalized export of the current region
    pub fn export_normalized(&self) -> Result<NormalizedRegion, GeometryError> {
        self.selector.export_normalized(self.geometry.page())
    }

    /// Apply an event and return resulting effects.
    ///
    /// On error the session is left as it was; the host should drop the
    /// event until a page has loaded.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Vec<Effect>, GeometryError> {
        match event {
            SessionEvent::LayoutChanged(rect) => {
                if self.geometry.viewport() == rect {
                    return Ok(vec![]);
                }
                debug!("Viewport measured: {rect:?}");
                self.geometry.set_viewport_rect(rect);
                Ok(vec![Effect::Redraw])
            }

            SessionEvent::PageLoaded {
                page_count,
                source,
                dimensions,
            } => {
                info!(
                    "Loaded {} ({page_count} pages), page size {}x{}",
                    source.as_deref().unwrap_or("<unnamed>"),
                    dimensions.width,
                    dimensions.height
                );
                self.document = Some(DocumentInfo {
                    page_count,
                    source,
                    current_page: None,
                });
                self.geometry.set_page_dimensions(dimensions);
                self.selector.on_page_changed(dimensions);
                Ok(vec![Effect::SelectionChanged, Effect::Redraw])
            }

            SessionEvent::PageChanged {
                page,
                page_count,
                dimensions,
            } => {
                debug!("Page changed to {page} of {page_count}");
                let doc = self.document.get_or_insert_with(DocumentInfo::default);
                doc.page_count = page_count;
                doc.current_page = Some(page);

                if let Some(dims) = dimensions {
                    self.geometry.set_page_dimensions(dims);
                }
                self.selector.on_page_changed(self.geometry.page());
                Ok(vec![Effect::SelectionChanged, Effect::Redraw])
            }

            SessionEvent::GestureStart { x, y } => {
                self.selector.gesture_start(&self.geometry, x, y)?;
                Ok(vec![Effect::SelectionChanged])
            }

            SessionEvent::GestureMove { x, y } => {
                if self.selector.gesture_move(&self.geometry, x, y)? {
                    Ok(vec![Effect::SelectionChanged])
                } else {
                    Ok(vec![])
                }
            }

            SessionEvent::GestureEnd { x, y } => {
                if let (Some(x), Some(y)) = (x, y) {
                    debug!("Release at: {x} {y}");
                }
                self.selector.gesture_end();
                Ok(vec![])
            }

            SessionEvent::GestureCancel => {
                self.selector.gesture_cancel();
                Ok(vec![])
            }

            SessionEvent::Save => {
                let normalized = self.export_normalized()?;
                Ok(vec![Effect::RegionSaved(normalized)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> ViewerSession {
        let mut session = ViewerSession::new();
        session
            .apply(SessionEvent::LayoutChanged(ViewportRect::new(
                0.0, 0.0, 400.0, 800.0,
            )))
            .unwrap();
        session
            .apply(SessionEvent::PageLoaded {
                page_count: 3,
                source: Some("file:///tmp/example.pdf".to_string()),
                dimensions: PageDimensions::new(400.0, 800.0),
            })
            .unwrap();
        session
    }

    #[test]
    fn layout_change_redraws_only_when_different() {
        let mut session = ViewerSession::new();
        let rect = ViewportRect::new(0.0, 0.0, 360.0, 640.0);

        assert_eq!(
            session.apply(SessionEvent::LayoutChanged(rect)).unwrap(),
            vec![Effect::Redraw]
        );
        assert!(session.apply(SessionEvent::LayoutChanged(rect)).unwrap().is_empty());
        assert_eq!(session.viewport(), rect);
    }

    #[test]
    fn page_load_selects_full_page() {
        let session = loaded_session();

        assert_eq!(session.region(), SelectionRegion::new(0.0, 0.0, 400.0, 800.0));
        let doc = session.document().unwrap();
        assert_eq!(doc.page_count, 3);
        assert_eq!(doc.source.as_deref(), Some("file:///tmp/example.pdf"));
        assert_eq!(doc.current_page, None);
    }

    #[test]
    fn page_change_resets_selection_and_tracks_page() {
        let mut session = loaded_session();
        session
            .apply(SessionEvent::GestureStart { x: 10.0, y: 20.0 })
            .unwrap();
        session
            .apply(SessionEvent::GestureMove { x: 50.0, y: 80.0 })
            .unwrap();

        let effects = session
            .apply(SessionEvent::PageChanged {
                page: 2,
                page_count: 3,
                dimensions: None,
            })
            .unwrap();

        assert_eq!(effects, vec![Effect::SelectionChanged, Effect::Redraw]);
        assert_eq!(session.region(), SelectionRegion::new(0.0, 0.0, 400.0, 800.0));
        assert_eq!(session.current_page(), Some(2));
    }

    #[test]
    fn page_change_with_new_size_updates_geometry() {
        let mut session = loaded_session();
        session
            .apply(SessionEvent::PageChanged {
                page: 2,
                page_count: 3,
                dimensions: Some(PageDimensions::new(800.0, 400.0)),
            })
            .unwrap();

        assert_eq!(session.page_dimensions(), PageDimensions::new(800.0, 400.0));
        assert_eq!(session.region(), SelectionRegion::new(0.0, 0.0, 800.0, 400.0));
    }

    #[test]
    fn gesture_then_save_reports_normalized_region() {
        let mut session = loaded_session();
        session
            .apply(SessionEvent::GestureStart { x: 100.0, y: 200.0 })
            .unwrap();
        session
            .apply(SessionEvent::GestureMove { x: 300.0, y: 600.0 })
            .unwrap();
        session
            .apply(SessionEvent::GestureEnd {
                x: Some(300.0),
                y: Some(600.0),
            })
            .unwrap();

        let effects = session.apply(SessionEvent::Save).unwrap();
        assert_eq!(
            effects,
            vec![Effect::RegionSaved(NormalizedRegion {
                x: 0.25,
                y: 0.25,
                width: 0.5,
                height: 0.5,
            })]
        );
    }

    #[test]
    fn stray_move_produces_no_effect() {
        let mut session = loaded_session();
        assert!(session
            .apply(SessionEvent::GestureMove { x: 1.0, y: 1.0 })
            .unwrap()
            .is_empty());
    }

    #[test]
    fn events_before_page_load_are_rejected() {
        let mut session = ViewerSession::new();

        assert!(matches!(
            session.apply(SessionEvent::GestureStart { x: 1.0, y: 1.0 }),
            Err(GeometryError::UndefinedGeometry { .. })
        ));
        assert!(matches!(
            session.apply(SessionEvent::Save),
            Err(GeometryError::UndefinedGeometry { .. })
        ));
        assert_eq!(session.region(), SelectionRegion::default());
        assert!(!session.selector().is_dragging());
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let layout: SessionEvent = serde_json::from_str(
            r#"{"event":"layout_changed","x":0,"y":12,"width":300,"height":500}"#,
        )
        .unwrap();
        assert_eq!(
            layout,
            SessionEvent::LayoutChanged(ViewportRect::new(0.0, 12.0, 300.0, 500.0))
        );

        let end: SessionEvent = serde_json::from_str(r#"{"event":"gesture_end"}"#).unwrap();
        assert_eq!(end, SessionEvent::GestureEnd { x: None, y: None });

        let save: SessionEvent = serde_json::from_str(r#"{"event":"save"}"#).unwrap();
        assert_eq!(save, SessionEvent::Save);
    }
}
