// Export modules for use in tests
pub mod error;
pub mod event_source;
pub mod geometry;
pub mod inputs;
pub mod panic_handler;
pub mod replay;
pub mod selection;
pub mod session;
pub mod settings;
pub mod sink;
pub mod widget;

pub mod test_utils;

// Re-export the selection core
pub use error::GeometryError;
pub use geometry::{GeometryTracker, PageDimensions, ViewportRect};
pub use selection::{
    GestureAnchor, GesturePhase, NormalizedRegion, RegionSelector, SelectionRegion,
};
pub use session::{DocumentInfo, Effect, SessionEvent, ViewerSession};
