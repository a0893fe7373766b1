pub mod mouse;

pub use mouse::{CellSize, MouseGestureTranslator};
