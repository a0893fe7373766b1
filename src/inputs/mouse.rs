//! Terminal mouse events as selection gestures
//!
//! Converts crossterm left-button mouse events, reported in terminal cells,
//! into gesture events in viewport-local pixels.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::ViewportRect;
use crate::session::SessionEvent;

/// Pixel size of one terminal cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Tracks button state so drags and releases map onto a single gesture
#[derive(Debug)]
pub struct MouseGestureTranslator {
    cell_size: CellSize,
    mouse_down_seen: bool,
}

impl MouseGestureTranslator {
    pub fn new(cell_size: CellSize) -> Self {
        Self {
            cell_size,
            mouse_down_seen: false,
        }
    }

    pub fn set_cell_size(&mut self, cell_size: CellSize) {
        self.cell_size = cell_size;
    }

    /// Map a mouse event onto a gesture event.
    ///
    /// `viewport` is in the same screen pixel space as the terminal, so its
    /// origin is subtracted to get viewport-local coordinates. Returns `None`
    /// for events that are not part of a left-button drag.
    pub fn translate(&mut self, mouse: MouseEvent, viewport: ViewportRect) -> Option<SessionEvent> {
        let (x, y) = self.to_local(mouse.column, mouse.row, viewport);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.mouse_down_seen = true;
                Some(SessionEvent::GestureStart { x, y })
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.mouse_down_seen {
                    Some(SessionEvent::GestureMove { x, y })
                } else {
                    // Down got lost (e.g. focus change), start the drag here
                    self.mouse_down_seen = true;
                    Some(SessionEvent::GestureStart { x, y })
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.mouse_down_seen => {
                self.mouse_down_seen = false;
                Some(SessionEvent::GestureEnd {
                    x: Some(x),
                    y: Some(y),
                })
            }
            _ => None,
        }
    }

    /// Center of the cell, relative to the viewport origin
    fn to_local(&self, column: u16, row: u16, viewport: ViewportRect) -> (f64, f64) {
        let cell_w = f64::from(self.cell_size.width);
        let cell_h = f64::from(self.cell_size.height);
        let x = (f64::from(column) + 0.5) * cell_w - viewport.x;
        let y = (f64::from(row) + 0.5) * cell_h - viewport.y;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn press_drag_release_becomes_gesture() {
        let mut translator = MouseGestureTranslator::new(CellSize::new(10, 20));
        let viewport = ViewportRect::new(0.0, 40.0, 300.0, 500.0);

        assert_eq!(
            translator.translate(mouse(MouseEventKind::Down(MouseButton::Left), 2, 3), viewport),
            Some(SessionEvent::GestureStart { x: 25.0, y: 30.0 })
        );
        assert_eq!(
            translator.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 6, 8), viewport),
            Some(SessionEvent::GestureMove { x: 65.0, y: 130.0 })
        );
        assert_eq!(
            translator.translate(mouse(MouseEventKind::Up(MouseButton::Left), 6, 8), viewport),
            Some(SessionEvent::GestureEnd {
                x: Some(65.0),
                y: Some(130.0),
            })
        );
    }

    #[test]
    fn drag_without_press_starts_gesture() {
        let mut translator = MouseGestureTranslator::new(CellSize::new(8, 16));
        let viewport = ViewportRect::default();

        assert!(matches!(
            translator.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1), viewport),
            Some(SessionEvent::GestureStart { .. })
        ));
        assert!(matches!(
            translator.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 2), viewport),
            Some(SessionEvent::GestureMove { .. })
        ));
    }

    #[test]
    fn other_buttons_and_stray_release_are_ignored() {
        let mut translator = MouseGestureTranslator::new(CellSize::new(8, 16));
        let viewport = ViewportRect::default();

        assert_eq!(
            translator.translate(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), viewport),
            None
        );
        assert_eq!(
            translator.translate(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1), viewport),
            None
        );
        assert_eq!(
            translator.translate(mouse(MouseEventKind::Moved, 1, 1), viewport),
            None
        );
    }
}
