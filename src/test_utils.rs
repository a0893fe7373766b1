pub mod test_helpers {
    use crate::event_source::SimulatedEventSource;
    use crate::geometry::{PageDimensions, ViewportRect};
    use crate::session::SessionEvent;
    use ratatui::buffer::Buffer;

    /// Builder for creating test scenarios with simulated host events
    #[derive(Default)]
    pub struct TestScenarioBuilder {
        events: Vec<SessionEvent>,
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        /// Report a viewport measurement at the origin
        pub fn layout(mut self, width: f64, height: f64) -> Self {
            self.events.push(SessionEvent::LayoutChanged(ViewportRect::new(
                0.0, 0.0, width, height,
            )));
            self
        }

        /// Report a loaded document whose first page has the given size
        pub fn load_page(mut self, width: f64, height: f64) -> Self {
            self.events.push(SessionEvent::PageLoaded {
                page_count: 1,
                source: None,
                dimensions: PageDimensions::new(width, height),
            });
            self
        }

        pub fn change_page(mut self, page: usize, page_count: usize) -> Self {
            self.events.push(SessionEvent::PageChanged {
                page,
                page_count,
                dimensions: None,
            });
            self
        }

        /// Press at `from`, move through each of `path`, release at the last point
        pub fn drag(mut self, from: (f64, f64), path: &[(f64, f64)]) -> Self {
            self.events.push(SessionEvent::GestureStart {
                x: from.0,
                y: from.1,
            });
            for &(x, y) in path {
                self.events.push(SessionEvent::GestureMove { x, y });
            }
            let end = path.last().copied().unwrap_or(from);
            self.events.push(SessionEvent::GestureEnd {
                x: Some(end.0),
                y: Some(end.1),
            });
            self
        }

        pub fn save(mut self) -> Self {
            self.events.push(SessionEvent::Save);
            self
        }

        pub fn events(&self) -> &[SessionEvent] {
            &self.events
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Capture a buffer as text, trailing whitespace trimmed per line
    pub fn buffer_to_string(buffer: &Buffer) -> String {
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(buffer.area.x + x, buffer.area.y + y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }
}
