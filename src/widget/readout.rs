use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::geometry::ViewportRect;
use crate::selection::SelectionRegion;
use crate::session::ViewerSession;

/// Info panel showing the viewport size and the current selection
#[derive(Debug, Clone, Copy)]
pub struct SelectionReadout {
    viewport: ViewportRect,
    region: SelectionRegion,
    bordered: bool,
}

impl SelectionReadout {
    pub fn new(viewport: ViewportRect, region: SelectionRegion) -> Self {
        Self {
            viewport,
            region,
            bordered: false,
        }
    }

    pub fn from_session(session: &ViewerSession) -> Self {
        Self::new(session.viewport(), session.region())
    }

    pub fn bordered(mut self) -> Self {
        self.bordered = true;
        self
    }

    fn entries(&self) -> [(&'static str, String); 6] {
        [
            ("PDF Width", format!("{}", self.viewport.width)),
            ("PDF Height", format!("{}", self.viewport.height)),
            ("Selected Area (X)", format!("{:.2}", self.region.x)),
            ("Selected Area (Y)", format!("{:.2}", self.region.y)),
            ("Selected Width", format!("{:.2}", self.region.width)),
            ("Selected Height", format!("{:.2}", self.region.height)),
        ]
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let label_style = Style::default().fg(Color::DarkGray);
        self.entries()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::raw(value),
                ])
            })
            .collect()
    }

    /// Unstyled text, one entry per line
    pub fn text_lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect()
    }
}

impl Widget for SelectionReadout {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut paragraph = Paragraph::new(self.lines());
        if self.bordered {
            paragraph = paragraph.block(Block::default().borders(Borders::ALL).title("Selection"));
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::buffer_to_string;

    #[test]
    fn renders_values_with_two_decimals() {
        let readout = SelectionReadout::new(
            ViewportRect::new(0.0, 0.0, 360.0, 640.5),
            SelectionRegion::new(10.0, 20.126, -40.0, 60.333),
        );
        let area = Rect::new(0, 0, 32, 6);
        let mut buf = Buffer::empty(area);

        readout.render(area, &mut buf);

        assert_eq!(
            buffer_to_string(&buf),
            "PDF Width: 360\n\
             PDF Height: 640.5\n\
             Selected Area (X): 10.00\n\
             Selected Area (Y): 20.13\n\
             Selected Width: -40.00\n\
             Selected Height: 60.33"
        );
    }

    #[test]
    fn text_lines_match_rendered_content() {
        let readout = SelectionReadout::new(
            ViewportRect::new(0.0, 0.0, 300.0, 500.0),
            SelectionRegion::new(0.0, 0.0, 300.0, 1000.0),
        );

        assert_eq!(readout.text_lines()[5], "Selected Height: 1000.00");
    }
}
