mod jokes;
mod quiz;
mod students;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl ratatui::widgets::Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self {
            App::Quiz(quiz) => quiz::render(quiz, area, buf),
            App::Jokes(jokes) => jokes::render(jokes, area, buf),
            App::Students(students) => students::render(students, area, buf),
        }
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn title_style() -> Style {
    bold_style().fg(Color::Cyan)
}

fn highlight_style() -> Style {
    bold_style().fg(Color::Black).bg(Color::Yellow)
}

/// Widest line in display columns, plus room for a border and padding
fn boxed_width(lines: &[&str]) -> u16 {
    let widest = lines.iter().map(|l| l.width()).max().unwrap_or_default();
    u16::try_from(widest + 4).unwrap_or(u16::MAX)
}

/// A `width` x `height` rect centred inside `area`, clamped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

/// Inner area with the standard screen margins
fn content_area(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(0)])
        .split(area)[0]
}

#[cfg(test)]
pub(crate) fn render_to_string(app: &App, width: u16, height: u16) -> String {
    use ratatui::widgets::Widget;

    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);

    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centred() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(100, 50, area);
        assert_eq!(rect, area);
    }

    #[test]
    fn test_boxed_width_counts_display_columns() {
        assert_eq!(boxed_width(&["abc", "a"]), 7);
        // Wide characters take two columns each
        assert_eq!(boxed_width(&["日本"]), 8);
        assert_eq!(boxed_width(&[]), 4);
    }
}
