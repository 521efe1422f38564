use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use skillfolio::app::JokesApp;

use super::{bold_style, boxed_width, centered_rect, content_area, italic_style, title_style};

pub fn render(app: &JokesApp, area: Rect, buf: &mut Buffer) {
    let setup = app.teller.setup_text();
    let punchline = app.teller.punchline_text().unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(content_area(area));

    Paragraph::new(Span::styled("ALEXA, TELL ME A JOKE", title_style()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let card = centered_rect(boxed_width(&[setup, punchline]).max(30), 8, chunks[1]);
    let card_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)])
        .split(card);

    Paragraph::new(Span::styled(setup, bold_style()))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(card_chunks[0], buf);

    Paragraph::new(Span::styled(punchline, bold_style().fg(Color::Green)))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(card_chunks[1], buf);

    if let Some(status) = app.status() {
        Paragraph::new(Span::styled(status, bold_style().fg(Color::Red)))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        "(j) new joke / (p)unchline / (q)uit",
        italic_style(),
    ))
    .render(chunks[3], buf);
}

#[cfg(test)]
mod tests {
    use crate::{ui::render_to_string, App};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use skillfolio::{
        app::JokesApp,
        jokes::{parse_jokes, PLACEHOLDER_PROMPT},
    };

    fn press(app: &mut JokesApp, c: char) {
        app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    #[test]
    fn test_placeholder_before_first_joke() {
        let app = App::Jokes(JokesApp::new(parse_jokes("Why?Because.\n")));
        let rendered = render_to_string(&app, 80, 24);

        assert!(rendered.contains(PLACEHOLDER_PROMPT));
        assert!(!rendered.contains("Because."));
    }

    #[test]
    fn test_punchline_revealed() {
        let mut jokes = JokesApp::new(parse_jokes("What is brown and sticky?A stick.\n"));
        press(&mut jokes, 'j');
        let hidden = render_to_string(&App::Jokes(jokes), 80, 24);
        assert!(hidden.contains("What is brown and sticky?"));
        assert!(!hidden.contains("A stick."));

        let mut jokes = JokesApp::new(parse_jokes("What is brown and sticky?A stick.\n"));
        press(&mut jokes, 'j');
        press(&mut jokes, 'p');
        let shown = render_to_string(&App::Jokes(jokes), 80, 24);
        assert!(shown.contains("A stick."));
    }

    #[test]
    fn test_no_jokes_status() {
        let mut jokes = JokesApp::new(Vec::new());
        press(&mut jokes, 'j');
        let rendered = render_to_string(&App::Jokes(jokes), 80, 24);
        assert!(rendered.contains("No jokes loaded."));
    }
}
