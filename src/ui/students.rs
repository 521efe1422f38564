use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use skillfolio::{
    app::{
        students_app::{CodePurpose, FormPurpose, MENU},
        Notice, StudentsApp, StudentsMode,
    },
    students::StudentForm,
};

use super::{bold_style, centered_rect, highlight_style, italic_style, title_style};

const DIALOG_WIDTH: u16 = 44;

pub fn render(app: &StudentsApp, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!(
            "STUDENT MANAGER  ({} records, {})",
            app.store().len(),
            app.store().path().display()
        ),
        title_style(),
    ))
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(MENU, italic_style()))
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    Paragraph::new(app.output())
        .block(Block::default().borders(Borders::ALL))
        .scroll((app.scroll, 0))
        .render(chunks[2], buf);

    if let Some(notice) = app.notice() {
        let (text, color) = match notice {
            Notice::Info(text) => (text, Color::Green),
            Notice::Error(text) => (text, Color::Red),
        };
        Paragraph::new(Span::styled(text.as_str(), bold_style().fg(color))).render(chunks[3], buf);
    }

    match &app.mode {
        StudentsMode::Browse => {}
        StudentsMode::PromptCode { purpose, input } => render_code_prompt(*purpose, input, area, buf),
        StudentsMode::SortChoice => render_sort_choice(area, buf),
        StudentsMode::Form {
            purpose,
            form,
            field,
        } => render_form(*purpose, form, *field, area, buf),
    }
}

fn dialog(title: &str, height: u16, area: Rect, buf: &mut Buffer) -> Rect {
    let rect = centered_rect(DIALOG_WIDTH, height, area);
    Clear.render(rect, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {title} "), title_style()));
    let inner = block.inner(rect);
    block.render(rect, buf);
    inner
}

fn render_code_prompt(purpose: CodePurpose, input: &str, area: Rect, buf: &mut Buffer) {
    let inner = dialog(purpose.title(), 5, area, buf);
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Enter Student Code: "),
            Span::styled(input, bold_style()),
            Span::styled("_", italic_style()),
        ]),
        Line::default(),
        Line::from(Span::styled("(enter) ok / (esc) cancel", italic_style())),
    ])
    .render(inner, buf);
}

fn render_sort_choice(area: Rect, buf: &mut Buffer) {
    let inner = dialog("Sort Records", 5, area, buf);
    Paragraph::new(vec![
        Line::from("Sort by overall percentage:"),
        Line::default(),
        Line::from(Span::styled(
            "(a)scending / (d)escending / (esc) cancel",
            italic_style(),
        )),
    ])
    .render(inner, buf);
}

fn render_form(purpose: FormPurpose, form: &StudentForm, selected: usize, area: Rect, buf: &mut Buffer) {
    let title = match purpose {
        FormPurpose::Add => "Add Student".to_string(),
        FormPurpose::Update(code) => format!("Update Student {code}"),
    };
    let label_width = StudentForm::LABELS
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or_default();

    let mut lines = StudentForm::LABELS
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let value = form.field(idx);
            let value_span = if idx == selected {
                Span::styled(format!("{value}_"), highlight_style())
            } else {
                Span::styled(value.to_string(), bold_style())
            };
            Line::from(vec![Span::raw(format!("{label:>label_width$}: ")), value_span])
        })
        .collect::<Vec<_>>();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(tab) next / (enter) save / (esc) cancel",
        italic_style(),
    )));

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let inner = dialog(&title, height, area, buf);
    Paragraph::new(lines)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}
