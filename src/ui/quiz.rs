use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use skillfolio::{
    app::{quiz_app::START_ITEMS, Feedback, QuizApp, QuizScreen},
    quiz::{Difficulty, QuizResult, Rank, ROUNDS_PER_QUIZ},
};

use super::{bold_style, centered_rect, content_area, highlight_style, italic_style, title_style};

pub fn render(app: &QuizApp, area: Rect, buf: &mut Buffer) {
    match app.screen {
        QuizScreen::Start { selected } => render_menu(
            "ULTIMATE MATHS QUIZ",
            &START_ITEMS,
            selected,
            "(↑/↓) move / (enter) choose / (s)tart / (h)ow to play / (q)uit",
            area,
            buf,
        ),
        QuizScreen::Instructions => render_instructions(app, area, buf),
        QuizScreen::DifficultyMenu { selected } => {
            let items = Difficulty::ALL.map(|d| d.to_string());
            let items = items.iter().map(String::as_str).collect::<Vec<_>>();
            render_menu(
                "SELECT DIFFICULTY",
                &items,
                selected,
                "(↑/↓) move / (enter) or (1-3) choose / (esc) back",
                area,
                buf,
            )
        }
        QuizScreen::Question => render_question(app, area, buf),
        QuizScreen::Results => {
            if let Some(result) = app.result() {
                render_results(&result, area, buf);
            }
        }
    }
}

fn render_menu(title: &str, items: &[&str], selected: usize, legend: &str, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![Line::from(Span::styled(title, title_style())), Line::default()];
    lines.extend(items.iter().enumerate().map(|(idx, item)| {
        let style = if idx == selected {
            highlight_style()
        } else {
            bold_style()
        };
        Line::from(Span::styled(format!("  {}. {item}  ", idx + 1), style))
    }));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(legend, italic_style())));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered_rect(area.width, height, content_area(area)), buf);
}

fn render_instructions(app: &QuizApp, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(content_area(area));

    Paragraph::new(Span::styled("HOW TO PLAY", title_style()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(app.instructions())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .render(chunks[1], buf);

    Paragraph::new(Span::styled("(esc) back", italic_style())).render(chunks[2], buf);
}

fn render_question(app: &QuizApp, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.session() else {
        return;
    };
    let round = session.round();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(content_area(area));

    let header = Line::from(vec![
        Span::styled(
            format!("Question {}/{ROUNDS_PER_QUIZ}", session.current_round()),
            title_style(),
        ),
        Span::raw("   "),
        Span::styled(session.difficulty().to_string(), italic_style()),
    ]);
    Paragraph::new(header)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let problem = Paragraph::new(Span::styled(session.problem().to_string(), bold_style()))
        .alignment(Alignment::Center);
    let problem_area = centered_rect(chunks[1].width, 1, chunks[1]);
    problem.render(problem_area, buf);

    let remaining = round.seconds_remaining();
    let timer_style = if remaining <= 5 {
        bold_style().fg(Color::Red)
    } else {
        bold_style()
    };
    Paragraph::new(Line::from(vec![
        Span::raw(format!("> {}", app.input())),
        Span::styled("_", italic_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Attempt {}/2 ", round.attempt_number()))
            .title_bottom(Line::from(Span::styled(format!(" {remaining}s left "), timer_style)).right_aligned()),
    )
    .render(centered_rect(30, 3, chunks[2]), buf);

    if let Some(feedback) = app.feedback() {
        Paragraph::new(Span::styled(feedback.message(), feedback_style(feedback)))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }

    Paragraph::new(Span::styled(
        format!(
            "Score: {}   Correct: {}   Wrong: {}",
            session.score(),
            session.correct_count(),
            session.wrong_count()
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    Paragraph::new(Span::styled("(enter) submit / (esc) quit quiz", italic_style())).render(chunks[5], buf);
}

fn render_results(result: &QuizResult, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("QUIZ COMPLETE", title_style())),
        Line::default(),
        Line::from(Span::styled(format!("Score: {}/100", result.score), bold_style())),
        Line::from(format!(
            "Correct: {}   Wrong: {}",
            result.correct_count, result.wrong_count
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Rank: ", bold_style()),
            Span::styled(result.rank.to_string(), rank_style(result.rank)),
        ]),
        Line::default(),
        Line::from(Span::styled("(p)lay again / (q)uit", italic_style())),
    ];

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered_rect(area.width, height, content_area(area)), buf);
}

fn feedback_style(feedback: Feedback) -> Style {
    match feedback {
        Feedback::Correct { .. } => bold_style().fg(Color::Green),
        Feedback::TryAgain => bold_style().fg(Color::Rgb(255, 165, 0)),
        Feedback::WrongAgain | Feedback::TimesUp => bold_style().fg(Color::Red),
    }
}

fn rank_style(rank: Rank) -> Style {
    let color = match rank {
        Rank::APlus => Color::Yellow,
        Rank::A => Color::Cyan,
        Rank::B => Color::Green,
        Rank::C => Color::Rgb(255, 165, 0),
        Rank::D => Color::Red,
    };
    bold_style().fg(color)
}
