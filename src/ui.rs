use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Menu => render_menu(self, area, buf),
            AppState::Practice | AppState::Done => render_practice(self, area, buf),
        }
    }
}

fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let help_style = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled("graven — passage practice", bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let references = app.library.references();
    let window = scroll_window(references.len(), app.selected, chunks[1].height as usize);
    let lines: Vec<Line> = references[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, reference)| {
            let index = window.start + offset;
            if index == app.selected {
                Line::from(Span::styled(
                    format!("> {reference}"),
                    bold_style.fg(Color::Green),
                ))
            } else {
                Line::from(Span::styled(format!("  {reference}"), dim_style))
            }
        })
        .collect();
    Paragraph::new(lines).render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "↑/↓ select · (enter) practice · (r)andom passage · (q)uit",
        help_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

fn render_practice(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(passage) = app.current_passage() else {
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let help_style = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);

    let display = passage.display_text();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut passage_occupied_lines =
        ((display.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if display.width() <= max_chars_per_line as usize {
        passage_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(passage_occupied_lines),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(passage.reference().to_string(), bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let mut spans: Vec<Span> = Vec::new();
    for (i, word) in passage.words().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if word.is_hidden() {
            dim_bold_style
        } else {
            bold_style
        };
        spans.push(Span::styled(word.display_text(), style));
    }
    Paragraph::new(Line::from(spans))
        .alignment(if passage_occupied_lines == 1 {
            // a short passage centered on one line reads best
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let progress = passage.progress();
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(progress.percent_hidden())
        .label(format!("{}% hidden", progress.percent_hidden()))
        .render(chunks[4], buf);

    let status = if app.state == AppState::Done {
        Span::styled(
            format!(
                "complete! {} words hidden in {} rounds · {} hint(s) used",
                progress.total, app.rounds, app.hints_used
            ),
            bold_style.fg(Color::Green),
        )
    } else {
        let pace = match app.difficulty {
            Some(difficulty) => format!("{difficulty} · {} words/round", app.words_per_round),
            None => format!("{} words/round", app.words_per_round),
        };
        Span::styled(
            format!(
                "{}/{} hidden · {} hint(s) · {pace}",
                progress.hidden, progress.total, app.hints_used
            ),
            Style::default().add_modifier(Modifier::DIM),
        )
    };
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    let help = if app.state == AppState::Done {
        "(r)estart · (esc) back to menu"
    } else {
        "(space) hide words · (h)int · (r)estart · (esc) back to menu"
    };
    Paragraph::new(Span::styled(help, help_style))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
}

/// Window of list indices to draw so the selection stays in view.
fn scroll_window(len: usize, selected: usize, height: usize) -> Range<usize> {
    if height == 0 {
        return 0..0;
    }
    if len <= height {
        return 0..len;
    }
    let start = selected.saturating_sub(height / 2).min(len - height);
    start..start + height
}
