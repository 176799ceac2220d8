use crate::app::App;
use crate::suggest::panel::RenderedCandidate;
use crate::ui::utils::{candidate_boxes, hex_to_rgb, regions, render_footer, render_header};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use textwrap::Options;

pub fn draw(f: &mut Frame, app: &App) {
    render_header(f, app);

    let regions = regions(f.area(), app);
    draw_field(f, app, regions.field);

    let panel = &app.session.panel;
    for (index, rect) in candidate_boxes(f.area(), app) {
        if let Some(candidate) = panel.candidate(index) {
            draw_candidate(f, app, candidate, rect);
        }
    }

    if panel.no_suggestions() {
        f.render_widget(
            Paragraph::new("no suggestions")
                .alignment(Alignment::Center)
                .style(Style::default().fg(hex_to_rgb(&app.theme.error))),
            regions.indicator,
        );
    }

    render_footer(f, app);
}

/// Wraps the field text for a given inner width, keeping explicit newlines.
pub fn field_lines(input: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1));
    let mut lines: Vec<String> = textwrap::wrap(input, options)
        .into_iter()
        .map(|c| c.into_owned())
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn draw_field(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.context_key()))
        .style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // one column is reserved for the caret
    let width = inner.width.saturating_sub(1) as usize;
    let mut lines = field_lines(&app.input, width);

    // wrapping trims trailing blanks, the caret should still sit after them
    if app.input.ends_with(' ') {
        if let Some(last) = lines.last_mut() {
            let trailing = app.input.len() - app.input.trim_end_matches(' ').len();
            last.push_str(&" ".repeat(trailing));
        }
    }

    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let last_idx = lines.len() - 1;

    let text_style = Style::default().fg(hex_to_rgb(&app.theme.text));
    let caret_style = Style::default().bg(hex_to_rgb(&app.theme.caret));

    let rendered: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(skip)
        .map(|(i, line)| {
            let mut spans = vec![Span::styled(line, text_style)];
            if i == last_idx {
                spans.push(Span::styled(" ", caret_style));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(rendered), inner);
}

fn draw_candidate(f: &mut Frame, app: &App, candidate: &RenderedCandidate, rect: Rect) {
    let border_color = if candidate.is_primary() {
        hex_to_rgb(&app.theme.main)
    } else {
        hex_to_rgb(&app.theme.sub_alt)
    };

    // display text is the word followed by its shortcut label, if any
    let (word, label) = candidate
        .display_text
        .split_at(candidate.insert_value.len().min(candidate.display_text.len()));
    let spans = vec![
        Span::styled(
            word.to_string(),
            Style::default()
                .fg(hex_to_rgb(&app.theme.text))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            label.to_string(),
            Style::default().fg(hex_to_rgb(&app.theme.sub)),
        ),
    ];

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(border_color)),
        );
    f.render_widget(widget, rect);
}
