use ratatui::style::Color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use crate::app::App;
use crate::models::AppState;
use crate::suggest::casing::CasingMode;
use crate::suggest::panel::PRIMARY_SLOTS;

/// Overflow candidates per row.
pub const SECONDARY_COLUMNS: usize = 6;
pub const CANDIDATE_HEIGHT: u16 = 3;

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

/// Screen regions of the editor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub field: Rect,
    pub primary: Rect,
    pub secondary: Rect,
    pub indicator: Rect,
}

pub fn secondary_rows(app: &App) -> u16 {
    let panel = &app.session.panel;
    if !panel.overflow_visible() {
        return 0;
    }
    panel.secondary().len().div_ceil(SECONDARY_COLUMNS) as u16
}

pub fn regions(area: Rect, app: &App) -> Regions {
    let main_area = Rect::new(
        0,
        2,
        area.width,
        area.height.saturating_sub(3),
    );

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(80),
            Constraint::Fill(1),
        ])
        .split(main_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(CANDIDATE_HEIGHT),
            Constraint::Length(secondary_rows(app) * CANDIDATE_HEIGHT),
            Constraint::Length(1),
        ])
        .split(horizontal_layout[1]);

    Regions {
        field: chunks[0],
        primary: chunks[1],
        secondary: chunks[2],
        indicator: chunks[3],
    }
}

/// Boxes for the rendered candidates, paired with their indices.
pub fn candidate_boxes(area: Rect, app: &App) -> Vec<(usize, Rect)> {
    let regions = regions(area, app);
    let panel = &app.session.panel;
    let mut boxes = Vec::with_capacity(panel.len());

    let primary_width = regions.primary.width / PRIMARY_SLOTS as u16;
    for candidate in panel.primary() {
        let x = regions.primary.x + candidate.index as u16 * primary_width;
        boxes.push((
            candidate.index,
            Rect::new(x, regions.primary.y, primary_width, CANDIDATE_HEIGHT).intersection(regions.primary),
        ));
    }

    if panel.overflow_visible() {
        let secondary_width = regions.secondary.width / SECONDARY_COLUMNS as u16;
        for (slot, candidate) in panel.secondary().iter().enumerate() {
            let col = (slot % SECONDARY_COLUMNS) as u16;
            let row = (slot / SECONDARY_COLUMNS) as u16;
            let rect = Rect::new(
                regions.secondary.x + col * secondary_width,
                regions.secondary.y + row * CANDIDATE_HEIGHT,
                secondary_width,
                CANDIDATE_HEIGHT,
            );
            boxes.push((candidate.index, rect.intersection(regions.secondary)));
        }
    }

    boxes
}

/// Index of the candidate under a mouse click, if any.
pub fn candidate_at(area: Rect, app: &App, column: u16, row: u16) -> Option<usize> {
    candidate_boxes(area, app)
        .into_iter()
        .find(|(_, rect)| rect.width > 0 && rect.height > 0 && rect.contains((column, row).into()))
        .map(|(index, _)| index)
}

pub fn render_header(f: &mut Frame, app: &App) {
    let mut header_spans = Vec::new();
    let sub = Style::default().fg(hex_to_rgb(&app.theme.sub));
    let main = Style::default().fg(hex_to_rgb(&app.theme.main));

    header_spans.push(Span::styled(
        "nextword",
        main.add_modifier(Modifier::BOLD),
    ));
    header_spans.push(Span::styled(" | author: ", sub));
    header_spans.push(Span::styled(app.context_key().to_string(), main));

    let casing = &app.session.casing;
    if casing.shift_active() {
        header_spans.push(Span::styled(" | SHIFT", main));
    }
    if casing.caps_active() {
        header_spans.push(Span::styled(" | CAPS", main));
    }
    let casing_mode = match casing.mode() {
        CasingMode::None => None,
        CasingMode::Shift => Some(" (shift applied)"),
        CasingMode::Caps => Some(" (caps applied)"),
    };
    if let Some(mode) = casing_mode {
        header_spans.push(Span::styled(mode, sub));
    }
    if app.state == AppState::Suggesting && app.pending.is_some() {
        header_spans.push(Span::styled(" | ...", sub));
    }

    let header_row_area = Rect::new(0, 1, f.area().width, 1);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Percentage(82),
            Constraint::Fill(1),
        ])
        .split(header_row_area);

    f.render_widget(Paragraph::new(Line::from(header_spans)), header_layout[1]);
}

pub fn render_footer(f: &mut Frame, app: &App) {
    if f.area().height == 0 {
        return;
    }
    let footer = Paragraph::new(
        "tab/ctrl+2-4: insert | f2: shift | f3: caps | f4: author | esc: quit",
    )
    .style(Style::default().fg(hex_to_rgb(&app.theme.sub_alt)))
    .alignment(Alignment::Center);
    f.render_widget(footer, Rect::new(0, f.area().height - 1, f.area().width, 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_fallback() {
        assert_eq!(hex_to_rgb("#e2b714"), Color::Rgb(0xe2, 0xb7, 0x14));
        assert_eq!(hex_to_rgb("nope"), Color::White);
        // six bytes but not six characters
        assert_eq!(hex_to_rgb("#aéaé"), Color::White);
    }
}
