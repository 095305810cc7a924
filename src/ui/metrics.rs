// ============================================================================
// Cartes de métriques : prix actuel, variation totale, variation en %
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::MetricsSnapshot;

/// Dessine les trois cartes côte à côte
pub fn render_metrics(frame: &mut Frame, metrics: &MetricsSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let trend = if metrics.is_positive() {
        Color::Green
    } else {
        Color::Red
    };

    // Pas de variation calculable : gris plutôt que vert/rouge
    let percent_color = if metrics.percent_change.is_some() {
        trend
    } else {
        Color::Gray
    };

    render_card(frame, "Current Price", metrics.current_price_label(), Color::White, chunks[0]);
    render_card(frame, "Total Change", metrics.absolute_change_label(), trend, chunks[1]);
    render_card(
        frame,
        "Percentage Change",
        metrics.percent_change_label(),
        percent_color,
        chunks[2],
    );
}

fn render_card(frame: &mut Frame, title: &str, value: String, color: Color, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
