// ============================================================================
// Chart - Historique de prix de la feuille sélectionnée
// ============================================================================
// Affiche un graphique ligne (line chart) date -> prix
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::models::{MetricsSnapshot, PriceSeries};

/// Format des dates sur l'axe X
const AXIS_DATE_FORMAT: &str = "%Y-%m-%d";

/// Bornes de l'axe Y avec une marge de 5%
///
/// CONCEPT : Cas dégénéré
/// - Série plate (min == max) : on ajoute 1.0 de chaque côté
/// - Ne descend pas en dessous de 0 si tous les prix sont positifs
pub fn y_bounds(series: &PriceSeries) -> [f64; 2] {
    let (Some(min_price), Some(max_price)) = (series.min_price(), series.max_price()) else {
        return [0.0, 1.0];
    };

    let margin = if max_price > min_price {
        (max_price - min_price) * 0.05
    } else {
        1.0
    };

    let y_min = if min_price >= 0.0 {
        (min_price - margin).max(0.0)
    } else {
        min_price - margin
    };

    [y_min, max_price + margin]
}

/// Labels de l'axe X : première date, date du milieu, dernière date
pub fn x_labels(series: &PriceSeries) -> Vec<String> {
    let Some((first, last)) = series.date_range() else {
        return Vec::new();
    };

    let middle = first + (last - first) / 2;
    vec![
        first.format(AXIS_DATE_FORMAT).to_string(),
        middle.format(AXIS_DATE_FORMAT).to_string(),
        last.format(AXIS_DATE_FORMAT).to_string(),
    ]
}

/// Dessine le graphique ligne de la série
pub fn render_price_chart(
    frame: &mut Frame,
    series: &PriceSeries,
    metrics: &MetricsSnapshot,
    area: Rect,
) {
    let points = series.chart_points();

    // Vert si hausse sur la période, rouge sinon
    let color = if metrics.is_positive() {
        Color::Green
    } else {
        Color::Red
    };

    let datasets = vec![Dataset::default()
        .name(series.name.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    // Une seule observation : on élargit l'axe pour garder un point visible
    let x_max = points.last().map(|&(x, _)| x).unwrap_or(0.0).max(1.0);

    let x_axis = Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(x_labels(series).into_iter().map(Span::raw).collect());

    let [y_min, y_max] = y_bounds(series);
    let y_axis = Axis::default()
        .title("Price ($)")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("${:.2}", y_min)),
            Span::raw(format!("${:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("${:.2}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" 📈 {} Price History ", series.name)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}
