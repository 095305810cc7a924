// ============================================================================
// Tableau des données brutes (date, prix) de la feuille sélectionnée
// ============================================================================
// CONCEPT RATATUI : Table widget
// - Row / Cell : lignes et cellules
// - widths : largeur de chaque colonne
// - On ne passe que les lignes visibles (défilement par offset)
// ============================================================================

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::PriceSeries;

/// Lignes du tableau : (n°, date, prix, variation vs la veille)
///
/// Séparé du rendu pour être testable sans terminal.
pub fn table_rows(series: &PriceSeries) -> Vec<[String; 4]> {
    let mut previous: Option<f64> = None;

    series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let change = match previous {
                Some(prev) => format!("{:+.2}", point.price - prev),
                None => String::new(),
            };
            previous = Some(point.price);

            [
                (index + 1).to_string(),
                point.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", point.price),
                change,
            ]
        })
        .collect()
}

/// Dessine le tableau à partir de la ligne `offset`
pub fn render_data_table(frame: &mut Frame, series: &PriceSeries, offset: usize, area: Rect) {
    let header = Row::new(["#", "date", "price", "change"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = table_rows(series)
        .into_iter()
        .skip(offset)
        .map(|[index, date, price, change]| {
            let change_style = if change.starts_with('-') {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(Color::DarkGray)),
                Cell::from(date),
                Cell::from(price),
                Cell::from(change).style(change_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(8),
    ];

    let title = format!(
        " Raw Data ({}/{}) ",
        (offset + 1).min(series.len()),
        series.len()
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    );

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::NaiveDate;

    #[test]
    fn test_table_rows() {
        let series = PriceSeries::from_unsorted(
            "AAPL".to_string(),
            vec![
                PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 151.30),
                PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 150.25),
            ],
        );

        let rows = table_rows(&series);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["1", "2024-01-01", "150.25", ""].map(String::from));
        assert_eq!(rows[1], ["2", "2024-01-02", "151.30", "+1.05"].map(String::from));
    }
}
