// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// Disposition :
// ┌──────────────── header ─────────────────┐
// │ feuilles │ métriques (3 cartes)         │
// │          │ graphique                    │
// │          │ tableau des données          │
// └──────────────── footer ─────────────────┘
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones (imbriqué)
// 3. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen, StatusLevel};
use crate::error::SelectionError;
use crate::ui::{chart, metrics, table};

/// Largeur de la colonne des feuilles
const SIDEBAR_WIDTH: u16 = 24;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le dashboard est toujours dessiné
/// - Seul le footer change en mode saisie
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);

    match app.current_screen {
        Screen::Dashboard => render_footer(frame, app, chunks[2]),
        Screen::InputMode => render_input_footer(frame, app, chunks[2]),
    }
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(4), // Footer : raccourcis + statut
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : Titre + fichier ouvert
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazySheet ")
        .title_alignment(Alignment::Center);

    let subtitle = match app.session.workbook() {
        Some(workbook) => Span::styled(
            format!("📂 {}", workbook.path.display()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            "📈 Stock Price Dashboard",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let paragraph = Paragraph::new(Line::from(subtitle))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Body : liste des feuilles + contenu de la feuille choisie
// ============================================================================

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    render_sheet_list(frame, app, columns[0]);
    render_selection(frame, app, columns[1]);
}

/// Liste des feuilles (titres) sélectionnables
fn render_sheet_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Stock ");

    let names = app.session.sheet_names();
    if names.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No sheets",
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let selected = app.session.selected_index();
    let items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if Some(index) == selected {
                ListItem::new(format!("▶ {}", name)).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::REVERSED),
                )
            } else {
                ListItem::new(format!("  {}", name))
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Contenu de la feuille sélectionnée, ou message si indisponible
fn render_selection(frame: &mut Frame, app: &App, area: Rect) {
    let result = match app.session.current() {
        Ok(result) => result,
        Err(error) => {
            render_unavailable(frame, error, area);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Cartes de métriques
            Constraint::Percentage(60),  // Graphique
            Constraint::Min(5),          // Tableau
        ])
        .split(area);

    metrics::render_metrics(frame, &result.metrics, rows[0]);
    chart::render_price_chart(frame, &result.series, &result.metrics, rows[1]);
    table::render_data_table(frame, &result.series, app.table_offset, rows[2]);
}

/// Message quand aucune sélection n'est affichable
///
/// CONCEPT : Invite vs erreur
/// - Pas de fichier / pas de feuille : invite neutre (bleu)
/// - Feuille invalide : erreur visible (rouge)
fn render_unavailable(frame: &mut Frame, error: &SelectionError, area: Rect) {
    let (title, color) = if error.is_prompt() {
        (" ℹ Info ", Color::Blue)
    } else {
        (" ⚠ Error ", Color::Red)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(color))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : Instructions + statut
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |label: &'static str, color: Color| {
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, or any other key to cancel ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            key("[q]", Color::Yellow),
            Span::raw(" Quit  "),
            key("[o]", Color::Green),
            Span::raw(" Open  "),
            key("[↑↓ / j k]", Color::Yellow),
            Span::raw(" Stock  "),
            key("[PgUp PgDn g G]", Color::Yellow),
            Span::raw(" Table"),
        ])
    };

    let status = match &app.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => Color::Gray,
                StatusLevel::Warning => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(status.text.as_str(), Style::default().fg(color)))
        }
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(vec![shortcuts, status])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Footer en mode input : ligne de saisie du chemin
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert pour indiquer mode input

    let input_line = Line::from(vec![
        Span::styled(
            app.input_prompt.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let help_line = Line::from(vec![
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Confirm  "),
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Cancel"),
    ]);

    let paragraph = Paragraph::new(vec![input_line, help_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests de rendu (TestBackend, sans vrai terminal)
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::sheet::{CellValue, Row, SheetTable, WorkbookData};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn buffer_text(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_empty_app_prompts_for_workbook() {
        let text = buffer_text(&App::new());
        assert!(text.contains("LazySheet"));
        assert!(text.contains("no workbook opened yet"));
        assert!(text.contains("No sheets"));
    }

    #[test]
    fn test_render_quit_confirmation() {
        let mut app = App::new();
        app.request_quit();

        let text = buffer_text(&app);
        assert!(text.contains("again to quit, or any other key to cancel"));
    }

    #[test]
    fn test_render_invalid_sheet_shows_error() {
        let rows = vec![Row::from_pairs(
            2,
            [("date", CellValue::Text("2024-01-01".into())), ("price", CellValue::Text("n/a".into()))],
        )];
        let mut session = Session::new();
        session.set_workbook(WorkbookData::from_sheets(
            PathBuf::from("stocks.xlsx"),
            vec![SheetTable::new("BAD".into(), vec!["date".into(), "price".into()], rows)],
        ));

        let text = buffer_text(&App::with_session(session));
        assert!(text.contains("⚠ Error"));
        assert!(text.contains("is not a number"));
    }

    #[test]
    fn test_render_selection_shows_metrics() {
        let rows = vec![
            Row::from_pairs(
                2,
                [("date", CellValue::Text("2024-01-01".into())), ("price", CellValue::Number(150.25))],
            ),
            Row::from_pairs(
                3,
                [("date", CellValue::Text("2024-01-02".into())), ("price", CellValue::Number(151.30))],
            ),
        ];
        let mut session = Session::new();
        session.set_workbook(WorkbookData::from_sheets(
            PathBuf::from("stocks.xlsx"),
            vec![SheetTable::new("AAPL".into(), vec!["date".into(), "price".into()], rows)],
        ));

        let text = buffer_text(&App::with_session(session));
        assert!(text.contains("Current Price"));
        assert!(text.contains("$151.30"));
        assert!(text.contains("Percentage Change"));
        assert!(text.contains("2024-01-02"));
    }
}
