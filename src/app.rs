// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède la Session (données), et ajoute l'état d'UI
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Garantit la cohérence de l'état
// ============================================================================

use std::path::Path;

use tracing::{error, info};

use crate::session::Session;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : feuilles, métriques, graphique et tableau
    Dashboard,

    /// Mode saisie : chemin du classeur à ouvrir
    /// CONCEPT : Modal input mode (Vim-like)
    /// - Capture les touches pour construire un buffer
    /// - Enter valide, ESC annule
    InputMode,
}

/// Niveau d'un message de statut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Message affiché dans la barre de statut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Nombre de lignes sautées par PgUp / PgDn dans le tableau
pub const TABLE_PAGE: usize = 10;

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Données de la session : classeur ouvert, feuille choisie, calcul courant
    pub session: Session,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Buffer de saisie pour le mode Input
    pub input_buffer: String,

    /// Prompt affiché en mode Input (ex: "Open workbook: ")
    pub input_prompt: String,

    /// Dernier message de statut (chargement, avertissement, erreur)
    pub status: Option<StatusMessage>,

    /// Première ligne visible du tableau de données
    pub table_offset: usize,
}

impl App {
    /// Crée une nouvelle instance de App sans classeur
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }

    /// Crée une App avec une session préparée (classeur passé en argument)
    pub fn with_session(session: Session) -> Self {
        let mut app = Self {
            running: true,
            session,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            input_buffer: String::new(),
            input_prompt: String::new(),
            status: None,
            table_offset: 0,
        };
        app.refresh_workbook_status();
        app
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Rien à animer pour l'instant : tout est recalculé sur événement.
    pub fn tick(&mut self) {}

    // ========================================================================
    // Sélection de la feuille
    // ========================================================================

    /// Sélectionne la feuille précédente
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() : ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        let current = self.session.selected_index().unwrap_or(0);
        self.select_sheet(current.saturating_sub(1));
    }

    /// Sélectionne la feuille suivante
    pub fn navigate_down(&mut self) {
        let max_index = self.session.sheet_names().len().saturating_sub(1);
        let next = self
            .session
            .selected_index()
            .map(|i| (i + 1).min(max_index))
            .unwrap_or(0);
        self.select_sheet(next);
    }

    /// Change de feuille (recalcule uniquement si la sélection change)
    fn select_sheet(&mut self, index: usize) {
        if self.session.selected_index() == Some(index) {
            return;
        }

        if self.session.select_index(index) {
            self.table_offset = 0;
            if let Some(name) = self.session.selected_sheet() {
                info!(sheet = %name, "User selected sheet");
            }
        }
    }

    // ========================================================================
    // Ouverture d'un classeur
    // ========================================================================

    /// Ouvre un classeur et met à jour le statut
    ///
    /// CONCEPT : Erreur non fatale
    /// - Un fichier illisible n'arrête pas l'application
    /// - Le message est affiché, l'ancienne session reste active
    pub fn open_workbook(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.session.open(path) {
            Ok(()) => {
                self.table_offset = 0;
                self.refresh_workbook_status();
            }
            Err(e) => {
                error!(error = %e, "Failed to open workbook");
                self.status = Some(StatusMessage::new(StatusLevel::Error, e.to_string()));
            }
        }
    }

    /// Statut après chargement : avertissements ou confirmation
    fn refresh_workbook_status(&mut self) {
        let Some(workbook) = self.session.workbook() else {
            return;
        };

        self.status = Some(if workbook.warnings.is_empty() {
            StatusMessage::new(
                StatusLevel::Info,
                format!(
                    "Loaded {} ({} sheets)",
                    workbook.file_name(),
                    workbook.usable_sheet_names().len()
                ),
            )
        } else {
            StatusMessage::new(StatusLevel::Warning, workbook.warnings.join(" | "))
        });
    }

    // ========================================================================
    // Défilement du tableau
    // ========================================================================

    /// Nombre de lignes de la série affichée
    fn table_len(&self) -> usize {
        self.session
            .current()
            .map(|result| result.series.len())
            .unwrap_or(0)
    }

    pub fn scroll_table_down(&mut self, lines: usize) {
        let max_offset = self.table_len().saturating_sub(1);
        self.table_offset = (self.table_offset + lines).min(max_offset);
    }

    pub fn scroll_table_up(&mut self, lines: usize) {
        self.table_offset = self.table_offset.saturating_sub(lines);
    }

    pub fn scroll_table_top(&mut self) {
        self.table_offset = 0;
    }

    pub fn scroll_table_bottom(&mut self) {
        self.table_offset = self.table_len().saturating_sub(1);
    }

    // ========================================================================
    // Confirmation de sortie
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode input avec un prompt donné
    pub fn start_input(&mut self, prompt: String) {
        self.current_screen = Screen::InputMode;
        self.input_buffer.clear();
        self.input_prompt = prompt;
    }

    /// Annule le mode input et retourne au dashboard
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Récupère la valeur saisie et retourne au dashboard
    ///
    /// CONCEPT RUST : std::mem::take
    /// - Prend le contenu du buffer et laisse une String vide à la place
    pub fn submit_input(&mut self) -> String {
        self.current_screen = Screen::Dashboard;
        self.input_prompt.clear();
        std::mem::take(&mut self.input_buffer)
    }

    /// Ajoute un caractère au buffer d'input
    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    /// Supprime le dernier caractère du buffer
    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Vérifie si on est en mode input
    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    /// Vérifie si on est sur le dashboard
    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, Row, SheetTable, WorkbookData};
    use std::path::PathBuf;

    fn sheet(name: &str, days: u32) -> SheetTable {
        let rows = (1..=days)
            .map(|day| {
                Row::from_pairs(
                    day as usize + 1,
                    [
                        ("date", CellValue::Text(format!("2024-01-{:02}", day))),
                        ("price", CellValue::Number(100.0 + day as f64)),
                    ],
                )
            })
            .collect();
        SheetTable::new(name.to_string(), vec!["date".into(), "price".into()], rows)
    }

    fn app_with_sheets() -> App {
        let mut session = Session::new();
        session.set_workbook(WorkbookData::from_sheets(
            PathBuf::from("stocks.xlsx"),
            vec![sheet("AAPL", 20), sheet("TSLA", 3), sheet("MSFT", 5)],
        ));
        App::with_session(session)
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.session.sheet_names().is_empty());
        assert!(app.status.is_none());
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_navigation_changes_selected_sheet() {
        let mut app = app_with_sheets();
        assert_eq!(app.session.selected_sheet(), Some("AAPL"));

        app.navigate_down();
        assert_eq!(app.session.selected_sheet(), Some("TSLA"));

        app.navigate_down();
        app.navigate_down(); // Reste sur la dernière
        assert_eq!(app.session.selected_sheet(), Some("MSFT"));

        app.navigate_up();
        app.navigate_up();
        app.navigate_up(); // Reste sur la première
        assert_eq!(app.session.selected_sheet(), Some("AAPL"));
    }

    #[test]
    fn test_table_scroll_is_bounded() {
        let mut app = app_with_sheets();

        app.scroll_table_down(TABLE_PAGE);
        assert_eq!(app.table_offset, 10);
        app.scroll_table_down(TABLE_PAGE);
        assert_eq!(app.table_offset, 19);
        app.scroll_table_up(5);
        assert_eq!(app.table_offset, 14);
        app.scroll_table_top();
        assert_eq!(app.table_offset, 0);
        app.scroll_table_bottom();
        assert_eq!(app.table_offset, 19);

        // Changer de feuille remet le tableau en haut
        app.navigate_down();
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn test_input_mode() {
        let mut app = App::new();
        app.start_input("Open workbook: ".to_string());
        assert!(app.is_in_input_mode());

        for c in "a.xlsx".chars() {
            app.append_char(c);
        }
        app.backspace();
        assert_eq!(app.submit_input(), "a.xls");
        assert!(app.is_on_dashboard());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_open_missing_workbook_sets_error_status() {
        let mut app = app_with_sheets();
        app.open_workbook("/no/such/file.xlsx");

        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(app.session.selected_sheet(), Some("AAPL"));
    }

    #[test]
    fn test_loaded_status() {
        let app = app_with_sheets();
        assert_eq!(
            app.status,
            Some(StatusMessage::new(StatusLevel::Info, "Loaded stocks.xlsx (3 sheets)"))
        );
    }
}
