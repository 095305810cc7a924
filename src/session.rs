// ============================================================================
// Session : état des données de l'utilisateur
// ============================================================================
// Le classeur ouvert et la feuille sélectionnée vivent ici, explicitement,
// et sont passés par référence au calcul. Pas d'état global.
//
// Cycle de vie :
// - open()   : remplace le classeur (ou garde l'ancien si la lecture échoue)
// - select() : change de feuille et recalcule
// - chaque recalcul produit une nouvelle série, l'ancienne est jetée
// ============================================================================

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{EmptyInputError, SelectionError, WorkbookError};
use crate::sheet::{SheetMetrics, SheetMetricsComputer, WorkbookData};

/// Calcule la sélection courante d'une session
///
/// CONCEPT RUST : Fonction pure sur une référence
/// - &Session : lecture seule, aucun effet de bord
/// - Peut être rappelée autant de fois que nécessaire (idempotente)
pub fn compute_selection(session: &Session) -> Result<SheetMetrics, SelectionError> {
    let workbook = session.workbook.as_ref().ok_or(EmptyInputError::NoWorkbook)?;

    if workbook.usable_sheet_names().is_empty() {
        return Err(EmptyInputError::NoUsableSheet.into());
    }

    let name = session
        .selected_sheet
        .as_deref()
        .ok_or(EmptyInputError::NoSheetSelected)?;
    let sheet = workbook.sheet(name).ok_or(EmptyInputError::NoSheetSelected)?;

    session
        .computer
        .compute_table(sheet)
        .map_err(|source| SelectionError::DataFormat {
            sheet: name.to_string(),
            source,
        })
}

/// État de session : classeur ouvert + feuille choisie + dernier calcul
#[derive(Debug)]
pub struct Session {
    workbook: Option<WorkbookData>,
    selected_sheet: Option<String>,
    computer: SheetMetricsComputer,
    current: Result<SheetMetrics, SelectionError>,
}

impl Session {
    /// Session vide : aucun fichier ouvert
    pub fn new() -> Self {
        Self {
            workbook: None,
            selected_sheet: None,
            computer: SheetMetricsComputer::new(),
            current: Err(EmptyInputError::NoWorkbook.into()),
        }
    }

    /// Ouvre un classeur depuis le disque
    ///
    /// En cas d'erreur, la session précédente reste intacte.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), WorkbookError> {
        let workbook = WorkbookData::load(path)?;
        self.set_workbook(workbook);
        Ok(())
    }

    /// Installe un classeur déjà chargé et sélectionne la première feuille valide
    pub fn set_workbook(&mut self, workbook: WorkbookData) {
        let first = workbook.usable_sheet_names().first().map(|s| s.to_string());
        info!(file = %workbook.file_name(), first_sheet = ?first, "Workbook opened in session");

        self.workbook = Some(workbook);
        self.selected_sheet = first;
        self.recompute();
    }

    /// Sélectionne une feuille par son nom
    ///
    /// Retourne false si la feuille n'est pas sélectionnable.
    pub fn select(&mut self, name: &str) -> bool {
        if !self.sheet_names().contains(&name) {
            warn!(sheet = %name, "Sheet not selectable");
            return false;
        }

        self.selected_sheet = Some(name.to_string());
        self.recompute();
        true
    }

    /// Sélectionne la feuille à l'index donné dans la liste des feuilles valides
    pub fn select_index(&mut self, index: usize) -> bool {
        let name = match self.sheet_names().get(index) {
            Some(name) => name.to_string(),
            None => return false,
        };
        self.select(&name)
    }

    /// Recalcule la sélection courante
    fn recompute(&mut self) {
        self.current = compute_selection(self);
        match &self.current {
            Ok(result) => debug!(sheet = %result.series.name, points = result.series.len(), "Selection recomputed"),
            Err(e) => debug!(error = %e, "Selection unavailable"),
        }
    }

    /// Résultat du dernier calcul
    pub fn current(&self) -> Result<&SheetMetrics, &SelectionError> {
        self.current.as_ref()
    }

    /// Feuilles sélectionnables du classeur ouvert
    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook
            .as_ref()
            .map(|w| w.usable_sheet_names())
            .unwrap_or_default()
    }

    /// Nom de la feuille sélectionnée
    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    /// Position de la feuille sélectionnée dans sheet_names()
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected_sheet.as_deref()?;
        self.sheet_names().iter().position(|name| *name == selected)
    }

    pub fn workbook(&self) -> Option<&WorkbookData> {
        self.workbook.as_ref()
    }

    /// Avertissements du classeur ouvert
    pub fn warnings(&self) -> &[String] {
        self.workbook
            .as_ref()
            .map(|w| w.warnings.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataFormatError;
    use crate::sheet::{CellValue, Row, SheetTable};
    use std::path::PathBuf;

    fn price_sheet(name: &str, prices: &[(&str, CellValue)]) -> SheetTable {
        let rows = prices
            .iter()
            .enumerate()
            .map(|(i, (date, price))| {
                Row::from_pairs(
                    i + 2,
                    [
                        ("date", CellValue::Text(date.to_string())),
                        ("price", price.clone()),
                    ],
                )
            })
            .collect();
        SheetTable::new(name.to_string(), vec!["date".into(), "price".into()], rows)
    }

    fn workbook() -> WorkbookData {
        WorkbookData::from_sheets(
            PathBuf::from("stocks.xlsx"),
            vec![
                SheetTable::new("README".to_string(), vec!["text".into()], Vec::new()),
                price_sheet(
                    "AAPL",
                    &[("2024-01-01", CellValue::Number(150.25)), ("2024-01-02", CellValue::Number(151.30))],
                ),
                price_sheet("BAD", &[("2024-01-01", CellValue::Text("oops".to_string()))]),
            ],
        )
    }

    #[test]
    fn test_empty_session_prompts_for_workbook() {
        let session = Session::new();
        assert_eq!(
            session.current().unwrap_err(),
            &SelectionError::EmptyInput(EmptyInputError::NoWorkbook)
        );
        assert!(session.sheet_names().is_empty());
    }

    #[test]
    fn test_set_workbook_selects_first_usable_sheet() {
        let mut session = Session::new();
        session.set_workbook(workbook());

        assert_eq!(session.sheet_names(), vec!["AAPL", "BAD"]);
        assert_eq!(session.selected_sheet(), Some("AAPL"));
        assert_eq!(session.selected_index(), Some(0));
        assert_eq!(session.warnings().len(), 1);

        let current = session.current().unwrap();
        assert_eq!(current.metrics.current_price, 151.30);
    }

    #[test]
    fn test_selecting_invalid_sheet_reports_data_format_error() {
        let mut session = Session::new();
        session.set_workbook(workbook());

        assert!(session.select_index(1));
        assert_eq!(
            session.current().unwrap_err(),
            &SelectionError::DataFormat {
                sheet: "BAD".to_string(),
                source: DataFormatError::NonNumericPrice { row: 2, value: "oops".to_string() },
            }
        );

        // Retour sur une feuille valide : le calcul repart de zéro
        assert!(session.select("AAPL"));
        assert!(session.current().is_ok());
    }

    #[test]
    fn test_cannot_select_unknown_or_skipped_sheet() {
        let mut session = Session::new();
        session.set_workbook(workbook());

        assert!(!session.select("README"));
        assert!(!session.select("MSFT"));
        assert!(!session.select_index(5));
        assert_eq!(session.selected_sheet(), Some("AAPL"));
    }

    #[test]
    fn test_workbook_without_usable_sheet() {
        let mut session = Session::new();
        session.set_workbook(WorkbookData::from_sheets(
            PathBuf::from("empty.xlsx"),
            vec![SheetTable::new("Notes".to_string(), vec!["x".into()], Vec::new())],
        ));

        assert_eq!(
            session.current().unwrap_err(),
            &SelectionError::EmptyInput(EmptyInputError::NoUsableSheet)
        );
    }

    #[test]
    fn test_failed_open_keeps_previous_workbook() {
        let mut session = Session::new();
        session.set_workbook(workbook());

        assert!(session.open("/no/such/file.xlsx").is_err());
        assert_eq!(session.selected_sheet(), Some("AAPL"));
        assert!(session.current().is_ok());
    }

    #[test]
    fn test_compute_selection_is_idempotent() {
        let mut session = Session::new();
        session.set_workbook(workbook());

        assert_eq!(compute_selection(&session), compute_selection(&session));
    }
}
