// ============================================================================
// Workbook : lecture d'un classeur Excel avec calamine
// ============================================================================
// Chaque feuille du classeur représente un titre. On lit toutes les feuilles,
// et on garde un avertissement pour celles qui n'ont pas les colonnes
// `date` et `price` (elles ne seront pas proposées à la sélection).
//
// CONCEPTS RUST :
// 1. Trait Reader de calamine : même API pour xlsx, xlsb, xls, ods
// 2. Erreurs typées avec contexte (WorkbookError)
// 3. #[instrument] : span tracing avec le chemin du fichier
// ============================================================================

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};
use tracing::{info, instrument, warn};

use crate::error::WorkbookError;
use crate::sheet::table::SheetTable;

/// Classeur chargé en mémoire
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    /// Chemin du fichier ouvert
    pub path: PathBuf,

    /// Toutes les feuilles, dans l'ordre du classeur
    pub sheets: Vec<SheetTable>,

    /// Avertissements de chargement (feuilles ignorées)
    pub warnings: Vec<String>,
}

impl WorkbookData {
    /// Construit un classeur à partir de feuilles déjà lues
    ///
    /// Calcule les avertissements pour les feuilles sans `date`/`price`.
    pub fn from_sheets(path: PathBuf, sheets: Vec<SheetTable>) -> Self {
        let warnings = sheets
            .iter()
            .filter(|sheet| !sheet.has_price_columns())
            .map(|sheet| {
                format!(
                    "Sheet '{}' does not contain required 'date' and 'price' columns",
                    sheet.name
                )
            })
            .collect();

        Self {
            path,
            sheets,
            warnings,
        }
    }

    /// Charge un classeur depuis le disque
    ///
    /// # Erreurs
    /// * `WorkbookError::Open` si le fichier n'existe pas ou n'est pas un tableur
    /// * `WorkbookError::Sheet` si une feuille est illisible
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorkbookError> {
        let path = path.as_ref();

        let mut workbook = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|source| WorkbookError::Sheet {
                    sheet: name.clone(),
                    source,
                })?;

            sheets.push(SheetTable::from_range(name, &range));
        }

        let data = Self::from_sheets(path.to_path_buf(), sheets);

        for warning in &data.warnings {
            warn!(%warning, "Sheet skipped");
        }
        info!(
            sheets = data.sheets.len(),
            usable = data.usable_sheet_names().len(),
            "Workbook loaded"
        );

        Ok(data)
    }

    /// Noms des feuilles sélectionnables (avec `date` et `price`)
    pub fn usable_sheet_names(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .filter(|sheet| sheet.has_price_columns())
            .map(|sheet| sheet.name.as_str())
            .collect()
    }

    /// Retourne une feuille par son nom
    pub fn sheet(&self, name: &str) -> Option<&SheetTable> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Nom du fichier seul (pour l'affichage)
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, columns: &[&str]) -> SheetTable {
        SheetTable::new(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_warnings_for_sheets_without_price_columns() {
        let data = WorkbookData::from_sheets(
            PathBuf::from("/tmp/stocks.xlsx"),
            vec![
                sheet("AAPL", &["date", "price"]),
                sheet("Notes", &["comment"]),
                sheet("TSLA", &["price", "date", "volume"]),
            ],
        );

        assert_eq!(data.usable_sheet_names(), vec!["AAPL", "TSLA"]);
        assert_eq!(
            data.warnings,
            vec!["Sheet 'Notes' does not contain required 'date' and 'price' columns".to_string()]
        );
        assert_eq!(data.file_name(), "stocks.xlsx");
        assert!(data.sheet("TSLA").is_some());
        assert!(data.sheet("MSFT").is_none());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = WorkbookData::load("/definitely/not/here.xlsx");
        assert!(matches!(result, Err(WorkbookError::Open { .. })));
    }
}
