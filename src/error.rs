// ============================================================================
// Erreurs métier
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] implémente std::error::Error et Display
// - #[error("...")] : message affiché à l'utilisateur
// - #[from] : conversion automatique avec l'opérateur ?
//
// Les erreurs d'une interaction ne sont jamais fatales : l'utilisateur
// corrige son fichier ou sa sélection et réessaie.
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Contenu d'une feuille invalide (colonnes manquantes, mauvais types)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataFormatError {
    /// Colonne `date` ou `price` absente de l'en-tête
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// Cellule vide dans une colonne obligatoire
    #[error("row {row}: empty '{column}' value")]
    MissingValue { row: usize, column: &'static str },

    /// Prix non numérique (texte, booléen, erreur Excel...)
    #[error("row {row}: price '{value}' is not a number")]
    NonNumericPrice { row: usize, value: String },

    /// Prix numérique mais infini ou NaN
    #[error("row {row}: price '{value}' is not a finite number")]
    NonFinitePrice { row: usize, value: String },

    /// Date illisible
    #[error("row {row}: cannot parse date '{value}'")]
    UnparseableDate { row: usize, value: String },

    /// Prix finis dont l'écart dernier - premier déborde
    #[error("price change from {first} to {last} overflows")]
    ChangeOverflow { first: f64, last: f64 },

    /// En-tête présent mais aucune ligne de données
    #[error("sheet has no price observations")]
    NoObservations,
}

/// Rien à afficher pour l'instant : ce n'est pas une faute, juste une invite
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmptyInputError {
    #[error("no workbook opened yet, press [o] to open an Excel file")]
    NoWorkbook,

    #[error("no sheet selected, pick a stock in the list")]
    NoSheetSelected,

    #[error("no sheet in this workbook has both 'date' and 'price' columns")]
    NoUsableSheet,
}

/// Échec de lecture du classeur lui-même (fichier absent, format invalide)
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("failed to open workbook {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// Erreur d'une sélection : soit l'entrée manque, soit la feuille est invalide
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),

    #[error("sheet '{sheet}': {source}")]
    DataFormat {
        sheet: String,
        #[source]
        source: DataFormatError,
    },
}

impl SelectionError {
    /// Vrai pour une simple invite (pas de fichier, pas de feuille)
    pub fn is_prompt(&self) -> bool {
        matches!(self, SelectionError::EmptyInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DataFormatError::MissingColumn { column: "price" };
        assert_eq!(err.to_string(), "missing required column 'price'");

        let err = SelectionError::DataFormat {
            sheet: "AAPL".to_string(),
            source: DataFormatError::NonNumericPrice { row: 3, value: "abc".to_string() },
        };
        assert_eq!(err.to_string(), "sheet 'AAPL': row 3: price 'abc' is not a number");
        assert!(!err.is_prompt());

        let err = SelectionError::from(EmptyInputError::NoWorkbook);
        assert!(err.is_prompt());
    }
}
