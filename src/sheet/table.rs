// ============================================================================
// Table : contenu brut d'une feuille (en-tête + lignes)
// ============================================================================
// Chaque ligne est un dictionnaire nom de colonne -> valeur, comme une ligne
// de tableur lue avec son en-tête.
// ============================================================================

use std::collections::{HashMap, HashSet};

use calamine::{Data, Range};

use crate::sheet::cell::CellValue;

/// Nom de la colonne des dates
pub const DATE_COLUMN: &str = "date";

/// Nom de la colonne des prix
pub const PRICE_COLUMN: &str = "price";

/// Une ligne de données
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Numéro de ligne dans la feuille (1 = en-tête), pour les messages d'erreur
    pub line: usize,

    /// Valeurs indexées par nom de colonne
    pub cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new(line: usize, cells: HashMap<String, CellValue>) -> Self {
        Self { line, cells }
    }

    /// Construit une ligne à partir de paires (colonne, valeur)
    pub fn from_pairs<I, K>(line: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        Self {
            line,
            cells: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Une feuille lue : son nom, ses colonnes et ses lignes
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    /// Nom de la feuille (identifiant du titre)
    pub name: String,

    /// Noms des colonnes (en-tête, espaces retirés)
    pub columns: Vec<String>,

    /// Lignes de données, dans l'ordre du fichier
    pub rows: Vec<Row>,
}

impl SheetTable {
    pub fn new(name: String, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { name, columns, rows }
    }

    /// Vérifie si l'en-tête contient une colonne
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Vrai si la feuille a les colonnes `date` et `price`
    pub fn has_price_columns(&self) -> bool {
        self.has_column(DATE_COLUMN) && self.has_column(PRICE_COLUMN)
    }

    /// Construit la table depuis une plage calamine
    ///
    /// CONCEPT : Première ligne = en-tête
    /// - Les lignes entièrement vides sont ignorées
    /// - Les colonnes sans nom sont ignorées
    /// - Un nom répété est renommé `price.1`, `price.2`... : la première
    ///   occurrence garde le nom d'origine
    /// - `line` tient compte du décalage de la plage dans la feuille
    pub fn from_range(name: String, range: &Range<Data>) -> Self {
        let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
        let mut rows_iter = range.rows();

        let columns: Vec<String> = match rows_iter.next() {
            Some(header) => dedupe_columns(
                header
                    .iter()
                    .map(|cell| CellValue::from(cell).to_string().trim().to_string()),
            ),
            None => return Self::new(name, Vec::new(), Vec::new()),
        };

        let rows = rows_iter
            .enumerate()
            .filter_map(|(offset, cells)| {
                let line = first_line + offset + 1;
                let values: HashMap<String, CellValue> = columns
                    .iter()
                    .zip(cells.iter())
                    .filter(|(column, _)| !column.is_empty())
                    .map(|(column, cell)| (column.clone(), CellValue::from(cell)))
                    .collect();

                if values.values().all(CellValue::is_empty) {
                    None
                } else {
                    Some(Row::new(line, values))
                }
            })
            .collect();

        Self::new(
            name,
            columns.into_iter().filter(|c| !c.is_empty()).collect(),
            rows,
        )
    }
}

/// Rend les noms de colonnes uniques en suffixant les doublons
fn dedupe_columns(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::new();

    for column in names {
        if column.is_empty() {
            columns.push(column);
            continue;
        }

        let mut unique = column.clone();
        let mut suffix = 1;
        while seen.contains(&unique) {
            unique = format!("{}.{}", column, suffix);
            suffix += 1;
        }

        seen.insert(unique.clone());
        columns.push(unique);
    }

    columns
}
