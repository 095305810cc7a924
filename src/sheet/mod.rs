// ============================================================================
// Module : sheet
// ============================================================================
// Lecture du classeur et calcul des métriques d'une feuille
// (remplace la source de données réseau par un fichier Excel local)
// ============================================================================

pub mod cell;     // Valeurs de cellules et parsing date/prix
pub mod table;    // En-tête + lignes d'une feuille
pub mod computer; // SheetMetricsComputer
pub mod workbook; // Chargement du classeur (calamine)

// Re-exports
pub use cell::CellValue;
pub use computer::{SheetMetrics, SheetMetricsComputer};
pub use table::{Row, SheetTable, DATE_COLUMN, PRICE_COLUMN};
pub use workbook::WorkbookData;
