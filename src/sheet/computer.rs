// ============================================================================
// SheetMetricsComputer
// ============================================================================
// Transforme les lignes brutes d'une feuille en série de prix triée, puis
// calcule les métriques affichées.
//
// Fonction pure : même entrée -> même sortie, aucun état conservé.
// Appelée une fois par sélection de feuille.
// ============================================================================

use tracing::{debug, instrument};

use crate::error::DataFormatError;
use crate::models::{MetricsSnapshot, PricePoint, PriceSeries};
use crate::sheet::table::{Row, SheetTable, DATE_COLUMN, PRICE_COLUMN};

/// Résultat d'un calcul : la série normalisée et ses métriques
#[derive(Debug, Clone, PartialEq)]
pub struct SheetMetrics {
    pub series: PriceSeries,
    pub metrics: MetricsSnapshot,
}

/// Calculateur de métriques d'une feuille
///
/// CONCEPT RUST : Unit struct
/// - Aucun champ, aucun état
/// - Sert de point d'entrée nommé (comme EventHandler)
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetMetricsComputer;

impl SheetMetricsComputer {
    pub fn new() -> Self {
        Self
    }

    /// Valide et calcule une feuille complète (en-tête + lignes)
    ///
    /// Les colonnes manquantes sont détectées sur l'en-tête, même si la
    /// feuille n'a aucune ligne de données.
    pub fn compute_table(&self, table: &SheetTable) -> Result<SheetMetrics, DataFormatError> {
        for column in [DATE_COLUMN, PRICE_COLUMN] {
            if !table.has_column(column) {
                return Err(DataFormatError::MissingColumn { column });
            }
        }

        self.compute(&table.name, &table.rows)
    }

    /// Valide et calcule à partir des lignes seules
    ///
    /// # Erreurs
    /// * `MissingColumn` si une ligne n'a pas de clé `date` ou `price`
    /// * `NonNumericPrice` / `NonFinitePrice` / `UnparseableDate` / `MissingValue`
    /// * `NoObservations` si aucune ligne
    /// * `ChangeOverflow` si la variation totale n'est pas représentable
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn compute(&self, name: &str, rows: &[Row]) -> Result<SheetMetrics, DataFormatError> {
        // CONCEPT RUST : collect() sur des Result
        // - Vec<Result<T, E>> -> Result<Vec<T>, E>
        // - S'arrête à la première erreur
        let points = rows
            .iter()
            .map(parse_row)
            .collect::<Result<Vec<PricePoint>, DataFormatError>>()?;

        let series = PriceSeries::from_unsorted(name.to_string(), points);
        let metrics = MetricsSnapshot::from_series(&series).ok_or(DataFormatError::NoObservations)?;

        if !metrics.absolute_change.is_finite() {
            let first = series.first().map_or(0.0, |p| p.price);
            return Err(DataFormatError::ChangeOverflow { first, last: metrics.current_price });
        }

        debug!(
            points = series.len(),
            current_price = metrics.current_price,
            absolute_change = metrics.absolute_change,
            percent_change = ?metrics.percent_change,
            "Computed sheet metrics"
        );

        Ok(SheetMetrics { series, metrics })
    }
}

/// Convertit une ligne en point (date, prix)
fn parse_row(row: &Row) -> Result<PricePoint, DataFormatError> {
    let date_cell = row
        .cells
        .get(DATE_COLUMN)
        .ok_or(DataFormatError::MissingColumn { column: DATE_COLUMN })?;
    let price_cell = row
        .cells
        .get(PRICE_COLUMN)
        .ok_or(DataFormatError::MissingColumn { column: PRICE_COLUMN })?;

    let date = date_cell.to_date(row.line)?;
    let price = price_cell.to_price(row.line)?;

    Ok(PricePoint::new(date, price))
}

// ============================================================================
// Tests
// ============================================================================
