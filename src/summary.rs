// ============================================================================
// Résumé JSON d'une sélection (mode --summary, sans TUI)
// ============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SelectionError;
use crate::models::MetricsSnapshot;
use crate::session::Session;

/// Résumé sérialisable de la feuille sélectionnée
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub file: String,
    pub sheet: String,
    pub observations: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min_price: f64,
    pub max_price: f64,
    pub metrics: MetricsSnapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SheetSummary {
    /// Construit le résumé de la sélection courante
    pub fn from_session(session: &Session) -> Result<Self, SelectionError> {
        let result = session.current().map_err(|e| e.clone())?;
        let series = &result.series;

        // Une sélection valide a toujours au moins une observation
        let (first_date, last_date) = series
            .date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MIN));

        Ok(Self {
            file: session
                .workbook()
                .map(|w| w.file_name())
                .unwrap_or_default(),
            sheet: series.name.clone(),
            observations: series.len(),
            first_date,
            last_date,
            min_price: series.min_price().unwrap_or(result.metrics.current_price),
            max_price: series.max_price().unwrap_or(result.metrics.current_price),
            metrics: result.metrics,
            warnings: session.warnings().to_vec(),
        })
    }
}
