// ============================================================================
// Structure : MetricsSnapshot
// ============================================================================
// Les trois valeurs affichées pour la feuille sélectionnée :
// prix actuel, variation totale et variation en pourcentage
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

/// Métriques dérivées d'une série de prix (lecture seule)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Dernier prix de la série
    pub current_price: f64,

    /// Dernier prix - premier prix
    pub absolute_change: f64,

    /// (dernier - premier) / premier * 100
    ///
    /// CONCEPT RUST : Option au lieu d'une division par zéro
    /// - None quand le premier prix vaut 0 ("non applicable")
    /// - None aussi si le quotient déborde (premier prix minuscule)
    pub percent_change: Option<f64>,
}

impl MetricsSnapshot {
    /// Calcule les métriques d'une série triée
    ///
    /// Retourne None si la série est vide.
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let first = series.first()?.price;
        let last = series.last()?.price;

        let absolute_change = last - first;
        let percent_change = if first == 0.0 {
            None
        } else {
            Some(absolute_change / first * 100.0).filter(|change| change.is_finite())
        };

        Some(Self {
            current_price: last,
            absolute_change,
            percent_change,
        })
    }

    /// Vrai si le titre est stable ou en hausse sur la période
    pub fn is_positive(&self) -> bool {
        self.absolute_change >= 0.0
    }

    /// Prix actuel formaté : "$151.30"
    pub fn current_price_label(&self) -> String {
        format!("${:.2}", self.current_price)
    }

    /// Variation totale formatée : "$1.05" ou "-$2.10"
    pub fn absolute_change_label(&self) -> String {
        if self.absolute_change < 0.0 {
            format!("-${:.2}", self.absolute_change.abs())
        } else {
            format!("${:.2}", self.absolute_change)
        }
    }

    /// Variation en pourcentage formatée : "▲ +0.70%", "▼ -1.20%" ou "N/A"
    pub fn percent_change_label(&self) -> String {
        match self.percent_change {
            Some(change) => {
                let arrow = if change >= 0.0 { "▲" } else { "▼" };
                format!("{} {:+.2}%", arrow, change)
            }
            None => "N/A".to_string(),
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::NaiveDate;

    fn series(prices: &[(u32, f64)]) -> PriceSeries {
        let points = prices
            .iter()
            .map(|&(day, price)| {
                PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), price)
            })
            .collect();
        PriceSeries::from_unsorted("TEST".to_string(), points)
    }

    #[test]
    fn test_two_day_example() {
        let metrics = MetricsSnapshot::from_series(&series(&[(1, 150.25), (2, 151.30)])).unwrap();

        assert_eq!(metrics.current_price, 151.30);
        assert!((metrics.absolute_change - 1.05).abs() < 1e-9);

        let percent = metrics.percent_change.unwrap();
        assert!((percent - 0.6988).abs() < 1e-3);
    }

    #[test]
    fn test_single_row_has_zero_change() {
        let metrics = MetricsSnapshot::from_series(&series(&[(1, 100.0)])).unwrap();

        assert_eq!(metrics.current_price, 100.0);
        assert_eq!(metrics.absolute_change, 0.0);
        assert_eq!(metrics.percent_change, Some(0.0));
    }

    #[test]
    fn test_zero_first_price_is_not_applicable() {
        let metrics = MetricsSnapshot::from_series(&series(&[(1, 0.0), (2, 5.0)])).unwrap();

        assert_eq!(metrics.absolute_change, 5.0);
        assert_eq!(metrics.percent_change, None);
        assert_eq!(metrics.percent_change_label(), "N/A");
    }

    #[test]
    fn test_overflowing_percentage_is_not_applicable() {
        let metrics = MetricsSnapshot::from_series(&series(&[(1, 1e-300), (2, 1e10)])).unwrap();

        assert_eq!(metrics.percent_change, None);
        assert_eq!(metrics.percent_change_label(), "N/A");
        assert_eq!(metrics.current_price, 1e10);
    }

    #[test]
    fn test_uses_sorted_order_not_input_order() {
        // Le dernier point saisi n'est pas le plus récent
        let metrics = MetricsSnapshot::from_series(&series(&[(5, 50.0), (1, 40.0), (3, 45.0)])).unwrap();

        assert_eq!(metrics.current_price, 50.0);
        assert_eq!(metrics.absolute_change, 10.0);
        assert_eq!(metrics.percent_change, Some(25.0));
    }

    #[test]
    fn test_empty_series_has_no_metrics() {
        assert!(MetricsSnapshot::from_series(&series(&[])).is_none());
    }

    #[test]
    fn test_labels() {
        let metrics = MetricsSnapshot::from_series(&series(&[(1, 10.0), (2, 7.5)])).unwrap();

        assert!(!metrics.is_positive());
        assert_eq!(metrics.current_price_label(), "$7.50");
        assert_eq!(metrics.absolute_change_label(), "-$2.50");
        assert_eq!(metrics.percent_change_label(), "▼ -25.00%");
    }
}
