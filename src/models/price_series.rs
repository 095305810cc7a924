// ============================================================================
// Structure : PriceSeries
// ============================================================================
// Historique de prix d'un titre (une feuille du classeur)
//
// CONCEPTS RUST :
// 1. NaiveDate : date calendaire sans fuseau horaire (chrono)
// 2. Tri stable : sort_by_key conserve l'ordre d'origine des égalités
// 3. Iterator fold : min/max en un seul passage
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Une observation : un prix à une date donnée
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Date de l'observation
    pub date: NaiveDate,

    /// Prix (toujours fini)
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Série de prix d'un titre, identifiée par le nom de la feuille
///
/// Invariant : `points` est trié par date croissante dès la construction
/// via [`PriceSeries::from_unsorted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Nom du titre (nom de la feuille Excel)
    pub name: String,

    /// Observations triées par date croissante
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Construit une série en triant les points par date
    ///
    /// CONCEPT RUST : sort_by_key est stable
    /// - Deux points à la même date gardent leur ordre d'origine
    pub fn from_unsorted(name: String, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|point| point.date);
        Self { name, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Première observation (la plus ancienne)
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Dernière observation (la plus récente)
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Vérifie que les dates sont croissantes
    pub fn is_sorted(&self) -> bool {
        self.points.windows(2).all(|pair| pair[0].date <= pair[1].date)
    }

    /// Prix minimum de la série
    pub fn min_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::min)
    }

    /// Prix maximum de la série
    pub fn max_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::max)
    }

    /// Période couverte (première date, dernière date)
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.first()?.date, self.last()?.date))
    }

    /// Convertit la série en points (x, y) pour le widget Chart
    ///
    /// x = nombre de jours depuis la première date : les trous du calendrier
    /// (week-ends, jours fériés) restent visibles sur l'axe.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        let Some(origin) = self.first().map(|p| p.date) else {
            return Vec::new();
        };

        self.points
            .iter()
            .map(|p| ((p.date - origin).num_days() as f64, p.price))
            .collect()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
