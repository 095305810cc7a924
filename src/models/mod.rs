// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod price_series; // Série de prix (date, prix) d'une feuille
pub mod metrics;      // Métriques dérivées (prix actuel, variations)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazysheet::models::price_series::PriceSeries;
// On peut faire : use lazysheet::models::PriceSeries;
pub use price_series::{PricePoint, PriceSeries};
pub use metrics::MetricsSnapshot;
