// ============================================================================
// LazySheet - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod cli;       // Arguments de la ligne de commande
pub mod error;     // Erreurs métier (format de données, saisie vide)
pub mod models;    // Structures de données (série, métriques)
pub mod sheet;     // Lecture du classeur + SheetMetricsComputer
pub mod session;   // État de session (classeur ouvert, feuille choisie)
pub mod summary;   // Résumé JSON (mode --summary)
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
