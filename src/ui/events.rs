// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching avec matches!
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (pas d'événement pendant le timeout)
    Tick,

    /// Terminal redimensionné : il suffit de redessiner
    Resize,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    /// Durée maximale d'attente d'un événement
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick de 250ms
    pub fn new() -> Self {
        Self::with_tick_rate(Duration::from_millis(250))
    }

    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            // Sur certains OS, on reçoit Press ET Release : on ne garde que Press
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            CrosstermEvent::Resize(_, _) => Ok(Event::Resize),
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Applique un test sur le KeyCode si l'événement est une touche
fn key_matches(event: &Event, predicate: impl Fn(KeyCode) -> bool) -> bool {
    match event {
        Event::Key(key) => predicate(key.code),
        _ => false,
    }
}

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Esc))
}

/// Vérifie si l'événement est Entrée
pub fn is_enter_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Enter))
}

/// Flèche vers le haut ou 'k' (vim) : feuille précédente
pub fn is_up_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Up | KeyCode::Char('k')))
}

/// Flèche vers le bas ou 'j' (vim) : feuille suivante
pub fn is_down_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Down | KeyCode::Char('j')))
}

/// 'o' : ouvrir un classeur
pub fn is_open_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('o') | KeyCode::Char('O')))
}

/// PgDn : descendre d'une page dans le tableau
pub fn is_page_down_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::PageDown))
}

/// PgUp : remonter d'une page dans le tableau
pub fn is_page_up_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::PageUp))
}

/// 'g' / Home : début du tableau
pub fn is_table_top_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('g') | KeyCode::Home))
}

/// 'G' / End : fin du tableau
pub fn is_table_bottom_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char('G') | KeyCode::End))
}

/// Vérifie si l'événement est Backspace
pub fn is_backspace_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Backspace))
}

/// Caractère acceptable dans un chemin de fichier (tout sauf contrôle)
pub fn is_path_char_event(event: &Event) -> bool {
    key_matches(event, |code| matches!(code, KeyCode::Char(c) if !c.is_control()))
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match event {
        Event::Key(KeyEvent { code: KeyCode::Char(c), .. }) => Some(*c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
