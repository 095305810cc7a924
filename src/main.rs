// ============================================================================
// LazySheet - Tableau de bord des prix depuis un classeur Excel
// ============================================================================
// Programme TUI : ouvre un classeur, liste les feuilles (un titre par feuille)
// et affiche métriques, graphique et données de la feuille choisie.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Tout est synchrone : une touche -> un recalcul, pas de thread
// 4. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazysheet::app::{App, TABLE_PAGE};
use lazysheet::cli::Cli;
use lazysheet::session::Session;
use lazysheet::summary::SheetSummary;
use lazysheet::ui::{render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Répertoire des logs par défaut
///
/// - Linux : ~/.local/share/lazysheet/logs
/// - macOS : ~/Library/Application Support/lazysheet/logs
/// - Windows : C:\Users\<user>\AppData\Local\lazysheet\logs
/// - Sinon : ./logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazysheet").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazysheet/logs/lazysheet.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=lazysheet=trace lazysheet stocks.xlsx
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazysheet.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour lazysheet et info pour le reste
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazysheet=debug,info".into()),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging d'abord : si l'init échoue, on continue sans logs
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    init_logging(&log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(workbook = ?cli.workbook, sheet = ?cli.sheet, summary = cli.summary, "LazySheet starting up");

    let session = build_session(&cli)?;

    if cli.summary {
        return print_summary(&session, cli.pretty);
    }

    run_tui(session)
}

/// Prépare la session à partir des arguments (classeur + feuille initiale)
///
/// Sans classeur, la session reste vide et le TUI invite à en ouvrir un.
fn build_session(cli: &Cli) -> Result<Session> {
    let mut session = Session::new();

    let Some(path) = &cli.workbook else {
        return Ok(session);
    };

    session
        .open(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;

    if let Some(sheet) = &cli.sheet {
        if !session.select(sheet) {
            bail!(
                "Sheet '{}' not found or missing 'date'/'price' columns (available: {})",
                sheet,
                session.sheet_names().join(", ")
            );
        }
    }

    Ok(session)
}

/// Mode --summary : affiche le résumé JSON et quitte
fn print_summary(session: &Session, pretty: bool) -> Result<()> {
    let summary = SheetSummary::from_session(session)?;

    let json = if pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };

    println!("{}", json);
    info!(sheet = %summary.sheet, "Summary printed");
    Ok(())
}

/// Lance le TUI et restaure le terminal à la fin
fn run_tui(session: Session) -> Result<()> {
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::with_session(session);
    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Game Loop / Event Loop Pattern
// - À chaque itération :
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (update)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }

        app.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Les gardes (if) filtrent selon l'écran actuel
/// - Mode input d'abord : toutes les touches servent à la saisie
fn handle_event(app: &mut App, event: lazysheet::ui::events::Event) {
    use lazysheet::ui::events::{
        get_char_from_event, is_backspace_event, is_down_event, is_enter_event,
        is_escape_event, is_open_event, is_page_down_event, is_page_up_event,
        is_path_char_event, is_quit_event, is_table_bottom_event, is_table_top_event,
        is_up_event, Event,
    };

    match event {
        // ========================================
        // Input Mode : saisie du chemin
        // ========================================
        Event::Key(_) if is_escape_event(&event) && app.is_in_input_mode() => {
            info!("User cancelled input");
            app.cancel_input();
        }

        Event::Key(_) if is_enter_event(&event) && app.is_in_input_mode() => {
            let path = app.submit_input().trim().to_string();
            if path.is_empty() {
                debug!("Empty path, ignoring");
            } else {
                info!(%path, "User submitted workbook path");
                app.open_workbook(expand_home(&path));
            }
        }

        Event::Key(_) if is_backspace_event(&event) && app.is_in_input_mode() => {
            app.backspace();
        }

        Event::Key(_) if is_path_char_event(&event) && app.is_in_input_mode() => {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        Event::Key(_) if app.is_in_input_mode() => {
            // Autres touches (flèches, F1...) ignorées pendant la saisie
        }

        // ========================================
        // Dashboard
        // ========================================
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step quit
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_open_event(&event) => {
            app.cancel_quit();
            info!("User requested open workbook");
            app.start_input("Open workbook: ".to_string());
        }

        Event::Key(_) if is_up_event(&event) => {
            app.cancel_quit();
            app.navigate_up();
        }

        Event::Key(_) if is_down_event(&event) => {
            app.cancel_quit();
            app.navigate_down();
        }

        Event::Key(_) if is_page_down_event(&event) => {
            app.cancel_quit();
            app.scroll_table_down(TABLE_PAGE);
        }

        Event::Key(_) if is_page_up_event(&event) => {
            app.cancel_quit();
            app.scroll_table_up(TABLE_PAGE);
        }

        Event::Key(_) if is_table_top_event(&event) => {
            app.cancel_quit();
            app.scroll_table_top();
        }

        Event::Key(_) if is_table_bottom_event(&event) => {
            app.cancel_quit();
            app.scroll_table_bottom();
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation si active
            app.cancel_quit();
        }

        Event::Tick | Event::Resize => {}
    }
}

/// Remplace un "~/" initial par le répertoire personnel
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
