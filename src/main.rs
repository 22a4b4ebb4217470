mod app;
mod catalog;
mod config;
mod fetch;
mod notify;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::CatalogConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fetch::HttpCourseSource;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Browse the top courses catalog in the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Courses endpoint (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log (defaults to the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_path = match cli.log_file {
        Some(p) => p,
        None => config::default_log_path()?,
    };
    init_logging(&log_path)?;

    let mut config = CatalogConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.api_url = url;
        config.validate()?;
    }
    tracing::info!(url = %config.api_url, categories = config.categories.len(), "starting");

    let mut app = App::new(&config);
    app.start_loading(Arc::new(HttpCourseSource::new(config.api_url.clone())));

    // Init terminal
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    ratatui::restore();

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting on error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    tracing::info!("bye");
    Ok(())
}

fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    config: &CatalogConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = config.tick_rate();
    let mut last_tick = Instant::now();
    fit_grid_to_terminal(terminal, app)?;

    loop {
        app.poll_fetch();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key);
                    }
                }
                Event::Resize(width, _) => {
                    app.update_grid_columns(ui::grid_columns(width));
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
    }
}

/// Size the card grid to the terminal before the first frame.
fn fit_grid_to_terminal<B>(
    terminal: &ratatui::Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>>
where
    B: ratatui::backend::Backend,
    B::Error: std::error::Error + 'static,
{
    let size = terminal.size()?;
    app.update_grid_columns(ui::grid_columns(size.width));
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_category_index(index);
        }
        _ => match app.focus {
            Focus::Filter => handle_filter_key(app, key),
            Focus::Cards => handle_cards_key(app, key),
        },
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.filter_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.filter_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_filter_focus(),
        KeyCode::Down | KeyCode::Char('j') => app.focus = Focus::Cards,
        _ => {}
    }
}

fn handle_cards_key(app: &mut App, key: KeyEvent) {
    // Nothing to navigate until the grid has mounted
    if app.loading {
        return;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.card_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.card_next(),
        KeyCode::Down | KeyCode::Char('j') => app.card_down(),
        KeyCode::Up | KeyCode::Char('k') => {
            if app.selected_card() < app.grid_columns {
                app.focus = Focus::Filter;
            } else {
                app.card_up();
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_like(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{grouped_sample, CourseId};
    use crate::notify::{ToastLevel, LIKED_MESSAGE};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn loaded_app() -> App {
        let mut app = App::new(&CatalogConfig::default());
        app.finish_loading(Ok(grouped_sample()));
        app
    }

    #[test]
    fn test_digit_selects_category() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.category, "Development");
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.category, "Development");
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.category, "All");
    }

    #[test]
    fn test_filter_bar_navigation() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Filter);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.category, "Business");
        assert_eq!(app.visible_courses().len(), 1);
    }

    #[test]
    fn test_space_likes_selected_card() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.is_liked(&CourseId::Number(1)));
        let toast = app.toasts.iter().last().unwrap();
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.message, LIKED_MESSAGE);
    }

    #[test]
    fn test_cards_ignore_keys_while_loading() {
        let mut app = App::new(&CatalogConfig::default());
        press(&mut app, KeyCode::Char(' '));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_up_from_first_row_focuses_filter() {
        let mut app = loaded_app();
        app.update_grid_columns(2);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::Filter);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Focus::Cards);
    }

    #[test]
    fn test_grid_fits_terminal_width() {
        let terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(120, 40)).unwrap();
        let mut app = loaded_app();
        assert_eq!(app.grid_columns, 1);
        fit_grid_to_terminal(&terminal, &mut app).unwrap();
        assert_eq!(app.grid_columns, 3);
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "top-courses",
            "--url",
            "http://localhost:1/c",
            "--log-file",
            "/tmp/x.log",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost:1/c"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(cli.config.is_none());
    }
}
