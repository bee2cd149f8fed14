//! Survey TUI - multi-step survey form in the terminal
//!
//! Walks the user through the chapters and screens of a declarative form
//! definition, validating each screen before moving on.

mod app;
mod config;
mod form;
mod platform;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{FileSettings, SettingsProvider, ThemeName};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use form::{FormConfig, FormSession, LogSink, RuleTable};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fill in a multi-step survey form in the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON form definition to use instead of the built-in survey
    #[arg(long, value_name = "PATH")]
    form: Option<PathBuf>,

    /// Theme to start with; the choice is saved for later runs
    #[arg(long, value_name = "NAME", value_parser = parse_theme)]
    theme: Option<ThemeName>,

    /// Settings file to use instead of the one in the user config directory
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the form definition as JSON and exit
    #[arg(long)]
    dump_form: bool,
}

fn parse_theme(s: &str) -> Result<ThemeName, String> {
    s.parse()
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "survey_tui=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
    Ok(())
}

fn load_form(path: Option<&PathBuf>) -> Result<FormConfig> {
    match path {
        Some(path) => {
            let config = FormConfig::from_json_file(path)?;
            tracing::info!(path = %path.display(), form = %config.title, "Loaded form definition");
            Ok(config)
        }
        None => Ok(FormConfig::builtin()),
    }
}

/// Persist a theme chosen on the command line. Failures are logged and the
/// app still starts with the saved or default theme.
fn save_theme(provider: &dyn SettingsProvider, theme: ThemeName) {
    let mut current = provider.load().unwrap_or_else(|err| {
        tracing::warn!("Failed to load settings, using defaults: {err:#}");
        config::Settings::default()
    });
    current.set_theme(theme);
    if let Err(err) = provider.save(&current) {
        tracing::warn!(theme = %theme, "Failed to save theme preference: {err:#}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let form_config = load_form(cli.form.as_ref())?;
    if cli.dump_form {
        println!("{}", serde_json::to_string_pretty(&form_config)?);
        return Ok(());
    }

    let settings = cli
        .settings
        .map(FileSettings::at)
        .unwrap_or_else(FileSettings::default_location);
    tracing::debug!(path = ?settings.path(), "Using settings file");
    if let Some(theme) = cli.theme {
        save_theme(&settings, theme);
    }

    let rules = RuleTable::for_form(&form_config);
    let session = FormSession::new(form_config, rules);
    let mut app = App::new(session, Box::new(settings), Box::new(LogSink));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    if let Some(submission) = &app.submitted {
        println!("{}", serde_json::to_string_pretty(submission)?);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key);
                }
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on next draw
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
