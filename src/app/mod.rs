// App module
// - mod.rs: App struct, constructor, finish callback wiring
// - event_loop.rs: Main run() loop
// - handlers.rs: Event handlers and action dispatch
// - rendering.rs: UI drawing

mod event_loop;
mod handlers;
mod rendering;

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::action::Action;
use crate::cli::Cli;
use crate::components::{Carousel, FinishCallback};
use crate::config::{CarouselConfig, ConfigManager, ConfigWatcherMode, FinishBehavior, Theme};
use crate::error::{CarouselError, Result};
use crate::pages::Page;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    needs_redraw: bool,
    /// Whether the terminal window has focus
    focused: bool,
    carousel: Carousel<Page>,
    cli: Cli,
    config_manager: ConfigManager,
    config_watcher: Option<ConfigWatcherMode>,
    theme: Theme,
    finish_behavior: FinishBehavior,
    /// Actions raised outside the input path (finish callback)
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    last_tick: Instant,
    tick_interval: Duration,
    status: Option<String>,
}

impl App {
    pub fn new(cli: Cli, config_manager: ConfigManager, pages: Vec<Page>) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let general = config_manager.app_config().general.clone();
        let theme = resolve_theme(&cli, &config_manager);
        let finish_behavior = cli.finish_behavior(general.on_finish);

        let mut carousel = Carousel::new(pages, carousel_options(&cli, &config_manager), Instant::now())?
            .with_style(theme.carousel.clone());
        carousel.set_on_finish(finish_callback(finish_behavior, action_tx.clone()));

        let config_watcher = (general.watch_config && !cli.no_watch)
            .then(|| ConfigWatcherMode::start(config_manager.config_dir(), general.config_poll_interval_ms));

        let terminal = setup_terminal(io::stdout())?;

        tracing::info!(
            pages = carousel.page_count(),
            finish = ?finish_behavior,
            "carousel-tui started"
        );

        Ok(Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            focused: true,
            carousel,
            cli,
            config_manager,
            config_watcher,
            theme,
            finish_behavior,
            action_tx,
            action_rx,
            last_tick: Instant::now(),
            tick_interval: Duration::from_millis(general.tick_interval_ms.max(1)),
            status: None,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.mark_dirty();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        restore_terminal(&mut io::stdout());
    }
}

/// Raw mode, alternate screen, mouse and focus reporting. Undone again if
/// any step fails, since no `App` exists yet to restore it on drop.
fn setup_terminal<W: Write>(mut writer: W) -> Result<Terminal<CrosstermBackend<W>>> {
    enable_raw_mode().map_err(|e| CarouselError::Terminal(e.to_string()))?;

    if let Err(e) = execute!(writer, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange) {
        restore_terminal(&mut writer);
        return Err(CarouselError::Terminal(e.to_string()));
    }

    Terminal::new(CrosstermBackend::new(writer)).map_err(|e| {
        restore_terminal(&mut io::stdout());
        CarouselError::Terminal(e.to_string())
    })
}

fn restore_terminal<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, DisableMouseCapture, DisableFocusChange);
}

/// File options with command-line flags layered on top.
fn carousel_options(cli: &Cli, config_manager: &ConfigManager) -> CarouselConfig {
    let mut options = config_manager.app_config().carousel.clone();
    cli.apply_overrides(&mut options);
    options
}

fn resolve_theme(cli: &Cli, config_manager: &ConfigManager) -> Theme {
    match cli.theme.as_deref() {
        Some(name) => Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using theme.toml", name);
            config_manager.theme().clone()
        }),
        None => config_manager.theme().clone(),
    }
}

/// Finish callback for `behavior`; `None` lets the carousel wrap around.
fn finish_callback(behavior: FinishBehavior, tx: UnboundedSender<Action>) -> Option<FinishCallback> {
    match behavior {
        FinishBehavior::Wrap => None,
        FinishBehavior::Notify | FinishBehavior::Quit => Some(Box::new(move || {
            let _ = tx.send(Action::Finished);
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_wrap_installs_no_callback() {
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(finish_callback(FinishBehavior::Wrap, tx).is_none());
    }

    #[test]
    fn test_finish_callback_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut callback = finish_callback(FinishBehavior::Quit, tx).unwrap();
        callback();
        assert_eq!(rx.try_recv().ok(), Some(Action::Finished));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_finish_callback_drives_carousel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut carousel = Carousel::new(vec![Page::new(None, "only")], CarouselConfig::default(), Instant::now())
            .unwrap();
        carousel.set_on_finish(finish_callback(FinishBehavior::Notify, tx));

        carousel.next_page();
        assert_eq!(rx.try_recv().ok(), Some(Action::Finished));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_carousel_options_merge_cli() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[carousel]\nclickable = true\ninterval_ms = 700\n").unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());
        let cli = Cli::parse_from(["carousel-tui", "--automatic"]);

        let options = carousel_options(&cli, &manager);
        assert!(options.automatic);
        assert!(options.clickable);
        assert_eq!(options.interval_ms, 700);
    }

    #[test]
    fn test_resolve_theme_prefers_cli_preset() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(dir.path().to_path_buf());

        let cli = Cli::parse_from(["carousel-tui", "--theme", "vibrant"]);
        assert_eq!(resolve_theme(&cli, &manager).name, "vibrant");

        let cli = Cli::parse_from(["carousel-tui", "--theme", "unknown"]);
        assert_eq!(resolve_theme(&cli, &manager), Theme::default());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_failed_setup_leaves_raw_mode_off() {
        let result = setup_terminal(BrokenPipe);
        assert!(matches!(result, Err(CarouselError::Terminal(_))));
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap_or(false));
    }
}
