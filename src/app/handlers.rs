// Event handlers and action dispatch

use std::path::Path;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use super::{carousel_options, finish_callback, resolve_theme, App};
use crate::action::Action;
use crate::components::{Component, PageTurn};
use crate::config::FinishBehavior;
use crate::error::Result;

impl App {
    pub(super) fn handle_event(&mut self, event: Event) -> Option<Action> {
        match &event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Some(Action::Quit)
                }
                _ => {}
            },
            Event::Resize(..) => return Some(Action::Render),
            Event::FocusGained | Event::FocusLost => {
                self.focused = matches!(event, Event::FocusGained);
                return Some(Action::Render);
            }
            _ => {}
        }

        self.carousel.handle_event(&event)
    }

    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick(now) => {
                let had_suppression = self.carousel.reset_pending();
                let turns = self.carousel.tick(now);
                if turns > 0 || had_suppression != self.carousel.reset_pending() {
                    self.mark_dirty();
                }
            }
            Action::Render => {
                self.mark_dirty();
            }
            Action::NextPage => {
                if self.carousel.next_page() == PageTurn::Wrapped {
                    self.set_status("Back to the first page");
                }
                self.mark_dirty();
            }
            Action::JumpToPage(_) => {
                self.status = None;
                self.carousel.update(&action);
                self.mark_dirty();
            }
            Action::Finished => self.handle_finished(),
            Action::ConfigChanged(path) => self.reload_config(&path),
        }
        Ok(())
    }

    fn handle_finished(&mut self) {
        match self.finish_behavior {
            FinishBehavior::Quit => {
                tracing::info!("Finished, quitting");
                self.should_quit = true;
            }
            FinishBehavior::Notify => {
                tracing::info!("Finished");
                self.set_status("Finished");
            }
            FinishBehavior::Wrap => {}
        }
    }

    /// Re-apply configuration to the live carousel.
    fn reload_config(&mut self, path: &Path) {
        tracing::info!("Config file changed: {}", path.display());
        self.config_manager.reload_file(path);

        let options = carousel_options(&self.cli, &self.config_manager);
        if let Err(e) = self.carousel.set_options(options) {
            tracing::warn!("Ignoring carousel config from {}: {}", path.display(), e);
            self.set_status(format!("Config rejected: {}", e));
        }

        self.theme = resolve_theme(&self.cli, &self.config_manager);
        self.carousel.set_style(self.theme.carousel.clone());

        let general = &self.config_manager.app_config().general;
        self.tick_interval = Duration::from_millis(general.tick_interval_ms.max(1));
        self.finish_behavior = self.cli.finish_behavior(general.on_finish);
        self.carousel
            .set_on_finish(finish_callback(self.finish_behavior, self.action_tx.clone()));

        self.mark_dirty();
    }
}
