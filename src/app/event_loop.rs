// Event loop - main run() method

use std::time::{Duration, Instant};

use crossterm::event;

use super::App;
use crate::action::Action;
use crate::config::ConfigEvent;
use crate::error::{CarouselError, Result};

impl App {
    pub fn run(&mut self) -> Result<()> {
        loop {
            // ---- 1. Poll non-input sources ----

            // Actions raised by the finish callback
            while let Ok(action) = self.action_rx.try_recv() {
                self.dispatch(action)?;
            }

            // Tick (drives the carousel timers)
            if self.last_tick.elapsed() >= self.tick_interval {
                let now = Instant::now();
                self.dispatch(Action::Tick(now))?;
                self.last_tick = now;
            }

            let config_events = match self.config_watcher.as_mut() {
                Some(watcher) => watcher.poll_events(),
                None => Vec::new(),
            };

            for event in config_events {
                match event {
                    ConfigEvent::Changed(path) => {
                        self.dispatch(Action::ConfigChanged(path))?;
                    }
                    ConfigEvent::Error(msg) => {
                        tracing::warn!("Config watcher error: {}", msg);
                    }
                }
            }

            if self.should_quit {
                break;
            }

            // ---- 2. Poll user input (keys/mouse/resize) ----

            if event::poll(Duration::from_millis(16)).map_err(|e| CarouselError::Terminal(e.to_string()))? {
                let event = event::read().map_err(|e| CarouselError::Terminal(e.to_string()))?;

                if let Some(action) = self.handle_event(event) {
                    self.dispatch(action)?;
                }
            }

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }
}
