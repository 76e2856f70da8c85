use std::path::PathBuf;

use clap::Parser;

use crate::config::{CarouselConfig, FinishBehavior};

/// Carousel-TUI: page through content with an auto-advancing terminal carousel
#[derive(Parser, Debug, Clone)]
#[command(name = "carousel-tui")]
#[command(author = "RidgetopAI")]
#[command(version)]
#[command(about = "Terminal carousel with auto-advance and clickable progress dots", long_about = None)]
pub struct Cli {
    /// Pages file: plain text, pages separated by `---` lines.
    /// Built-in demo pages are shown when omitted.
    #[arg(value_name = "FILE")]
    pub pages: Option<PathBuf>,

    /// Advance pages automatically every interval
    #[arg(short, long)]
    pub automatic: bool,

    /// Auto-advance period in milliseconds (also the pause after a dot click)
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Make progress dots clickable jump targets
    #[arg(short, long)]
    pub clickable: bool,

    /// Show the next/finish button
    #[arg(short = 'b', long)]
    pub advance_button: bool,

    /// Button label on the last page when a finish action is set
    #[arg(long, value_name = "TEXT")]
    pub finish_text: Option<String>,

    /// Quit when advancing past the last page instead of wrapping around
    #[arg(long)]
    pub quit_on_finish: bool,

    /// Theme preset (default, vibrant); overrides theme.toml
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Configuration directory (defaults to the platform config dir)
    #[arg(long, value_name = "DIR", env = "CAROUSEL_TUI_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Write default config.toml and theme.toml if missing
    #[arg(long)]
    pub write_default_config: bool,

    /// Do not watch the configuration directory for changes
    #[arg(long)]
    pub no_watch: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long, value_name = "FILE", env = "CAROUSEL_TUI_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layer command-line flags over file configuration. Flags can only
    /// switch features on; they never turn off what the file enables.
    pub fn apply_overrides(&self, config: &mut CarouselConfig) {
        config.automatic |= self.automatic;
        config.clickable |= self.clickable;
        config.advance_button |= self.advance_button;
        if let Some(interval) = self.interval {
            config.interval_ms = interval;
        }
        if let Some(ref text) = self.finish_text {
            config.finish_text = text.clone();
        }
    }

    pub fn finish_behavior(&self, configured: FinishBehavior) -> FinishBehavior {
        if self.quit_on_finish {
            FinishBehavior::Quit
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["carousel-tui"]);
        assert!(cli.pages.is_none());
        assert!(!cli.automatic);
        assert!(!cli.clickable);
        assert!(!cli.advance_button);
        assert!(cli.interval.is_none());
        assert!(!cli.quit_on_finish);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "carousel-tui",
            "deck.txt",
            "-a",
            "--interval",
            "500",
            "--clickable",
            "-b",
            "--finish-text",
            "done",
            "--quit-on-finish",
        ]);
        assert_eq!(cli.pages, Some(PathBuf::from("deck.txt")));
        assert!(cli.automatic);
        assert_eq!(cli.interval, Some(500));
        assert!(cli.clickable);
        assert!(cli.advance_button);
        assert_eq!(cli.finish_text.as_deref(), Some("done"));
        assert!(cli.quit_on_finish);
    }

    #[test]
    fn test_overrides_layer_over_config() {
        let cli = Cli::parse_from(["carousel-tui", "--automatic", "--interval", "250"]);
        let mut config = CarouselConfig {
            clickable: true,
            ..Default::default()
        };
        cli.apply_overrides(&mut config);

        assert_eq!(
            config,
            CarouselConfig {
                automatic: true,
                clickable: true,
                interval_ms: 250,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_quit_on_finish_overrides_config() {
        let cli = Cli::parse_from(["carousel-tui", "--quit-on-finish"]);
        assert_eq!(cli.finish_behavior(FinishBehavior::Notify), FinishBehavior::Quit);

        let cli = Cli::parse_from(["carousel-tui"]);
        assert_eq!(cli.finish_behavior(FinishBehavior::Notify), FinishBehavior::Notify);
    }
}
