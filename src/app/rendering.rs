// Rendering - draw() method and chrome lines

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::App;
use crate::components::Component;
use crate::config::Theme;
use crate::error::{CarouselError, Result};

impl App {
    pub(super) fn draw(&mut self) -> Result<()> {
        let header = self.header_line();
        let footer = self.footer_line();
        let block = body_block(&self.theme, self.focused);
        let focused = self.focused;
        let carousel = &mut self.carousel;

        self.terminal
            .draw(|frame| {
                let [header_area, body, footer_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .areas(frame.area());

                frame.render_widget(Paragraph::new(header), header_area);

                let inner = block.inner(body);
                frame.render_widget(block, body);

                carousel.set_area(inner);
                carousel.render(frame, inner, focused);

                frame.render_widget(Paragraph::new(footer), footer_area);
            })
            .map_err(|e| CarouselError::Terminal(e.to_string()))?;

        Ok(())
    }

    fn header_line(&self) -> Line<'static> {
        header_line(
            &self.theme,
            self.carousel.current_index(),
            self.carousel.page_count(),
            self.carousel.options().automatic,
            !self.carousel.timer_armed(),
        )
    }

    fn footer_line(&self) -> Line<'static> {
        let options = self.carousel.options();
        let mut hints = vec!["q quit"];
        if options.advance_button {
            hints.push("n/→ next");
        }
        if options.clickable {
            hints.push("1-9/click jump");
        }

        let mut spans = vec![Span::styled(hints.join("  "), self.theme.muted_style())];
        if let Some(ref status) = self.status {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                status.clone(),
                Style::default().fg(self.theme.colors.success.to_color()),
            ));
        }
        Line::from(spans)
    }
}

/// Frame around the carousel; dimmed while the terminal is unfocused.
fn body_block(theme: &Theme, focused: bool) -> Block<'static> {
    Block::default()
        .title(" carousel ")
        .title_style(theme.title_style(focused))
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .style(Style::default().bg(theme.colors.background.to_color()))
}

fn header_line(theme: &Theme, index: usize, count: usize, automatic: bool, paused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" Page {}/{}", index + 1, count),
        Style::default().fg(theme.colors.foreground.to_color()),
    )];

    let mode = match (automatic, paused) {
        (true, true) => Some("auto (paused)"),
        (true, false) => Some("auto"),
        (false, _) => None,
    };
    if let Some(mode) = mode {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(mode, Style::default().fg(theme.colors.accent.to_color())));
    }
    Line::from(spans)
}
