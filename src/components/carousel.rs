//! Paginated carousel with optional auto-advance, advance button and
//! clickable progress dots.
//!
//! State is `(index, reset_pending)`. `reset_pending` is raised by a dot click
//! and suppresses the auto-advance timer until `interval` has elapsed. The
//! recurring timer is torn down and recreated whenever its effective delay
//! changes (armed with `interval` or suppressed), never paused.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::Span,
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::action::Action;
use crate::components::dot::Dot;
use crate::components::timer::{IntervalTimer, Timeout};
use crate::components::Component;
use crate::config::{CarouselConfig, CarouselStyle};
use crate::error::{CarouselError, Result};

const NEXT_LABEL: &str = "next";
/// Blank rows above and below the progress dots
const PROGRESS_PADDING: u16 = 1;

/// Invoked instead of wrapping when advancing past the last page.
pub type FinishCallback = Box<dyn FnMut() + Send>;

/// Outcome of a single advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTurn {
    Advanced(usize),
    Wrapped,
    Finished,
}

/// Screen regions of a rendered carousel, also used for hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselLayout {
    pub page: Rect,
    pub button: Option<Rect>,
    pub dots: Vec<Rect>,
}

pub struct Carousel<P> {
    pages: Vec<P>,
    options: CarouselConfig,
    style: CarouselStyle,
    index: usize,
    reset_pending: bool,
    auto_timer: Option<IntervalTimer>,
    suppression: Option<Timeout>,
    on_finish: Option<FinishCallback>,
    area: Rect,
}

impl<P> Carousel<P> {
    pub fn new(pages: Vec<P>, options: CarouselConfig, now: Instant) -> Result<Self> {
        options.validate()?;
        if pages.is_empty() {
            return Err(CarouselError::EmptyPages);
        }

        let auto_timer = Some(IntervalTimer::start(options.interval(), now));
        tracing::debug!(
            pages = pages.len(),
            interval_ms = options.interval_ms,
            automatic = options.automatic,
            "carousel mounted"
        );

        Ok(Self {
            pages,
            options,
            style: CarouselStyle::default(),
            index: 0,
            reset_pending: false,
            auto_timer,
            suppression: None,
            on_finish: None,
            area: Rect::default(),
        })
    }

    pub fn with_style(mut self, style: CarouselStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_on_finish(mut self, callback: FinishCallback) -> Self {
        self.on_finish = Some(callback);
        self
    }

    /// Replace the finish callback. Timers read it at fire time, so the
    /// latest callback is always the one invoked.
    pub fn set_on_finish(&mut self, callback: Option<FinishCallback>) {
        self.on_finish = callback;
    }

    pub fn has_on_finish(&self) -> bool {
        self.on_finish.is_some()
    }

    pub fn set_style(&mut self, style: CarouselStyle) {
        self.style = style;
    }

    /// Re-supply options; a changed interval takes effect on the next tick.
    pub fn set_options(&mut self, options: CarouselConfig) -> Result<()> {
        options.validate()?;
        if options != self.options {
            tracing::debug!(?options, "carousel options updated");
        }
        self.options = options;
        Ok(())
    }

    pub fn set_pages(&mut self, pages: Vec<P>) -> Result<()> {
        if pages.is_empty() {
            return Err(CarouselError::EmptyPages);
        }
        self.pages = pages;
        self.index = self.index.min(self.last_index());
        Ok(())
    }

    /// Area the carousel was last laid out in; used for mouse hit testing.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn options(&self) -> &CarouselConfig {
        &self.options
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_page(&self) -> &P {
        &self.pages[self.index]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Whether the recurring auto-advance timer currently exists.
    pub fn timer_armed(&self) -> bool {
        self.auto_timer.is_some()
    }

    fn last_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn is_last_page(&self) -> bool {
        self.index == self.last_index()
    }

    pub fn next_page(&mut self) -> PageTurn {
        if self.index < self.last_index() {
            self.index += 1;
            tracing::debug!(index = self.index, "advanced page");
            return PageTurn::Advanced(self.index);
        }

        if let Some(on_finish) = self.on_finish.as_mut() {
            tracing::debug!(index = self.index, "last page reached, invoking finish callback");
            on_finish();
            return PageTurn::Finished;
        }

        self.index = 0;
        tracing::debug!("wrapped to first page");
        PageTurn::Wrapped
    }

    /// Jump to `target` and suppress auto-advance for one interval.
    ///
    /// A click while a suppression window is pending cancels that window and
    /// starts a fresh one.
    pub fn click_page(&mut self, target: usize, now: Instant) -> Result<()> {
        if !self.options.clickable {
            return Err(CarouselError::NotClickable);
        }
        if target >= self.pages.len() {
            return Err(CarouselError::PageOutOfRange {
                index: target,
                len: self.pages.len(),
            });
        }

        self.index = target;
        self.reset_pending = true;
        self.suppression = Some(Timeout::schedule(self.options.interval(), now));
        self.sync_auto_timer(now);
        tracing::debug!(index = target, "jumped to page, auto-advance suppressed");
        Ok(())
    }

    /// Drive both timers up to `now`. Returns the number of timer-driven
    /// page turns.
    pub fn tick(&mut self, now: Instant) -> usize {
        if let Some(timeout) = self.suppression.as_mut() {
            if timeout.poll(now) {
                let cleared_at = timeout.deadline();
                self.suppression = None;
                self.reset_pending = false;
                tracing::debug!("suppression window elapsed, auto-advance re-armed");
                self.sync_auto_timer(cleared_at);
            }
        }
        self.sync_auto_timer(now);

        let fired = self.auto_timer.as_mut().map_or(0, |timer| timer.poll(now));
        if !self.options.automatic {
            return 0;
        }
        for _ in 0..fired {
            self.next_page();
        }
        fired as usize
    }

    /// Recreate the recurring timer when its effective delay changed.
    fn sync_auto_timer(&mut self, now: Instant) {
        let wanted = (!self.reset_pending).then(|| self.options.interval());
        let current = self.auto_timer.as_ref().map(IntervalTimer::period);
        if wanted == current {
            return;
        }

        self.auto_timer = wanted.map(|period| IntervalTimer::start(period, now));
        match wanted {
            Some(period) => tracing::debug!(period_ms = period.as_millis() as u64, "auto-advance timer started"),
            None => tracing::debug!("auto-advance timer cancelled"),
        }
    }

    pub fn button_label(&self) -> &str {
        if self.has_on_finish() && self.is_last_page() {
            &self.options.finish_text
        } else {
            NEXT_LABEL
        }
    }

    fn button_text(&self) -> String {
        format!("[ {} ]", self.button_label())
    }

    pub fn dot(&self, position: usize) -> Dot {
        Dot::new(self.style.dot_color(position == self.index), self.options.dot_radius)
    }

    pub fn layout(&self, area: Rect) -> CarouselLayout {
        let (dot_width, dot_height) = Dot::default().radius(self.options.dot_radius).size();
        let button_height = u16::from(self.options.advance_button);

        let [page, button_row, progress] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(button_height),
            Constraint::Length(dot_height + 2 * PROGRESS_PADDING),
        ])
        .areas(area);

        let button = self.options.advance_button.then(|| {
            let width = Span::raw(self.button_text()).width() as u16;
            let [button] = Layout::horizontal([Constraint::Length(width)])
                .flex(Flex::Center)
                .areas(button_row);
            button
        });

        let [_, dot_row, _] = Layout::vertical([
            Constraint::Length(PROGRESS_PADDING),
            Constraint::Length(dot_height),
            Constraint::Length(PROGRESS_PADDING),
        ])
        .areas(progress);

        let dots = Layout::horizontal(vec![Constraint::Length(dot_width); self.pages.len()])
            .flex(Flex::Center)
            .spacing(self.options.dot_spacing)
            .split(dot_row)
            .to_vec();

        CarouselLayout { page, button, dots }
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Enter
                if self.options.advance_button =>
            {
                Some(Action::NextPage)
            }
            KeyCode::Char(c) if self.options.clickable => match c.to_digit(10) {
                Some(digit) if digit > 0 => Some(Action::JumpToPage(digit as usize - 1)),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let position = (mouse.column, mouse.row).into();
        if !self.area.contains(position) {
            return None;
        }

        let layout = self.layout(self.area);
        if layout.button.is_some_and(|button| button.contains(position)) {
            return Some(Action::NextPage);
        }
        if !self.options.clickable {
            return None;
        }
        layout
            .dots
            .iter()
            .position(|dot| dot.contains(position))
            .map(Action::JumpToPage)
    }
}

impl<P: Widget + Clone> Component for Carousel<P> {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::Tick(now) => {
                self.tick(*now);
            }
            Action::NextPage => {
                self.next_page();
            }
            Action::JumpToPage(index) => {
                if let Err(e) = self.click_page(*index, Instant::now()) {
                    tracing::debug!("Ignored dot click: {}", e);
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let layout = self.layout(area);

        frame.render_widget(self.current_page().clone(), layout.page);

        if let Some(button) = layout.button {
            let finishing = self.has_on_finish() && self.is_last_page();
            let label = Span::styled(self.button_text(), self.style.button_style(finishing, focused));
            frame.render_widget(Paragraph::new(label), button);
        }

        for (position, dot_area) in layout.dots.iter().enumerate() {
            frame.render_widget(self.dot(position), *dot_area);
        }
    }
}
