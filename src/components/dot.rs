use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

pub const DEFAULT_DOT_COLOR: Color = Color::Rgb(0x6E, 0x6E, 0x6E);
pub const DEFAULT_DOT_RADIUS: u16 = 5;

/// Filled circular indicator.
///
/// One pixel is one column wide and half a row tall, so a dot of radius `r`
/// covers `2r` columns and `r` rows, drawn with half-block glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    color: Color,
    radius: u16,
}

impl Default for Dot {
    fn default() -> Self {
        Self {
            color: DEFAULT_DOT_COLOR,
            radius: DEFAULT_DOT_RADIUS,
        }
    }
}

impl Dot {
    pub fn new(color: Color, radius: u16) -> Self {
        Self { color, radius }
    }

    pub fn radius(mut self, radius: u16) -> Self {
        self.radius = radius;
        self
    }

    /// Footprint in cells as `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        (self.radius.saturating_mul(2), self.radius)
    }

    fn covers(&self, px: u16, py: u16) -> bool {
        let r = f32::from(self.radius);
        let dx = f32::from(px) + 0.5 - r;
        let dy = f32::from(py) + 0.5 - r;
        dx * dx + dy * dy <= r * r
    }

    fn glyph(&self, col: u16, row: u16) -> Option<char> {
        let top = self.covers(col, row * 2);
        let bottom = self.covers(col, row * 2 + 1);
        match (top, bottom) {
            (true, true) => Some('█'),
            (true, false) => Some('▀'),
            (false, true) => Some('▄'),
            (false, false) => None,
        }
    }
}

impl Widget for Dot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.size();
        if width == 0 || area.is_empty() {
            return;
        }

        // Center the dot in the area, then clip to it
        let origin_x = area.x + area.width.saturating_sub(width) / 2;
        let origin_y = area.y + area.height.saturating_sub(height) / 2;

        for row in 0..height.min(area.height) {
            for col in 0..width.min(area.width) {
                let Some(glyph) = self.glyph(col, row) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((origin_x + col, origin_y + row)) {
                    cell.set_char(glyph).set_fg(self.color);
                }
            }
        }
    }
}
