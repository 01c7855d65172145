//! Decorative animated backdrop.
//!
//! A field of slowly drifting dots shown in the result panel before the
//! first prediction arrives. Purely cosmetic: a deterministic function of
//! the app tick counter and the target area, with no data dependency on
//! any other component.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Number of dots in the field.
const DOT_COUNT: u64 = 36;

/// Mixes a seed into a pseudo-random 64-bit value (splitmix64 finalizer).
/// Deterministic so renders are reproducible frame to frame.
const fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// The dot-field widget. Render it before panel content; anything drawn
/// afterwards overwrites it.
pub struct Backdrop {
    tick: u64,
}

impl Backdrop {
    /// Creates a backdrop for the given animation tick.
    #[must_use]
    pub const fn new(tick: u64) -> Self {
        Self { tick }
    }
}

impl Widget for Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let width = u64::from(area.width);
        let height = u64::from(area.height);

        for i in 0..DOT_COUNT {
            let seed = mix(i.wrapping_mul(0x2545_f491_4f6c_dd1d));
            // Each dot drifts at its own rate; slower dots read as depth.
            let drift_x = self.tick / (4 + i % 5);
            let drift_y = self.tick / (9 + i % 4);

            let x = (seed % width + drift_x) % width;
            let y = ((seed >> 16) % height + drift_y) % height;

            #[allow(clippy::cast_possible_truncation)] // Moduli bound by area dimensions
            let position = (area.x + x as u16, area.y + y as u16);

            let (symbol, color) = if seed & 1 == 0 {
                ('·', Color::Indexed(62))
            } else {
                ('·', Color::Indexed(176))
            };

            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(symbol)
                    .set_style(Style::default().fg(color).add_modifier(Modifier::DIM));
            }
        }
    }
}
