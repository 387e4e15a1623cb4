//! Cycling colors for per-package log prefixes.

use crate::util::logger::paint;

/// Palette used for package prefixes, in cycle order.
///
/// Black and dark blue are left out; they are unreadable on most terminals.
pub const PALETTE: &[&str] = &[
    "\x1b[92m", // green bright
    "\x1b[93m", // yellow bright
    "\x1b[95m", // magenta bright
    "\x1b[96m", // cyan bright
    "\x1b[97m", // white bright
    "\x1b[91m", // red bright
    "\x1b[94m", // blue bright
    "\x1b[32m", // green
    "\x1b[33m", // yellow
    "\x1b[35m", // magenta
    "\x1b[36m", // cyan
    "\x1b[37m", // white
    "\x1b[31m", // red
];

/// Hands out palette colors in order, wrapping at the end, so consecutive
/// packages never share a color.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    next: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        ColorCycle { next: 0 }
    }

    /// Return the next color code and advance.
    pub fn next_color(&mut self) -> &'static str {
        let color = PALETTE[self.next];
        self.next = (self.next + 1) % PALETTE.len();
        color
    }

    /// Paint `text` with the next color (advancing even when disabled, so the
    /// sequence does not depend on the terminal).
    pub fn apply(&mut self, text: &str, enabled: bool) -> String {
        let color = self.next_color();
        paint(text, color, enabled)
    }
}
