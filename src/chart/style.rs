//! Global chart style
//!
//! The analyses share one style struct the way the original reports shared a
//! single plot-settings block; binaries construct it once and pass it to
//! every figure.

/// Style shared by every rendered figure
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Plot area width in columns
    pub width: usize,
    /// Plot area height in rows
    pub height: usize,
    /// Draw a vertical guide every this many months (0 disables)
    pub guide_every: usize,
    /// Draw a horizontal gridline at zero when the y-range spans it
    pub zero_line: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 96,
            height: 20,
            guide_every: 4,
            zero_line: false,
        }
    }
}

impl ChartStyle {
    /// Style for variance panels: zero-centered with a zero gridline
    pub fn variance_panel() -> Self {
        Self {
            zero_line: true,
            ..Self::default()
        }
    }
}
