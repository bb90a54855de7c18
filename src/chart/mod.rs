//! Chart rendering: terminal ASCII figures plus SVG export

pub mod ascii;
mod style;
pub mod svg;

pub use ascii::{render_category_bars, render_time_chart, SeriesKind, SeriesSpec};
pub use style::ChartStyle;
pub use svg::{write_category_bars_svg, write_time_chart_svg};
