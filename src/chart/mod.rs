//! Donut-style pie chart of category totals.
//!
//! Geometry is pure math over [`CategoryTotals`](crate::stats::CategoryTotals);
//! rendering turns it into backend-neutral [`DrawCommand`]s that any 2D
//! immediate-mode surface can replay. An SVG surface ships with the crate.

pub mod draw;
pub mod geometry;
pub mod svg;

pub use draw::{
    ChartRenderer, Color, CommandBuffer, DrawCommand, DrawingSurface, Font, Palette, Stroke,
    TextAlign, TextBaseline,
};
pub use geometry::{wedges, ChartGeometry, Point, Wedge, HOLE_RATIO, START_ANGLE};
pub use svg::SvgSurface;
