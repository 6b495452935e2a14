use std::f64::consts::{FRAC_PI_2, TAU};

use crate::domain::Category;
use crate::stats::CategoryTotals;

/// First wedge starts at 12 o'clock in screen coordinates (y grows down).
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Donut hole radius relative to the outer radius.
pub const HOLE_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on the circle of `radius` around `self` at `angle` radians.
    pub fn on_circle(self, radius: f64, angle: f64) -> Point {
        Point::new(
            self.x + radius * angle.cos(),
            self.y + radius * angle.sin(),
        )
    }
}

/// Placement of the chart on its drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
}

impl ChartGeometry {
    /// Centers the circle and shrinks it by `margin` so it never touches the
    /// surface bounds.
    pub fn for_surface(width: f64, height: f64, margin: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        let radius = (center.x.min(center.y) - margin).max(0.0);
        Self {
            width,
            height,
            center,
            radius,
        }
    }

    pub fn hole_radius(&self) -> f64 {
        self.radius * HOLE_RATIO
    }
}

/// Angular slice for one category, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub category: Category,
    pub amount: u64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Wedge {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn span_degrees(&self) -> f64 {
        self.span().to_degrees()
    }

    pub fn start_degrees(&self) -> f64 {
        self.start_angle.to_degrees()
    }

    /// Share of the whole circle in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        self.span() / TAU
    }
}

/// Lays out wedges in first-seen category order, skipping non-positive
/// totals. Each wedge starts where the previous one ended, so the spans
/// close the circle without gaps.
pub fn wedges(totals: &CategoryTotals) -> Vec<Wedge> {
    let total = totals.sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = START_ANGLE;
    let mut out = Vec::with_capacity(totals.len());
    for entry in totals.iter().filter(|entry| entry.amount > 0) {
        let span = entry.amount as f64 / total as f64 * TAU;
        out.push(Wedge {
            category: entry.category,
            amount: entry.amount,
            start_angle: angle,
            end_angle: angle + span,
        });
        angle += span;
    }
    out
}
