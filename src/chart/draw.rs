use std::collections::BTreeMap;
use std::fmt;

use crate::config::ChartSettings;
use crate::currency::AmountFormatter;
use crate::domain::Category;
use crate::stats::CategoryTotals;

use super::geometry::{wedges, ChartGeometry, Point};

const WEDGE_BORDER: &str = "#ffffff";
const HOLE_FILL: &str = "#ffffff";
const HOLE_BORDER: &str = "#e9ecef";
const TEXT_COLOR: &str = "#2c3e50";
const BORDER_WIDTH: f64 = 2.0;
const FONT_FAMILY: &str = "Arial";
const LABEL_FONT_PX: f64 = 16.0;
const AMOUNT_FONT_PX: f64 = 20.0;
const LABEL_OFFSET_Y: f64 = -8.0;
const AMOUNT_OFFSET_Y: f64 = 12.0;
const CENTER_LABEL: &str = "Total";

/// CSS-style color string such as `#ff6b6b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(pub String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Channels of a `#rrggbb` value; `None` for any other notation.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
    pub bold: bool,
}

impl Font {
    fn bold(size_px: f64) -> Self {
        Self {
            family: FONT_FAMILY.to_string(),
            size_px,
            bold: true,
        }
    }

    /// Canvas-style shorthand, e.g. `bold 16px Arial`.
    pub fn css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{weight}{}px {}", self.size_px, self.family)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Backend-neutral drawing instruction. Angles are radians, clockwise on
/// screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Wedge {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Color,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Stroke,
    },
    Text {
        text: String,
        position: Point,
        font: Font,
        color: Color,
        align: TextAlign,
        baseline: TextBaseline,
    },
}

/// Anything that can replay draw commands.
pub trait DrawingSurface {
    fn draw(&mut self, command: DrawCommand);
}

/// Surface that only records what was drawn.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl DrawingSurface for CommandBuffer {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Fill color per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<Category, Color>,
}

impl Palette {
    /// Used for any category without an entry.
    pub const NEUTRAL: &'static str = "#cccccc";

    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: &BTreeMap<Category, String>) -> Self {
        for (category, color) in overrides {
            self.colors.insert(*category, Color::new(color.as_str()));
        }
        self
    }

    pub fn set(&mut self, category: Category, color: Color) {
        self.colors.insert(category, color);
    }

    pub fn color_for(&self, category: Category) -> Color {
        self.colors
            .get(&category)
            .cloned()
            .unwrap_or_else(|| Color::new(Self::NEUTRAL))
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut palette = Self::empty();
        palette.set(Category::Food, Color::new("#ff6b6b"));
        palette.set(Category::Entertain, Color::new("#4ecdc4"));
        palette.set(Category::Travel, Color::new("#45b7d1"));
        palette.set(Category::Utility, Color::new("#96ceb4"));
        palette
    }
}

/// Turns category totals into chart draw commands.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRenderer {
    pub geometry: ChartGeometry,
    pub palette: Palette,
}

impl ChartRenderer {
    pub fn new(geometry: ChartGeometry, palette: Palette) -> Self {
        Self { geometry, palette }
    }

    pub fn from_settings(settings: &ChartSettings) -> Self {
        Self::new(
            ChartGeometry::for_surface(settings.width, settings.height, settings.margin),
            Palette::default().with_overrides(&settings.palette),
        )
    }

    pub fn render(
        &self,
        totals: &CategoryTotals,
        formatter: &dyn AmountFormatter,
    ) -> Vec<DrawCommand> {
        let mut buffer = CommandBuffer::default();
        self.render_to(totals, formatter, &mut buffer);
        buffer.commands
    }

    /// Clears the surface, then draws wedges, the donut hole and the center
    /// total. An all-zero total leaves the surface cleared.
    pub fn render_to(
        &self,
        totals: &CategoryTotals,
        formatter: &dyn AmountFormatter,
        surface: &mut dyn DrawingSurface,
    ) {
        let geometry = &self.geometry;
        surface.draw(DrawCommand::Clear {
            width: geometry.width,
            height: geometry.height,
        });

        let total = totals.sum();
        if total == 0 {
            return;
        }

        let slices = wedges(totals);
        for wedge in &slices {
            surface.draw(DrawCommand::Wedge {
                center: geometry.center,
                radius: geometry.radius,
                start_angle: wedge.start_angle,
                end_angle: wedge.end_angle,
                fill: self.palette.color_for(wedge.category),
                stroke: Stroke {
                    color: Color::new(WEDGE_BORDER),
                    width: BORDER_WIDTH,
                },
            });
        }

        surface.draw(DrawCommand::Circle {
            center: geometry.center,
            radius: geometry.hole_radius(),
            fill: Color::new(HOLE_FILL),
            stroke: Stroke {
                color: Color::new(HOLE_BORDER),
                width: BORDER_WIDTH,
            },
        });

        let center = geometry.center;
        surface.draw(center_text(
            CENTER_LABEL.to_string(),
            Point::new(center.x, center.y + LABEL_OFFSET_Y),
            Font::bold(LABEL_FONT_PX),
        ));
        surface.draw(center_text(
            formatter.format_amount(total),
            Point::new(center.x, center.y + AMOUNT_OFFSET_Y),
            Font::bold(AMOUNT_FONT_PX),
        ));

        tracing::debug!(wedges = slices.len(), total, "chart rendered");
    }
}

fn center_text(text: String, position: Point, font: Font) -> DrawCommand {
    DrawCommand::Text {
        text,
        position,
        font,
        color: Color::new(TEXT_COLOR),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    }
}
