use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use super::draw::{DrawCommand, DrawingSurface, Stroke, TextAlign, TextBaseline};
use super::geometry::Point;

const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// Collects draw commands into a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawingSurface for SvgSurface {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Clear { width, height } => {
                self.width = width;
                self.height = height;
                self.elements.clear();
            }
            DrawCommand::Wedge {
                center,
                radius,
                start_angle,
                end_angle,
                fill,
                stroke,
            } => {
                let span = end_angle - start_angle;
                let element = if span >= TAU - FULL_CIRCLE_EPSILON {
                    circle(center, radius, fill.as_str(), &stroke)
                } else {
                    let from = center.on_circle(radius, start_angle);
                    let to = center.on_circle(radius, end_angle);
                    let large_arc = u8::from(span > PI);
                    format!(
                        r#"<path d="M {cx} {cy} L {x1} {y1} A {r} {r} 0 {large_arc} 1 {x2} {y2} Z" fill="{fill}"{stroke}/>"#,
                        cx = fmt_num(center.x),
                        cy = fmt_num(center.y),
                        x1 = fmt_num(from.x),
                        y1 = fmt_num(from.y),
                        r = fmt_num(radius),
                        x2 = fmt_num(to.x),
                        y2 = fmt_num(to.y),
                        fill = escape(fill.as_str()),
                        stroke = stroke_attrs(&stroke),
                    )
                };
                self.elements.push(element);
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                self.elements
                    .push(circle(center, radius, fill.as_str(), &stroke));
            }
            DrawCommand::Text {
                text,
                position,
                font,
                color,
                align,
                baseline,
            } => {
                let anchor = match align {
                    TextAlign::Start => "start",
                    TextAlign::Center => "middle",
                    TextAlign::End => "end",
                };
                let dominant = match baseline {
                    TextBaseline::Top => "hanging",
                    TextBaseline::Middle => "middle",
                    TextBaseline::Bottom => "ideographic",
                };
                let weight = if font.bold { "bold" } else { "normal" };
                self.elements.push(format!(
                    r#"<text x="{x}" y="{y}" fill="{color}" font-family="{family}" font-size="{size}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="{dominant}">{text}</text>"#,
                    x = fmt_num(position.x),
                    y = fmt_num(position.y),
                    color = escape(color.as_str()),
                    family = escape(&font.family),
                    size = fmt_num(font.size_px),
                    text = escape(&text),
                ));
            }
        }
    }
}

fn circle(center: Point, radius: f64, fill: &str, stroke: &Stroke) -> String {
    format!(
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
        fmt_num(center.x),
        fmt_num(center.y),
        fmt_num(radius),
        escape(fill),
        stroke_attrs(stroke)
    )
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r#" stroke="{}" stroke-width="{}""#,
        escape(stroke.color.as_str()),
        fmt_num(stroke.width)
    )
}

/// Three decimals are plenty for screen units; trailing zeros dropped.
fn fmt_num(value: f64) -> String {
    let rounded = format!("{:.3}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
