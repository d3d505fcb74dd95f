// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of guide marks for `guidepost_demo`.

use std::fmt::Write as _;

use guidepost::{GuideMark, MarkShape, Paint, TextAnchor, TextBaseline};
use kurbo::{Rect, Shape};
use peniko::Brush;
use peniko::color::Srgb;

/// Marks collected for one SVG document, in render order.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: Vec<GuideMark>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn extend(&mut self, marks: impl IntoIterator<Item = GuideMark>) {
        self.marks.extend(marks);
        self.marks.sort_by_key(|m| (m.z_index, m.id));
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = match (self.view_box, self.bounds()) {
            (Some(a), Some(b)) => a.union(b),
            (a, b) => a.or(b).unwrap_or(Rect::new(0.0, 0.0, 100.0, 100.0)),
        };
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );

        let mut defs = String::new();
        let mut body = String::new();
        for mark in &self.marks {
            write_mark(&mut body, &mut defs, mark);
        }
        if !defs.is_empty() {
            let _ = writeln!(out, "<defs>\n{defs}</defs>");
        }
        out.push_str(&body);
        out.push_str("</svg>\n");
        out
    }

    fn bounds(&self) -> Option<Rect> {
        self.marks
            .iter()
            .map(|mark| match &mark.shape {
                MarkShape::Line { from, to } => Rect::from_points(*from, *to),
                MarkShape::Path(path) => path.bounding_box(),
                MarkShape::Rect(rect) => *rect,
                MarkShape::Circle { center, radius } => {
                    Rect::from_center_size(*center, (2.0 * radius, 2.0 * radius))
                }
                MarkShape::Text {
                    position,
                    text,
                    anchor,
                    baseline,
                    font_size,
                    ..
                } => estimate_text_bounds(*position, *font_size, *anchor, *baseline, text),
            })
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(10.0, 10.0))
    }
}

fn write_mark(out: &mut String, defs: &mut String, mark: &GuideMark) {
    let id = mark.id.0;
    match &mark.shape {
        MarkShape::Line { from, to } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                from.x, from.y, to.x, to.y
            );
        }
        MarkShape::Path(path) => {
            let _ = write!(out, r#"<path d="{}""#, path.to_svg());
        }
        MarkShape::Rect(rect) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            );
        }
        MarkShape::Circle { center, radius } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{radius}""#,
                center.x, center.y
            );
        }
        MarkShape::Text {
            position,
            text,
            anchor,
            baseline,
            angle,
            font_size,
        } => {
            let baseline = match baseline {
                TextBaseline::Top => "hanging",
                TextBaseline::Middle => "middle",
                TextBaseline::Bottom => "text-after-edge",
            };
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{font_size}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
                position.x, position.y
            );
            if *angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({angle} {} {})""#,
                    position.x, position.y
                );
            }
            write_paint(out, defs, id, &mark.paint);
            let _ = writeln!(out, ">{}</text>", escape_xml(text));
            return;
        }
    }
    write_paint(out, defs, id, &mark.paint);
    out.push_str("/>\n");
}

fn write_paint(out: &mut String, defs: &mut String, id: u64, paint: &Paint) {
    match &paint.fill {
        Some(brush) => write_brush_attr(out, defs, id, "fill", brush),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &paint.stroke {
        write_brush_attr(out, defs, id, "stroke", &stroke.brush);
        let _ = write!(out, r#" stroke-width="{}""#, stroke.stroke_width);
    }
}

fn write_brush_attr(out: &mut String, defs: &mut String, id: u64, name: &str, brush: &Brush) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let _ = write!(
                out,
                r##" {name}="#{:02x}{:02x}{:02x}""##,
                rgba.r, rgba.g, rgba.b
            );
            if rgba.a != 255 {
                let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
            }
        }
        Brush::Gradient(gradient) => {
            // The demo only draws horizontal rails.
            let gradient_id = format!("g{id}-{name}");
            let _ = writeln!(defs, r#"<linearGradient id="{gradient_id}">"#);
            for stop in gradient.stops.iter() {
                let rgba = stop.color.to_alpha_color::<Srgb>().to_rgba8();
                let _ = writeln!(
                    defs,
                    r##"<stop offset="{}" stop-color="#{:02x}{:02x}{:02x}"/>"##,
                    stop.offset, rgba.r, rgba.g, rgba.b
                );
            }
            defs.push_str("</linearGradient>\n");
            let _ = write!(out, r#" {name}="url(#{gradient_id})""#);
        }
        _ => {
            let _ = write!(out, r#" {name}="none""#);
        }
    }
}

fn estimate_text_bounds(
    position: kurbo::Point,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    text: &str,
) -> Rect {
    let width = 0.6 * font_size * text.chars().count() as f64;
    let x0 = match anchor {
        TextAnchor::Start => position.x,
        TextAnchor::Middle => position.x - 0.5 * width,
        TextAnchor::End => position.x - width,
    };
    let y0 = match baseline {
        TextBaseline::Top => position.y,
        TextBaseline::Middle => position.y - 0.5 * font_size,
        TextBaseline::Bottom => position.y - font_size,
    };
    Rect::new(x0, y0, x0 + width, y0 + font_size)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
