// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw instructions handed to the rendering collaborator.
//!
//! Layout results convert into a flat list of [`GuideMark`]s. Each mark has a stable id (a
//! deterministic offset from the component's `id_base`) and a z-index from [`crate::z_order`],
//! so renderers can diff and sort them without knowing which guide produced them.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::geometry::{Marker, MarkerSymbol};

/// A stable identifier for a generated mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// A paint + width pair for stroked paths (axis lines, ticks, gridlines, crosshairs).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Text styling used for labels and titles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Fill paint.
    pub fill: Brush,
    /// Font size in scene coordinates.
    pub font_size: f64,
}

impl TextStyle {
    /// Creates a black text style with the given size.
    pub fn new(font_size: f64) -> Self {
        Self {
            fill: css::BLACK.into(),
            font_size,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Horizontal text alignment relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical text alignment relative to the text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextBaseline {
    /// The position is the top of the text.
    Top,
    /// The position is the vertical center of the text.
    Middle,
    /// The position is the bottom of the text.
    Bottom,
}

/// Geometry of a single mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkShape {
    /// A straight segment.
    Line {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
    },
    /// An arbitrary path (polylines, arcs, bands, ramps).
    Path(BezPath),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// A single line of text.
    Text {
        /// Anchor position.
        position: Point,
        /// Unshaped text.
        text: String,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Vertical alignment.
        baseline: TextBaseline,
        /// Rotation in degrees around `position`.
        angle: f64,
        /// Font size.
        font_size: f64,
    },
}

/// How a mark is painted.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Paint {
    /// Fill paint, if filled.
    pub fill: Option<Brush>,
    /// Stroke, if stroked.
    pub stroke: Option<StrokeStyle>,
}

impl Paint {
    /// A stroke-only paint.
    pub fn stroked(stroke: &StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke.clone()),
        }
    }

    /// A fill-only paint.
    pub fn filled(fill: impl Into<Brush>) -> Self {
        Self {
            fill: Some(fill.into()),
            stroke: None,
        }
    }
}

/// One draw instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideMark {
    /// Stable identity for diffing.
    pub id: MarkId,
    /// Render order hint; sort by `(z_index, id)`.
    pub z_index: i32,
    /// Geometry.
    pub shape: MarkShape,
    /// Paint.
    pub paint: Paint,
}

impl GuideMark {
    /// Creates a mark.
    pub fn new(id: u64, z_index: i32, shape: MarkShape, paint: Paint) -> Self {
        Self {
            id: MarkId::from_raw(id),
            z_index,
            shape,
            paint,
        }
    }

    /// Creates a stroked segment.
    pub fn line(id: u64, z_index: i32, from: Point, to: Point, stroke: &StrokeStyle) -> Self {
        Self::new(id, z_index, MarkShape::Line { from, to }, Paint::stroked(stroke))
    }

    /// Creates a text mark.
    pub fn text(
        id: u64,
        z_index: i32,
        position: Point,
        text: impl Into<String>,
        anchor: TextAnchor,
        baseline: TextBaseline,
        angle: f64,
        style: &TextStyle,
    ) -> Self {
        Self::new(
            id,
            z_index,
            MarkShape::Text {
                position,
                text: text.into(),
                anchor,
                baseline,
                angle,
                font_size: style.font_size,
            },
            Paint::filled(style.fill.clone()),
        )
    }

    /// Creates a legend or tooltip marker centered on `center`.
    pub fn marker(id: u64, z_index: i32, marker: &Marker, center: Point) -> Self {
        let half = 0.5 * marker.size;
        match marker.symbol {
            MarkerSymbol::Circle => Self::new(
                id,
                z_index,
                MarkShape::Circle {
                    center,
                    radius: half,
                },
                Paint::filled(marker.fill),
            ),
            MarkerSymbol::Square => Self::new(
                id,
                z_index,
                MarkShape::Rect(Rect::from_center_size(center, (marker.size, marker.size))),
                Paint::filled(marker.fill),
            ),
            MarkerSymbol::Line => Self::line(
                id,
                z_index,
                Point::new(center.x - half, center.y),
                Point::new(center.x + half, center.y),
                &StrokeStyle::solid(marker.fill, 2.0),
            ),
        }
    }

    /// Translates the mark's geometry by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let offset = kurbo::Vec2::new(dx, dy);
        match &mut self.shape {
            MarkShape::Line { from, to } => {
                *from += offset;
                *to += offset;
            }
            MarkShape::Path(path) => {
                path.apply_affine(kurbo::Affine::translate(offset));
            }
            MarkShape::Rect(rect) => *rect = *rect + offset,
            MarkShape::Circle { center, .. } => *center += offset,
            MarkShape::Text { position, .. } => *position += offset,
        }
    }
}
