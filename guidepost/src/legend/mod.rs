// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend layout.
//!
//! Both legend kinds are anchored at a point (`x`, `y`) and share a [`LegendBase`]: direction,
//! an optional title above the content, and an optional background box. When a background is
//! set, `(x, y)` is its top-left corner and the content is inset by the padding; otherwise
//! `(x, y)` is the top-left corner of the title (or of the content when there is no title).

mod category;
mod continuous;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;

use crate::location::{Locate, Location};
use crate::mark::{GuideMark, MarkShape, Paint, StrokeStyle, TextAnchor, TextBaseline, TextStyle};
use crate::measure::TextMeasurer;
use crate::z_order;

pub use category::{
    CategoryLegendConfig, CategoryLegendLayout, CategoryLegendPatch, ItemFormatter,
    LegendItemLayout, LegendItemNameConfig, LegendItemValueConfig, LegendMarkerConfig,
    PlacedText,
};
pub use continuous::{
    ContinuousLabelConfig, ContinuousLegend, ContinuousLegendConfig, ContinuousLegendLayout,
    ContinuousLegendPatch, HandleLayout, HandlerConfig, LabelAlign, RailConfig, RailMapping,
    RailType, TrackConfig,
};

const BACKGROUND_ID_OFFSET: u64 = 0;
const TITLE_ID_OFFSET: u64 = 1;

/// Direction legend content flows in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendDirection {
    /// Left to right (wrapping into rows for category legends).
    #[default]
    Horizontal,
    /// Top to bottom (wrapping into columns for category legends).
    Vertical,
}

/// Legend title.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendTitleConfig {
    /// Title text.
    pub text: String,
    /// Gap between the title and the legend content.
    pub spacing: f64,
    /// Text style.
    pub style: TextStyle,
}

impl LegendTitleConfig {
    /// Creates a title with default spacing and style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spacing: 6.0,
            style: TextStyle::new(12.0),
        }
    }
}

/// Legend background box.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendBackgroundConfig {
    /// Padding as `[top, right, bottom, left]`.
    pub padding: [f64; 4],
    /// Fill color.
    pub fill: Color,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
}

impl LegendBackgroundConfig {
    /// Uniform padding on every side.
    pub fn uniform(padding: f64) -> Self {
        Self {
            padding: [padding; 4],
            ..Default::default()
        }
    }
}

impl Default for LegendBackgroundConfig {
    fn default() -> Self {
        Self {
            padding: [4.0; 4],
            fill: css::WHITE,
            stroke: None,
        }
    }
}

/// Settings shared by category and continuous legends.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendBase {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Flow direction.
    pub layout: LegendDirection,
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Title, if any.
    pub title: Option<LegendTitleConfig>,
    /// Background box, if any.
    pub background: Option<LegendBackgroundConfig>,
    /// Horizontal translation applied after layout.
    pub offset_x: f64,
    /// Vertical translation applied after layout.
    pub offset_y: f64,
}

impl Locate for LegendBase {
    fn location(&self) -> Location {
        Location::Point(Point::new(self.x, self.y))
    }
}

/// The placed legend title.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendTitle {
    /// Title text.
    pub text: String,
    /// Top-left corner.
    pub position: Point,
    /// Measured extent.
    pub size: Size,
}

/// Title and background placement shared by both legend kinds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LegendFrame {
    /// Top-left corner available to the legend content.
    pub(crate) content_origin: Point,
    pub(crate) title: Option<LegendTitle>,
    pub(crate) title_style: Option<TextStyle>,
    pub(crate) background: Option<(Rect, LegendBackgroundConfig)>,
}

impl LegendFrame {
    /// Places the title at `anchor` and reserves room for it above the content.
    pub(crate) fn open(base: &LegendBase, anchor: Point, measurer: &dyn TextMeasurer) -> Self {
        let mut cursor = anchor + kurbo::Vec2::new(base.offset_x, base.offset_y);
        if let Some(bg) = &base.background {
            cursor += kurbo::Vec2::new(bg.padding[3], bg.padding[0]);
        }
        let title = base.title.as_ref().map(|t| {
            let size = measurer.measure(&t.text, t.style.font_size);
            let placed = LegendTitle {
                text: t.text.clone(),
                position: cursor,
                size,
            };
            cursor.y += size.height + t.spacing;
            placed
        });
        Self {
            content_origin: cursor,
            title,
            title_style: base.title.as_ref().map(|t| t.style.clone()),
            background: None,
        }
    }

    /// Sizes the background around the title and `content`.
    pub(crate) fn close(&mut self, base: &LegendBase, content: Rect) {
        let Some(bg) = &base.background else {
            return;
        };
        let mut bounds = content;
        if let Some(title) = &self.title {
            bounds = bounds.union(Rect::from_origin_size(title.position, title.size));
        }
        let [top, right, bottom, left] = bg.padding;
        let rect = Rect::new(
            bounds.x0 - left,
            bounds.y0 - top,
            bounds.x1 + right,
            bounds.y1 + bottom,
        );
        self.background = Some((rect, bg.clone()));
    }

    /// The outer bounds: the background if present, otherwise title plus `content`.
    pub(crate) fn bounds(&self, content: Rect) -> Rect {
        if let Some((rect, _)) = &self.background {
            return *rect;
        }
        match &self.title {
            Some(title) => content.union(Rect::from_origin_size(title.position, title.size)),
            None => content,
        }
    }

    pub(crate) fn marks(&self, id_base: u64, out: &mut Vec<GuideMark>) {
        if let Some((rect, bg)) = &self.background {
            out.push(GuideMark::new(
                id_base + BACKGROUND_ID_OFFSET,
                z_order::LEGEND_BACKGROUND,
                MarkShape::Rect(*rect),
                Paint {
                    fill: Some(bg.fill.into()),
                    stroke: bg.stroke.clone(),
                },
            ));
        }
        if let (Some(title), Some(style)) = (&self.title, &self.title_style) {
            out.push(GuideMark::text(
                id_base + TITLE_ID_OFFSET,
                z_order::LEGEND_LABELS,
                title.position,
                title.text.clone(),
                TextAnchor::Start,
                TextBaseline::Top,
                0.0,
                style,
            ));
        }
    }
}

/// Builder methods shared by the legend configs through their embedded [`LegendBase`].
macro_rules! legend_builders {
    ($config:ty) => {
        impl $config {
            /// Sets the stable-id base.
            pub fn with_id_base(mut self, id_base: u64) -> Self {
                self.base.id_base = id_base;
                self
            }

            /// Sets the flow direction.
            pub fn with_layout(mut self, layout: $crate::legend::LegendDirection) -> Self {
                self.base.layout = layout;
                self
            }

            /// Sets the anchor point.
            pub fn with_position(mut self, x: f64, y: f64) -> Self {
                self.base.x = x;
                self.base.y = y;
                self
            }

            /// Sets the title.
            pub fn with_title(mut self, title: $crate::legend::LegendTitleConfig) -> Self {
                self.base.title = Some(title);
                self
            }

            /// Sets the background box.
            pub fn with_background(
                mut self,
                background: $crate::legend::LegendBackgroundConfig,
            ) -> Self {
                self.base.background = Some(background);
                self
            }

            /// Translates the legend after layout.
            pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
                self.base.offset_x = offset_x;
                self.base.offset_y = offset_y;
                self
            }
        }
    };
}

pub(crate) use legend_builders;
