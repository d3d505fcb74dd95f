// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-standing text annotations.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use log::debug;

use crate::config::shallow_patch;
use crate::error::{GuideError, Result};
use crate::location::{Anchor, Locate, Location, OffsetPoint};
use crate::mark::{GuideMark, TextAnchor, TextBaseline, TextStyle};
use crate::measure::TextMeasurer;
use crate::z_order;

const TEXT_ID_OFFSET: u64 = 0;

/// A single line of text pinned to a point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextAnnotationConfig {
    /// Stable-id base.
    pub id_base: u64,
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// The text.
    pub content: String,
    /// Text style.
    pub style: TextStyle,
    /// Horizontal alignment against the anchor.
    pub anchor: TextAnchor,
    /// Vertical alignment against the anchor.
    pub baseline: TextBaseline,
    /// Rotation in degrees, clockwise in screen space.
    pub angle: f64,
    /// Horizontal shift applied after placement.
    pub offset_x: f64,
    /// Vertical shift applied after placement.
    pub offset_y: f64,
    /// Z-index of the text mark.
    pub z_index: i32,
}

impl Default for TextAnnotationConfig {
    fn default() -> Self {
        Self {
            id_base: 0,
            x: 0.0,
            y: 0.0,
            content: String::new(),
            style: TextStyle::new(12.0),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Bottom,
            angle: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            z_index: z_order::ANNOTATIONS,
        }
    }
}

impl TextAnnotationConfig {
    /// Creates an annotation reading `content` at `(x, y)`.
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Sets the stable-id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the text style.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the alignment against the anchor.
    pub fn with_alignment(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    /// Rotates the text.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Shifts the text after placement.
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Overrides the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Measures the text and places it.
    ///
    /// Fails with [`GuideError::InvalidGeometry`] when the anchor is not finite.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> Result<TextAnnotationLayout> {
        let Anchor::Point(position) = self.location().resolve(OffsetPoint::default())? else {
            return Err(GuideError::InvalidGeometry("annotation must resolve to a point"));
        };
        let offset = Vec2::new(self.offset_x, self.offset_y);
        let size = measurer.measure(&self.content, self.style.font_size);
        let bounds = text_box(position + offset, size, self.anchor, self.baseline);
        debug!(chars = self.content.chars().count(); "laid out text annotation");
        Ok(TextAnnotationLayout {
            id_base: self.id_base,
            position,
            offset,
            text: self.content.clone(),
            anchor: self.anchor,
            baseline: self.baseline,
            angle: self.angle,
            size,
            bounds,
            z_index: self.z_index,
            style: self.style.clone(),
        })
    }
}

impl Locate for TextAnnotationConfig {
    fn location(&self) -> Location {
        Location::Point(Point::new(self.x, self.y))
    }
}

/// The unrotated box of text aligned at `position`.
fn text_box(position: Point, size: Size, anchor: TextAnchor, baseline: TextBaseline) -> Rect {
    let x0 = match anchor {
        TextAnchor::Start => position.x,
        TextAnchor::Middle => position.x - 0.5 * size.width,
        TextAnchor::End => position.x - size.width,
    };
    let y0 = match baseline {
        TextBaseline::Top => position.y,
        TextBaseline::Middle => position.y - 0.5 * size.height,
        TextBaseline::Bottom => position.y - size.height,
    };
    Rect::from_origin_size((x0, y0), size)
}

/// A placed annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotationLayout {
    /// Stable-id base copied from the config.
    pub id_base: u64,
    /// The configured anchor, before `offset`.
    pub position: Point,
    /// Shift applied to the emitted mark.
    pub offset: Vec2,
    /// The text.
    pub text: String,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation in degrees.
    pub angle: f64,
    /// Measured text extent.
    pub size: Size,
    /// Unrotated text box, offset included.
    pub bounds: Rect,
    z_index: i32,
    style: TextStyle,
}

impl TextAnnotationLayout {
    /// Converts the layout into one text mark.
    pub fn marks(&self) -> Vec<GuideMark> {
        let mut text = GuideMark::text(
            self.id_base + TEXT_ID_OFFSET,
            self.z_index,
            self.position,
            self.text.clone(),
            self.anchor,
            self.baseline,
            self.angle,
            &self.style,
        );
        text.translate(self.offset.x, self.offset.y);
        alloc::vec![text]
    }
}

shallow_patch! {
    /// Partial [`TextAnnotationConfig`]; each provided key replaces the default wholesale.
    TextAnnotationPatch for TextAnnotationConfig {
        /// See [`TextAnnotationConfig::id_base`].
        id_base => id_base: u64,
        /// See [`TextAnnotationConfig::x`].
        x => x: f64,
        /// See [`TextAnnotationConfig::y`].
        y => y: f64,
        /// See [`TextAnnotationConfig::content`].
        content => content: String,
        /// See [`TextAnnotationConfig::style`].
        style => style: TextStyle,
        /// See [`TextAnnotationConfig::anchor`].
        anchor => anchor: TextAnchor,
        /// See [`TextAnnotationConfig::baseline`].
        baseline => baseline: TextBaseline,
        /// See [`TextAnnotationConfig::angle`].
        angle => angle: f64,
        /// See [`TextAnnotationConfig::offset_x`].
        offset_x => offset_x: f64,
        /// See [`TextAnnotationConfig::offset_y`].
        offset_y => offset_y: f64,
        /// See [`TextAnnotationConfig::z_index`].
        z_index => z_index: i32,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::merge_with_defaults;
    use crate::mark::MarkShape;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn offset_shifts_the_single_text_mark() {
        let layout = TextAnnotationConfig::new(40.0, 60.0, "peak")
            .with_id_base(700)
            .with_offset(5.0, -10.0)
            .layout(&HeuristicTextMeasurer)
            .unwrap();
        assert_eq!(layout.position, Point::new(40.0, 60.0));
        let marks = layout.marks();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].id.0, 700);
        assert_eq!(marks[0].z_index, z_order::ANNOTATIONS);
        assert!(matches!(
            &marks[0].shape,
            MarkShape::Text { position, text, .. }
                if *position == Point::new(45.0, 50.0) && text == "peak"
        ));
    }

    #[test]
    fn bounds_follow_the_alignment() {
        // "abcd" at 10px measures 24 x 10.
        let layout = TextAnnotationConfig::new(100.0, 50.0, "abcd")
            .with_style(TextStyle::new(10.0))
            .with_alignment(TextAnchor::Middle, TextBaseline::Top)
            .with_offset(0.0, 2.0)
            .layout(&HeuristicTextMeasurer)
            .unwrap();
        assert_eq!(layout.bounds, Rect::new(88.0, 52.0, 112.0, 62.0));

        let default = TextAnnotationConfig::new(0.0, 20.0, "abcd")
            .with_style(TextStyle::new(10.0))
            .layout(&HeuristicTextMeasurer)
            .unwrap();
        assert_eq!(default.bounds, Rect::new(0.0, 10.0, 24.0, 20.0));
    }

    #[test]
    fn z_index_can_be_raised_above_tooltips() {
        let layout = TextAnnotationConfig::new(0.0, 0.0, "note")
            .with_z_index(z_order::TOOLTIP + 1)
            .layout(&HeuristicTextMeasurer)
            .unwrap();
        assert_eq!(layout.marks()[0].z_index, z_order::TOOLTIP + 1);
    }

    #[test]
    fn non_finite_anchor_is_rejected() {
        let err = TextAnnotationConfig::new(f64::NAN, 0.0, "x")
            .layout(&HeuristicTextMeasurer)
            .unwrap_err();
        assert!(matches!(err, GuideError::InvalidGeometry(_)));
    }

    #[test]
    fn patch_replaces_content_and_keeps_defaults() {
        let config: TextAnnotationConfig = merge_with_defaults(TextAnnotationPatch {
            content: Some("max".into()),
            anchor: Some(TextAnchor::End),
            ..Default::default()
        });
        assert_eq!(config.content, "max");
        assert_eq!(config.anchor, TextAnchor::End);
        assert_eq!(config.baseline, TextBaseline::Bottom);
        assert_eq!(config.z_index, z_order::ANNOTATIONS);
    }
}
