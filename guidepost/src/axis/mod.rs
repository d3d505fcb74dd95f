// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layout.
//!
//! A linear axis runs along a segment, a circular axis along an arc. Both share one engine:
//! the geometry is abstracted by [`AxisShape`] (position, tangent and normal at a normalized
//! position `t`), and [`layout_axis`] places ticks, sub-ticks, labels and the title against
//! any shape. The side everything is drawn on is selected by [`AxisBase::vertical_factor`].
//!
//! Tick values come from the scale collaborator as [`ListItem`]s whose numeric value is the
//! normalized position along the axis.

mod circle;
mod label;
mod line;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Line, Point, Size, Vec2};
use log::{debug, warn};

use crate::geometry::ListItem;
use crate::mark::{GuideMark, MarkShape, Paint, StrokeStyle, TextAnchor, TextBaseline, TextStyle};
use crate::measure::TextMeasurer;
use crate::z_order;

pub use circle::{CircleAxisConfig, CircleAxisPatch};
pub use label::AUTO_ROTATE_ANGLE;
pub use line::{LineAxisConfig, LineAxisPatch};

use label::{LabelBox, align_to_side, hide_overlapping, overlap_count};

/// Mark id offsets relative to [`AxisBase::id_base`].
const TICK_ID_OFFSET: u64 = 1;
const LABEL_ID_OFFSET: u64 = 1_000;
const SUB_TICK_ID_OFFSET: u64 = 2_000;
const TITLE_ID_OFFSET: u64 = 9_000;

/// The axis line.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineConfig {
    /// Stroke of the axis line.
    pub style: StrokeStyle,
}

/// Primary tick lines.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickLineConfig {
    /// Stroke of each tick line.
    pub style: StrokeStyle,
    /// Tick length away from the axis, on the configured side.
    pub length: f64,
    /// Draw tick lines on the ticks (`true`) or between them (`false`).
    ///
    /// Unaligned tick lines sit at the midpoints between neighbouring ticks and at both ends
    /// of the axis, which suits band scales where labels name the space between lines.
    pub align_tick: bool,
}

impl Default for TickLineConfig {
    fn default() -> Self {
        Self {
            style: StrokeStyle::default(),
            length: 5.0,
            align_tick: true,
        }
    }
}

/// Minor tick lines between primary ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubTickLineConfig {
    /// Stroke of each sub-tick.
    pub style: StrokeStyle,
    /// Number of equal parts each tick interval is divided into.
    ///
    /// `count - 1` sub-ticks are drawn per interval; values below 2 draw none.
    pub count: usize,
    /// Sub-tick length.
    pub length: f64,
}

impl Default for SubTickLineConfig {
    fn default() -> Self {
        Self {
            style: StrokeStyle::default(),
            count: 4,
            length: 2.0,
        }
    }
}

/// The axis title.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisTitleConfig {
    /// Title text.
    pub text: String,
    /// Distance from the axis midpoint along the side vector. Curved axes ignore it.
    pub offset: f64,
    /// Text style.
    pub style: TextStyle,
    /// Rotate the title to follow the axis direction.
    pub auto_rotate: bool,
}

impl AxisTitleConfig {
    /// Creates a title with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

impl Default for AxisTitleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            offset: 32.0,
            style: TextStyle::new(12.0),
            auto_rotate: true,
        }
    }
}

/// Tick labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisLabelConfig {
    /// Text style.
    pub style: TextStyle,
    /// Gap between the tick line end and the label.
    pub offset: f64,
    /// Rotate labels by [`AUTO_ROTATE_ANGLE`] when that reduces collisions.
    pub auto_rotate: bool,
    /// Hide labels that still collide.
    pub auto_hide: bool,
    /// Minimum clearance between neighbouring labels.
    pub min_gap: f64,
}

impl Default for AxisLabelConfig {
    fn default() -> Self {
        Self {
            style: TextStyle::new(10.0),
            offset: 4.0,
            auto_rotate: true,
            auto_hide: true,
            min_gap: 2.0,
        }
    }
}

/// Settings shared by linear and circular axes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisBase {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Ticks, in axis order; each value is a normalized position in `[0, 1]`.
    pub ticks: Vec<ListItem>,
    /// Axis line, if drawn.
    pub line: Option<LineConfig>,
    /// Tick lines, if drawn.
    pub tick_line: Option<TickLineConfig>,
    /// Sub-tick lines, if drawn.
    pub sub_tick_line: Option<SubTickLineConfig>,
    /// Title, if any.
    pub title: Option<AxisTitleConfig>,
    /// Tick labels, if drawn.
    pub label: Option<AxisLabelConfig>,
    /// Which side of the axis ticks, labels and title are drawn on (`1` or `-1`).
    pub vertical_factor: f64,
    /// Horizontal translation applied after layout.
    pub offset_x: f64,
    /// Vertical translation applied after layout.
    pub offset_y: f64,
}

impl Default for AxisBase {
    fn default() -> Self {
        Self {
            id_base: 0,
            ticks: Vec::new(),
            line: Some(LineConfig::default()),
            tick_line: Some(TickLineConfig::default()),
            sub_tick_line: None,
            title: None,
            label: Some(AxisLabelConfig::default()),
            vertical_factor: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl AxisBase {
    fn side_sign(&self) -> f64 {
        if self.vertical_factor < 0.0 { -1.0 } else { 1.0 }
    }
}

/// Builder methods shared by the axis configs through their embedded [`AxisBase`].
macro_rules! axis_builders {
    ($config:ty) => {
        impl $config {
            /// Sets the stable-id base.
            pub fn with_id_base(mut self, id_base: u64) -> Self {
                self.base.id_base = id_base;
                self
            }

            /// Sets the ticks.
            pub fn with_ticks(mut self, ticks: impl IntoIterator<Item = $crate::ListItem>) -> Self {
                self.base.ticks = ticks.into_iter().collect();
                self
            }

            /// Sets the axis line style.
            pub fn with_line(mut self, line: $crate::axis::LineConfig) -> Self {
                self.base.line = Some(line);
                self
            }

            /// Hides the axis line.
            pub fn without_line(mut self) -> Self {
                self.base.line = None;
                self
            }

            /// Sets the tick lines.
            pub fn with_tick_line(mut self, tick_line: $crate::axis::TickLineConfig) -> Self {
                self.base.tick_line = Some(tick_line);
                self
            }

            /// Hides the tick lines.
            pub fn without_tick_line(mut self) -> Self {
                self.base.tick_line = None;
                self
            }

            /// Enables sub-ticks.
            pub fn with_sub_tick_line(
                mut self,
                sub_tick_line: $crate::axis::SubTickLineConfig,
            ) -> Self {
                self.base.sub_tick_line = Some(sub_tick_line);
                self
            }

            /// Sets the title.
            pub fn with_title(mut self, title: $crate::axis::AxisTitleConfig) -> Self {
                self.base.title = Some(title);
                self
            }

            /// Sets the tick labels.
            pub fn with_label(mut self, label: $crate::axis::AxisLabelConfig) -> Self {
                self.base.label = Some(label);
                self
            }

            /// Hides the tick labels.
            pub fn without_label(mut self) -> Self {
                self.base.label = None;
                self
            }

            /// Selects the side ticks, labels and title are drawn on.
            pub fn with_vertical_factor(mut self, vertical_factor: f64) -> Self {
                self.base.vertical_factor = vertical_factor;
                self
            }

            /// Translates the whole axis after layout.
            pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
                self.base.offset_x = offset_x;
                self.base.offset_y = offset_y;
                self
            }
        }
    };
}

pub(crate) use axis_builders;

/// The geometry an axis is laid out along.
///
/// `t` is a normalized position: `0` is the start of the axis and `1` its end.
pub trait AxisShape {
    /// The point at `t`.
    fn point_at(&self, t: f64) -> Point;

    /// The unit tangent at `t`, pointing from start towards end.
    fn direction_at(&self, t: f64) -> Vec2;

    /// The unit normal at `t` on the side selected by a positive vertical factor.
    fn normal_at(&self, t: f64) -> Vec2;

    /// The path of the axis line.
    fn line_path(&self) -> BezPath;

    /// The point the title hangs off, before the title offset is applied.
    fn title_anchor(&self) -> Point {
        self.point_at(0.5)
    }

    /// Returns `false` for curved shapes, whose titles are neither offset nor rotated.
    fn is_straight(&self) -> bool {
        true
    }
}

/// One placed tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Index into [`AxisBase::ticks`].
    pub index: usize,
    /// Normalized position.
    pub t: f64,
    /// Position on the axis.
    pub point: Point,
}

/// One visible tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    /// Index into [`AxisBase::ticks`].
    pub index: usize,
    /// The tick's stable id, if it has one.
    pub id: Option<String>,
    /// Label text.
    pub text: String,
    /// Text anchor position.
    pub position: Point,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation in degrees.
    pub angle: f64,
    /// Measured text extent.
    pub size: Size,
}

/// The placed axis title.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    /// Title text.
    pub text: String,
    /// Text anchor position.
    pub position: Point,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation in degrees.
    pub angle: f64,
}

/// Screen-space geometry of one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    /// Stable-id base copied from the config.
    pub id_base: u64,
    /// Axis line.
    pub line: Option<BezPath>,
    /// Placed ticks.
    pub ticks: Vec<AxisTick>,
    /// Primary tick lines.
    pub tick_lines: Vec<Line>,
    /// Sub-tick lines.
    pub sub_tick_lines: Vec<Line>,
    /// Visible labels.
    pub labels: Vec<AxisLabel>,
    /// Tick indices whose labels were hidden to avoid overlap.
    pub hidden_labels: Vec<usize>,
    /// Title.
    pub title: Option<AxisTitle>,
    line_style: Option<StrokeStyle>,
    tick_style: Option<StrokeStyle>,
    sub_tick_style: Option<StrokeStyle>,
    label_style: Option<TextStyle>,
    title_style: Option<TextStyle>,
}

impl AxisLayout {
    /// Converts the layout into draw instructions.
    pub fn marks(&self) -> Vec<GuideMark> {
        let mut out = Vec::new();
        if let (Some(path), Some(style)) = (&self.line, &self.line_style) {
            out.push(GuideMark::new(
                self.id_base,
                z_order::AXIS_RULES,
                MarkShape::Path(path.clone()),
                Paint::stroked(style),
            ));
        }
        if let Some(style) = &self.tick_style {
            for (i, tick) in self.tick_lines.iter().enumerate() {
                out.push(GuideMark::line(
                    self.id_base + TICK_ID_OFFSET + i as u64,
                    z_order::AXIS_RULES,
                    tick.p0,
                    tick.p1,
                    style,
                ));
            }
        }
        if let Some(style) = &self.sub_tick_style {
            for (i, tick) in self.sub_tick_lines.iter().enumerate() {
                out.push(GuideMark::line(
                    self.id_base + SUB_TICK_ID_OFFSET + i as u64,
                    z_order::AXIS_RULES,
                    tick.p0,
                    tick.p1,
                    style,
                ));
            }
        }
        if let Some(style) = &self.label_style {
            for label in &self.labels {
                out.push(GuideMark::text(
                    self.id_base + LABEL_ID_OFFSET + label.index as u64,
                    z_order::AXIS_LABELS,
                    label.position,
                    label.text.clone(),
                    label.anchor,
                    label.baseline,
                    label.angle,
                    style,
                ));
            }
        }
        if let (Some(title), Some(style)) = (&self.title, &self.title_style) {
            out.push(GuideMark::text(
                self.id_base + TITLE_ID_OFFSET,
                z_order::AXIS_TITLES,
                title.position,
                title.text.clone(),
                TextAnchor::Middle,
                title.baseline,
                title.angle,
                style,
            ));
        }
        out
    }
}

/// Angles this close to `±90` are read as vertical.
const VERTICAL_EPSILON: f64 = 1e-9;

/// Folds an angle in degrees into `[-90, 90)` so text never reads upside down.
fn fold_readable(mut degrees: f64) -> f64 {
    while degrees >= 90.0 - VERTICAL_EPSILON {
        degrees -= 180.0;
    }
    while degrees < -90.0 - VERTICAL_EPSILON {
        degrees += 180.0;
    }
    if (degrees + 90.0).abs() < VERTICAL_EPSILON {
        -90.0
    } else {
        degrees
    }
}

/// Lays out an axis along `shape`.
///
/// Ticks whose value is not a finite number are skipped. With fewer than two usable ticks only
/// the axis line is produced.
pub fn layout_axis(
    base: &AxisBase,
    shape: &impl AxisShape,
    measurer: &dyn TextMeasurer,
) -> AxisLayout {
    let shift = Vec2::new(base.offset_x, base.offset_y);
    let sign = base.side_sign();
    let at = |t: f64| shape.point_at(t) + shift;
    let side = |t: f64| shape.normal_at(t) * sign;

    let mut out = AxisLayout {
        id_base: base.id_base,
        line: None,
        ticks: Vec::new(),
        tick_lines: Vec::new(),
        sub_tick_lines: Vec::new(),
        labels: Vec::new(),
        hidden_labels: Vec::new(),
        title: None,
        line_style: base.line.as_ref().map(|l| l.style.clone()),
        tick_style: base.tick_line.as_ref().map(|l| l.style.clone()),
        sub_tick_style: base.sub_tick_line.as_ref().map(|l| l.style.clone()),
        label_style: base.label.as_ref().map(|l| l.style.clone()),
        title_style: base.title.as_ref().map(|l| l.style.clone()),
    };

    if base.line.is_some() {
        let mut path = shape.line_path();
        path.apply_affine(Affine::translate(shift));
        out.line = Some(path);
    }

    for (index, item) in base.ticks.iter().enumerate() {
        match item.value.as_number() {
            Some(t) if t.is_finite() => out.ticks.push(AxisTick {
                index,
                t,
                point: at(t),
            }),
            _ => debug!(index; "skipping axis tick without a finite position"),
        }
    }
    if out.ticks.len() < 2 {
        warn!(ticks = out.ticks.len(); "axis needs at least two ticks, drawing the line only");
        out.ticks.clear();
        return out;
    }

    if let Some(title) = &base.title {
        let anchor = shape.title_anchor() + shift;
        out.title = Some(if shape.is_straight() {
            let s = side(0.5);
            let angle = if title.auto_rotate {
                fold_readable(shape.direction_at(0.5).atan2().to_degrees())
            } else {
                0.0
            };
            let (_, baseline) = align_to_side(s, angle);
            AxisTitle {
                text: title.text.clone(),
                position: anchor + s * title.offset,
                baseline,
                angle,
            }
        } else {
            AxisTitle {
                text: title.text.clone(),
                position: anchor,
                baseline: TextBaseline::Middle,
                angle: 0.0,
            }
        });
    }

    let tick_length = base.tick_line.as_ref().map_or(0.0, |tl| tl.length);
    if let Some(tick_line) = &base.tick_line {
        let positions: Vec<f64> = if tick_line.align_tick {
            out.ticks.iter().map(|tick| tick.t).collect()
        } else {
            let mut ts = Vec::with_capacity(out.ticks.len() + 1);
            ts.push(0.0);
            ts.extend(out.ticks.windows(2).map(|w| 0.5 * (w[0].t + w[1].t)));
            ts.push(1.0);
            ts
        };
        out.tick_lines = positions
            .into_iter()
            .map(|t| {
                let p = at(t);
                Line::new(p, p + side(t) * tick_line.length)
            })
            .collect();
    }

    if let Some(sub) = &base.sub_tick_line {
        if sub.count < 2 {
            debug!(count = sub.count; "sub-tick count below 2, no sub-ticks drawn");
        } else {
            let parts = sub.count as f64;
            for pair in out.ticks.windows(2) {
                let (t0, t1) = (pair[0].t, pair[1].t);
                for k in 1..sub.count {
                    let t = t0 + (t1 - t0) * (k as f64 / parts);
                    let p = at(t);
                    out.sub_tick_lines
                        .push(Line::new(p, p + side(t) * sub.length));
                }
            }
        }
    }

    if let Some(label) = &base.label {
        place_labels(&mut out, base, label, tick_length, &side, measurer);
    }

    debug!(
        ticks = out.ticks.len(),
        labels = out.labels.len(),
        hidden = out.hidden_labels.len();
        "laid out axis"
    );
    out
}

fn place_labels(
    out: &mut AxisLayout,
    base: &AxisBase,
    config: &AxisLabelConfig,
    tick_length: f64,
    side: &impl Fn(f64) -> Vec2,
    measurer: &dyn TextMeasurer,
) {
    let font_size = config.style.font_size;
    let distance = tick_length + config.offset;
    let candidates: Vec<(usize, Point, Vec2, Size)> = out
        .ticks
        .iter()
        .map(|tick| {
            let s = side(tick.t);
            let text = &base.ticks[tick.index].name;
            (
                tick.index,
                tick.point + s * distance,
                s,
                measurer.measure(text, font_size),
            )
        })
        .collect();

    let boxes_at = |angle: f64| -> Vec<LabelBox> {
        candidates
            .iter()
            .map(|(_, position, s, size)| {
                let (anchor, baseline) = align_to_side(*s, angle);
                LabelBox::new(*position, *size, anchor, baseline, angle)
            })
            .collect()
    };

    let mut angle = 0.0;
    let mut boxes = boxes_at(angle);
    let mut overlaps = overlap_count(&boxes, config.min_gap);
    if overlaps > 0 && config.auto_rotate {
        let rotated = boxes_at(AUTO_ROTATE_ANGLE);
        let rotated_overlaps = overlap_count(&rotated, config.min_gap);
        if rotated_overlaps < overlaps {
            debug!(before = overlaps, after = rotated_overlaps; "rotating axis labels");
            angle = AUTO_ROTATE_ANGLE;
            boxes = rotated;
            overlaps = rotated_overlaps;
        }
    }

    let kept: Vec<usize> = if overlaps > 0 && config.auto_hide {
        hide_overlapping(&boxes, config.min_gap)
    } else {
        (0..candidates.len()).collect()
    };

    let mut keep = kept.iter().copied().peekable();
    for (i, (index, position, s, size)) in candidates.into_iter().enumerate() {
        if keep.next_if_eq(&i).is_none() {
            out.hidden_labels.push(index);
            continue;
        }
        let item = &base.ticks[index];
        let (anchor, baseline) = align_to_side(s, angle);
        out.labels.push(AxisLabel {
            index,
            id: item.id.clone(),
            text: item.name.clone(),
            position,
            anchor,
            baseline,
            angle,
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn readable_angles_fold_vertical_to_bottom_to_top() {
        assert_eq!(fold_readable(90.0), -90.0);
        assert_eq!(fold_readable(-90.0), -90.0);
        assert_eq!(fold_readable(180.0), 0.0);
        assert_eq!(fold_readable(135.0), -45.0);
        assert_eq!(fold_readable(30.0), 30.0);
    }

    #[test]
    fn nearly_vertical_angles_snap_to_bottom_to_top() {
        assert_eq!(fold_readable(89.999_999_999_999_99), -90.0);
        assert_eq!(fold_readable(-89.999_999_999_999_99), -90.0);
        assert_eq!(fold_readable(270.000_000_000_000_06), -90.0);
    }

    #[test]
    fn layout_marks_use_stable_offsets() {
        let axis = LineAxisConfig::new((0.0, 100.0), (100.0, 100.0))
            .with_id_base(500)
            .with_ticks([
                ListItem::tick("0", 0.0),
                ListItem::tick("50", 0.5),
                ListItem::tick("100", 1.0),
            ])
            .with_title(AxisTitleConfig::new("x"));
        let marks = axis
            .layout(&HeuristicTextMeasurer)
            .expect("valid axis")
            .marks();
        let ids: Vec<u64> = marks.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, [500, 501, 502, 503, 1500, 1501, 1502, 9500]);
        assert!(marks.iter().all(|m| m.z_index > 0));
    }
}
