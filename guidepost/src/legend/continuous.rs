// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous legends: a rail spanning `[min, max]`, one or two handles marking the selected
//! value(s), and a track between them.
//!
//! Horizontal rails map `min` to their left end, vertical rails map `min` to their top end.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Size, Vec2};
use log::{debug, warn};
use peniko::color::palette::css;
use peniko::{Color, Gradient};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use super::{
    LegendBackgroundConfig, LegendBase, LegendDirection, LegendFrame, LegendTitleConfig,
    legend_builders,
};
use crate::config::shallow_patch;
use crate::error::{GuideError, Result};
use crate::events::{GuideEvent, Listeners};
use crate::geometry::Range;
use crate::location::{Locate, Location};
use crate::mark::{GuideMark, MarkShape, Paint, StrokeStyle, TextAnchor, TextBaseline, TextStyle};
use crate::measure::TextMeasurer;
use crate::z_order;

const RAIL_ID_OFFSET: u64 = 10;
const TRACK_ID_OFFSET: u64 = 11;
const HANDLE_ID_OFFSET: u64 = 20;
const LABEL_ID_OFFSET: u64 = 30;

/// Unformatted labels are rounded to this many steps per unit.
const LABEL_ROUNDING: f64 = 1e9;

/// The value selection: one threshold or a `[lo, hi]` pair.
type Selection = SmallVec<[f64; 2]>;

/// How the rail encodes the value range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RailType {
    /// A gradient through the legend colors.
    #[default]
    Color,
    /// A ramp whose thickness grows from `0` at `min` to the rail size at `max`.
    Size,
}

/// The rail.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RailConfig {
    /// Encoding.
    pub rail_type: RailType,
    /// Thickness across the rail.
    pub size: f64,
    /// Length used unless `max_width` / `max_height` leave less room.
    pub default_length: f64,
    /// Fill of size ramps, and of color rails without colors.
    pub fill: Color,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            rail_type: RailType::Color,
            size: 12.0,
            default_length: 100.0,
            fill: css::LIGHT_GRAY,
        }
    }
}

/// The selected span.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackConfig {
    /// Track fill, drawn over the rail.
    pub fill: Color,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            fill: css::STEEL_BLUE.with_alpha(0.5),
        }
    }
}

/// Slider handles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandlerConfig {
    /// Side length of the square handle.
    pub size: f64,
    /// Handle fill.
    pub fill: Color,
    /// Handle outline.
    pub stroke: StrokeStyle,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            fill: css::WHITE,
            stroke: StrokeStyle::solid(css::GRAY, 1.0),
        }
    }
}

/// Where handle labels go relative to the rail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelAlign {
    /// Just outside whichever rail end is nearer the handle.
    #[default]
    Rail,
    /// Above: beside each handle for horizontal rails, past the top end for vertical ones.
    Top,
    /// Below: beside each handle for horizontal rails, past the bottom end for vertical ones.
    Bottom,
    /// Left: past the start for horizontal rails, beside each handle for vertical ones.
    Left,
    /// Right: past the end for horizontal rails, beside each handle for vertical ones.
    Right,
}

/// Handle labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousLabelConfig {
    /// Placement.
    pub align: LabelAlign,
    /// Gap between the label and the rail.
    pub spacing: f64,
    /// Fixed number of decimals. Without one, values print in their shortest form with
    /// floating-point noise rounded away.
    pub precision: Option<usize>,
    /// Text style.
    pub style: TextStyle,
}

impl Default for ContinuousLabelConfig {
    fn default() -> Self {
        Self {
            align: LabelAlign::Rail,
            spacing: 5.0,
            precision: None,
            style: TextStyle::new(12.0),
        }
    }
}

impl ContinuousLabelConfig {
    /// The label text for `value`.
    pub fn format(&self, value: f64) -> String {
        match self.precision {
            Some(precision) => format!("{value:.precision$}"),
            None if value.abs() < LABEL_ROUNDING => {
                // `+ 0.0` turns a rounded `-0` into `0`.
                let rounded = (value * LABEL_ROUNDING).round() / LABEL_ROUNDING + 0.0;
                format!("{rounded}")
            }
            None => format!("{value}"),
        }
    }
}

/// A legend for a continuous scale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousLegendConfig {
    /// Shared legend settings.
    pub base: LegendBase,
    /// Value at the rail start.
    pub min: f64,
    /// Value at the rail end.
    pub max: f64,
    /// One threshold or a `[lo, hi]` pair.
    pub value: Vec<f64>,
    /// Gradient colors, spread evenly over `[min, max]`.
    pub colors: Vec<Color>,
    /// Track.
    pub track: TrackConfig,
    /// Rail.
    pub rail: RailConfig,
    /// Handle labels.
    pub label: ContinuousLabelConfig,
    /// Handles.
    pub handler: HandlerConfig,
    /// Allow handles to be dragged.
    pub slidable: bool,
    /// Shorten horizontal rails to fit this width.
    pub max_width: Option<f64>,
    /// Shorten vertical rails to fit this height.
    pub max_height: Option<f64>,
}

impl Default for ContinuousLegendConfig {
    fn default() -> Self {
        Self {
            base: LegendBase::default(),
            min: 0.0,
            max: 1.0,
            value: alloc::vec![0.0, 1.0],
            colors: Vec::new(),
            track: TrackConfig::default(),
            rail: RailConfig::default(),
            label: ContinuousLabelConfig::default(),
            handler: HandlerConfig::default(),
            slidable: true,
            max_width: None,
            max_height: None,
        }
    }
}

impl ContinuousLegendConfig {
    /// Creates a legend over `[min, max]` selecting `value`.
    pub fn new(min: f64, max: f64, value: impl IntoIterator<Item = f64>) -> Self {
        Self {
            min,
            max,
            value: value.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sets the gradient colors.
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Sets the rail.
    pub fn with_rail(mut self, rail: RailConfig) -> Self {
        self.rail = rail;
        self
    }

    /// Sets the handle labels.
    pub fn with_label(mut self, label: ContinuousLabelConfig) -> Self {
        self.label = label;
        self
    }

    /// Sets the handles.
    pub fn with_handler(mut self, handler: HandlerConfig) -> Self {
        self.handler = handler;
        self
    }

    /// Enables or disables dragging.
    pub fn with_slidable(mut self, slidable: bool) -> Self {
        self.slidable = slidable;
        self
    }

    /// Caps the legend width.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Caps the legend height.
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// The `[min, max]` range, rejecting `min > max` and non-finite bounds.
    ///
    /// `min == max` is accepted; the mapping is then degenerate.
    pub fn range(&self) -> Result<Range> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(GuideError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(Range::new(self.min, self.max))
    }

    /// The gradient color at `value`, or `None` without colors.
    pub fn color_at(&self, value: f64) -> Option<Color> {
        let first = *self.colors.first()?;
        let span = self.max - self.min;
        if self.colors.len() == 1 || span <= 0.0 || !value.is_finite() {
            return Some(first);
        }
        let t = ((value - self.min) / span).clamp(0.0, 1.0);
        let last = self.colors.len() - 1;
        let pos = t * last as f64;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pos is clamped to [0, colors.len() - 1]"
        )]
        let (i, f) = {
            let i = (pos.floor() as usize).min(last - 1);
            (i, (pos - i as f64) as f32)
        };
        let (a, b) = (self.colors[i].components, self.colors[i + 1].components);
        Some(Color::new(core::array::from_fn(|k| a[k] + (b[k] - a[k]) * f)))
    }

    /// Lays out the legend at its configured value.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> Result<ContinuousLegendLayout> {
        let range = self.range()?;
        let selection = self.selection(range)?;
        Ok(self.layout_selection(range, &selection, measurer))
    }

    fn selection(&self, range: Range) -> Result<Selection> {
        if self.value.is_empty() {
            return Err(GuideError::insufficient(1, 0));
        }
        if self.value.len() > 2 {
            warn!(values = self.value.len(); "continuous legend uses only its first two values");
        }
        let mut selection: Selection = SmallVec::new();
        for v in self.value.iter().take(2) {
            if !v.is_finite() {
                return Err(GuideError::InvalidGeometry("legend value is not finite"));
            }
            selection.push(range.clamp(*v));
        }
        if selection.len() == 2 && selection[0] > selection[1] {
            selection.swap(0, 1);
        }
        Ok(selection)
    }

    fn layout_selection(
        &self,
        range: Range,
        selection: &[f64],
        measurer: &dyn TextMeasurer,
    ) -> ContinuousLegendLayout {
        let diagnostic = range.is_degenerate().then(|| {
            warn!(min = range.min; "continuous legend range is empty, handles sit at the midpoint");
            GuideError::InvalidRange {
                min: range.min,
                max: range.max,
            }
        });
        let base = &self.base;
        let mut frame = LegendFrame::open(base, Point::new(base.x, base.y), measurer);
        let origin = frame.content_origin;
        let horizontal = base.layout == LegendDirection::Horizontal;
        let spacing = self.label.spacing;

        let labels: SmallVec<[(String, Size); 2]> = selection
            .iter()
            .map(|v| {
                let text = self.label.format(*v);
                let size = measurer.measure(&text, self.label.style.font_size);
                (text, size)
            })
            .collect();
        let label_w = labels.iter().map(|(_, s)| s.width).fold(0.0, f64::max) + spacing;
        let label_h = labels.iter().map(|(_, s)| s.height).fold(0.0, f64::max) + spacing;

        // Room reserved before and after the rail along its axis, and before it across.
        let align = self.label.align;
        let (lead, trail, before) = match (horizontal, align) {
            (true, LabelAlign::Rail) => (label_w, label_w, 0.0),
            (true, LabelAlign::Left) => (label_w, 0.0, 0.0),
            (true, LabelAlign::Right) => (0.0, label_w, 0.0),
            (true, LabelAlign::Top) => (0.0, 0.0, label_h),
            (true, LabelAlign::Bottom) => (0.0, 0.0, 0.0),
            (false, LabelAlign::Rail) => (label_h, label_h, 0.0),
            (false, LabelAlign::Top) => (label_h, 0.0, 0.0),
            (false, LabelAlign::Bottom) => (0.0, label_h, 0.0),
            (false, LabelAlign::Left) => (0.0, 0.0, label_w),
            (false, LabelAlign::Right) => (0.0, 0.0, 0.0),
        };
        let limit = if horizontal { self.max_width } else { self.max_height };
        let length = match limit {
            Some(max) => self.rail.default_length.min(max - lead - trail).max(0.0),
            None => self.rail.default_length,
        };
        let cross = self.rail.size.max(self.handler.size);

        let (axis, across) = if horizontal {
            (Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0))
        } else {
            (Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0))
        };
        let rail_start = origin + axis * lead + across * (before + 0.5 * cross);
        let start_px = if horizontal { rail_start.x } else { rail_start.y };
        let mapping = RailMapping::new(start_px, length, range);
        let half = 0.5 * self.rail.size;
        let rail_bounds = Rect::from_points(
            rail_start - across * half,
            rail_start + axis * length + across * half,
        );

        let at = |px: f64| rail_start + axis * (px - start_px);
        let thickness = |px: f64| match self.rail.rail_type {
            RailType::Color => self.rail.size,
            RailType::Size if length > 0.0 => self.rail.size * (px - start_px) / length,
            RailType::Size => 0.0,
        };
        // A band along the rail between two pixels; ramps grow from the far side.
        let band = |a: f64, b: f64| {
            let far = across * half;
            let mut path = BezPath::new();
            path.move_to(at(a) + far);
            path.line_to(at(b) + far);
            path.line_to(at(b) + far - across * thickness(b));
            path.line_to(at(a) + far - across * thickness(a));
            path.close_path();
            path
        };

        let end_px = start_px + length;
        let rail_path = band(start_px, end_px);
        let pixels: SmallVec<[f64; 2]> = selection
            .iter()
            .map(|v| mapping.value_to_pixel(*v))
            .collect();
        let track = match pixels.as_slice() {
            [single] => band(start_px, *single),
            [lo, hi, ..] => band(*lo, *hi),
            [] => BezPath::new(),
        };

        let handles = selection
            .iter()
            .zip(&pixels)
            .zip(labels)
            .map(|((value, px), (text, size))| {
                let center = at(*px);
                let rect = Rect::from_center_size(center, (self.handler.size, self.handler.size));
                let near_start = *px - start_px <= 0.5 * length;
                let (position, anchor, baseline) =
                    label_position(horizontal, align, near_start, center, rail_bounds, spacing);
                HandleLayout {
                    value: *value,
                    pixel: *px,
                    center,
                    rect,
                    label: text,
                    label_position: position,
                    label_anchor: anchor,
                    label_baseline: baseline,
                    label_size: size,
                }
            })
            .collect::<SmallVec<[HandleLayout; 2]>>();

        let mut content = rail_bounds;
        for h in &handles {
            content = content.union(h.rect).union(label_box(h));
        }
        frame.close(base, content);
        let bounds = frame.bounds(content);

        let rail_paint = match (self.rail.rail_type, self.colors.as_slice()) {
            (RailType::Color, colors) if !colors.is_empty() => Paint::filled(
                Gradient::new_linear(at(start_px), at(end_px)).with_stops(colors),
            ),
            _ => Paint::filled(self.rail.fill),
        };
        debug!(length, handles = handles.len(); "laid out continuous legend");
        ContinuousLegendLayout {
            id_base: base.id_base,
            direction: base.layout,
            mapping,
            rail_bounds,
            rail: rail_path,
            track,
            handles,
            bounds,
            diagnostic,
            frame,
            rail_paint,
            track_fill: self.track.fill,
            handler: self.handler.clone(),
            label_style: self.label.style.clone(),
        }
    }
}

legend_builders!(ContinuousLegendConfig);

impl Locate for ContinuousLegendConfig {
    fn location(&self) -> Location {
        self.base.location()
    }
}

fn label_position(
    horizontal: bool,
    align: LabelAlign,
    near_start: bool,
    handle: Point,
    rail: Rect,
    spacing: f64,
) -> (Point, TextAnchor, TextBaseline) {
    let c = rail.center();
    let left = (Point::new(rail.x0 - spacing, c.y), TextAnchor::End, TextBaseline::Middle);
    let right = (Point::new(rail.x1 + spacing, c.y), TextAnchor::Start, TextBaseline::Middle);
    let top = (Point::new(c.x, rail.y0 - spacing), TextAnchor::Middle, TextBaseline::Bottom);
    let bottom = (Point::new(c.x, rail.y1 + spacing), TextAnchor::Middle, TextBaseline::Top);
    match (horizontal, align) {
        (true, LabelAlign::Rail) => {
            if near_start {
                left
            } else {
                right
            }
        }
        (true, LabelAlign::Left) => left,
        (true, LabelAlign::Right) => right,
        (true, LabelAlign::Top) => (Point::new(handle.x, top.0.y), top.1, top.2),
        (true, LabelAlign::Bottom) => (Point::new(handle.x, bottom.0.y), bottom.1, bottom.2),
        (false, LabelAlign::Rail) => {
            if near_start {
                top
            } else {
                bottom
            }
        }
        (false, LabelAlign::Top) => top,
        (false, LabelAlign::Bottom) => bottom,
        (false, LabelAlign::Left) => (Point::new(left.0.x, handle.y), left.1, left.2),
        (false, LabelAlign::Right) => (Point::new(right.0.x, handle.y), right.1, right.2),
    }
}

fn label_box(h: &HandleLayout) -> Rect {
    let Size { width, height } = h.label_size;
    let x0 = match h.label_anchor {
        TextAnchor::Start => h.label_position.x,
        TextAnchor::Middle => h.label_position.x - 0.5 * width,
        TextAnchor::End => h.label_position.x - width,
    };
    let y0 = match h.label_baseline {
        TextBaseline::Top => h.label_position.y,
        TextBaseline::Middle => h.label_position.y - 0.5 * height,
        TextBaseline::Bottom => h.label_position.y - height,
    };
    Rect::new(x0, y0, x0 + width, y0 + height)
}

/// Linear mapping between legend values and rail pixels.
///
/// `pixel = start + (value - min) / (max - min) * length`, and [`RailMapping::pixel_to_value`]
/// is its inverse. A degenerate range (`min == max`) maps every value to the rail midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RailMapping {
    /// Pixel coordinate of `min` along the rail axis.
    pub start: f64,
    /// Rail length in pixels.
    pub length: f64,
    /// Value range.
    pub range: Range,
}

impl RailMapping {
    /// Creates a mapping.
    pub fn new(start: f64, length: f64, range: Range) -> Self {
        Self {
            start,
            length,
            range,
        }
    }

    /// Returns `true` when `min == max`.
    pub fn is_degenerate(&self) -> bool {
        self.range.is_degenerate()
    }

    /// Maps a value to a pixel. Degenerate ranges map to the rail midpoint.
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.start + 0.5 * self.length;
        }
        self.start + (value - self.range.min) / self.range.span() * self.length
    }

    /// Maps a value to a pixel, failing with [`GuideError::InvalidRange`] unless
    /// `min < max`.
    pub fn try_value_to_pixel(&self, value: f64) -> Result<f64> {
        self.range.validate()?;
        Ok(self.value_to_pixel(value))
    }

    /// Maps a pixel back to a value. Degenerate mappings return `min`.
    pub fn pixel_to_value(&self, pixel: f64) -> f64 {
        if self.is_degenerate() || self.length == 0.0 {
            return self.range.min;
        }
        self.range.min + (pixel - self.start) / self.length * self.range.span()
    }
}

/// One placed handle and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleLayout {
    /// Value the handle marks.
    pub value: f64,
    /// Position along the rail axis.
    pub pixel: f64,
    /// Handle center.
    pub center: Point,
    /// Handle box.
    pub rect: Rect,
    /// Label text.
    pub label: String,
    /// Label anchor position.
    pub label_position: Point,
    /// Label horizontal alignment.
    pub label_anchor: TextAnchor,
    /// Label vertical alignment.
    pub label_baseline: TextBaseline,
    /// Measured label extent.
    pub label_size: Size,
}

/// Screen-space geometry of a continuous legend.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousLegendLayout {
    /// Stable-id base copied from the config.
    pub id_base: u64,
    /// Rail direction.
    pub direction: LegendDirection,
    /// Value/pixel mapping along the rail axis.
    pub mapping: RailMapping,
    /// Rail bounds at full thickness.
    pub rail_bounds: Rect,
    /// Rail outline (a rectangle, or a ramp for size rails).
    pub rail: BezPath,
    /// Track outline.
    pub track: BezPath,
    /// Handles in ascending value order.
    pub handles: SmallVec<[HandleLayout; 2]>,
    /// Outer bounds, background included.
    pub bounds: Rect,
    /// Set to [`GuideError::InvalidRange`] when `min == max`; the legend still lays out with
    /// every handle at the rail midpoint.
    pub diagnostic: Option<GuideError>,
    frame: LegendFrame,
    rail_paint: Paint,
    track_fill: Color,
    handler: HandlerConfig,
    label_style: TextStyle,
}

impl ContinuousLegendLayout {
    /// Returns the index of the handle whose box contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.handles.iter().position(|h| h.rect.contains(point))
    }

    /// Converts the layout into draw instructions.
    pub fn marks(&self) -> Vec<GuideMark> {
        let mut out = Vec::new();
        self.frame.marks(self.id_base, &mut out);
        out.push(GuideMark::new(
            self.id_base + RAIL_ID_OFFSET,
            z_order::LEGEND_SWATCHES,
            MarkShape::Path(self.rail.clone()),
            self.rail_paint.clone(),
        ));
        out.push(GuideMark::new(
            self.id_base + TRACK_ID_OFFSET,
            z_order::LEGEND_SWATCHES,
            MarkShape::Path(self.track.clone()),
            Paint::filled(self.track_fill),
        ));
        for (i, h) in self.handles.iter().enumerate() {
            out.push(GuideMark::new(
                self.id_base + HANDLE_ID_OFFSET + i as u64,
                z_order::LEGEND_HANDLES,
                MarkShape::Rect(h.rect),
                Paint {
                    fill: Some(self.handler.fill.into()),
                    stroke: Some(self.handler.stroke.clone()),
                },
            ));
            out.push(GuideMark::text(
                self.id_base + LABEL_ID_OFFSET + i as u64,
                z_order::LEGEND_LABELS,
                h.label_position,
                h.label.clone(),
                h.label_anchor,
                h.label_baseline,
                0.0,
                &self.label_style,
            ));
        }
        out
    }
}

/// A continuous legend instance: its own copy of the config, the live selection, and the
/// listeners notified when a drag changes it.
#[derive(Debug)]
pub struct ContinuousLegend {
    config: ContinuousLegendConfig,
    range: Range,
    selection: Selection,
    listeners: Listeners,
}

impl ContinuousLegend {
    /// Validates `config` and takes its value as the initial selection.
    pub fn new(config: ContinuousLegendConfig) -> Result<Self> {
        let range = config.range()?;
        let selection = config.selection(range)?;
        Ok(Self {
            config,
            range,
            selection,
            listeners: Listeners::new(),
        })
    }

    /// The config this legend was created from.
    pub fn config(&self) -> &ContinuousLegendConfig {
        &self.config
    }

    /// The current selection, in ascending order.
    pub fn value(&self) -> &[f64] {
        &self.selection
    }

    /// Listeners for [`GuideEvent::ValueChanged`].
    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    /// Lays out the legend at the current selection.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ContinuousLegendLayout {
        self.config
            .layout_selection(self.range, &self.selection, measurer)
    }

    /// Moves handle `handle` to the value under `pixel` (a coordinate along the rail axis of
    /// `layout`).
    ///
    /// The value is clamped to `[min, max]` and to the neighbouring handle so handles never
    /// cross. Emits [`GuideEvent::ValueChanged`] when the selection changes and returns the
    /// new selection. Returns `None` when the legend is not slidable or `handle` is out of
    /// range.
    pub fn drag_handle(
        &mut self,
        layout: &ContinuousLegendLayout,
        handle: usize,
        pixel: f64,
    ) -> Option<&[f64]> {
        if !self.config.slidable {
            debug!(handle; "ignoring drag on a legend that is not slidable");
            return None;
        }
        if handle >= self.selection.len() || !pixel.is_finite() {
            return None;
        }
        let mut value = self.range.clamp(layout.mapping.pixel_to_value(pixel));
        if self.selection.len() == 2 {
            value = if handle == 0 {
                value.min(self.selection[1])
            } else {
                value.max(self.selection[0])
            };
        }
        if self.selection[handle] != value {
            self.selection[handle] = value;
            self.listeners.emit(&GuideEvent::ValueChanged {
                value: self.selection.clone(),
            });
        }
        Some(&self.selection)
    }
}

shallow_patch! {
    /// Partial [`ContinuousLegendConfig`]; each provided key replaces the default wholesale.
    ContinuousLegendPatch for ContinuousLegendConfig {
        /// See [`LegendBase::id_base`].
        id_base => base.id_base: u64,
        /// See [`LegendBase::layout`].
        layout => base.layout: LegendDirection,
        /// See [`LegendBase::x`].
        x => base.x: f64,
        /// See [`LegendBase::y`].
        y => base.y: f64,
        /// See [`LegendBase::title`].
        title => base.title: LegendTitleConfig,
        /// See [`LegendBase::background`].
        background => base.background: LegendBackgroundConfig,
        /// See [`LegendBase::offset_x`].
        offset_x => base.offset_x: f64,
        /// See [`LegendBase::offset_y`].
        offset_y => base.offset_y: f64,
        /// See [`ContinuousLegendConfig::min`].
        min => min: f64,
        /// See [`ContinuousLegendConfig::max`].
        max => max: f64,
        /// See [`ContinuousLegendConfig::value`].
        value => value: Vec<f64>,
        /// See [`ContinuousLegendConfig::colors`].
        colors => colors: Vec<Color>,
        /// See [`ContinuousLegendConfig::track`].
        track => track: TrackConfig,
        /// See [`ContinuousLegendConfig::rail`].
        rail => rail: RailConfig,
        /// See [`ContinuousLegendConfig::label`].
        label => label: ContinuousLabelConfig,
        /// See [`ContinuousLegendConfig::handler`].
        handler => handler: HandlerConfig,
        /// See [`ContinuousLegendConfig::slidable`].
        slidable => slidable: bool,
        /// See [`ContinuousLegendConfig::max_width`].
        max_width => max_width: f64,
        /// See [`ContinuousLegendConfig::max_height`].
        max_height => max_height: f64,
    }
}
