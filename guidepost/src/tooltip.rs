// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip box and crosshair placement.
//!
//! The box is placed on the preferred side of the anchor, `offset` away from it. Each axis is
//! then fitted independently: a box that overflows the bounds flips to the other side of the
//! anchor, and a box that still overflows is clamped to the boundary.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect, Size};
use log::{debug, trace};
use peniko::Color;
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::config::shallow_patch;
use crate::error::{GuideError, Result};
use crate::events::{GuideEvent, Listeners};
use crate::geometry::{ListItem, Marker, Region};
use crate::location::{Locate, Location};
use crate::mark::{
    GuideMark, MarkShape, Paint, StrokeStyle, TextAnchor, TextBaseline, TextStyle,
};
use crate::measure::TextMeasurer;
use crate::z_order;

const BOX_ID_OFFSET: u64 = 0;
const ROW_ID_OFFSET: u64 = 100;
const MARKER_ID_OFFSET: u64 = 200;
const CROSSHAIR_ID_OFFSET: u64 = 900;

/// Preferred side of the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TooltipPosition {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    #[default]
    Right,
}

/// Which crosshair lines to draw through the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crosshairs {
    /// A vertical line at the anchor x.
    X,
    /// A horizontal line at the anchor y.
    Y,
    /// Both.
    XY,
}

impl Crosshairs {
    fn has_x(self) -> bool {
        matches!(self, Self::X | Self::XY)
    }

    fn has_y(self) -> bool {
        matches!(self, Self::Y | Self::XY)
    }
}

/// A tooltip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TooltipConfig {
    /// Stable-id base.
    pub id_base: u64,
    /// Rows, one per item.
    pub items: Vec<ListItem>,
    /// Anchor x, used unless the tooltip follows the pointer.
    pub x: f64,
    /// Anchor y, used unless the tooltip follows the pointer.
    pub y: f64,
    /// Bounds the box must stay inside. Defaults to the viewport.
    pub region: Option<Region>,
    /// Bounds for the crosshairs. Defaults to `region`, then the viewport.
    pub crosshairs_region: Option<Region>,
    /// Crosshair lines, if any.
    pub crosshairs: Option<Crosshairs>,
    /// Track the pointer.
    pub follow: bool,
    /// Gap between the anchor and the box.
    pub offset: f64,
    /// Preferred side.
    pub position: TooltipPosition,
    /// Inner padding of the box.
    pub padding: f64,
    /// Vertical gap between rows.
    pub row_spacing: f64,
    /// Gap between a row's marker and its text.
    pub marker_spacing: f64,
    /// Row text style.
    pub text_style: TextStyle,
    /// Box fill.
    pub background: Color,
    /// Box outline.
    pub border: Option<StrokeStyle>,
    /// Crosshair stroke.
    pub crosshair_line: StrokeStyle,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            id_base: 0,
            items: Vec::new(),
            x: 0.0,
            y: 0.0,
            region: None,
            crosshairs_region: None,
            crosshairs: None,
            follow: true,
            offset: 10.0,
            position: TooltipPosition::Right,
            padding: 8.0,
            row_spacing: 4.0,
            marker_spacing: 6.0,
            text_style: TextStyle::new(12.0),
            background: css::WHITE.with_alpha(0.9),
            border: Some(StrokeStyle::solid(css::LIGHT_GRAY, 1.0)),
            crosshair_line: StrokeStyle::solid(css::GRAY, 1.0),
        }
    }
}

impl TooltipConfig {
    /// Creates a tooltip showing `items`.
    pub fn new(items: impl IntoIterator<Item = ListItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sets the stable-id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the fixed anchor.
    pub fn with_anchor(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the box bounds.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Sets the crosshair bounds.
    pub fn with_crosshairs_region(mut self, region: Region) -> Self {
        self.crosshairs_region = Some(region);
        self
    }

    /// Enables crosshairs.
    pub fn with_crosshairs(mut self, crosshairs: Crosshairs) -> Self {
        self.crosshairs = Some(crosshairs);
        self
    }

    /// Enables or disables pointer following.
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    /// Sets the preferred side and the gap to the anchor.
    pub fn with_position(mut self, position: TooltipPosition, offset: f64) -> Self {
        self.position = position;
        self.offset = offset;
        self
    }

    /// Lays out the tooltip at the configured anchor.
    pub fn layout(&self, viewport: Rect, measurer: &dyn TextMeasurer) -> Result<TooltipLayout> {
        self.layout_at(Point::new(self.x, self.y), viewport, measurer)
    }

    /// Lays out the tooltip at `anchor`.
    pub fn layout_at(
        &self,
        anchor: Point,
        viewport: Rect,
        measurer: &dyn TextMeasurer,
    ) -> Result<TooltipLayout> {
        if !anchor.is_finite() {
            return Err(GuideError::InvalidGeometry("tooltip anchor is not finite"));
        }
        let bounds = resolve_bounds(self.region, viewport)?;
        let crosshair_bounds = resolve_bounds(self.crosshairs_region.or(self.region), viewport)?;

        let font_size = self.text_style.font_size;
        let measured: Vec<(String, Size)> = self
            .items
            .iter()
            .map(|item| {
                let text = row_text(item);
                let size = measurer.measure(&text, font_size);
                (text, size)
            })
            .collect();
        let marker_w =
            |item: &ListItem| item.marker.map_or(0.0, |m| m.size + self.marker_spacing);
        let content_w = self
            .items
            .iter()
            .zip(&measured)
            .map(|(item, (_, size))| marker_w(item) + size.width)
            .fold(0.0, f64::max);
        let row_heights: Vec<f64> = self
            .items
            .iter()
            .zip(&measured)
            .map(|(item, (_, size))| size.height.max(item.marker.map_or(0.0, |m| m.size)))
            .collect();
        let gaps = row_heights.len().saturating_sub(1) as f64 * self.row_spacing;
        let content_h = row_heights.iter().sum::<f64>() + gaps;
        let size = Size::new(
            content_w + 2.0 * self.padding,
            content_h + 2.0 * self.padding,
        );

        let rect = position_tooltip(anchor, size, self.position, self.offset, bounds);

        let mut rows = Vec::with_capacity(self.items.len());
        let mut y = rect.y0 + self.padding;
        for (index, ((item, (text, _)), height)) in
            self.items.iter().zip(measured).zip(row_heights).enumerate()
        {
            let mid = y + 0.5 * height;
            let x = rect.x0 + self.padding;
            rows.push(TooltipRow {
                index,
                marker: item.marker.map(|m| (m, Point::new(x + 0.5 * m.size, mid))),
                text,
                text_position: Point::new(x + marker_w(item), mid),
            });
            y += height + self.row_spacing;
        }

        let crosshairs = self
            .crosshairs
            .map(|mode| crosshair_lines(mode, anchor, crosshair_bounds))
            .unwrap_or_default();
        debug!(x = rect.x0, y = rect.y0, rows = rows.len(); "positioned tooltip");
        Ok(TooltipLayout {
            id_base: self.id_base,
            anchor,
            rect,
            rows,
            crosshairs,
            background: self.background,
            border: self.border.clone(),
            text_style: self.text_style.clone(),
            crosshair_line: self.crosshair_line.clone(),
        })
    }
}

impl Locate for TooltipConfig {
    fn location(&self) -> Location {
        Location::Point(Point::new(self.x, self.y))
    }
}

fn row_text(item: &ListItem) -> String {
    let value = item.value.to_string();
    if value.is_empty() {
        item.name.clone()
    } else {
        alloc::format!("{}: {value}", item.name)
    }
}

fn resolve_bounds(region: Option<Region>, viewport: Rect) -> Result<Rect> {
    match region {
        Some(region) if !region.is_finite() => {
            Err(GuideError::InvalidGeometry("tooltip region is not finite"))
        }
        Some(region) => Ok(region.normalized()),
        None => Ok(viewport.abs()),
    }
}

/// Places a box of `size` next to `anchor` inside `bounds`.
///
/// The preferred `position` picks the main axis and side; the box sits `offset` away from the
/// anchor there and starts at the anchor on the cross axis. Each axis is fitted on its own:
/// overflow flips the box to the anchor's other side, and remaining overflow clamps it to the
/// boundary. A box larger than `bounds` is aligned to the bounds' top-left.
pub fn position_tooltip(
    anchor: Point,
    size: Size,
    position: TooltipPosition,
    offset: f64,
    bounds: Rect,
) -> Rect {
    let (x_gap, x_forward, y_gap, y_forward) = match position {
        TooltipPosition::Right => (offset, true, 0.0, true),
        TooltipPosition::Left => (offset, false, 0.0, true),
        TooltipPosition::Bottom => (0.0, true, offset, true),
        TooltipPosition::Top => (0.0, true, offset, false),
    };
    let x = fit_axis(anchor.x, size.width, x_gap, x_forward, bounds.x0, bounds.x1);
    let y = fit_axis(anchor.y, size.height, y_gap, y_forward, bounds.y0, bounds.y1);
    Rect::from_origin_size((x, y), size)
}

/// One axis of [`position_tooltip`]: returns the box start along `[lo, hi]`.
fn fit_axis(anchor: f64, extent: f64, gap: f64, forward: bool, lo: f64, hi: f64) -> f64 {
    let after = anchor + gap;
    let before = anchor - gap - extent;
    let mut start = if forward { after } else { before };
    if start < lo || start + extent > hi {
        let flipped = if forward { before } else { after };
        trace!(from = start, to = flipped; "flipping tooltip");
        start = flipped;
    }
    if extent >= hi - lo {
        lo
    } else {
        start.clamp(lo, hi - extent)
    }
}

fn crosshair_lines(mode: Crosshairs, anchor: Point, bounds: Rect) -> SmallVec<[Line; 2]> {
    let x = anchor.x.clamp(bounds.x0, bounds.x1);
    let y = anchor.y.clamp(bounds.y0, bounds.y1);
    let mut lines = SmallVec::new();
    if mode.has_x() {
        lines.push(Line::new((x, bounds.y0), (x, bounds.y1)));
    }
    if mode.has_y() {
        lines.push(Line::new((bounds.x0, y), (bounds.x1, y)));
    }
    lines
}

/// One placed tooltip row.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRow {
    /// Index of the item.
    pub index: usize,
    /// Marker and its center, if the item has one.
    pub marker: Option<(Marker, Point)>,
    /// `name: value`, or the name alone.
    pub text: String,
    /// Left edge of the text, vertically centered on the row.
    pub text_position: Point,
}

/// Screen-space geometry of a tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLayout {
    /// Stable-id base copied from the config.
    pub id_base: u64,
    /// Anchor the box was placed against.
    pub anchor: Point,
    /// The tooltip box.
    pub rect: Rect,
    /// Rows, top to bottom.
    pub rows: Vec<TooltipRow>,
    /// Crosshair segments: the vertical line first when both are drawn.
    pub crosshairs: SmallVec<[Line; 2]>,
    background: Color,
    border: Option<StrokeStyle>,
    text_style: TextStyle,
    crosshair_line: StrokeStyle,
}

impl TooltipLayout {
    /// Converts the layout into draw instructions.
    pub fn marks(&self) -> Vec<GuideMark> {
        let mut out = Vec::with_capacity(1 + 2 * self.rows.len() + self.crosshairs.len());
        for (i, line) in self.crosshairs.iter().enumerate() {
            out.push(GuideMark::line(
                self.id_base + CROSSHAIR_ID_OFFSET + i as u64,
                z_order::CROSSHAIRS,
                line.p0,
                line.p1,
                &self.crosshair_line,
            ));
        }
        out.push(GuideMark::new(
            self.id_base + BOX_ID_OFFSET,
            z_order::TOOLTIP,
            MarkShape::Rect(self.rect),
            Paint {
                fill: Some(self.background.into()),
                stroke: self.border.clone(),
            },
        ));
        for row in &self.rows {
            let i = row.index as u64;
            if let Some((marker, center)) = &row.marker {
                out.push(GuideMark::marker(
                    self.id_base + MARKER_ID_OFFSET + i,
                    z_order::TOOLTIP,
                    marker,
                    *center,
                ));
            }
            out.push(GuideMark::text(
                self.id_base + ROW_ID_OFFSET + i,
                z_order::TOOLTIP,
                row.text_position,
                row.text.clone(),
                TextAnchor::Start,
                TextBaseline::Middle,
                0.0,
                &self.text_style,
            ));
        }
        out
    }
}

/// A live tooltip: its config, the current anchor, and listeners for
/// [`GuideEvent::TooltipMoved`].
#[derive(Debug)]
pub struct TooltipTracker {
    config: TooltipConfig,
    anchor: Point,
    listeners: Listeners,
}

impl TooltipTracker {
    /// Starts at the configured anchor.
    pub fn new(config: TooltipConfig) -> Self {
        let anchor = Point::new(config.x, config.y);
        Self {
            config,
            anchor,
            listeners: Listeners::new(),
        }
    }

    /// The config this tracker was created from.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The current anchor.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Listeners for [`GuideEvent::TooltipMoved`].
    pub fn listeners_mut(&mut self) -> &mut Listeners {
        &mut self.listeners
    }

    /// Handles a pointer move.
    ///
    /// Following tooltips take `pointer` as their anchor and notify listeners; fixed ones keep
    /// the configured anchor. Either way the layout is recomputed from scratch.
    pub fn pointer_moved(
        &mut self,
        pointer: Point,
        viewport: Rect,
        measurer: &dyn TextMeasurer,
    ) -> Result<TooltipLayout> {
        if self.config.follow && pointer.is_finite() && pointer != self.anchor {
            self.anchor = pointer;
            self.listeners
                .emit(&GuideEvent::TooltipMoved { anchor: pointer });
        }
        self.layout(viewport, measurer)
    }

    /// Lays out the tooltip at the current anchor.
    pub fn layout(&self, viewport: Rect, measurer: &dyn TextMeasurer) -> Result<TooltipLayout> {
        self.config.layout_at(self.anchor, viewport, measurer)
    }
}

shallow_patch! {
    /// Partial [`TooltipConfig`]; each provided key replaces the default wholesale.
    TooltipPatch for TooltipConfig {
        /// See [`TooltipConfig::id_base`].
        id_base => id_base: u64,
        /// See [`TooltipConfig::items`].
        items => items: Vec<ListItem>,
        /// See [`TooltipConfig::x`].
        x => x: f64,
        /// See [`TooltipConfig::y`].
        y => y: f64,
        /// See [`TooltipConfig::region`].
        region => region: Region,
        /// See [`TooltipConfig::crosshairs_region`].
        crosshairs_region => crosshairs_region: Region,
        /// See [`TooltipConfig::crosshairs`].
        crosshairs => crosshairs: Crosshairs,
        /// See [`TooltipConfig::follow`].
        follow => follow: bool,
        /// See [`TooltipConfig::offset`].
        offset => offset: f64,
        /// See [`TooltipConfig::position`].
        position => position: TooltipPosition,
        /// See [`TooltipConfig::padding`].
        padding => padding: f64,
        /// See [`TooltipConfig::row_spacing`].
        row_spacing => row_spacing: f64,
        /// See [`TooltipConfig::marker_spacing`].
        marker_spacing => marker_spacing: f64,
        /// See [`TooltipConfig::text_style`].
        text_style => text_style: TextStyle,
        /// See [`TooltipConfig::background`].
        background => background: Color,
        /// See [`TooltipConfig::border`].
        border => border: StrokeStyle,
        /// See [`TooltipConfig::crosshair_line`].
        crosshair_line => crosshair_line: StrokeStyle,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::*;
    use crate::config::{ShallowMerge, merge_with_defaults};
    use crate::events::EventKind;

    /// 10 units per glyph, one font size tall.
    struct TenPerGlyph;

    impl TextMeasurer for TenPerGlyph {
        fn measure(&self, text: &str, font_size: f64) -> Size {
            Size::new(10.0 * text.chars().count() as f64, font_size)
        }
    }

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn region() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    #[test]
    fn flips_left_when_right_overflows() {
        let rect = position_tooltip(
            Point::new(195.0, 10.0),
            Size::new(50.0, 20.0),
            TooltipPosition::Right,
            5.0,
            region(),
        );
        assert_eq!(rect, Rect::new(140.0, 10.0, 190.0, 30.0));
    }

    #[test]
    fn preferred_side_is_kept_when_it_fits() {
        let size = Size::new(50.0, 20.0);
        let anchor = Point::new(100.0, 100.0);
        let at = |position| position_tooltip(anchor, size, position, 5.0, region()).origin();
        assert_eq!(at(TooltipPosition::Right), Point::new(105.0, 100.0));
        assert_eq!(at(TooltipPosition::Left), Point::new(45.0, 100.0));
        assert_eq!(at(TooltipPosition::Bottom), Point::new(100.0, 105.0));
        assert_eq!(at(TooltipPosition::Top), Point::new(100.0, 75.0));
    }

    #[test]
    fn cross_axis_flips_too() {
        // Near the bottom edge the box flips above the anchor on the cross axis.
        let rect = position_tooltip(
            Point::new(20.0, 190.0),
            Size::new(50.0, 20.0),
            TooltipPosition::Right,
            5.0,
            region(),
        );
        assert_eq!(rect.origin(), Point::new(25.0, 170.0));
    }

    #[test]
    fn clamps_when_neither_side_fits() {
        // Too wide for either side of a centered anchor.
        let rect = position_tooltip(
            Point::new(100.0, 100.0),
            Size::new(150.0, 20.0),
            TooltipPosition::Right,
            5.0,
            region(),
        );
        assert_eq!(rect.x0, 50.0);
        assert!(rect.x1 <= 200.0);
        // Larger than the region: pinned to its origin.
        let rect = position_tooltip(
            Point::new(100.0, 100.0),
            Size::new(300.0, 20.0),
            TooltipPosition::Left,
            5.0,
            region(),
        );
        assert_eq!(rect.x0, 0.0);
    }

    #[test]
    fn layout_sizes_the_box_from_rows() {
        let items = [
            ListItem::new("a", 1.0),
            ListItem::new("bb", "x").with_marker(Marker {
                size: 20.0,
                ..Default::default()
            }),
        ];
        let layout = TooltipConfig::new(items)
            .with_anchor(10.0, 10.0)
            .with_position(TooltipPosition::Right, 5.0)
            .layout(VIEWPORT, &TenPerGlyph)
            .unwrap();
        // "a: 1" is 40 wide; marker 20 + 6 + "bb: x" 50 = 76. Rows 12 and 20 tall, gap 4.
        assert_eq!(layout.rect, Rect::new(15.0, 10.0, 15.0 + 76.0 + 16.0, 10.0 + 36.0 + 16.0));
        assert_eq!(layout.rows[0].text, "a: 1");
        assert_eq!(layout.rows[0].text_position, Point::new(23.0, 24.0));
        let (_, center) = layout.rows[1].marker.unwrap();
        assert_eq!(center, Point::new(33.0, 44.0));
        assert_eq!(layout.rows[1].text_position, Point::new(49.0, 44.0));
    }

    #[test]
    fn region_defaults_to_the_viewport() {
        let layout = TooltipConfig::new([ListItem::new("abc", "")])
            .with_anchor(395.0, 295.0)
            .layout(VIEWPORT, &TenPerGlyph)
            .unwrap();
        assert_eq!(layout.rows[0].text, "abc");
        assert!(layout.rect.x1 <= VIEWPORT.x1);
        assert!(layout.rect.y1 <= VIEWPORT.y1);
    }

    #[test]
    fn crosshairs_span_their_region() {
        let layout = TooltipConfig::default()
            .with_anchor(50.0, 500.0)
            .with_region(Region::new((0.0, 0.0), (200.0, 200.0)))
            .with_crosshairs_region(Region::new((100.0, 0.0), (10.0, 100.0)))
            .with_crosshairs(Crosshairs::XY)
            .layout(VIEWPORT, &TenPerGlyph)
            .unwrap();
        assert_eq!(
            layout.crosshairs.as_slice(),
            [
                Line::new((50.0, 0.0), (50.0, 100.0)),
                Line::new((10.0, 100.0), (100.0, 100.0)),
            ]
        );
        // The box keeps the tooltip region, not the crosshair one.
        assert!(layout.rect.y1 <= 200.0);

        let only_x = TooltipConfig::default()
            .with_crosshairs(Crosshairs::X)
            .layout(VIEWPORT, &TenPerGlyph)
            .unwrap();
        assert_eq!(only_x.crosshairs.len(), 1);
        assert_eq!(only_x.crosshairs[0].p1.y, VIEWPORT.y1);
    }

    #[test]
    fn invalid_region_is_rejected() {
        let err = TooltipConfig::default()
            .with_region(Region::new((0.0, 0.0), (f64::NAN, 1.0)))
            .layout(VIEWPORT, &TenPerGlyph)
            .unwrap_err();
        assert!(matches!(err, GuideError::InvalidGeometry(_)));
    }

    #[test]
    fn following_tooltips_track_the_pointer() {
        let mut tracker = TooltipTracker::new(TooltipConfig::new([ListItem::new("a", 1.0)]));
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&moves);
        tracker
            .listeners_mut()
            .subscribe(EventKind::TooltipMoved, move |ev| {
                if let GuideEvent::TooltipMoved { anchor } = ev {
                    sink.borrow_mut().push(*anchor);
                }
            });

        let first = tracker
            .pointer_moved(Point::new(30.0, 40.0), VIEWPORT, &TenPerGlyph)
            .unwrap();
        assert_eq!(first.anchor, Point::new(30.0, 40.0));
        let second = tracker
            .pointer_moved(Point::new(60.0, 40.0), VIEWPORT, &TenPerGlyph)
            .unwrap();
        assert_eq!(second.rect.x0 - first.rect.x0, 30.0);
        assert_eq!(*moves.borrow(), [Point::new(30.0, 40.0), Point::new(60.0, 40.0)]);
    }

    #[test]
    fn fixed_tooltips_ignore_the_pointer() {
        let config = TooltipConfig::default()
            .with_anchor(5.0, 5.0)
            .with_follow(false);
        let mut tracker = TooltipTracker::new(config);
        let layout = tracker
            .pointer_moved(Point::new(100.0, 100.0), VIEWPORT, &TenPerGlyph)
            .unwrap();
        assert_eq!(layout.anchor, Point::new(5.0, 5.0));
        assert_eq!(tracker.anchor(), Point::new(5.0, 5.0));
    }

    #[test]
    fn marks_put_crosshairs_under_the_box() {
        let layout = TooltipConfig::new([ListItem::new("a", 1.0).with_marker(Marker::default())])
            .with_id_base(40)
            .with_crosshairs(Crosshairs::Y)
            .layout(VIEWPORT, &TenPerGlyph)
            .unwrap();
        let marks = layout.marks();
        let ids: Vec<u64> = marks.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, [940, 40, 240, 140]);
        assert!(marks[0].z_index < marks[1].z_index);
    }

    #[test]
    fn patch_overrides_position() {
        let config: TooltipConfig = merge_with_defaults(TooltipPatch {
            position: Some(TooltipPosition::Top),
            offset: Some(2.0),
            ..Default::default()
        });
        assert_eq!(config.position, TooltipPosition::Top);
        assert_eq!(config.offset, 2.0);
        assert!(config.follow);
        let config = config.merge(TooltipPatch {
            crosshairs: Some(Crosshairs::X),
            ..Default::default()
        });
        assert_eq!(config.crosshairs, Some(Crosshairs::X));
        assert_eq!(config.location(), Location::Point(Point::ZERO));
    }
}
