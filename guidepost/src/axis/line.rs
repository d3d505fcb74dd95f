// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear axes.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Vec2};

use super::{
    AxisBase, AxisLabelConfig, AxisLayout, AxisShape, AxisTitleConfig, LineConfig,
    SubTickLineConfig, TickLineConfig, axis_builders, layout_axis,
};
use crate::config::shallow_patch;
use crate::error::{GuideError, Result};
use crate::geometry::{ListItem, Region};
use crate::location::{Anchor, Locate, Location, OffsetPoint};
use crate::measure::TextMeasurer;

/// An axis along the segment `start → end`.
///
/// With a positive vertical factor, ticks point along `(dy, -dx)`: above a left-to-right axis,
/// to the right of a bottom-to-top axis.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineAxisConfig {
    /// Shared axis settings.
    pub base: AxisBase,
    /// Position of `t = 0`.
    pub start: Point,
    /// Position of `t = 1`.
    pub end: Point,
}

impl LineAxisConfig {
    /// Creates an axis between two points with default styling and no ticks.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            base: AxisBase::default(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Lays out the axis.
    ///
    /// Fails with [`GuideError::InvalidGeometry`] when `start` and `end` coincide or are not
    /// finite.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> Result<AxisLayout> {
        let Anchor::Region { raw, .. } = self.location().resolve(OffsetPoint::default())? else {
            return Err(GuideError::InvalidGeometry("line axis must resolve to a region"));
        };
        let segment = Segment::new(raw)?;
        Ok(layout_axis(&self.base, &segment, measurer))
    }
}

axis_builders!(LineAxisConfig);

impl Locate for LineAxisConfig {
    fn location(&self) -> Location {
        Location::Region(Region::new(self.start, self.end))
    }
}

/// A non-degenerate directed segment.
#[derive(Clone, Copy, Debug)]
struct Segment {
    start: Point,
    end: Point,
    dir: Vec2,
}

impl Segment {
    fn new(region: Region) -> Result<Self> {
        let d = region.raw_direction();
        let len = d.hypot();
        if len == 0.0 {
            return Err(GuideError::InvalidGeometry("axis line has zero length"));
        }
        Ok(Self {
            start: region.start,
            end: region.end,
            dir: d / len,
        })
    }
}

impl AxisShape for Segment {
    fn point_at(&self, t: f64) -> Point {
        self.start.lerp(self.end, t)
    }

    fn direction_at(&self, _t: f64) -> Vec2 {
        self.dir
    }

    fn normal_at(&self, _t: f64) -> Vec2 {
        Vec2::new(self.dir.y, -self.dir.x)
    }

    fn line_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }
}

shallow_patch! {
    /// Partial [`LineAxisConfig`]; each provided key replaces the default wholesale.
    LineAxisPatch for LineAxisConfig {
        /// See [`AxisBase::id_base`].
        id_base => base.id_base: u64,
        /// See [`AxisBase::ticks`].
        ticks => base.ticks: Vec<ListItem>,
        /// See [`AxisBase::line`].
        line => base.line: LineConfig,
        /// See [`AxisBase::tick_line`].
        tick_line => base.tick_line: TickLineConfig,
        /// See [`AxisBase::sub_tick_line`].
        sub_tick_line => base.sub_tick_line: SubTickLineConfig,
        /// See [`AxisBase::title`].
        title => base.title: AxisTitleConfig,
        /// See [`AxisBase::label`].
        label => base.label: AxisLabelConfig,
        /// See [`AxisBase::vertical_factor`].
        vertical_factor => base.vertical_factor: f64,
        /// See [`AxisBase::offset_x`].
        offset_x => base.offset_x: f64,
        /// See [`AxisBase::offset_y`].
        offset_y => base.offset_y: f64,
        /// See [`LineAxisConfig::start`].
        start => start: Point,
        /// See [`LineAxisConfig::end`].
        end => end: Point,
    }
}
