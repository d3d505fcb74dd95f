// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular axes.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Arc, BezPath, Point, Shape, Vec2};
use log::warn;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use super::{
    AxisBase, AxisLabelConfig, AxisLayout, AxisShape, AxisTitleConfig, LineConfig,
    SubTickLineConfig, TickLineConfig, axis_builders, layout_axis,
};
use crate::config::shallow_patch;
use crate::error::{GuideError, Result};
use crate::geometry::{ARC_TOLERANCE, ListItem};
use crate::location::{Anchor, CircleAnchor, CircleLocation, Locate, Location, OffsetPoint};
use crate::measure::TextMeasurer;

/// An axis along a circle or arc.
///
/// Angles are in radians, measured clockwise from `+x` in screen space. Omitted angles give
/// a full circle starting at `0`; an `end_angle` below `start_angle` runs the axis backwards.
/// With a positive vertical factor, ticks point away from the center.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircleAxisConfig {
    /// Shared axis settings.
    pub base: AxisBase,
    /// Circle center.
    pub center: Point,
    /// Circle radius. Negative values are treated as `0`.
    pub radius: f64,
    /// Angle of `t = 0`.
    pub start_angle: Option<f64>,
    /// Angle of `t = 1`.
    pub end_angle: Option<f64>,
}

impl CircleAxisConfig {
    /// Creates a full-circle axis with default styling and no ticks.
    pub fn new(center: impl Into<Point>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            ..Default::default()
        }
    }

    /// Restricts the axis to the arc `start_angle → end_angle`.
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = Some(start_angle);
        self.end_angle = Some(end_angle);
        self
    }

    /// Lays out the axis.
    ///
    /// Fails with [`GuideError::InvalidGeometry`] when the center or an angle is not finite.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> Result<AxisLayout> {
        if self.radius < 0.0 {
            warn!(radius = self.radius; "negative circle axis radius clamped to 0");
        }
        let Anchor::Circle(circle) = self.location().resolve(OffsetPoint::default())? else {
            return Err(GuideError::InvalidGeometry("circle axis must resolve to a circle"));
        };
        Ok(layout_axis(&self.base, &circle, measurer))
    }
}

axis_builders!(CircleAxisConfig);

impl Locate for CircleAxisConfig {
    fn location(&self) -> Location {
        Location::Circle(CircleLocation {
            center: self.center,
            radius: self.radius.max(0.0),
            start_angle: self.start_angle,
            end_angle: self.end_angle,
        })
    }
}

impl AxisShape for CircleAnchor {
    fn point_at(&self, t: f64) -> Point {
        CircleAnchor::point_at(self, t)
    }

    fn direction_at(&self, t: f64) -> Vec2 {
        let angle = self.angle_at(t);
        let tangent = Vec2::new(-angle.sin(), angle.cos());
        if self.sweep() < 0.0 { -tangent } else { tangent }
    }

    fn normal_at(&self, t: f64) -> Vec2 {
        let angle = self.angle_at(t);
        Vec2::new(angle.cos(), angle.sin())
    }

    fn line_path(&self) -> BezPath {
        Arc::new(
            self.center,
            (self.radius, self.radius),
            self.start_angle,
            self.sweep(),
            0.0,
        )
        .to_path(ARC_TOLERANCE)
    }

    /// The center of a full circle, otherwise the middle of the arc's bounding box.
    fn title_anchor(&self) -> Point {
        if self.is_full_circle() {
            self.center
        } else {
            self.line_path().bounding_box().center()
        }
    }

    fn is_straight(&self) -> bool {
        false
    }
}

shallow_patch! {
    /// Partial [`CircleAxisConfig`]; each provided key replaces the default wholesale.
    CircleAxisPatch for CircleAxisConfig {
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
        /// See [`CircleAxisConfig::center`].
        center => center: Point,
        /// See [`CircleAxisConfig::radius`].
        radius => radius: f64,
        /// See [`CircleAxisConfig::start_angle`].
        start_angle => start_angle: f64,
        /// See [`CircleAxisConfig::end_angle`].
        end_angle => end_angle: f64,
    }
}
