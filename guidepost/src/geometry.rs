// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry value types shared by every guide.
//!
//! Points are plain [`kurbo::Point`]s. The types here add the invariants guides care about:
//! a [`Region`] keeps its authored direction, a [`Range`] knows when it is degenerate, and a
//! [`BBox`] can carry redundant extrema that must agree with its origin and size.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use peniko::color::palette::css;

use crate::error::{GuideError, Result};

/// Flattening tolerance, in scene units, used when arcs are converted to Bézier paths.
pub const ARC_TOLERANCE: f64 = 0.25;

/// An axis-aligned rectangle given by two corners.
///
/// No ordering is enforced between `start` and `end`: an inverted region is meaningful for
/// directional rendering (e.g. a rail that runs right-to-left). Use [`Region::normalized`]
/// whenever min/max bounds are needed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// First corner as authored.
    pub start: Point,
    /// Second corner as authored.
    pub end: Point,
}

impl Region {
    /// Creates a region from two corners.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns the rectangle with `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Returns the authored `start → end` vector (not normalized).
    pub fn raw_direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Returns `true` when both corners have finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::new(rect.origin(), (rect.x1, rect.y1))
    }
}

/// A scalar interval.
///
/// `min <= max` is expected but not enforced; consumers call [`Range::validate`] and decide
/// whether to reject or degrade.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// Creates a range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` when the range has no extent (`min == max`).
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    /// Checks that the range is finite and strictly increasing.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(GuideError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Clamps `v` into `[min, max]` (or `[max, min]` for an inverted range).
    pub fn clamp(&self, v: f64) -> f64 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        v.clamp(lo, hi)
    }
}

/// A bounding box with optional redundant extrema.
///
/// When present, the extrema must satisfy `min_x = x`, `max_x = x + width`, `min_y = y` and
/// `max_y = y + height`; see [`BBox::is_consistent`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Optional copy of the left edge.
    pub min_x: Option<f64>,
    /// Optional copy of the right edge.
    pub max_x: Option<f64>,
    /// Optional copy of the top edge.
    pub min_y: Option<f64>,
    /// Optional copy of the bottom edge.
    pub max_y: Option<f64>,
}

impl BBox {
    const EPSILON: f64 = 1e-9;

    /// Creates a box from origin and size, with every extremum filled in.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_x: Some(x),
            max_x: Some(x + width),
            min_y: Some(y),
            max_y: Some(y + height),
        }
    }

    /// Creates a box covering `rect` (normalized first).
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    /// Returns the box as a [`Rect`], ignoring the optional extrema.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns `true` when every present extremum agrees with origin and size.
    pub fn is_consistent(&self) -> bool {
        let agrees = |v: Option<f64>, expected: f64| {
            v.is_none_or(|v| (v - expected).abs() <= Self::EPSILON)
        };
        agrees(self.min_x, self.x)
            && agrees(self.max_x, self.x + self.width)
            && agrees(self.min_y, self.y)
            && agrees(self.max_y, self.y + self.height)
    }
}

/// The value carried by a [`ListItem`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemValue {
    /// A numeric value (for axis ticks: the normalized position in `[0, 1]`).
    Number(f64),
    /// A textual value (e.g. a legend item's extra value column).
    Text(String),
}

impl ItemValue {
    /// Returns the numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl core::fmt::Display for ItemValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ItemValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ItemValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for ItemValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Shapes a legend marker can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerSymbol {
    /// A filled circle.
    #[default]
    Circle,
    /// An axis-aligned square.
    Square,
    /// A short horizontal stroke, for line series.
    Line,
}

/// A marker (icon) descriptor for a list item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Marker shape.
    pub symbol: MarkerSymbol,
    /// Side length / diameter.
    pub size: f64,
    /// Fill color.
    pub fill: Color,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            symbol: MarkerSymbol::Circle,
            size: 8.0,
            fill: css::STEEL_BLUE,
        }
    }
}

/// An entry in a tick list, legend, or tooltip.
///
/// `id` gives the item a stable identity across re-layouts; see [`crate::correlate_items`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    /// Stable identity.
    pub id: Option<String>,
    /// Display name (for ticks: the label text).
    pub name: String,
    /// Associated value.
    pub value: ItemValue,
    /// Optional marker override.
    pub marker: Option<Marker>,
}

impl ListItem {
    /// Creates an item without id or marker.
    pub fn new(name: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        Self {
            id: None,
            name: name.into(),
            value: value.into(),
            marker: None,
        }
    }

    /// Convenience for an axis tick at normalized position `t`.
    pub fn tick(name: impl Into<String>, t: f64) -> Self {
        Self::new(name, t)
    }

    /// Sets the stable id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// One gridline given as an ordered polyline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridItem {
    /// Stable identity.
    pub id: Option<String>,
    /// Ordered points; at least two.
    pub points: Vec<Point>,
}

impl GridItem {
    /// Creates a grid item from points.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            id: None,
            points: points.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn region_normalizes_without_losing_direction() {
        let region = Region::new((200.0, 10.0), (0.0, 50.0));
        let rect = region.normalized();
        assert_eq!(rect, Rect::new(0.0, 10.0, 200.0, 50.0));
        assert_eq!(region.raw_direction(), Vec2::new(-200.0, 40.0));
    }

    #[test]
    fn range_rejects_empty_and_inverted_intervals() {
        assert!(Range::new(0.0, 1.0).validate().is_ok());
        assert_eq!(
            Range::new(3.0, 3.0).validate(),
            Err(GuideError::InvalidRange { min: 3.0, max: 3.0 })
        );
        assert!(Range::new(4.0, 3.0).validate().is_err());
        assert!(Range::new(0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn range_clamp_handles_inverted_bounds() {
        assert_eq!(Range::new(0.0, 10.0).clamp(12.0), 10.0);
        assert_eq!(Range::new(10.0, 0.0).clamp(-1.0), 0.0);
    }

    #[test]
    fn bbox_consistency() {
        let b = BBox::from_rect(Rect::new(10.0, 20.0, 0.0, 0.0));
        assert_eq!((b.x, b.y, b.width, b.height), (0.0, 0.0, 10.0, 20.0));
        assert!(b.is_consistent());

        let partial = BBox {
            min_x: None,
            max_y: None,
            ..b
        };
        assert!(partial.is_consistent());

        let broken = BBox {
            max_x: Some(3.0),
            ..b
        };
        assert!(!broken.is_consistent());
        assert_eq!(broken.to_rect(), Rect::new(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn item_value_only_exposes_numbers() {
        assert_eq!(ListItem::tick("0.5", 0.5).value.as_number(), Some(0.5));
        assert_eq!(ListItem::new("a", "x").value.as_number(), None);
    }
}
