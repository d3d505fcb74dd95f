// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Location resolution.
//!
//! Every guide is anchored by one [`Location`] variant: a point (legends, tooltips), a region
//! (linear axes), an ordered point set (grids), a circle (circular axes), or nothing at all
//! (the component positions itself through explicit offsets). [`Location::resolve`] validates
//! the payload and produces an [`Anchor`] that engines consume.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::{GuideError, Result};
use crate::geometry::Region;

/// The tag of a [`Location`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationType {
    /// A single point.
    Point,
    /// A rectangular region.
    Region,
    /// An ordered set of points.
    Points,
    /// A circle (optionally an arc).
    Circle,
    /// No anchor; explicit offsets only.
    None,
}

/// Explicit offsets used by components that are not anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetPoint {
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
}

impl OffsetPoint {
    /// Creates an offset point.
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }

    /// The offset as a vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }
}

/// Payload of the circle location variant.
///
/// Missing angles describe a full circle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircleLocation {
    /// Circle center.
    pub center: Point,
    /// Circle radius; must not be negative.
    pub radius: f64,
    /// Start angle in radians (screen space, clockwise from +x).
    pub start_angle: Option<f64>,
    /// End angle in radians. May be smaller than `start_angle` for a reverse sweep.
    pub end_angle: Option<f64>,
}

/// An anchor description. Exactly one variant is active per component.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// Anchored at a point.
    Point(Point),
    /// Anchored to a region.
    Region(Region),
    /// Anchored along an ordered set of points.
    Points(Vec<Point>),
    /// Anchored on a circle or arc.
    Circle(CircleLocation),
    /// Not anchored.
    #[default]
    None,
}

impl Location {
    /// Returns the variant tag.
    pub fn kind(&self) -> LocationType {
        match self {
            Self::Point(_) => LocationType::Point,
            Self::Region(_) => LocationType::Region,
            Self::Points(_) => LocationType::Points,
            Self::Circle(_) => LocationType::Circle,
            Self::None => LocationType::None,
        }
    }

    /// Resolves this location into an [`Anchor`].
    ///
    /// `fallback` is returned untouched for [`Location::None`].
    pub fn resolve(&self, fallback: OffsetPoint) -> Result<Anchor> {
        match self {
            Self::Point(p) => {
                ensure_finite(*p)?;
                Ok(Anchor::Point(*p))
            }
            Self::Region(region) => {
                if !region.is_finite() {
                    return Err(GuideError::InvalidGeometry("region corner is not finite"));
                }
                Ok(Anchor::Region {
                    rect: region.normalized(),
                    raw: *region,
                })
            }
            Self::Points(points) => {
                for p in points {
                    ensure_finite(*p)?;
                }
                Ok(Anchor::Points(points.clone()))
            }
            Self::Circle(circle) => CircleAnchor::from_location(circle).map(Anchor::Circle),
            Self::None => Ok(Anchor::Offset(fallback)),
        }
    }
}

fn ensure_finite(p: Point) -> Result<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(GuideError::InvalidGeometry("point is not finite"))
    }
}

/// A validated circle or arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleAnchor {
    /// Circle center.
    pub center: Point,
    /// Non-negative radius.
    pub radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians; smaller than `start_angle` for a reverse sweep.
    pub end_angle: f64,
}

impl CircleAnchor {
    fn from_location(circle: &CircleLocation) -> Result<Self> {
        ensure_finite(circle.center)?;
        if !circle.radius.is_finite() || circle.radius < 0.0 {
            return Err(GuideError::InvalidGeometry("circle radius must be >= 0"));
        }
        let start_angle = circle.start_angle.unwrap_or(0.0);
        let end_angle = circle.end_angle.unwrap_or(start_angle + TAU);
        if !start_angle.is_finite() || !end_angle.is_finite() {
            return Err(GuideError::InvalidGeometry("circle angle is not finite"));
        }
        Ok(Self {
            center: circle.center,
            radius: circle.radius,
            start_angle,
            end_angle,
        })
    }

    /// Signed angular extent; negative for a reverse sweep.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns `true` when the sweep covers the whole circle.
    pub fn is_full_circle(&self) -> bool {
        self.sweep().abs() >= TAU - 1e-9
    }

    /// Angle at normalized position `t` along the sweep.
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * self.sweep()
    }

    /// Point on the circle at normalized position `t` along the sweep.
    pub fn point_at(&self, t: f64) -> Point {
        let angle = self.angle_at(t);
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// A resolved placement.
#[derive(Clone, Debug, PartialEq)]
pub enum Anchor {
    /// A point.
    Point(Point),
    /// A region, both normalized and as authored.
    Region {
        /// Normalized rectangle (origin holds the smaller coordinates).
        rect: Rect,
        /// The authored region, kept for directional rendering.
        raw: Region,
    },
    /// An ordered point set.
    Points(Vec<Point>),
    /// A circle or arc.
    Circle(CircleAnchor),
    /// Explicit offsets of an unanchored component.
    Offset(OffsetPoint),
}

impl Anchor {
    /// The point a component treats as its origin.
    ///
    /// Regions use their normalized top-left corner, point sets their first point (or the
    /// coordinate origin when empty), circles their center.
    pub fn origin(&self) -> Point {
        match self {
            Self::Point(p) => *p,
            Self::Region { rect, .. } => rect.origin(),
            Self::Points(points) => points.first().copied().unwrap_or(Point::ZERO),
            Self::Circle(circle) => circle.center,
            Self::Offset(offset) => offset.to_vec2().to_point(),
        }
    }

    /// Returns the anchor's points, failing when fewer than `required` are present.
    ///
    /// Non-point-set anchors contribute their natural points: one for a point or offset, two
    /// (authored start and end) for a region, none for a circle.
    pub fn require_points(&self, required: usize) -> Result<Vec<Point>> {
        let points = match self {
            Self::Point(p) => alloc::vec![*p],
            Self::Region { raw, .. } => alloc::vec![raw.start, raw.end],
            Self::Points(points) => points.clone(),
            Self::Circle(_) => Vec::new(),
            Self::Offset(_) => alloc::vec![self.origin()],
        };
        if points.len() < required {
            return Err(GuideError::insufficient(required, points.len()));
        }
        Ok(points)
    }
}

/// Implemented by component configs to describe how they are anchored.
pub trait Locate {
    /// Returns the location variant that anchors this component.
    fn location(&self) -> Location;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const ORIGIN: OffsetPoint = OffsetPoint {
        offset_x: 3.0,
        offset_y: 4.0,
    };

    #[test]
    fn point_resolves_to_itself() {
        let anchor = Location::Point(Point::new(1.0, 2.0)).resolve(ORIGIN).unwrap();
        assert_eq!(anchor, Anchor::Point(Point::new(1.0, 2.0)));
        assert_eq!(anchor.origin(), Point::new(1.0, 2.0));
    }

    #[test]
    fn region_is_normalized_but_keeps_raw_corners() {
        let region = Region::new((100.0, 80.0), (0.0, 20.0));
        let anchor = Location::Region(region).resolve(ORIGIN).unwrap();
        let Anchor::Region { rect, raw } = anchor else {
            panic!("expected a region anchor");
        };
        assert_eq!(rect, Rect::new(0.0, 20.0, 100.0, 80.0));
        assert_eq!(raw, region);
    }

    #[test]
    fn points_keep_their_order() {
        let pts = alloc::vec![Point::new(5.0, 0.0), Point::new(0.0, 0.0), Point::new(9.0, 1.0)];
        let anchor = Location::Points(pts.clone()).resolve(ORIGIN).unwrap();
        assert_eq!(anchor, Anchor::Points(pts));
    }

    #[test]
    fn circle_defaults_to_full_sweep() {
        let anchor = Location::Circle(CircleLocation {
            center: Point::new(50.0, 50.0),
            radius: 10.0,
            ..Default::default()
        })
        .resolve(ORIGIN)
        .unwrap();
        let Anchor::Circle(c) = anchor else {
            panic!("expected a circle anchor");
        };
        assert_eq!(c.start_angle, 0.0);
        assert!((c.end_angle - TAU).abs() < 1e-12);
        assert!(c.is_full_circle());
    }

    #[test]
    fn reverse_sweep_is_preserved() {
        let anchor = Location::Circle(CircleLocation {
            center: Point::ZERO,
            radius: 1.0,
            start_angle: Some(PI),
            end_angle: Some(0.0),
        })
        .resolve(ORIGIN)
        .unwrap();
        let Anchor::Circle(c) = anchor else {
            panic!("expected a circle anchor");
        };
        assert!(c.sweep() < 0.0);
        // Halfway along a reverse sweep from pi to 0 is pi/2 (straight down in screen space).
        assert!((c.angle_at(0.5) - FRAC_PI_2).abs() < 1e-12);
        let p = c.point_at(0.5);
        assert!(p.x.abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = Location::Circle(CircleLocation {
            radius: -1.0,
            ..Default::default()
        })
        .resolve(ORIGIN)
        .unwrap_err();
        assert!(matches!(err, GuideError::InvalidGeometry(_)));
    }

    #[test]
    fn none_returns_the_fallback_untouched() {
        let anchor = Location::None.resolve(ORIGIN).unwrap();
        assert_eq!(anchor, Anchor::Offset(ORIGIN));
        assert_eq!(anchor.origin(), Point::new(3.0, 4.0));
        assert_eq!(Location::None.kind(), LocationType::None);
    }

    #[test]
    fn require_points_reports_shortfall() {
        let anchor = Location::Points(alloc::vec![Point::ZERO]).resolve(ORIGIN).unwrap();
        assert_eq!(
            anchor.require_points(2),
            Err(GuideError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            Location::Points(Vec::new())
                .resolve(ORIGIN)
                .unwrap()
                .require_points(1),
            Err(GuideError::insufficient(1, 0))
        );
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let err = Location::Point(Point::new(f64::NAN, 0.0))
            .resolve(ORIGIN)
            .unwrap_err();
        assert!(matches!(err, GuideError::InvalidGeometry(_)));
    }
}
