// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridline and band layout.
//!
//! A grid is a list of [`GridItem`]s, each an ordered polyline supplied by the caller (usually
//! derived from axis ticks). Line grids join consecutive points straight; circle grids join
//! points that lie at the same distance from the center with an arc, so polar gridlines stay
//! round however coarsely they are sampled.
//!
//! With [`GridConfig::alternate_color`] set, the space between every pair of neighbouring
//! items becomes a band. A single color fills every other band starting with the first; a
//! palette cycles over all bands.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

use kurbo::{Affine, Arc, BezPath, Point, Vec2};
use log::debug;
use peniko::Color;
use peniko::color::palette::css;

use crate::config::shallow_patch;
use crate::error::Result;
use crate::geometry::{ARC_TOLERANCE, GridItem};
use crate::location::{Locate, Location, OffsetPoint};
use crate::mark::{GuideMark, MarkShape, Paint, StrokeStyle};
use crate::z_order;

const BAND_ID_OFFSET: u64 = 1_000;

/// Relative radius difference below which two points count as lying on the same circle.
const SAME_RADIUS_EPSILON: f64 = 1e-6;

/// How consecutive grid points are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridShape {
    /// Straight segments.
    #[default]
    Line,
    /// Arcs around `center` between points at equal radius, straight segments otherwise.
    Circle {
        /// Center of the polar grid.
        center: Point,
    },
}

/// Grid configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Line or circle grid.
    pub shape: GridShape,
    /// Gridlines in order; each needs at least two points.
    pub items: Vec<GridItem>,
    /// Join each gridline's last point back to its first.
    pub closed: bool,
    /// Band fills; empty disables bands.
    pub alternate_color: Vec<Color>,
    /// Gridline stroke; `None` draws bands only.
    pub line: Option<StrokeStyle>,
    /// Horizontal translation applied after layout.
    pub offset_x: f64,
    /// Vertical translation applied after layout.
    pub offset_y: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            id_base: 0,
            shape: GridShape::Line,
            items: Vec::new(),
            closed: false,
            alternate_color: Vec::new(),
            line: Some(StrokeStyle::solid(css::BLACK.with_alpha(40.0 / 255.0), 1.0)),
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl GridConfig {
    /// A grid of straight gridlines.
    pub fn line(items: impl IntoIterator<Item = GridItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Default::default()
        }
    }

    /// A polar grid around `center`.
    pub fn circle(center: impl Into<Point>, items: impl IntoIterator<Item = GridItem>) -> Self {
        Self {
            shape: GridShape::Circle {
                center: center.into(),
            },
            items: items.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sets the stable-id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Closes every gridline.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Sets the band colors.
    pub fn with_alternate_color(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.alternate_color = colors.into_iter().collect();
        self
    }

    /// Sets the gridline stroke.
    pub fn with_line(mut self, line: StrokeStyle) -> Self {
        self.line = Some(line);
        self
    }

    /// Hides gridlines, keeping bands.
    pub fn without_line(mut self) -> Self {
        self.line = None;
        self
    }

    /// Translates the grid after layout.
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Lays out gridlines and bands.
    ///
    /// Fails with [`crate::GuideError::InsufficientData`] if any item has fewer than two
    /// points, and with [`crate::GuideError::InvalidGeometry`] on non-finite points. Nothing is
    /// produced for a grid that fails.
    pub fn layout(&self) -> Result<GridLayout> {
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let points = Location::Points(item.points.clone())
                .resolve(OffsetPoint::default())?
                .require_points(2)?;
            items.push(points);
        }

        let shift = Affine::translate((self.offset_x, self.offset_y));
        let mut lines: Vec<BezPath> = items
            .iter()
            .map(|points| {
                let mut path = BezPath::new();
                path.move_to(points[0]);
                self.trace(&mut path, points);
                if self.closed {
                    self.join(&mut path, points[points.len() - 1], points[0]);
                    path.close_path();
                }
                path
            })
            .collect();

        let mut bands = Vec::new();
        if !self.alternate_color.is_empty() {
            for (index, pair) in items.windows(2).enumerate() {
                let mut path = self.band_path(&pair[0], &pair[1]);
                path.apply_affine(shift);
                bands.push(GridBand {
                    index,
                    path,
                    fill: self.band_fill(index),
                });
            }
        }
        for path in &mut lines {
            path.apply_affine(shift);
        }

        debug!(lines = lines.len(), bands = bands.len(); "laid out grid");
        Ok(GridLayout {
            id_base: self.id_base,
            lines,
            bands,
            line_style: self.line.clone(),
        })
    }

    fn band_fill(&self, index: usize) -> Option<Color> {
        match self.alternate_color.as_slice() {
            [] => None,
            [single] => (index % 2 == 0).then_some(*single),
            palette => Some(palette[index % palette.len()]),
        }
    }

    /// Appends segments visiting `points[1..]`; the current point must be `points[0]`.
    fn trace(&self, path: &mut BezPath, points: &[Point]) {
        for pair in points.windows(2) {
            self.join(path, pair[0], pair[1]);
        }
    }

    fn join(&self, path: &mut BezPath, from: Point, to: Point) {
        match self.shape {
            GridShape::Line => path.line_to(to),
            GridShape::Circle { center } => match arc_between(center, from, to) {
                Some(arc) => path.extend(arc.append_iter(ARC_TOLERANCE)),
                None => path.line_to(to),
            },
        }
    }

    fn band_path(&self, a: &[Point], b: &[Point]) -> BezPath {
        let reversed: Vec<Point> = b.iter().rev().copied().collect();
        let mut path = BezPath::new();
        path.move_to(a[0]);
        self.trace(&mut path, a);
        if self.closed {
            // Two opposite-winding loops: a ring under the nonzero rule.
            self.join(&mut path, a[a.len() - 1], a[0]);
            path.close_path();
            path.move_to(reversed[0]);
            self.trace(&mut path, &reversed);
            self.join(&mut path, reversed[reversed.len() - 1], reversed[0]);
        } else {
            path.line_to(reversed[0]);
            self.trace(&mut path, &reversed);
        }
        path.close_path();
        path
    }
}

/// The shorter arc around `center` from `from` to `to`, if both lie on the same circle.
fn arc_between(center: Point, from: Point, to: Point) -> Option<Arc> {
    let (da, db) = (from - center, to - center);
    let (ra, rb) = (da.hypot(), db.hypot());
    if ra == 0.0 || (ra - rb).abs() > SAME_RADIUS_EPSILON * ra.max(rb) {
        return None;
    }
    let start = da.atan2();
    let mut sweep = db.atan2() - start;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep <= -PI {
        sweep += TAU;
    }
    Some(Arc::new(center, Vec2::new(ra, ra), start, sweep, 0.0))
}

impl Locate for GridConfig {
    /// Every gridline point, in item order.
    fn location(&self) -> Location {
        Location::Points(
            self.items
                .iter()
                .flat_map(|item| item.points.iter().copied())
                .collect(),
        )
    }
}

/// The region between two neighbouring gridlines.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBand {
    /// Index of the band's first gridline.
    pub index: usize,
    /// Closed outline.
    pub path: BezPath,
    /// Fill, or `None` for an unfilled band.
    pub fill: Option<Color>,
}

/// Screen-space geometry of a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Stable-id base copied from the config.
    pub id_base: u64,
    /// One path per gridline.
    pub lines: Vec<BezPath>,
    /// `items.len() - 1` bands when band colors are set, none otherwise.
    pub bands: Vec<GridBand>,
    line_style: Option<StrokeStyle>,
}

impl GridLayout {
    /// Converts the layout into draw instructions. Unfilled bands produce no mark.
    pub fn marks(&self) -> Vec<GuideMark> {
        let mut out = Vec::new();
        for band in &self.bands {
            if let Some(fill) = band.fill {
                out.push(GuideMark::new(
                    self.id_base + BAND_ID_OFFSET + band.index as u64,
                    z_order::GRID_BANDS,
                    MarkShape::Path(band.path.clone()),
                    Paint::filled(fill),
                ));
            }
        }
        if let Some(style) = &self.line_style {
            for (i, line) in self.lines.iter().enumerate() {
                out.push(GuideMark::new(
                    self.id_base + i as u64,
                    z_order::GRID_LINES,
                    MarkShape::Path(line.clone()),
                    Paint::stroked(style),
                ));
            }
        }
        out
    }
}

shallow_patch! {
    /// Partial [`GridConfig`]; each provided key replaces the default wholesale.
    GridPatch for GridConfig {
        /// See [`GridConfig::id_base`].
        id_base => id_base: u64,
        /// See [`GridConfig::shape`].
        shape => shape: GridShape,
        /// See [`GridConfig::items`].
        items => items: Vec<GridItem>,
        /// See [`GridConfig::closed`].
        closed => closed: bool,
        /// See [`GridConfig::alternate_color`].
        alternate_color => alternate_color: Vec<Color>,
        /// See [`GridConfig::line`].
        line => line: StrokeStyle,
        /// See [`GridConfig::offset_x`].
        offset_x => offset_x: f64,
        /// See [`GridConfig::offset_y`].
        offset_y => offset_y: f64,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use float_cmp::assert_approx_eq;
    use kurbo::{PathEl, Shape};

    use super::*;
    use crate::error::GuideError;

    fn horizontal(ys: &[f64]) -> Vec<GridItem> {
        ys.iter()
            .map(|y| GridItem::new([Point::new(0.0, *y), Point::new(100.0, *y)]))
            .collect()
    }

    fn ring(radius: f64, steps: usize) -> GridItem {
        GridItem::new((0..steps).map(|i| {
            let a = TAU * i as f64 / steps as f64;
            Point::new(radius * a.cos(), radius * a.sin())
        }))
    }

    #[test]
    fn single_color_fills_every_other_band() {
        let eee = Color::from_rgb8(0xee, 0xee, 0xee);
        let layout = GridConfig::line(horizontal(&[0.0, 10.0, 20.0, 30.0]))
            .with_alternate_color([eee])
            .layout()
            .unwrap();
        let fills: Vec<Option<Color>> = layout.bands.iter().map(|b| b.fill).collect();
        assert_eq!(fills, [Some(eee), None, Some(eee)]);

        let band_marks = layout
            .marks()
            .into_iter()
            .filter(|m| m.z_index == z_order::GRID_BANDS)
            .count();
        assert_eq!(band_marks, 2);
    }

    #[test]
    fn palette_cycles_over_all_bands() {
        let layout = GridConfig::line(horizontal(&[0.0, 1.0, 2.0, 3.0, 4.0]))
            .with_alternate_color([css::RED, css::GREEN, css::BLUE])
            .layout()
            .unwrap();
        let fills: Vec<Option<Color>> = layout.bands.iter().map(|b| b.fill).collect();
        assert_eq!(
            fills,
            [Some(css::RED), Some(css::GREEN), Some(css::BLUE), Some(css::RED)]
        );
    }

    #[test]
    fn bands_need_colors_and_two_items() {
        let plain = GridConfig::line(horizontal(&[0.0, 10.0])).layout().unwrap();
        assert!(plain.bands.is_empty());
        let single = GridConfig::line(horizontal(&[0.0]))
            .with_alternate_color([css::RED])
            .layout()
            .unwrap();
        assert!(single.bands.is_empty());
        assert_eq!(single.lines.len(), 1);
    }

    #[test]
    fn band_outline_spans_both_lines() {
        let layout = GridConfig::line(horizontal(&[0.0, 10.0]))
            .with_alternate_color([css::RED])
            .layout()
            .unwrap();
        let bounds = layout.bands[0].path.bounding_box();
        assert_eq!(bounds, kurbo::Rect::new(0.0, 0.0, 100.0, 10.0));
    }

    #[test]
    fn short_item_fails_the_whole_grid() {
        let mut items = horizontal(&[0.0, 10.0]);
        items.push(GridItem::new([Point::new(1.0, 1.0)]));
        let err = GridConfig::line(items).layout().unwrap_err();
        assert_eq!(err, GuideError::insufficient(2, 1));
    }

    #[test]
    fn closed_line_grid_returns_to_start() {
        let square = GridItem::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let layout = GridConfig::line([square]).with_closed(true).layout().unwrap();
        let els = layout.lines[0].elements();
        assert_eq!(els.last(), Some(&PathEl::ClosePath));
        assert_eq!(els[els.len() - 2], PathEl::LineTo(Point::new(0.0, 0.0)));
    }

    #[test]
    fn circle_grid_stays_round() {
        // Four samples per ring; a polyline would cut the corners to the inscribed square.
        let layout = GridConfig::circle(Point::ZERO, [ring(10.0, 4)])
            .with_closed(true)
            .layout()
            .unwrap();
        let bounds = layout.lines[0].bounding_box();
        assert_approx_eq!(f64, bounds.width(), 20.0, epsilon = 1e-6);
        assert_approx_eq!(f64, bounds.height(), 20.0, epsilon = 1e-6);
        assert!(
            layout.lines[0]
                .elements()
                .iter()
                .any(|el| matches!(el, PathEl::CurveTo(..)))
        );
    }

    #[test]
    fn circle_band_is_a_ring() {
        let layout = GridConfig::circle(Point::ZERO, [ring(10.0, 8), ring(20.0, 8)])
            .with_closed(true)
            .with_alternate_color([css::RED])
            .layout()
            .unwrap();
        let ring_path = &layout.bands[0].path;
        assert!(ring_path.contains(Point::new(15.0, 0.0)));
        assert!(!ring_path.contains(Point::new(0.0, 0.0)));
        assert!(!ring_path.contains(Point::new(25.0, 0.0)));
    }

    #[test]
    fn points_off_the_circle_join_straight() {
        let spoke = GridItem::new([Point::new(0.0, 0.0), Point::new(30.0, 0.0)]);
        let layout = GridConfig::circle(Point::ZERO, [spoke]).layout().unwrap();
        assert_eq!(
            layout.lines[0].elements(),
            [
                PathEl::MoveTo(Point::ZERO),
                PathEl::LineTo(Point::new(30.0, 0.0))
            ]
        );
    }

    #[test]
    fn offsets_apply_to_lines_and_bands() {
        let layout = GridConfig::line(horizontal(&[0.0, 10.0]))
            .with_alternate_color([css::RED])
            .with_offset(5.0, 5.0)
            .layout()
            .unwrap();
        assert_eq!(layout.lines[0].elements()[0], PathEl::MoveTo(Point::new(5.0, 5.0)));
        assert_eq!(layout.bands[0].path.bounding_box().y0, 5.0);
    }
}
