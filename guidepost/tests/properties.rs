// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the layout engines.

use float_cmp::approx_eq;
use guidepost::{
    CircleAxisConfig, GridConfig, GridItem, HeuristicTextMeasurer, LineAxisConfig, ListItem,
    Range, RailMapping, TooltipPosition, position_tooltip,
};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use proptest::prelude::*;

// ===================
// Strategies
// ===================

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
}

/// A segment at least 1 unit long.
fn segment_strategy() -> impl Strategy<Value = (Point, Point)> {
    (point_strategy(), point_strategy())
        .prop_filter("segment too short", |(a, b)| a.distance(*b) >= 1.0)
}

fn ticks(n: usize) -> Vec<ListItem> {
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            ListItem::tick(format!("{i}"), t)
        })
        .collect()
}

fn range_strategy() -> impl Strategy<Value = Range> {
    (-1000.0f64..1000.0, 0.001f64..1000.0).prop_map(|(min, span)| Range::new(min, min + span))
}

fn color_strategy() -> impl Strategy<Value = Color> {
    (0u8..=255, 0u8..=255, 0u8..=255).prop_map(|(r, g, b)| Color::from_rgb8(r, g, b))
}

// ===================
// Property Test Functions
// ===================

/// Evenly spaced ticks land at equal steps between the axis ends.
fn check_linear_ticks_are_evenly_spaced(
    (start, end): (Point, Point),
    n: usize,
) -> Result<(), TestCaseError> {
    let layout = LineAxisConfig::new(start, end)
        .with_ticks(ticks(n))
        .without_label()
        .layout(&HeuristicTextMeasurer)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(layout.ticks.len(), n);

    let step = (end - start) / (n - 1) as f64;
    for (i, tick) in layout.ticks.iter().enumerate() {
        let expected = start + step * i as f64;
        prop_assert!(approx_eq!(f64, tick.point.x, expected.x, epsilon = 1e-6));
        prop_assert!(approx_eq!(f64, tick.point.y, expected.y, epsilon = 1e-6));
    }
    Ok(())
}

/// Circular axis ticks all sit on the circle.
fn check_circle_ticks_lie_on_the_radius(
    center: Point,
    radius: f64,
    angles: (f64, f64),
    n: usize,
) -> Result<(), TestCaseError> {
    let layout = CircleAxisConfig::new(center, radius)
        .with_angles(angles.0, angles.1)
        .with_ticks(ticks(n))
        .layout(&HeuristicTextMeasurer)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(layout.ticks.len(), n);
    for tick in &layout.ticks {
        prop_assert!(approx_eq!(
            f64,
            tick.point.distance(center),
            radius,
            epsilon = 1e-6
        ));
    }
    Ok(())
}

/// Pixel-to-value inverts value-to-pixel, and the range ends map to the rail ends.
fn check_rail_mapping_round_trips(
    range: Range,
    start: f64,
    length: f64,
    t: f64,
) -> Result<(), TestCaseError> {
    let mapping = RailMapping::new(start, length, range);
    let value = range.min + t * range.span();
    let back = mapping.pixel_to_value(mapping.value_to_pixel(value));
    prop_assert!(approx_eq!(f64, back, value, epsilon = 1e-6 * range.span().max(1.0)));
    prop_assert!(approx_eq!(f64, mapping.value_to_pixel(range.min), start, epsilon = 1e-9));
    prop_assert!(approx_eq!(
        f64,
        mapping.value_to_pixel(range.max),
        start + length,
        epsilon = 1e-6
    ));
    Ok(())
}

/// A box that fits in the region ends up inside it, wherever the anchor is.
fn check_tooltip_stays_inside(
    anchor: Point,
    size: Size,
    position: TooltipPosition,
    offset: f64,
) -> Result<(), TestCaseError> {
    let region = Rect::new(0.0, 0.0, 200.0, 200.0);
    let rect = position_tooltip(anchor, size, position, offset, region);
    prop_assert!(rect.x0 >= region.x0 - 1e-9 && rect.x1 <= region.x1 + 1e-9);
    prop_assert!(rect.y0 >= region.y0 - 1e-9 && rect.y1 <= region.y1 + 1e-9);
    prop_assert!(approx_eq!(f64, rect.width(), size.width, epsilon = 1e-9));
    Ok(())
}

/// `N` gridlines give `N - 1` bands whose fills cycle through the palette.
fn check_grid_bands_cycle(n: usize, palette: Vec<Color>) -> Result<(), TestCaseError> {
    let items = (0..n).map(|i| {
        let y = 10.0 * i as f64;
        GridItem::new([Point::new(0.0, y), Point::new(100.0, y)])
    });
    let layout = GridConfig::line(items)
        .with_alternate_color(palette.clone())
        .layout()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(layout.bands.len(), n.saturating_sub(1));
    for (i, band) in layout.bands.iter().enumerate() {
        let expected = match palette.as_slice() {
            [single] => (i % 2 == 0).then_some(*single),
            colors => Some(colors[i % colors.len()]),
        };
        prop_assert_eq!(band.fill, expected);
    }
    Ok(())
}

proptest! {
    #[test]
    fn linear_ticks_are_evenly_spaced(segment in segment_strategy(), n in 2usize..12) {
        check_linear_ticks_are_evenly_spaced(segment, n)?;
    }

    #[test]
    fn circle_ticks_lie_on_the_radius(
        center in point_strategy(),
        radius in 0.0f64..500.0,
        start in -7.0f64..7.0,
        end in -7.0f64..7.0,
        n in 2usize..12,
    ) {
        check_circle_ticks_lie_on_the_radius(center, radius, (start, end), n)?;
    }

    #[test]
    fn rail_mapping_round_trips(
        range in range_strategy(),
        start in -500.0f64..500.0,
        length in 1.0f64..1000.0,
        t in 0.0f64..=1.0,
    ) {
        check_rail_mapping_round_trips(range, start, length, t)?;
    }

    #[test]
    fn tooltip_stays_inside(
        anchor in (-100.0f64..300.0, -100.0f64..300.0).prop_map(|(x, y)| Point::new(x, y)),
        size in (1.0f64..200.0, 1.0f64..200.0).prop_map(|(w, h)| Size::new(w, h)),
        position in prop_oneof![
            Just(TooltipPosition::Top),
            Just(TooltipPosition::Bottom),
            Just(TooltipPosition::Left),
            Just(TooltipPosition::Right),
        ],
        offset in 0.0f64..30.0,
    ) {
        check_tooltip_stays_inside(anchor, size, position, offset)?;
    }

    #[test]
    fn grid_bands_cycle(n in 0usize..10, palette in prop::collection::vec(color_strategy(), 1..4)) {
        check_grid_bands_cycle(n, palette)?;
    }
}

#[cfg(feature = "serde")]
mod serde_patches {
    use guidepost::{
        ContinuousLegendConfig, ContinuousLegendPatch, Crosshairs, LineAxisConfig,
        LineAxisPatch, TooltipConfig, TooltipPatch, TooltipPosition, merge_with_defaults,
    };

    #[test]
    fn json_patch_overrides_only_present_keys() {
        let patch: LineAxisPatch =
            serde_json::from_str(r#"{ "vertical_factor": -1.0, "offset_x": 5.0 }"#).unwrap();
        let config: LineAxisConfig = merge_with_defaults(patch);
        assert_eq!(config.base.vertical_factor, -1.0);
        assert_eq!(config.base.offset_x, 5.0);
        assert_eq!(config.base.tick_line, LineAxisConfig::default().base.tick_line);
    }

    #[test]
    fn json_patch_sets_enums_and_lists() {
        let patch: TooltipPatch = serde_json::from_str(
            r#"{ "position": "Top", "crosshairs": "XY", "follow": false }"#,
        )
        .unwrap();
        let config: TooltipConfig = merge_with_defaults(patch);
        assert_eq!(config.position, TooltipPosition::Top);
        assert_eq!(config.crosshairs, Some(Crosshairs::XY));
        assert!(!config.follow);

        let patch: ContinuousLegendPatch =
            serde_json::from_str(r#"{ "min": 0.0, "max": 50.0, "value": [10.0, 20.0] }"#)
                .unwrap();
        let config: ContinuousLegendConfig = merge_with_defaults(patch);
        assert_eq!((config.min, config.max), (0.0, 50.0));
        assert_eq!(config.value, [10.0, 20.0]);
    }
}
