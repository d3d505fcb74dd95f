// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lays out one of every guide and writes the marks to `guidepost_demo.svg`.
//!
//! Run with `RUST_LOG=debug` to see the layout engines' structured logs.

mod svg;

use guidepost::{
    AxisTitleConfig, CategoryLegendConfig, CircleAxisConfig, ContinuousLegend,
    ContinuousLegendConfig, Crosshairs, EventKind, GridConfig, GridItem, Guide, GuideEvent,
    HeuristicTextMeasurer, ItemFormatter, LegendBackgroundConfig, LegendItemValueConfig,
    LegendTitleConfig, LineAxisConfig, ListItem, Marker, MarkerSymbol, Region, SubTickLineConfig,
    TextAnchor, TextAnnotationConfig, TextBaseline, TooltipConfig, TooltipPosition,
    TooltipTracker, correlate_items, guide_marks,
};
use kurbo::{Point, Rect};
use peniko::color::palette::css;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 640.0, 480.0);
const PLOT: Rect = Rect::new(60.0, 40.0, 400.0, 300.0);

fn main() {
    env_logger::init();
    let measurer = HeuristicTextMeasurer;

    let guides = vec![
        Guide::from(bottom_axis()),
        Guide::from(left_axis()),
        Guide::from(horizontal_grid()),
        Guide::from(radar_axis()),
        Guide::from(radar_grid()),
        Guide::from(category_legend()),
        Guide::from(continuous_legend()),
        Guide::from(summit_note()),
    ];
    let mut merged = guide_marks(&guides, VIEWPORT, &measurer);
    for (index, error) in &merged.errors {
        log::error!(index, error:% = error; "guide skipped");
    }
    if !merged.duplicate_ids.is_empty() {
        log::error!(count = merged.duplicate_ids.len(); "guides share mark ids");
    }

    // Drag the continuous legend's upper handle and log the new selection.
    let mut legend =
        ContinuousLegend::new(continuous_legend()).expect("continuous legend config is valid");
    legend
        .listeners_mut()
        .subscribe(EventKind::ValueChanged, |event| {
            if let GuideEvent::ValueChanged { value } = event {
                log::info!(value:? = value.as_slice(); "legend selection changed");
            }
        });
    let layout = legend.layout(&measurer);
    let upper = layout.handles[1].pixel;
    legend.drag_handle(&layout, 1, upper - 30.0);

    // Follow the pointer across the plot with a tooltip.
    let mut tracker = TooltipTracker::new(tooltip());
    tracker
        .listeners_mut()
        .subscribe(EventKind::TooltipMoved, |event| {
            if let GuideEvent::TooltipMoved { anchor } = event {
                log::debug!(x = anchor.x, y = anchor.y; "tooltip moved");
            }
        });
    let mut tooltip_layout = None;
    for x in [120.0, 250.0, 390.0] {
        tooltip_layout = Some(
            tracker
                .pointer_moved(Point::new(x, 120.0), VIEWPORT, &measurer)
                .expect("tooltip config is valid"),
        );
    }
    if let Some(layout) = tooltip_layout {
        merged.marks.extend(layout.marks());
    }

    // Tick identity across a re-layout with one tick added.
    let before = bottom_ticks(&[0.0, 50.0, 100.0]);
    let after = bottom_ticks(&[0.0, 25.0, 50.0, 100.0]);
    for transition in correlate_items(&before, &after) {
        log::debug!(transition:? = transition; "tick transition");
    }

    let mut scene = svg::SvgScene::default();
    scene.set_view_box(VIEWPORT);
    scene.extend(merged.marks);
    std::fs::write("guidepost_demo.svg", scene.to_svg_string()).expect("write guidepost_demo.svg");
    println!("wrote guidepost_demo.svg");
}

fn bottom_ticks(values: &[f64]) -> Vec<ListItem> {
    values
        .iter()
        .map(|v| ListItem::tick(format!("{v}"), v / 100.0).with_id(format!("x-{v}")))
        .collect()
}

fn bottom_axis() -> LineAxisConfig {
    LineAxisConfig::new((PLOT.x0, PLOT.y1), (PLOT.x1, PLOT.y1))
        .with_id_base(1_000_000)
        .with_ticks(bottom_ticks(&[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]))
        .with_sub_tick_line(SubTickLineConfig::default())
        .with_title(AxisTitleConfig::new("Distance (km)"))
}

fn left_axis() -> LineAxisConfig {
    let ticks = (0..=5).map(|i| {
        let t = f64::from(i) / 5.0;
        ListItem::tick(format!("{}", i * 200), t)
    });
    // Runs bottom to top, so the right-hand normal points left of the plot.
    LineAxisConfig::new((PLOT.x0, PLOT.y1), (PLOT.x0, PLOT.y0))
        .with_id_base(2_000_000)
        .with_ticks(ticks)
        .with_title(AxisTitleConfig::new("Elevation (m)"))
}

fn horizontal_grid() -> GridConfig {
    let items = (0..=5).map(|i| {
        let y = PLOT.y1 - PLOT.height() * f64::from(i) / 5.0;
        GridItem::new([Point::new(PLOT.x0, y), Point::new(PLOT.x1, y)])
    });
    GridConfig::line(items)
        .with_id_base(3_000_000)
        .with_alternate_color([css::WHITE_SMOKE])
}

fn radar_axis() -> CircleAxisConfig {
    let labels = ["N", "E", "S", "W"];
    let ticks = labels
        .iter()
        .enumerate()
        .map(|(i, name)| ListItem::tick(*name, i as f64 / 4.0));
    // A full turn starting at 12 o'clock.
    CircleAxisConfig::new((520.0, 120.0), 60.0)
        .with_id_base(4_000_000)
        .with_angles(-core::f64::consts::FRAC_PI_2, 1.5 * core::f64::consts::PI)
        .with_ticks(ticks)
        .with_title(AxisTitleConfig::new("Wind"))
}

fn radar_grid() -> GridConfig {
    let ring = |r: f64| {
        GridItem::new((0..4).map(|i| {
            let a = f64::from(i) * core::f64::consts::FRAC_PI_2;
            Point::new(520.0 + r * a.cos(), 120.0 + r * a.sin())
        }))
    };
    GridConfig::circle((520.0, 120.0), [ring(20.0), ring(40.0), ring(60.0)])
        .with_id_base(5_000_000)
        .with_closed(true)
        .with_alternate_color([css::LAVENDER, css::HONEYDEW])
}

fn category_legend() -> CategoryLegendConfig {
    let item = |name: &str, count: f64, symbol, fill| {
        ListItem::new(name, count).with_marker(Marker {
            symbol,
            fill,
            ..Marker::default()
        })
    };
    CategoryLegendConfig::new([
        item("Hiking", 12.0, MarkerSymbol::Circle, css::SEA_GREEN),
        item("Cycling", 7.0, MarkerSymbol::Square, css::STEEL_BLUE),
        item("Running", 4.0, MarkerSymbol::Line, css::TOMATO),
    ])
    .with_id_base(6_000_000)
    .with_position(PLOT.x0, 360.0)
    .with_max_width(300.0)
    .with_title(LegendTitleConfig::new("Activity"))
    .with_item_value(LegendItemValueConfig {
        formatter: Some(ItemFormatter::new(|value, _, _| format!("{value} trips"))),
        ..Default::default()
    })
    .with_background(LegendBackgroundConfig::uniform(6.0))
}

fn continuous_legend() -> ContinuousLegendConfig {
    ContinuousLegendConfig::new(0.0, 100.0, [20.0, 80.0])
        .with_id_base(7_000_000)
        .with_position(420.0, 360.0)
        .with_colors([css::YELLOW, css::ORANGE, css::DARK_RED])
        .with_title(LegendTitleConfig::new("Heat"))
}

fn summit_note() -> TextAnnotationConfig {
    TextAnnotationConfig::new(PLOT.x1, PLOT.y0, "Summit")
        .with_id_base(9_000_000)
        .with_alignment(TextAnchor::End, TextBaseline::Bottom)
        .with_offset(-4.0, -4.0)
}

fn tooltip() -> TooltipConfig {
    TooltipConfig::new([
        ListItem::new("Distance", "42 km"),
        ListItem::new("Elevation", 640.0).with_marker(Marker::default()),
    ])
    .with_id_base(8_000_000)
    .with_region(Region::from(PLOT))
    .with_crosshairs(Crosshairs::XY)
    .with_position(TooltipPosition::Right, 12.0)
}
