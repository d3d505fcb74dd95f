// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for guide marks.
//!
//! Every [`crate::GuideMark`] carries an explicit `z_index`. Guides set them consistently so
//! hosts can merge marks from several guides (and their own series marks) into one list.
//! Renderers should sort by `(z_index, MarkId)` for a deterministic tie-break.

/// Alternating grid band fills.
pub const GRID_BANDS: i32 = -60;
/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Axis line, tick marks and sub-ticks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend background box.
pub const LEGEND_BACKGROUND: i32 = 55;
/// Legend markers, rails and tracks.
pub const LEGEND_SWATCHES: i32 = 60;
/// Continuous legend handles.
pub const LEGEND_HANDLES: i32 = 65;
/// Legend labels and titles.
pub const LEGEND_LABELS: i32 = 70;

/// Free-standing text annotations.
pub const ANNOTATIONS: i32 = 80;

/// Tooltip crosshair lines.
pub const CROSSHAIRS: i32 = 90;
/// Tooltip box and its text.
pub const TOOLTIP: i32 = 100;
