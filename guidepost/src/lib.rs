// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout core for chart guides.
//!
//! Guidepost resolves declarative guide configs into screen-space geometry:
//! - **Axes** along a segment or an arc, with tick, sub-tick, label and title placement and
//!   label collision avoidance (one rotation step, then greedy hiding).
//! - **Grids** as polylines or arcs, with alternating band fills.
//! - **Legends**: category legends flowed into rows or columns, and continuous legends with a
//!   rail, a track, and draggable handles.
//! - **Tooltips** placed next to an anchor with flip-then-clamp region fitting, plus
//!   crosshairs.
//! - **Text annotations** pinned to a point.
//!
//! Every config yields a [`Location`]; [`Location::resolve`] turns it into an [`Anchor`] the
//! component engine lays out against. Layouts convert into [`GuideMark`]s (stable id, z-index,
//! shape, paint) for a separate renderer. Text shaping is out of scope; engines that need text
//! extents take a [`TextMeasurer`].
//!
//! ```
//! use guidepost::{HeuristicTextMeasurer, LineAxisConfig, ListItem};
//!
//! let axis = LineAxisConfig::new((0.0, 100.0), (100.0, 100.0)).with_ticks([
//!     ListItem::tick("0", 0.0),
//!     ListItem::tick("50", 0.5),
//!     ListItem::tick("100", 1.0),
//! ]);
//! let layout = axis.layout(&HeuristicTextMeasurer).unwrap();
//! assert_eq!(layout.ticks[1].point, kurbo::Point::new(50.0, 100.0));
//! let marks = layout.marks();
//! assert!(!marks.is_empty());
//! ```
//!
//! ## Features
//!
//! - `std`: use `std` float math instead of `libm`.
//! - `libm` (default): `no_std` float math.
//! - `serde`: `Serialize`/`Deserialize` for configs and their `*Patch` records.

#![no_std]

extern crate alloc;

mod annotation;
mod axis;
mod config;
mod error;
mod events;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod grid;
mod guide;
mod identity;
mod legend;
mod location;
mod mark;
mod measure;
mod tooltip;
pub mod z_order;

pub use annotation::{TextAnnotationConfig, TextAnnotationLayout, TextAnnotationPatch};
pub use axis::{
    AUTO_ROTATE_ANGLE, AxisBase, AxisLabel, AxisLabelConfig, AxisLayout, AxisShape, AxisTick,
    AxisTitle, AxisTitleConfig, CircleAxisConfig, CircleAxisPatch, LineAxisConfig,
    LineAxisPatch, LineConfig, SubTickLineConfig, TickLineConfig, layout_axis,
};
pub use config::{ShallowMerge, merge_with_defaults};
pub use error::{GuideError, Result};
pub use events::{EventKind, GuideEvent, ListenerId, Listeners};
pub use geometry::{
    ARC_TOLERANCE, BBox, GridItem, ItemValue, ListItem, Marker, MarkerSymbol, Range, Region,
};
pub use grid::{GridBand, GridConfig, GridLayout, GridPatch, GridShape};
pub use guide::{Guide, GuideLayout, GuideMarks, guide_marks};
pub use identity::{ItemTransition, correlate_items};
pub use legend::{
    CategoryLegendConfig, CategoryLegendLayout, CategoryLegendPatch, ContinuousLabelConfig,
    ContinuousLegend, ContinuousLegendConfig, ContinuousLegendLayout, ContinuousLegendPatch,
    HandleLayout, HandlerConfig, ItemFormatter, LabelAlign, LegendBackgroundConfig, LegendBase,
    LegendDirection, LegendItemLayout, LegendItemNameConfig, LegendItemValueConfig,
    LegendMarkerConfig, LegendTitle, LegendTitleConfig, PlacedText, RailConfig, RailMapping,
    RailType, TrackConfig,
};
pub use location::{
    Anchor, CircleAnchor, CircleLocation, Locate, Location, LocationType, OffsetPoint,
};
pub use mark::{
    GuideMark, MarkId, MarkShape, Paint, StrokeStyle, TextAnchor, TextBaseline, TextStyle,
};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use tooltip::{
    Crosshairs, TooltipConfig, TooltipLayout, TooltipPatch, TooltipPosition, TooltipRow,
    TooltipTracker, position_tooltip,
};
