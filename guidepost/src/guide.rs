// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guide composition.
//!
//! A [`Guide`] wraps any one component config so hosts can keep a heterogeneous list of
//! decorations and lay them out together. Layout is all-or-nothing per guide: a guide whose
//! config is structurally invalid contributes no marks, and its error is reported alongside
//! the marks of the guides that succeeded.
//!
//! Mark ids are derived from each guide's `id_base`, so guides sharing a list need distinct
//! bases spaced far enough apart for their id offsets.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{Rect, Shape};
use log::warn;

use crate::annotation::{TextAnnotationConfig, TextAnnotationLayout};
use crate::axis::{AxisLayout, CircleAxisConfig, LineAxisConfig};
use crate::error::{GuideError, Result};
use crate::geometry::BBox;
use crate::grid::{GridConfig, GridLayout};
use crate::legend::{
    CategoryLegendConfig, CategoryLegendLayout, ContinuousLegendConfig, ContinuousLegendLayout,
};
use crate::location::{Locate, Location};
use crate::mark::{GuideMark, MarkId};
use crate::measure::TextMeasurer;
use crate::tooltip::{TooltipConfig, TooltipLayout};

/// One chart decoration.
#[derive(Clone, Debug, PartialEq)]
pub enum Guide {
    /// A straight axis.
    LineAxis(LineAxisConfig),
    /// A circular axis.
    CircleAxis(CircleAxisConfig),
    /// Gridlines and bands.
    Grid(GridConfig),
    /// A category legend.
    CategoryLegend(CategoryLegendConfig),
    /// A continuous legend.
    ContinuousLegend(ContinuousLegendConfig),
    /// A tooltip at its configured anchor.
    Tooltip(TooltipConfig),
    /// A text annotation.
    TextAnnotation(TextAnnotationConfig),
}

impl Guide {
    /// Lays out the guide.
    ///
    /// `viewport` is the drawing area; only tooltips use it, as their fallback bounds.
    pub fn layout(&self, viewport: Rect, measurer: &dyn TextMeasurer) -> Result<GuideLayout> {
        Ok(match self {
            Self::LineAxis(config) => GuideLayout::Axis(config.layout(measurer)?),
            Self::CircleAxis(config) => GuideLayout::Axis(config.layout(measurer)?),
            Self::Grid(config) => GuideLayout::Grid(config.layout()?),
            Self::CategoryLegend(config) => GuideLayout::CategoryLegend(config.layout(measurer)),
            Self::ContinuousLegend(config) => {
                GuideLayout::ContinuousLegend(config.layout(measurer)?)
            }
            Self::Tooltip(config) => GuideLayout::Tooltip(config.layout(viewport, measurer)?),
            Self::TextAnnotation(config) => {
                GuideLayout::TextAnnotation(config.layout(measurer)?)
            }
        })
    }
}

impl Locate for Guide {
    fn location(&self) -> Location {
        match self {
            Self::LineAxis(config) => config.location(),
            Self::CircleAxis(config) => config.location(),
            Self::Grid(config) => config.location(),
            Self::CategoryLegend(config) => config.location(),
            Self::ContinuousLegend(config) => config.location(),
            Self::Tooltip(config) => config.location(),
            Self::TextAnnotation(config) => config.location(),
        }
    }
}

macro_rules! guide_from {
    ($($variant:ident($config:ty)),* $(,)?) => {
        $(
            impl From<$config> for Guide {
                fn from(config: $config) -> Self {
                    Self::$variant(config)
                }
            }
        )*
    };
}

guide_from!(
    LineAxis(LineAxisConfig),
    CircleAxis(CircleAxisConfig),
    Grid(GridConfig),
    CategoryLegend(CategoryLegendConfig),
    ContinuousLegend(ContinuousLegendConfig),
    Tooltip(TooltipConfig),
    TextAnnotation(TextAnnotationConfig),
);

/// The layout produced by a [`Guide`].
#[derive(Clone, Debug, PartialEq)]
pub enum GuideLayout {
    /// A line or circle axis.
    Axis(AxisLayout),
    /// Gridlines and bands.
    Grid(GridLayout),
    /// A category legend.
    CategoryLegend(CategoryLegendLayout),
    /// A continuous legend.
    ContinuousLegend(ContinuousLegendLayout),
    /// A tooltip.
    Tooltip(TooltipLayout),
    /// A text annotation.
    TextAnnotation(TextAnnotationLayout),
}

impl GuideLayout {
    /// Converts the layout into draw instructions.
    pub fn marks(&self) -> Vec<GuideMark> {
        match self {
            Self::Axis(layout) => layout.marks(),
            Self::Grid(layout) => layout.marks(),
            Self::CategoryLegend(layout) => layout.marks(),
            Self::ContinuousLegend(layout) => layout.marks(),
            Self::Tooltip(layout) => layout.marks(),
            Self::TextAnnotation(layout) => layout.marks(),
        }
    }

    /// The box covering the guide, or `None` when it draws nothing.
    ///
    /// Axes and grids cover their lines and bands only; text extents are left out.
    pub fn bbox(&self) -> Option<BBox> {
        let rect = match self {
            Self::Axis(layout) => {
                let rules = layout.tick_lines.iter().chain(&layout.sub_tick_lines);
                union_all(
                    layout
                        .line
                        .iter()
                        .map(|path| path.bounding_box())
                        .chain(rules.map(|line| line.bounding_box())),
                )?
            }
            Self::Grid(layout) => union_all(
                layout
                    .lines
                    .iter()
                    .chain(layout.bands.iter().map(|band| &band.path))
                    .map(|path| path.bounding_box()),
            )?,
            Self::CategoryLegend(layout) => layout.bounds,
            Self::ContinuousLegend(layout) => layout.bounds,
            Self::Tooltip(layout) => layout.rect,
            Self::TextAnnotation(layout) => layout.bounds,
        };
        Some(BBox::from_rect(rect))
    }
}

fn union_all(rects: impl Iterator<Item = Rect>) -> Option<Rect> {
    rects.reduce(|a, b| a.union(b))
}

/// Marks for a list of guides, plus the guides that could not be laid out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuideMarks {
    /// Marks of every guide that laid out, sorted by `(z_index, id)`.
    pub marks: Vec<GuideMark>,
    /// Index into the guide list and the reason, for each skipped guide.
    pub errors: Vec<(usize, GuideError)>,
    /// Ids carried by more than one mark, in ascending order.
    pub duplicate_ids: Vec<MarkId>,
}

/// Lays out every guide and merges their marks into one render-ordered list.
///
/// Ids are not rewritten: guides left at the default `id_base` of `0` produce colliding ids,
/// which are listed in [`GuideMarks::duplicate_ids`].
pub fn guide_marks(guides: &[Guide], viewport: Rect, measurer: &dyn TextMeasurer) -> GuideMarks {
    let mut out = GuideMarks::default();
    for (index, guide) in guides.iter().enumerate() {
        match guide.layout(viewport, measurer) {
            Ok(layout) => out.marks.extend(layout.marks()),
            Err(err) => {
                warn!(index, error:% = err; "skipping guide");
                out.errors.push((index, err));
            }
        }
    }
    out.marks.sort_by_key(|m| (m.z_index, m.id));

    let mut seen = HashSet::with_capacity(out.marks.len());
    let mut duplicates: HashSet<MarkId> = HashSet::new();
    for mark in &out.marks {
        if !seen.insert(mark.id) {
            duplicates.insert(mark.id);
        }
    }
    if !duplicates.is_empty() {
        warn!(count = duplicates.len(); "guides share mark ids, give each a distinct id_base");
        out.duplicate_ids = duplicates.into_iter().collect();
        out.duplicate_ids.sort_unstable();
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::geometry::{GridItem, ListItem};
    use crate::measure::HeuristicTextMeasurer;
    use crate::tooltip::TooltipPosition;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    fn ticks() -> Vec<ListItem> {
        vec![
            ListItem::tick("0", 0.0),
            ListItem::tick("5", 0.5),
            ListItem::tick("10", 1.0),
        ]
    }

    #[test]
    fn every_guide_kind_lays_out() {
        let guides: Vec<Guide> = vec![
            LineAxisConfig::new((0.0, 100.0), (100.0, 100.0))
                .with_ticks(ticks())
                .into(),
            CircleAxisConfig::new((50.0, 50.0), 40.0)
                .with_ticks(ticks())
                .into(),
            GridConfig::line(vec![
                GridItem::new([Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
                GridItem::new([Point::new(0.0, 50.0), Point::new(100.0, 50.0)]),
            ])
            .into(),
            CategoryLegendConfig::new(vec![ListItem::new("a", 1.0)]).into(),
            ContinuousLegendConfig::new(0.0, 100.0, [30.0]).into(),
            TooltipConfig::new(vec![ListItem::new("a", 1.0)])
                .with_anchor(10.0, 10.0)
                .with_position(TooltipPosition::Bottom, 4.0)
                .into(),
            TextAnnotationConfig::new(20.0, 20.0, "note").into(),
        ];
        for guide in &guides {
            let layout = guide.layout(VIEWPORT, &HeuristicTextMeasurer).unwrap();
            assert!(!layout.marks().is_empty(), "{guide:?} produced no marks");
        }
        let merged = guide_marks(&guides, VIEWPORT, &HeuristicTextMeasurer);
        assert!(merged.errors.is_empty());
        // Every guide sits at id_base 0.
        assert!(!merged.duplicate_ids.is_empty());
        assert!(
            merged
                .marks
                .windows(2)
                .all(|w| (w[0].z_index, w[0].id) <= (w[1].z_index, w[1].id)),
            "marks are not in render order"
        );
    }

    #[test]
    fn failing_guides_are_skipped_whole() {
        let guides = [
            Guide::from(ContinuousLegendConfig::new(10.0, 0.0, [5.0])),
            Guide::from(LineAxisConfig::new((0.0, 0.0), (10.0, 0.0)).with_ticks(ticks())),
        ];
        let merged = guide_marks(&guides, VIEWPORT, &HeuristicTextMeasurer);
        assert_eq!(
            merged.errors,
            [(0, GuideError::InvalidRange { min: 10.0, max: 0.0 })]
        );
        let alone = guides[1]
            .layout(VIEWPORT, &HeuristicTextMeasurer)
            .unwrap()
            .marks();
        assert_eq!(merged.marks.len(), alone.len());
    }

    #[test]
    fn distinct_id_bases_keep_ids_unique() {
        let shared = [
            Guide::from(LineAxisConfig::new((0.0, 0.0), (10.0, 0.0)).with_ticks(ticks())),
            Guide::from(LineAxisConfig::new((0.0, 20.0), (10.0, 20.0)).with_ticks(ticks())),
        ];
        let merged = guide_marks(&shared, VIEWPORT, &HeuristicTextMeasurer);
        // Both axis lines and the first tick lines collide.
        assert_eq!(merged.duplicate_ids.first(), Some(&MarkId(0)));
        assert!(merged.duplicate_ids.contains(&MarkId(1)));

        let spaced = [
            Guide::from(
                LineAxisConfig::new((0.0, 0.0), (10.0, 0.0))
                    .with_ticks(ticks())
                    .with_id_base(0),
            ),
            Guide::from(
                LineAxisConfig::new((0.0, 20.0), (10.0, 20.0))
                    .with_ticks(ticks())
                    .with_id_base(10_000),
            ),
            Guide::from(TextAnnotationConfig::new(5.0, 5.0, "note").with_id_base(20_000)),
        ];
        let merged = guide_marks(&spaced, VIEWPORT, &HeuristicTextMeasurer);
        assert!(merged.duplicate_ids.is_empty());
    }

    #[test]
    fn boxes_cover_rules_and_frames() {
        let axis = LineAxisConfig::new((0.0, 100.0), (100.0, 100.0)).with_ticks(ticks());
        let axis = Guide::from(axis)
            .layout(VIEWPORT, &HeuristicTextMeasurer)
            .unwrap();
        let bbox = axis.bbox().unwrap();
        assert!(bbox.is_consistent());
        // The line plus 5px ticks on the side of its normal.
        assert_eq!(bbox.to_rect(), Rect::new(0.0, 95.0, 100.0, 100.0));

        let note = Guide::from(TextAnnotationConfig::new(10.0, 30.0, "ab"))
            .layout(VIEWPORT, &HeuristicTextMeasurer)
            .unwrap();
        let GuideLayout::TextAnnotation(layout) = &note else {
            panic!("expected an annotation layout");
        };
        assert_eq!(note.bbox(), Some(BBox::from_rect(layout.bounds)));

        let bare = Guide::from(GridConfig::line(Vec::new()))
            .layout(VIEWPORT, &HeuristicTextMeasurer)
            .unwrap();
        assert_eq!(bare.bbox(), None);
    }

    #[test]
    fn guides_expose_their_location() {
        let guide = Guide::from(TooltipConfig::default().with_anchor(3.0, 4.0));
        assert_eq!(guide.location(), Location::Point(Point::new(3.0, 4.0)));
    }
}
