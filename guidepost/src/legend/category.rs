// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category legends: a marker, a name and an optional value per item, flowed into rows or
//! columns.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};
use log::debug;

use super::{
    LegendBackgroundConfig, LegendBase, LegendDirection, LegendFrame, LegendTitleConfig,
    legend_builders,
};
use crate::config::shallow_patch;
use crate::events::{GuideEvent, Listeners};
use crate::geometry::{ListItem, Marker};
use crate::location::{Locate, Location};
use crate::mark::{GuideMark, TextAnchor, TextBaseline, TextStyle};
use crate::measure::TextMeasurer;
use crate::z_order;

const MARKER_ID_OFFSET: u64 = 1_000;
const NAME_ID_OFFSET: u64 = 2_000;
const VALUE_ID_OFFSET: u64 = 3_000;

/// Rewrites the text of one item.
///
/// Called with the default text, the item, and its index in the legend. The result is used for
/// both measuring and rendering. Formatters compare equal only to clones of themselves.
#[derive(Clone)]
pub struct ItemFormatter(Arc<dyn Fn(&str, &ListItem, usize) -> String>);

impl ItemFormatter {
    /// Wraps a formatting function.
    pub fn new(f: impl Fn(&str, &ListItem, usize) -> String + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn apply(&self, text: &str, item: &ListItem, index: usize) -> String {
        (self.0)(text, item, index)
    }
}

impl fmt::Debug for ItemFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemFormatter(..)")
    }
}

impl PartialEq for ItemFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Item name text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendItemNameConfig {
    /// Gap between the name and the value, when a value is shown.
    pub spacing: f64,
    /// Text style.
    pub style: TextStyle,
    /// Rewrites each name; names are shown as given when `None`.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub formatter: Option<ItemFormatter>,
}

impl Default for LegendItemNameConfig {
    fn default() -> Self {
        Self {
            spacing: 8.0,
            style: TextStyle::new(12.0),
            formatter: None,
        }
    }
}

/// Item value text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendItemValueConfig {
    /// Right-align the value inside the item box. Only effective with a fixed `item_width`.
    pub align_right: bool,
    /// Text style.
    pub style: TextStyle,
    /// Rewrites each value, starting from its display form.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub formatter: Option<ItemFormatter>,
}

impl Default for LegendItemValueConfig {
    fn default() -> Self {
        Self {
            align_right: false,
            style: TextStyle::new(12.0),
            formatter: None,
        }
    }
}

/// Item markers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendMarkerConfig {
    /// Gap between the marker and the name.
    pub spacing: f64,
    /// Marker used by items without their own.
    pub marker: Marker,
}

impl Default for LegendMarkerConfig {
    fn default() -> Self {
        Self {
            spacing: 8.0,
            marker: Marker::default(),
        }
    }
}

/// A legend listing discrete items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryLegendConfig {
    /// Shared legend settings.
    pub base: LegendBase,
    /// Items in display order.
    pub items: Vec<ListItem>,
    /// Gap between neighbouring items, and between rows or columns.
    pub item_spacing: f64,
    /// Fixed item width; measured per item when `None`.
    pub item_width: Option<f64>,
    /// Fixed item height; measured per item when `None`.
    pub item_height: Option<f64>,
    /// Name text.
    pub item_name: LegendItemNameConfig,
    /// Value text; values are hidden when `None`.
    pub item_value: Option<LegendItemValueConfig>,
    /// Wrap horizontal legends into a new row past this width.
    pub max_width: Option<f64>,
    /// Wrap vertical legends into a new column past this height.
    pub max_height: Option<f64>,
    /// Markers.
    pub marker: LegendMarkerConfig,
}

impl Default for CategoryLegendConfig {
    fn default() -> Self {
        Self {
            base: LegendBase::default(),
            items: Vec::new(),
            item_spacing: 24.0,
            item_width: None,
            item_height: None,
            item_name: LegendItemNameConfig::default(),
            item_value: None,
            max_width: None,
            max_height: None,
            marker: LegendMarkerConfig::default(),
        }
    }
}

impl CategoryLegendConfig {
    /// Creates a horizontal legend listing `items`.
    pub fn new(items: impl IntoIterator<Item = ListItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sets the gap between items.
    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    /// Fixes the item width.
    pub fn with_item_width(mut self, item_width: f64) -> Self {
        self.item_width = Some(item_width);
        self
    }

    /// Fixes the item height.
    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = Some(item_height);
        self
    }

    /// Sets the name text.
    pub fn with_item_name(mut self, item_name: LegendItemNameConfig) -> Self {
        self.item_name = item_name;
        self
    }

    /// Shows item values.
    pub fn with_item_value(mut self, item_value: LegendItemValueConfig) -> Self {
        self.item_value = Some(item_value);
        self
    }

    /// Wraps rows past `max_width`.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Wraps columns past `max_height`.
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Lays out the legend.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> CategoryLegendLayout {
        let base = &self.base;
        let mut frame = LegendFrame::open(base, Point::new(base.x, base.y), measurer);
        let origin = frame.content_origin;

        let measured: Vec<Measured> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.measure_item(index, item, measurer))
            .collect();
        let cells = self.flow(&measured, origin);

        let mut items = Vec::with_capacity(self.items.len());
        let mut content = Rect::from_origin_size(origin, Size::ZERO);
        let rows = self.items.iter().zip(&measured).zip(&cells);
        for (index, ((item, m), cell)) in rows.enumerate() {
            let placed = self.place_item(index, item, m, *cell);
            content = if index == 0 {
                placed.bounds
            } else {
                content.union(placed.bounds)
            };
            items.push(placed);
        }

        frame.close(base, content);
        let bounds = frame.bounds(content);
        debug!(
            items = items.len(),
            width = bounds.width(),
            height = bounds.height();
            "laid out category legend"
        );
        CategoryLegendLayout {
            id_base: base.id_base,
            items,
            bounds,
            frame,
            name_style: self.item_name.style.clone(),
            value_style: self.item_value.as_ref().map(|v| v.style.clone()),
        }
    }

    fn name_text(&self, index: usize, item: &ListItem) -> String {
        match &self.item_name.formatter {
            Some(formatter) => formatter.apply(&item.name, item, index),
            None => item.name.clone(),
        }
    }

    fn value_text(&self, index: usize, item: &ListItem) -> Option<String> {
        let config = self.item_value.as_ref()?;
        let text = item.value.to_string();
        Some(match &config.formatter {
            Some(formatter) => formatter.apply(&text, item, index),
            None => text,
        })
    }

    fn measure_item(&self, index: usize, item: &ListItem, measurer: &dyn TextMeasurer) -> Measured {
        let marker = item.marker.unwrap_or(self.marker.marker);
        let name_text = self.name_text(index, item);
        let name = measurer.measure(&name_text, self.item_name.style.font_size);
        let value = self
            .item_value
            .as_ref()
            .zip(self.value_text(index, item))
            .map(|(cfg, text)| (measurer.measure(&text, cfg.style.font_size), text));

        let mut width = marker.size + self.marker.spacing + name.width;
        let mut height = marker.size.max(name.height);
        if let Some((size, _)) = &value {
            width += self.item_name.spacing + size.width;
            height = height.max(size.height);
        }
        Measured {
            marker,
            name: (name, name_text),
            value,
            size: Size::new(
                self.item_width.unwrap_or(width),
                self.item_height.unwrap_or(height),
            ),
        }
    }

    /// Assigns each item a cell: its top-left corner and the row height or column width it
    /// is aligned within.
    fn flow(&self, measured: &[Measured], origin: Point) -> Vec<Cell> {
        let spacing = self.item_spacing;
        let mut cells = Vec::with_capacity(measured.len());
        // Start index of the current row or column, and its running extents.
        let mut line_start = 0;
        let mut cursor = origin;
        let mut cross = 0.0_f64;

        let finish = |cells: &mut Vec<Cell>, from: usize, cross: f64| {
            for cell in &mut cells[from..] {
                cell.line_extent = cross;
            }
        };

        for (i, m) in measured.iter().enumerate() {
            match self.base.layout {
                LegendDirection::Horizontal => {
                    let overflow = self
                        .max_width
                        .is_some_and(|max| cursor.x + m.size.width > origin.x + max);
                    if i > line_start && overflow {
                        finish(&mut cells, line_start, cross);
                        line_start = i;
                        cursor = Point::new(origin.x, cursor.y + cross + spacing);
                        cross = 0.0;
                    }
                    cells.push(Cell {
                        origin: cursor,
                        line_extent: 0.0,
                    });
                    cursor.x += m.size.width + spacing;
                    cross = cross.max(m.size.height);
                }
                LegendDirection::Vertical => {
                    let overflow = self
                        .max_height
                        .is_some_and(|max| cursor.y + m.size.height > origin.y + max);
                    if i > line_start && overflow {
                        finish(&mut cells, line_start, cross);
                        line_start = i;
                        cursor = Point::new(cursor.x + cross + spacing, origin.y);
                        cross = 0.0;
                    }
                    cells.push(Cell {
                        origin: cursor,
                        line_extent: 0.0,
                    });
                    cursor.y += m.size.height + spacing;
                    cross = cross.max(m.size.width);
                }
            }
        }
        finish(&mut cells, line_start, cross);
        cells
    }

    fn place_item(
        &self,
        index: usize,
        item: &ListItem,
        m: &Measured,
        cell: Cell,
    ) -> LegendItemLayout {
        let (width, height) = match self.base.layout {
            LegendDirection::Horizontal => (m.size.width, cell.line_extent),
            LegendDirection::Vertical => (cell.line_extent, m.size.height),
        };
        let bounds = Rect::from_origin_size(cell.origin, (width, height));
        let mid_y = bounds.center().y;

        let marker_center = Point::new(bounds.x0 + 0.5 * m.marker.size, mid_y);
        let name_x = bounds.x0 + m.marker.size + self.marker.spacing;
        let name = PlacedText {
            text: m.name.1.clone(),
            position: Point::new(name_x, mid_y),
            anchor: TextAnchor::Start,
        };
        let value = m.value.as_ref().map(|(_, text)| {
            let align_right = self.item_width.is_some()
                && self.item_value.as_ref().is_some_and(|v| v.align_right);
            if align_right {
                PlacedText {
                    text: text.clone(),
                    position: Point::new(bounds.x1, mid_y),
                    anchor: TextAnchor::End,
                }
            } else {
                let x = name_x + m.name.0.width + self.item_name.spacing;
                PlacedText {
                    text: text.clone(),
                    position: Point::new(x, mid_y),
                    anchor: TextAnchor::Start,
                }
            }
        });
        LegendItemLayout {
            index,
            id: item.id.clone(),
            bounds,
            marker: m.marker,
            marker_center,
            name,
            value,
        }
    }
}

legend_builders!(CategoryLegendConfig);

impl Locate for CategoryLegendConfig {
    fn location(&self) -> Location {
        self.base.location()
    }
}

#[derive(Clone, Debug)]
struct Measured {
    marker: Marker,
    name: (Size, String),
    value: Option<(Size, String)>,
    size: Size,
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    origin: Point,
    /// Row height (horizontal) or column width (vertical).
    line_extent: f64,
}

/// A positioned single-line text.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    /// Text.
    pub text: String,
    /// Anchor position; text is vertically centered on it.
    pub position: Point,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
}

/// One placed legend item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItemLayout {
    /// Index into [`CategoryLegendConfig::items`].
    pub index: usize,
    /// The item's stable id.
    pub id: Option<String>,
    /// Item box, aligned to its row height or column width.
    pub bounds: Rect,
    /// Marker drawn for this item.
    pub marker: Marker,
    /// Marker center.
    pub marker_center: Point,
    /// Name text.
    pub name: PlacedText,
    /// Value text, when values are shown.
    pub value: Option<PlacedText>,
}

/// Screen-space geometry of a category legend.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryLegendLayout {
    /// Stable-id base copied from the config.
    pub id_base: u64,
    /// Placed items, in config order.
    pub items: Vec<LegendItemLayout>,
    /// Outer bounds, background included.
    pub bounds: Rect,
    frame: LegendFrame,
    name_style: TextStyle,
    value_style: Option<TextStyle>,
}

impl CategoryLegendLayout {
    /// Returns the index of the item whose box contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.items
            .iter()
            .find(|item| item.bounds.contains(point))
            .map(|item| item.index)
    }

    /// Hit-tests `point` and emits [`GuideEvent::ItemClick`] for the item under it.
    pub fn click(&self, point: Point, listeners: &mut Listeners) -> Option<usize> {
        let index = self.hit_test(point)?;
        listeners.emit(&GuideEvent::ItemClick {
            index,
            id: self.items[index].id.clone(),
        });
        Some(index)
    }

    /// Converts the layout into draw instructions.
    pub fn marks(&self) -> Vec<GuideMark> {
        let mut out = Vec::new();
        self.frame.marks(self.id_base, &mut out);
        for item in &self.items {
            let i = item.index as u64;
            out.push(GuideMark::marker(
                self.id_base + MARKER_ID_OFFSET + i,
                z_order::LEGEND_SWATCHES,
                &item.marker,
                item.marker_center,
            ));
            out.push(GuideMark::text(
                self.id_base + NAME_ID_OFFSET + i,
                z_order::LEGEND_LABELS,
                item.name.position,
                item.name.text.clone(),
                item.name.anchor,
                TextBaseline::Middle,
                0.0,
                &self.name_style,
            ));
            if let (Some(value), Some(style)) = (&item.value, &self.value_style) {
                out.push(GuideMark::text(
                    self.id_base + VALUE_ID_OFFSET + i,
                    z_order::LEGEND_LABELS,
                    value.position,
                    value.text.clone(),
                    value.anchor,
                    TextBaseline::Middle,
                    0.0,
                    style,
                ));
            }
        }
        out
    }
}

shallow_patch! {
    /// Partial [`CategoryLegendConfig`]; each provided key replaces the default wholesale.
    CategoryLegendPatch for CategoryLegendConfig {
        /// See [`LegendBase::id_base`].
        id_base => base.id_base: u64,
        /// See [`LegendBase::layout`].
        layout => base.layout: LegendDirection,
        /// See [`LegendBase::x`].
        x => base.x: f64,
        /// See [`LegendBase::y`].
        y => base.y: f64,
        /// See [`LegendBase::title`].
        title => base.title: LegendTitleConfig,
        /// See [`LegendBase::background`].
        background => base.background: LegendBackgroundConfig,
        /// See [`LegendBase::offset_x`].
        offset_x => base.offset_x: f64,
        /// See [`LegendBase::offset_y`].
        offset_y => base.offset_y: f64,
        /// See [`CategoryLegendConfig::items`].
        items => items: Vec<ListItem>,
        /// See [`CategoryLegendConfig::item_spacing`].
        item_spacing => item_spacing: f64,
        /// See [`CategoryLegendConfig::item_width`].
        item_width => item_width: f64,
        /// See [`CategoryLegendConfig::item_height`].
        item_height => item_height: f64,
        /// See [`CategoryLegendConfig::item_name`].
        item_name => item_name: LegendItemNameConfig,
        /// See [`CategoryLegendConfig::item_value`].
        item_value => item_value: LegendItemValueConfig,
        /// See [`CategoryLegendConfig::max_width`].
        max_width => max_width: f64,
        /// See [`CategoryLegendConfig::max_height`].
        max_height => max_height: f64,
        /// See [`CategoryLegendConfig::marker`].
        marker => marker: LegendMarkerConfig,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::Cell as StdCell;

    use alloc::format;

    use super::*;
    use crate::config::merge_with_defaults;
    use crate::events::EventKind;
    use crate::geometry::MarkerSymbol;
    use crate::mark::MarkShape;

    /// 10 units per glyph keeps the arithmetic exact.
    struct TenPerGlyph;

    impl TextMeasurer for TenPerGlyph {
        fn measure(&self, text: &str, font_size: f64) -> Size {
            Size::new(10.0 * text.chars().count() as f64, font_size)
        }
    }

    // With 12px text, an item named "abcd" is 8 + 8 + 40 = 56 wide and 12 tall.
    fn items(n: usize) -> Vec<ListItem> {
        (0..n)
            .map(|i| ListItem::new("abcd", i as f64).with_id(format!("item-{i}")))
            .collect()
    }

    #[test]
    fn horizontal_items_flow_left_to_right() {
        let layout = CategoryLegendConfig::new(items(3))
            .with_item_spacing(10.0)
            .layout(&TenPerGlyph);
        let xs: Vec<f64> = layout.items.iter().map(|i| i.bounds.x0).collect();
        assert_eq!(xs, [0.0, 66.0, 132.0]);
        assert!(layout.items.iter().all(|i| i.bounds.y0 == 0.0));
        assert_eq!(layout.items[0].name.position, Point::new(16.0, 6.0));
        assert_eq!(layout.items[0].marker_center, Point::new(4.0, 6.0));
    }

    #[test]
    fn horizontal_items_wrap_at_max_width() {
        let layout = CategoryLegendConfig::new(items(3))
            .with_item_spacing(10.0)
            .with_max_width(130.0)
            .layout(&TenPerGlyph);
        let origins: Vec<(f64, f64)> = layout
            .items
            .iter()
            .map(|i| (i.bounds.x0, i.bounds.y0))
            .collect();
        // 66 + 56 fits in 130; the third item starts a row 12 + 10 lower.
        assert_eq!(origins, [(0.0, 0.0), (66.0, 0.0), (0.0, 22.0)]);
    }

    #[test]
    fn vertical_items_wrap_into_columns() {
        let layout = CategoryLegendConfig::new(items(3))
            .with_layout(LegendDirection::Vertical)
            .with_item_spacing(4.0)
            .with_max_height(30.0)
            .layout(&TenPerGlyph);
        let origins: Vec<(f64, f64)> = layout
            .items
            .iter()
            .map(|i| (i.bounds.x0, i.bounds.y0))
            .collect();
        assert_eq!(origins, [(0.0, 0.0), (0.0, 16.0), (60.0, 0.0)]);
    }

    #[test]
    fn oversized_first_item_still_gets_a_row() {
        let layout = CategoryLegendConfig::new(items(1))
            .with_max_width(10.0)
            .layout(&TenPerGlyph);
        assert_eq!(layout.items[0].bounds.origin(), Point::ZERO);
    }

    #[test]
    fn rows_align_to_the_tallest_item() {
        let big = ListItem::new("big", 0.0).with_marker(Marker {
            size: 20.0,
            ..Default::default()
        });
        let layout = CategoryLegendConfig::new([ListItem::new("small", 0.0), big])
            .layout(&TenPerGlyph);
        assert_eq!(layout.items[0].bounds.height(), 20.0);
        assert_eq!(layout.items[0].name.position.y, 10.0);
    }

    #[test]
    fn values_right_align_in_fixed_width_items() {
        let layout = CategoryLegendConfig::new([ListItem::new("a", 42.0)])
            .with_item_width(120.0)
            .with_item_value(LegendItemValueConfig {
                align_right: true,
                ..Default::default()
            })
            .layout(&TenPerGlyph);
        let value = layout.items[0].value.as_ref().unwrap();
        assert_eq!(value.text, "42");
        assert_eq!(value.anchor, TextAnchor::End);
        assert_eq!(value.position.x, 120.0);
    }

    #[test]
    fn values_follow_the_name_otherwise() {
        let layout = CategoryLegendConfig::new([ListItem::new("ab", "x")])
            .with_item_value(LegendItemValueConfig::default())
            .layout(&TenPerGlyph);
        let item = &layout.items[0];
        let value = item.value.as_ref().unwrap();
        // marker 8 + spacing 8 + name 20 + name spacing 8.
        assert_eq!(value.position.x, 44.0);
        assert_eq!(value.anchor, TextAnchor::Start);
        assert_eq!(item.bounds.width(), 54.0);
    }

    #[test]
    fn formatters_rewrite_names_and_values() {
        let numbered = ItemFormatter::new(|name, _, index| format!("{}. {name}", index + 1));
        let percent = ItemFormatter::new(|value, item: &ListItem, _| {
            match item.value.as_number() {
                Some(v) => format!("{}%", v * 100.0),
                None => value.into(),
            }
        });
        assert_eq!(numbered, numbered.clone());
        assert_ne!(numbered, percent);
        let items = [ListItem::new("ab", 0.5), ListItem::new("cd", "n/a")];
        let layout = CategoryLegendConfig::new(items)
            .with_layout(LegendDirection::Vertical)
            .with_item_name(LegendItemNameConfig {
                formatter: Some(numbered),
                ..Default::default()
            })
            .with_item_value(LegendItemValueConfig {
                formatter: Some(percent),
                ..Default::default()
            })
            .layout(&TenPerGlyph);
        let first = &layout.items[0];
        assert_eq!(first.name.text, "1. ab");
        assert_eq!(first.value.as_ref().unwrap().text, "50%");
        // The value follows the formatted name: 8 + 8 + 50 + 8.
        assert_eq!(first.value.as_ref().unwrap().position.x, 74.0);
        let second = &layout.items[1];
        assert_eq!(second.name.text, "2. cd");
        assert_eq!(second.value.as_ref().unwrap().text, "n/a");
    }

    #[test]
    fn title_and_background_surround_the_items() {
        let layout = CategoryLegendConfig::new(items(2))
            .with_position(100.0, 50.0)
            .with_title(LegendTitleConfig::new("Fruit"))
            .with_background(LegendBackgroundConfig::uniform(5.0))
            .layout(&TenPerGlyph);
        assert_eq!(layout.bounds.origin(), Point::new(100.0, 50.0));
        // Padding 5, title 12 tall, title spacing 6.
        assert_eq!(layout.items[0].bounds.origin(), Point::new(105.0, 73.0));
        assert_eq!(layout.bounds.y1, 73.0 + 12.0 + 5.0);

        let marks = layout.marks();
        assert_eq!(marks[0].z_index, z_order::LEGEND_BACKGROUND);
        assert_eq!(marks.len(), 2 + 2 * 2);
    }

    #[test]
    fn hit_test_and_click_report_the_item() {
        let layout = CategoryLegendConfig::new(items(3))
            .with_item_spacing(10.0)
            .layout(&TenPerGlyph);
        assert_eq!(layout.hit_test(Point::new(70.0, 5.0)), Some(1));
        assert_eq!(layout.hit_test(Point::new(60.0, 5.0)), None);

        let clicked = Rc::new(StdCell::new(None));
        let sink = Rc::clone(&clicked);
        let mut listeners = Listeners::new();
        listeners.subscribe(EventKind::ItemClick, move |ev| {
            if let GuideEvent::ItemClick { index, .. } = ev {
                sink.set(Some(*index));
            }
        });
        assert_eq!(layout.click(Point::new(140.0, 5.0), &mut listeners), Some(2));
        assert_eq!(clicked.get(), Some(2));
    }

    #[test]
    fn marker_symbols_map_to_shapes() {
        let square = Marker {
            symbol: MarkerSymbol::Square,
            ..Default::default()
        };
        let mark = GuideMark::marker(1, z_order::LEGEND_SWATCHES, &square, Point::new(4.0, 4.0));
        assert_eq!(mark.shape, MarkShape::Rect(Rect::new(0.0, 0.0, 8.0, 8.0)));
        let line = Marker {
            symbol: MarkerSymbol::Line,
            ..Default::default()
        };
        assert!(matches!(
            GuideMark::marker(1, z_order::LEGEND_SWATCHES, &line, Point::ZERO).shape,
            MarkShape::Line { .. }
        ));
    }

    #[test]
    fn patch_sets_optional_keys() {
        let config: CategoryLegendConfig = merge_with_defaults(CategoryLegendPatch {
            max_width: Some(200.0),
            layout: Some(LegendDirection::Vertical),
            ..Default::default()
        });
        assert_eq!(config.max_width, Some(200.0));
        assert_eq!(config.base.layout, LegendDirection::Vertical);
        assert_eq!(config.item_spacing, 24.0);
    }
}
