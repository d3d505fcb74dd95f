// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Shaping and glyph layout happen downstream, but label collision avoidance and legend flow
//! need text extents up front. Guides therefore take a [`TextMeasurer`]; hosts plug in their
//! shaping engine, or use [`HeuristicTextMeasurer`] for tests and rough layout.

use kurbo::Size;

/// Measures a single line of unshaped text.
pub trait TextMeasurer {
    /// Returns the extent of `text` at `font_size`, in scene coordinates.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        (**self).measure(text, font_size)
    }
}

/// A tiny heuristic measurer: ~0.6em per glyph, one em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        let width = 0.6 * font_size * text.chars().count() as f64;
        Size::new(width, font_size)
    }
}
