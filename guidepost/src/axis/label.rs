// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label placement and collision avoidance.
//!
//! Labels are modelled as boxes that all share one rotation, so two labels overlap exactly
//! when their center offset, expressed in the label frame, is smaller than the sum of their
//! half extents on both frame axes.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::mark::{TextAnchor, TextBaseline};

/// Rotation (in degrees) tried once when tick labels collide.
pub const AUTO_ROTATE_ANGLE: f64 = -45.0;

/// Side-vector components below this magnitude center the text on that frame axis.
const ALIGN_THRESHOLD: f64 = 0.3;

/// The unit vectors of a label frame rotated by `angle` degrees.
fn frame(angle: f64) -> (Vec2, Vec2) {
    let theta = angle.to_radians();
    let (sin, cos) = (theta.sin(), theta.cos());
    (Vec2::new(cos, sin), Vec2::new(-sin, cos))
}

/// Picks the text alignment that keeps a label on the `side` of its anchor point.
pub(crate) fn align_to_side(side: Vec2, angle: f64) -> (TextAnchor, TextBaseline) {
    let (u, v) = frame(angle);
    let along = side.dot(u);
    let across = side.dot(v);
    let anchor = if along > ALIGN_THRESHOLD {
        TextAnchor::Start
    } else if along < -ALIGN_THRESHOLD {
        TextAnchor::End
    } else {
        TextAnchor::Middle
    };
    let baseline = if across > ALIGN_THRESHOLD {
        TextBaseline::Top
    } else if across < -ALIGN_THRESHOLD {
        TextBaseline::Bottom
    } else {
        TextBaseline::Middle
    };
    (anchor, baseline)
}

/// The footprint of one rotated label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LabelBox {
    center: Point,
    half: Vec2,
    angle: f64,
}

impl LabelBox {
    /// Builds the box of a label drawn at `position` with the given alignment.
    pub(crate) fn new(
        position: Point,
        size: Size,
        anchor: TextAnchor,
        baseline: TextBaseline,
        angle: f64,
    ) -> Self {
        let (u, v) = frame(angle);
        let along = match anchor {
            TextAnchor::Start => 0.5 * size.width,
            TextAnchor::Middle => 0.0,
            TextAnchor::End => -0.5 * size.width,
        };
        let across = match baseline {
            TextBaseline::Top => 0.5 * size.height,
            TextBaseline::Middle => 0.0,
            TextBaseline::Bottom => -0.5 * size.height,
        };
        Self {
            center: position + u * along + v * across,
            half: Vec2::new(0.5 * size.width, 0.5 * size.height),
            angle,
        }
    }

    /// Returns `true` when the boxes are closer than `gap` on both frame axes.
    ///
    /// Both boxes must share a rotation.
    pub(crate) fn overlaps(&self, other: &Self, gap: f64) -> bool {
        debug_assert!(
            (self.angle - other.angle).abs() < 1e-9,
            "label boxes must share a rotation"
        );
        let (u, v) = frame(self.angle);
        let d = other.center - self.center;
        d.dot(u).abs() < self.half.x + other.half.x + gap
            && d.dot(v).abs() < self.half.y + other.half.y + gap
    }
}

/// Counts overlapping neighbour pairs.
pub(crate) fn overlap_count(boxes: &[LabelBox], gap: f64) -> usize {
    boxes
        .windows(2)
        .filter(|pair| pair[0].overlaps(&pair[1], gap))
        .count()
}

/// Chooses which labels survive when neighbours overlap.
///
/// Keeps every `n`-th label for the smallest `n` that leaves no overlap, always keeping the
/// first and the last label. The last kept multiple is dropped when it collides with the last
/// label. When even the first and last labels collide, only the first survives.
///
/// Returns the indices of the kept boxes in ascending order.
pub(crate) fn hide_overlapping(boxes: &[LabelBox], gap: f64) -> Vec<usize> {
    let len = boxes.len();
    if len <= 1 || overlap_count(boxes, gap) == 0 {
        return (0..len).collect();
    }
    let last = len - 1;
    for step in 2..len {
        let mut kept: Vec<usize> = (0..last).step_by(step).collect();
        if let Some(&tail) = kept.last()
            && tail != 0
            && boxes[tail].overlaps(&boxes[last], gap)
        {
            kept.pop();
        }
        kept.push(last);
        let clear = kept
            .windows(2)
            .all(|pair| !boxes[pair[0]].overlaps(&boxes[pair[1]], gap));
        if clear {
            return kept;
        }
    }
    alloc::vec![0]
}
