// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the layout engines.
//!
//! Engines degrade gracefully wherever a config is merely unusual (a negative radius is
//! clamped, optional decorations are skipped). A [`GuideError`] is only returned when a
//! component cannot be laid out at all; in that case no partial geometry is produced.

use thiserror::Error;

/// A structural problem with a guide configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GuideError {
    /// Geometry that cannot be placed (negative radius, non-finite coordinates, ...).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    /// A numeric interval with `min >= max`.
    #[error("invalid range: min {min} must be smaller than max {max}")]
    InvalidRange {
        /// Authored lower bound.
        min: f64,
        /// Authored upper bound.
        max: f64,
    },

    /// Fewer points, ticks, or values than an algorithm requires.
    #[error("insufficient data: {required} required, {actual} supplied")]
    InsufficientData {
        /// Minimum number of elements required.
        required: usize,
        /// Number of elements supplied.
        actual: usize,
    },
}

impl GuideError {
    pub(crate) fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = GuideError> = core::result::Result<T, E>;
