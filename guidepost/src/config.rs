// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shallow merging of partial configs over defaults.
//!
//! Hosts usually author only a handful of keys. Each config type has a matching `*Patch`
//! record whose fields are all optional; [`ShallowMerge::merge`] overlays a patch onto a
//! config **per top-level key**. A provided key replaces the whole value for that key, it is
//! never merged field-by-field: overriding `tick_line` with a patch means supplying a complete
//! `TickLineConfig`.
//!
//! Fields that are themselves optional in the config (e.g. `max_width`) can be set through a
//! patch but not cleared; build the config directly for that.

/// Overlay of a partial config onto a complete one.
pub trait ShallowMerge: Sized {
    /// The partial form of this config.
    type Patch;

    /// Replaces every key present in `patch`, leaving the others untouched.
    #[must_use]
    fn merge(self, patch: Self::Patch) -> Self;
}

/// Builds a config from its defaults and a patch.
pub fn merge_with_defaults<T: ShallowMerge + Default>(patch: T::Patch) -> T {
    T::default().merge(patch)
}

/// Declares a `*Patch` record and its [`ShallowMerge`] impl.
///
/// Each entry reads `key => path.in.config: Type`; the path lets keys of an embedded base
/// config (e.g. `base.ticks`) appear at the patch's top level.
macro_rules! shallow_patch {
    (
        $(#[$meta:meta])*
        $patch:ident for $target:ty {
            $(
                $(#[$fmeta:meta])*
                $field:ident => $($path:ident).+ : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        pub struct $patch {
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::config::ShallowMerge for $target {
            type Patch = $patch;

            fn merge(mut self, patch: $patch) -> Self {
                $(
                    if let Some(value) = patch.$field {
                        self.$($path).+ = value.into();
                    }
                )*
                self
            }
        }
    };
}

pub(crate) use shallow_patch;
