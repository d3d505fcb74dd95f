// Copyright 2025 the Guidepost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identity of list items across re-layouts.
//!
//! Transition collaborators need to know which tick or legend entry "is the same" before and
//! after an update. Items are keyed by their `id`, falling back to their `name` when no id is
//! set. When a key repeats, only its first occurrence is correlated; later duplicates enter or
//! exit on their own.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::geometry::ListItem;

/// How one item moved between two item lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemTransition {
    /// Present only in the new list, at this index.
    Enter(usize),
    /// Present in both lists.
    Update {
        /// Index in the old list.
        before: usize,
        /// Index in the new list.
        after: usize,
    },
    /// Present only in the old list, at this index.
    Exit(usize),
}

fn key(item: &ListItem) -> &str {
    item.id.as_deref().unwrap_or(&item.name)
}

/// Correlates `before` and `after` by item identity.
///
/// Transitions are returned in new-list order (enters and updates), followed by exits in
/// old-list order.
pub fn correlate_items(before: &[ListItem], after: &[ListItem]) -> Vec<ItemTransition> {
    let mut old_index: HashMap<&str, usize> = HashMap::with_capacity(before.len());
    for (i, item) in before.iter().enumerate() {
        old_index.entry(key(item)).or_insert(i);
    }

    let mut matched = alloc::vec![false; before.len()];
    let mut out = Vec::with_capacity(after.len());
    for (i, item) in after.iter().enumerate() {
        match old_index.get(key(item)) {
            Some(&j) if !matched[j] => {
                matched[j] = true;
                out.push(ItemTransition::Update {
                    before: j,
                    after: i,
                });
            }
            _ => out.push(ItemTransition::Enter(i)),
        }
    }
    out.extend(
        matched
            .iter()
            .enumerate()
            .filter(|(_, m)| !**m)
            .map(|(j, _)| ItemTransition::Exit(j)),
    );
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn item(id: &str, name: &str) -> ListItem {
        ListItem::new(name, 0.0).with_id(id)
    }

    #[test]
    fn ids_win_over_names() {
        let before = [item("a", "Apples"), item("b", "Pears")];
        let after = [item("b", "Pears (renamed)"), item("c", "Plums")];
        assert_eq!(
            correlate_items(&before, &after),
            [
                ItemTransition::Update {
                    before: 1,
                    after: 0
                },
                ItemTransition::Enter(1),
                ItemTransition::Exit(0),
            ]
        );
    }

    #[test]
    fn names_are_the_fallback_key() {
        let before = [ListItem::tick("0", 0.0), ListItem::tick("5", 1.0)];
        let after = [
            ListItem::tick("0", 0.0),
            ListItem::tick("2.5", 0.5),
            ListItem::tick("5", 1.0),
        ];
        assert_eq!(
            correlate_items(&before, &after),
            [
                ItemTransition::Update {
                    before: 0,
                    after: 0
                },
                ItemTransition::Enter(1),
                ItemTransition::Update {
                    before: 1,
                    after: 2
                },
            ]
        );
    }

    #[test]
    fn duplicate_keys_match_once() {
        let before = [ListItem::tick("x", 0.0)];
        let after = [ListItem::tick("x", 0.0), ListItem::tick("x", 1.0)];
        assert_eq!(
            correlate_items(&before, &after),
            [
                ItemTransition::Update {
                    before: 0,
                    after: 0
                },
                ItemTransition::Enter(1),
            ]
        );
    }
}
