use std::collections::{HashMap, HashSet};

use shared::domain::{Item, ItemId};

/// Row-level difference between two collections, keyed by item id.
///
/// Ids are trusted from the server; with duplicate ids the first occurrence
/// in the old collection is the one compared against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyedDiff {
    /// Ids present before and absent now, in old order.
    pub removed: Vec<ItemId>,
    /// Positions in the new collection whose id is new.
    pub inserted: Vec<usize>,
    /// Positions in the new collection whose id existed with different content.
    pub updated: Vec<usize>,
    /// Whether retained ids appear in a different relative order.
    pub reordered: bool,
}

impl KeyedDiff {
    pub fn between(old: &[Item], new: &[Item]) -> Self {
        let mut old_by_id: HashMap<ItemId, &Item> = HashMap::with_capacity(old.len());
        for item in old {
            old_by_id.entry(item.id).or_insert(item);
        }
        let new_ids: HashSet<ItemId> = new.iter().map(|item| item.id).collect();

        let mut removed = Vec::new();
        let mut seen_removed = HashSet::new();
        for item in old {
            if !new_ids.contains(&item.id) && seen_removed.insert(item.id) {
                removed.push(item.id);
            }
        }

        let mut inserted = Vec::new();
        let mut updated = Vec::new();
        for (position, item) in new.iter().enumerate() {
            match old_by_id.get(&item.id) {
                None => inserted.push(position),
                Some(previous) if *previous != item => updated.push(position),
                Some(_) => {}
            }
        }

        let retained_old = old
            .iter()
            .filter(|item| new_ids.contains(&item.id))
            .map(|item| item.id);
        let retained_new = new
            .iter()
            .filter(|item| old_by_id.contains_key(&item.id))
            .map(|item| item.id);
        let reordered = !retained_old.eq(retained_new);

        Self {
            removed,
            inserted,
            updated,
            reordered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.inserted.is_empty()
            && self.updated.is_empty()
            && !self.reordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_collections_produce_empty_diff() {
        let items = vec![Item::new(1, "A", "a"), Item::new(2, "B", "b")];
        assert!(KeyedDiff::between(&items, &items).is_empty());
    }

    #[test]
    fn first_load_inserts_every_position() {
        let new = vec![Item::new(1, "A", "a"), Item::new(2, "B", "b")];
        let diff = KeyedDiff::between(&[], &new);
        assert_eq!(diff.inserted, vec![0, 1]);
        assert!(diff.removed.is_empty());
        assert!(!diff.reordered);
    }

    #[test]
    fn tracks_removal_insertion_update_and_order() {
        let old = vec![
            Item::new(1, "A", "a"),
            Item::new(2, "B", "b"),
            Item::new(3, "C", "c"),
        ];
        let new = vec![
            Item::new(3, "C", "c"),
            Item::new(4, "D", "d"),
            Item::new(1, "A2", "a"),
        ];

        let diff = KeyedDiff::between(&old, &new);

        assert_eq!(diff.removed, vec![ItemId(2)]);
        assert_eq!(diff.inserted, vec![1]);
        assert_eq!(diff.updated, vec![2]);
        assert!(diff.reordered);
    }

    #[test]
    fn image_url_change_counts_as_update() {
        let old = vec![Item::new(7, "Frog", "http://x/1.png")];
        let new = vec![Item::new(7, "Frog", "http://x/2.png")];
        let diff = KeyedDiff::between(&old, &new);
        assert_eq!(diff.updated, vec![0]);
        assert!(!diff.reordered);
    }
}
