//! Grouped and sorted projection of the item list
//!
//! Recomputed from scratch whenever the list changes.

use serde::Serialize;

use crate::types::Item;

/// Items sharing one category, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Canonical category identifier (not the localized label)
    pub name: String,
    pub items: Vec<Item>,
}

impl CategoryGroup {
    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}

/// Group items by category for display.
///
/// Within a group unchecked items come first, then ascending `created_at`;
/// ties keep insertion order. Groups are ordered by case-sensitive byte
/// comparison of the category string.
pub fn group_items(items: &[Item]) -> Vec<CategoryGroup> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|item| (item.checked, item.created_at));

    let mut groups: Vec<CategoryGroup> = Vec::new();
    for item in sorted {
        match groups.iter_mut().find(|group| group.name == item.category) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(CategoryGroup {
                name: item.category.clone(),
                items: vec![item.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| a.name.cmp(&b.name));
    groups
}
