use std::slice;

use crate::item::{Item, ItemId, NewItem};

/// Items of one interaction cycle, in sheet row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Append a new item. Returns `None` (and changes nothing) for a blank title.
    pub fn add(&mut self, new: NewItem) -> Option<&Item> {
        let item = new.into_item()?;
        self.items.push(item);
        self.items.last()
    }

    pub fn increment_chapter(&mut self, id: ItemId) -> Option<&Item> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.chapter = item.chapter.saturating_add(1);
        Some(item)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let position = self.position(id)?;
        Some(self.items.remove(position))
    }
}

impl FromIterator<Item> for Collection {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
