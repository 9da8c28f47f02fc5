use std::sync::{Arc, PoisonError, RwLock};

use shared::domain::Item;

use crate::{
    diff::KeyedDiff,
    view::{ImageLoader, RowView},
};

/// Outcome of a collection replacement, handed to the list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatasetChange {
    pub row_count: usize,
    pub diff: KeyedDiff,
}

/// Holds the current item collection and binds rows against it.
///
/// The collection is swapped as a whole; readers always see either the old
/// or the new collection, never a mix, and a bind reads title and URL from
/// the same snapshot it checked the index against.
#[derive(Debug)]
pub struct ListPresenter {
    items: RwLock<Arc<[Item]>>,
}

impl Default for ListPresenter {
    fn default() -> Self {
        Self {
            items: RwLock::new(Arc::from(Vec::new())),
        }
    }
}

impl ListPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&self, items: Vec<Item>) -> DatasetChange {
        let next: Arc<[Item]> = items.into();
        let mut guard = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let diff = KeyedDiff::between(&guard, &next);
        let row_count = next.len();
        *guard = next;
        DatasetChange { row_count, diff }
    }

    pub fn row_count(&self) -> usize {
        self.snapshot().len()
    }

    pub fn snapshot(&self) -> Arc<[Item]> {
        Arc::clone(&self.items.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn item(&self, index: usize) -> Option<Item> {
        self.snapshot().get(index).cloned()
    }

    /// Sets the row title and requests its image.
    ///
    /// # Panics
    ///
    /// When `index` is not in `0..row_count()`.
    pub fn bind_row<R: RowView + ?Sized>(
        &self,
        index: usize,
        row: &mut R,
        loader: &dyn ImageLoader,
    ) {
        let items = self.snapshot();
        let Some(item) = items.get(index) else {
            panic!("row index {index} out of bounds for {} rows", items.len());
        };
        row.set_title(&item.title);
        let ticket = row.image_slot().bind(&item.image_url);
        loader.load(&item.image_url, ticket);
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
